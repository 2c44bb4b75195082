//! Statistics module - Descriptive and inferential statistics over domain scores.
//!
//! Every test is a pure function returning `Result<Payload, StatisticsError>`;
//! callers fold it into a [`TestResult`] for presentation.
//!
//! # Components
//!
//! - `distributions` - Closed-form CDF approximations (t, F, chi-squared, normal)
//! - `descriptive` - Mean, variance, R-7 quartiles, summaries
//! - `frequency` - Categorical frequency tables
//! - `t_test`, `anova`, `correlation`, `regression` - Parametric tests
//! - `chi_squared` - Independence test with contingency table
//! - `nonparametric` - Mann-Whitney U, Kruskal-Wallis H
//! - `reliability` - Cronbach's alpha

mod anova;
mod chi_squared;
mod correlation;
pub mod descriptive;
pub mod distributions;
mod error;
mod frequency;
mod nonparametric;
mod ranks;
mod regression;
mod reliability;
mod test_result;

pub use anova::{
    holm_bonferroni, one_way_anova, AnovaResult, GroupedSample, PairwiseComparison,
    PostHocMethod, PostHocResult,
};
pub use chi_squared::{
    chi_squared_from_table, chi_squared_test, CategoricalField, ChiSquaredResult,
    ContingencyTable, LOW_EXPECTED_COUNT, MAX_LOW_EXPECTED_FRACTION,
};
pub use correlation::{pearson_correlation, CorrelationResult, CorrelationStrength};
pub use descriptive::{DescriptiveSummary, Quartiles};
pub use error::StatisticsError;
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use nonparametric::{
    kruskal_wallis, mann_whitney_u, KruskalWallisResult, MannWhitneyResult, RankedGroup,
    MIN_MANN_WHITNEY_SAMPLE,
};
pub use ranks::{midranks, Ranking};
pub use regression::{linear_regression, RegressionResult};
pub use reliability::{
    cronbach_alpha, domain_reliability, CronbachAlphaResult, ItemVariance, ReliabilityLabel,
};
pub use t_test::{labelled_welch_t_test, welch_t_test, TTestResult};
pub use test_result::{EffectMagnitude, GroupStats, TestResult};
