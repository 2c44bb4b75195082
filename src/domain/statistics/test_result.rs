//! The closed set of test outcomes handed to the presentation layer.

use serde::{Deserialize, Serialize};

use super::{
    AnovaResult, ChiSquaredResult, CorrelationResult, CronbachAlphaResult, KruskalWallisResult,
    MannWhitneyResult, RegressionResult, StatisticsError, TTestResult,
};

/// Outcome of one statistical test: exactly one success payload or one failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "testType", rename_all = "camelCase")]
pub enum TestResult {
    TTest(TTestResult),
    Anova(AnovaResult),
    Correlation(CorrelationResult),
    Regression(RegressionResult),
    ChiSquared(ChiSquaredResult),
    MannWhitneyU(MannWhitneyResult),
    KruskalWallis(KruskalWallisResult),
    CronbachAlpha(CronbachAlphaResult),
    InsufficientData { message: String },
    InvalidInput { message: String },
}

impl TestResult {
    /// Stable identifier of the variant.
    pub fn test_type(&self) -> &'static str {
        match self {
            TestResult::TTest(_) => "tTest",
            TestResult::Anova(_) => "anova",
            TestResult::Correlation(_) => "correlation",
            TestResult::Regression(_) => "regression",
            TestResult::ChiSquared(_) => "chiSquared",
            TestResult::MannWhitneyU(_) => "mannWhitneyU",
            TestResult::KruskalWallis(_) => "kruskalWallis",
            TestResult::CronbachAlpha(_) => "cronbachAlpha",
            TestResult::InsufficientData { .. } => "insufficientData",
            TestResult::InvalidInput { .. } => "invalidInput",
        }
    }

    /// Returns true for the two failure variants.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TestResult::InsufficientData { .. } | TestResult::InvalidInput { .. }
        )
    }

    /// Message of a failure variant.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            TestResult::InsufficientData { message } | TestResult::InvalidInput { message } => {
                Some(message)
            }
            _ => None,
        }
    }

    /// p-value of the test, when it has one.
    pub fn p_value(&self) -> Option<f64> {
        match self {
            TestResult::TTest(r) => Some(r.p_value),
            TestResult::Anova(r) => Some(r.p_value),
            TestResult::Correlation(r) => r.p_value,
            TestResult::Regression(r) => Some(r.p_value),
            TestResult::ChiSquared(r) => Some(r.p_value),
            TestResult::MannWhitneyU(r) => Some(r.p_value),
            TestResult::KruskalWallis(r) => Some(r.p_value),
            TestResult::CronbachAlpha(_)
            | TestResult::InsufficientData { .. }
            | TestResult::InvalidInput { .. } => None,
        }
    }

    /// Whether the test rejected its null hypothesis.
    pub fn is_significant(&self) -> bool {
        match self {
            TestResult::TTest(r) => r.significant,
            TestResult::Anova(r) => r.significant,
            TestResult::Correlation(r) => r.significant,
            TestResult::Regression(r) => r.significant,
            TestResult::ChiSquared(r) => r.significant,
            TestResult::MannWhitneyU(r) => r.significant,
            TestResult::KruskalWallis(r) => r.significant,
            TestResult::CronbachAlpha(_)
            | TestResult::InsufficientData { .. }
            | TestResult::InvalidInput { .. } => false,
        }
    }
}

impl From<StatisticsError> for TestResult {
    fn from(err: StatisticsError) -> Self {
        match err {
            StatisticsError::InsufficientData(message) => TestResult::InsufficientData { message },
            StatisticsError::InvalidInput(message) => TestResult::InvalidInput { message },
        }
    }
}

impl<T> From<Result<T, StatisticsError>> for TestResult
where
    T: Into<TestResult>,
{
    fn from(result: Result<T, StatisticsError>) -> Self {
        match result {
            Ok(payload) => payload.into(),
            Err(err) => err.into(),
        }
    }
}

macro_rules! impl_from_payload {
    ($($payload:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for TestResult {
                fn from(payload: $payload) -> Self {
                    TestResult::$variant(payload)
                }
            }
        )*
    };
}

impl_from_payload! {
    TTestResult => TTest,
    AnovaResult => Anova,
    CorrelationResult => Correlation,
    RegressionResult => Regression,
    ChiSquaredResult => ChiSquared,
    MannWhitneyResult => MannWhitneyU,
    KruskalWallisResult => KruskalWallis,
    CronbachAlphaResult => CronbachAlpha,
}

/// n, mean and standard deviation of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub label: String,
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl GroupStats {
    /// Summarizes a non-empty sample.
    pub(crate) fn of(label: impl Into<String>, sample: &[f64]) -> Self {
        Self {
            label: label.into(),
            n: sample.len(),
            mean: sample.iter().sum::<f64>() / sample.len() as f64,
            std_dev: super::descriptive::std_dev(sample),
        }
    }
}

/// Conventional effect-size bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    /// Cohen's bands for d: 0.2 / 0.5 / 0.8.
    pub fn from_cohens_d(d: f64) -> Self {
        Self::banded(d.abs(), [0.2, 0.5, 0.8])
    }

    /// Cohen's bands for eta-squared: 0.01 / 0.06 / 0.14.
    pub fn from_eta_squared(eta_squared: f64) -> Self {
        Self::banded(eta_squared, [0.01, 0.06, 0.14])
    }

    /// Bands for an r-type effect size: 0.1 / 0.3 / 0.5.
    pub fn from_r(r: f64) -> Self {
        Self::banded(r.abs(), [0.1, 0.3, 0.5])
    }

    fn banded(value: f64, [small, medium, large]: [f64; 3]) -> Self {
        if value >= large {
            EffectMagnitude::Large
        } else if value >= medium {
            EffectMagnitude::Medium
        } else if value >= small {
            EffectMagnitude::Small
        } else {
            EffectMagnitude::Negligible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::statistics::welch_t_test;

    #[test]
    fn error_maps_to_failure_variant() {
        let result: TestResult = StatisticsError::insufficient("too few").into();
        assert_eq!(
            result,
            TestResult::InsufficientData {
                message: "too few".to_string()
            }
        );
        assert!(result.is_failure());
        assert_eq!(result.failure_message(), Some("too few"));
        assert_eq!(result.p_value(), None);
        assert!(!result.is_significant());

        let result: TestResult = StatisticsError::invalid("bad shape").into();
        assert_eq!(result.test_type(), "invalidInput");
    }

    #[test]
    fn ok_result_maps_to_payload_variant() {
        let result = TestResult::from(welch_t_test(
            &[1.0, 2.0, 3.0],
            &[7.0, 8.0, 9.0],
            0.05,
        ));
        assert!(matches!(result, TestResult::TTest(_)));
        assert_eq!(result.test_type(), "tTest");
        assert!(!result.is_failure());
        assert!(result.p_value().is_some());
    }

    #[test]
    fn err_result_maps_to_failure_variant() {
        let result = TestResult::from(welch_t_test(&[1.0], &[2.0, 3.0], 0.05));
        assert!(matches!(result, TestResult::InsufficientData { .. }));
    }

    #[test]
    fn serializes_with_test_type_tag() {
        let result = TestResult::InvalidInput {
            message: "oops".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"testType":"invalidInput","message":"oops"}"#);

        let ttest = TestResult::from(welch_t_test(&[1.0, 2.0], &[3.0, 5.0], 0.05));
        let json = serde_json::to_string(&ttest).unwrap();
        assert!(json.starts_with(r#"{"testType":"tTest""#));
    }

    #[test]
    fn effect_magnitude_bands() {
        assert_eq!(EffectMagnitude::from_cohens_d(0.1), EffectMagnitude::Negligible);
        assert_eq!(EffectMagnitude::from_cohens_d(-0.3), EffectMagnitude::Small);
        assert_eq!(EffectMagnitude::from_cohens_d(0.5), EffectMagnitude::Medium);
        assert_eq!(EffectMagnitude::from_cohens_d(-2.4), EffectMagnitude::Large);
        assert_eq!(EffectMagnitude::from_eta_squared(0.07), EffectMagnitude::Medium);
        assert_eq!(EffectMagnitude::from_r(0.05), EffectMagnitude::Negligible);
    }

    #[test]
    fn group_stats_of_sample() {
        let stats = GroupStats::of("g", &[2.0, 4.0, 6.0]);
        assert_eq!(stats.label, "g");
        assert_eq!(stats.n, 3);
        assert_eq!(stats.mean, 4.0);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }
}
