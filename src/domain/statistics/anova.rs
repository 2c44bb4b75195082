//! One-way ANOVA with Holm-Bonferroni post-hoc comparisons.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::descriptive::sum_of_squares;
use super::distributions::{f_p, t_two_tailed_p};
use super::{EffectMagnitude, GroupStats, StatisticsError};

/// Group label to observations. Keys are unique by construction.
pub type GroupedSample = BTreeMap<String, Vec<f64>>;

/// One-way ANOVA outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnovaResult {
    pub groups: Vec<GroupStats>,
    pub ss_between: f64,
    pub ss_within: f64,
    pub ss_total: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub ms_between: f64,
    pub ms_within: f64,
    pub f_statistic: f64,
    pub p_value: f64,
    pub significant: bool,
    /// SSB / SST.
    pub eta_squared: f64,
    /// (SSB - dfB * MSW) / (SST + MSW).
    pub omega_squared: f64,
    pub effect_magnitude: EffectMagnitude,
    /// Present only when the omnibus test was significant and post-hoc was requested.
    pub post_hoc: Option<PostHocResult>,
}

/// Pairwise comparisons after a significant ANOVA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostHocResult {
    pub method: PostHocMethod,
    /// Ordered by ascending raw p-value.
    pub comparisons: Vec<PairwiseComparison>,
}

/// Multiple-comparison correction applied to the pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostHocMethod {
    HolmBonferroni,
}

/// One pair of groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseComparison {
    pub group_a: String,
    pub group_b: String,
    pub mean_difference: f64,
    pub t_statistic: f64,
    /// Unadjusted p-value.
    pub p_value: f64,
    pub adjusted_p_value: f64,
    pub significant: bool,
}

/// Tests whether group means differ.
///
/// Empty groups are ignored.
///
/// # Errors
/// - `InsufficientData`: fewer than 2 non-empty groups, or total N not above the group count
/// - `InvalidInput`: zero within-group variance (F undefined)
pub fn one_way_anova(
    groups: &GroupedSample,
    alpha: f64,
    post_hoc: bool,
) -> Result<AnovaResult, StatisticsError> {
    let samples: Vec<(&str, &[f64])> = groups
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(label, values)| (label.as_str(), values.as_slice()))
        .collect();

    let k = samples.len();
    if k < 2 {
        return Err(StatisticsError::insufficient(format!(
            "ANOVA needs at least 2 non-empty groups, got {}",
            k
        )));
    }

    let n_total: usize = samples.iter().map(|(_, v)| v.len()).sum();
    if n_total <= k {
        return Err(StatisticsError::insufficient(format!(
            "ANOVA needs more observations ({}) than groups ({})",
            n_total, k
        )));
    }

    let grand_mean =
        samples.iter().flat_map(|(_, v)| v.iter()).sum::<f64>() / n_total as f64;

    let stats: Vec<GroupStats> = samples
        .iter()
        .map(|(label, values)| GroupStats::of(*label, values))
        .collect();

    let ss_between: f64 = stats
        .iter()
        .map(|g| g.n as f64 * (g.mean - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = samples
        .iter()
        .zip(&stats)
        .map(|((_, values), g)| sum_of_squares(values, g.mean))
        .sum();
    let ss_total: f64 = samples
        .iter()
        .map(|(_, values)| sum_of_squares(values, grand_mean))
        .sum();

    if ss_within == 0.0 {
        return Err(StatisticsError::invalid(
            "Within-group variance is zero; the F ratio is undefined",
        ));
    }

    let df_between = k - 1;
    let df_within = n_total - k;
    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    let f_statistic = ms_between / ms_within;
    let p_value = f_p(f_statistic, df_between, df_within);
    let significant = p_value < alpha;

    let eta_squared = ss_between / ss_total;
    let omega_squared = (ss_between - df_between as f64 * ms_within) / (ss_total + ms_within);

    let post_hoc = (significant && post_hoc)
        .then(|| holm_post_hoc(&stats, ms_within, df_within, alpha));

    Ok(AnovaResult {
        groups: stats,
        ss_between,
        ss_within,
        ss_total,
        df_between,
        df_within,
        ms_between,
        ms_within,
        f_statistic,
        p_value,
        significant,
        eta_squared,
        omega_squared,
        effect_magnitude: EffectMagnitude::from_eta_squared(eta_squared),
        post_hoc,
    })
}

/// Holm step-down adjustment.
///
/// Returns adjusted values in input order. The k-th smallest raw value
/// (1-based) is multiplied by `m - k + 1`, capped at 1, and raised to the
/// running maximum so adjusted values never decrease along the sorted order.
pub fn holm_bonferroni(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; m];
    let mut running_max: f64 = 0.0;
    for (rank, &index) in order.iter().enumerate() {
        let value = (p_values[index] * (m - rank) as f64).min(1.0);
        running_max = running_max.max(value);
        adjusted[index] = running_max;
    }
    adjusted
}

/// Pairwise t-tests on the pooled within-group variance, Holm-adjusted.
fn holm_post_hoc(
    groups: &[GroupStats],
    ms_within: f64,
    df_within: usize,
    alpha: f64,
) -> PostHocResult {
    let mut comparisons = Vec::new();
    for (i, a) in groups.iter().enumerate() {
        for b in &groups[i + 1..] {
            let mean_difference = a.mean - b.mean;
            let se = (ms_within * (1.0 / a.n as f64 + 1.0 / b.n as f64)).sqrt();
            let t_statistic = mean_difference / se;
            comparisons.push(PairwiseComparison {
                group_a: a.label.clone(),
                group_b: b.label.clone(),
                mean_difference,
                t_statistic,
                p_value: t_two_tailed_p(t_statistic, df_within),
                adjusted_p_value: 0.0,
                significant: false,
            });
        }
    }

    let raw: Vec<f64> = comparisons.iter().map(|c| c.p_value).collect();
    for (comparison, adjusted) in comparisons.iter_mut().zip(holm_bonferroni(&raw)) {
        comparison.adjusted_p_value = adjusted;
        comparison.significant = adjusted < alpha;
    }
    comparisons.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));

    PostHocResult {
        method: PostHocMethod::HolmBonferroni,
        comparisons,
    }
}
