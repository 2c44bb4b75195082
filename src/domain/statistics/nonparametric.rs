//! Rank-based tests: Mann-Whitney U and Kruskal-Wallis H.

use serde::{Deserialize, Serialize};

use super::anova::GroupedSample;
use super::descriptive::percentile;
use super::distributions::{chi_squared_p, normal_two_tailed_p};
use super::ranks::midranks;
use super::{EffectMagnitude, StatisticsError};

/// Minimum observations per sample for Mann-Whitney U.
pub const MIN_MANN_WHITNEY_SAMPLE: usize = 3;

/// Mann-Whitney U outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MannWhitneyResult {
    pub n_a: usize,
    pub n_b: usize,
    pub median_a: f64,
    pub median_b: f64,
    pub rank_sum_a: f64,
    pub rank_sum_b: f64,
    pub u_a: f64,
    pub u_b: f64,
    /// min(U_a, U_b).
    pub u_statistic: f64,
    pub z_score: f64,
    pub p_value: f64,
    pub significant: bool,
    /// |z| / sqrt(N).
    pub effect_size_r: f64,
    pub effect_magnitude: EffectMagnitude,
}

/// Mann-Whitney U with the normal approximation.
///
/// `z = (U - n1*n2/2 + 0.5) / sqrt(n1*n2*(n1+n2+1)/12)` where U is the smaller statistic.
///
/// # Errors
/// - `InsufficientData`: either sample has fewer than 3 observations
pub fn mann_whitney_u(
    sample_a: &[f64],
    sample_b: &[f64],
    alpha: f64,
) -> Result<MannWhitneyResult, StatisticsError> {
    let (n_a, n_b) = (sample_a.len(), sample_b.len());
    if n_a < MIN_MANN_WHITNEY_SAMPLE || n_b < MIN_MANN_WHITNEY_SAMPLE {
        return Err(StatisticsError::insufficient(format!(
            "Mann-Whitney U needs at least {} observations per group, got {} and {}",
            MIN_MANN_WHITNEY_SAMPLE, n_a, n_b
        )));
    }

    let pooled: Vec<f64> = sample_a.iter().chain(sample_b).copied().collect();
    let ranking = midranks(&pooled);
    let rank_sum_a: f64 = ranking.ranks[..n_a].iter().sum();
    let rank_sum_b: f64 = ranking.ranks[n_a..].iter().sum();

    let (n1, n2) = (n_a as f64, n_b as f64);
    let u_a = rank_sum_a - n1 * (n1 + 1.0) / 2.0;
    let u_b = n1 * n2 - u_a;
    let u_statistic = u_a.min(u_b);

    let mean_u = n1 * n2 / 2.0;
    let sd_u = (n1 * n2 * (n1 + n2 + 1.0) / 12.0).sqrt();
    let z_score = (u_statistic - mean_u + 0.5) / sd_u;
    let p_value = normal_two_tailed_p(z_score);

    let effect_size_r = z_score.abs() / (n1 + n2).sqrt();

    Ok(MannWhitneyResult {
        n_a,
        n_b,
        median_a: percentile(sample_a, 50.0).unwrap_or(f64::NAN),
        median_b: percentile(sample_b, 50.0).unwrap_or(f64::NAN),
        rank_sum_a,
        rank_sum_b,
        u_a,
        u_b,
        u_statistic,
        z_score,
        p_value,
        significant: p_value < alpha,
        effect_size_r,
        effect_magnitude: EffectMagnitude::from_r(effect_size_r),
    })
}

/// Rank summary of one Kruskal-Wallis group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedGroup {
    pub label: String,
    pub n: usize,
    pub rank_sum: f64,
    pub mean_rank: f64,
}

/// Kruskal-Wallis H outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KruskalWallisResult {
    pub groups: Vec<RankedGroup>,
    pub n_total: usize,
    /// Tie-corrected H.
    pub h_statistic: f64,
    /// 1 - Σ(T³ - T) / (N³ - N).
    pub tie_correction: f64,
    pub df: usize,
    pub p_value: f64,
    pub significant: bool,
    /// H / (N - 1).
    pub epsilon_squared: f64,
}

/// Kruskal-Wallis H over the non-empty groups.
///
/// # Errors
/// - `InsufficientData`: fewer than 2 non-empty groups, or fewer than 3 observations in total
/// - `InvalidInput`: every observation is tied
pub fn kruskal_wallis(
    groups: &GroupedSample,
    alpha: f64,
) -> Result<KruskalWallisResult, StatisticsError> {
    let present: Vec<(&String, &Vec<f64>)> =
        groups.iter().filter(|(_, sample)| !sample.is_empty()).collect();

    if present.len() < 2 {
        return Err(StatisticsError::insufficient(format!(
            "Kruskal-Wallis needs at least 2 non-empty groups, got {}",
            present.len()
        )));
    }

    let pooled: Vec<f64> = present.iter().flat_map(|(_, s)| s.iter().copied()).collect();
    let n_total = pooled.len();
    if n_total < 3 {
        return Err(StatisticsError::insufficient(format!(
            "Kruskal-Wallis needs at least 3 observations, got {}",
            n_total
        )));
    }

    let ranking = midranks(&pooled);
    let n = n_total as f64;
    let tie_correction = 1.0 - ranking.tie_sum() / (n.powi(3) - n);
    if tie_correction <= 0.0 {
        return Err(StatisticsError::invalid(
            "All observations are tied; Kruskal-Wallis H is undefined",
        ));
    }

    let mut offset = 0;
    let mut ranked = Vec::with_capacity(present.len());
    for (label, sample) in &present {
        let rank_sum: f64 = ranking.ranks[offset..offset + sample.len()].iter().sum();
        offset += sample.len();
        ranked.push(RankedGroup {
            label: (*label).clone(),
            n: sample.len(),
            rank_sum,
            mean_rank: rank_sum / sample.len() as f64,
        });
    }

    let weighted: f64 = ranked
        .iter()
        .map(|g| g.rank_sum.powi(2) / g.n as f64)
        .sum();
    let h_raw = 12.0 / (n * (n + 1.0)) * weighted - 3.0 * (n + 1.0);
    let h_statistic = h_raw / tie_correction;

    let df = ranked.len() - 1;
    let p_value = chi_squared_p(h_statistic, df);

    Ok(KruskalWallisResult {
        groups: ranked,
        n_total,
        h_statistic,
        tie_correction,
        df,
        p_value,
        significant: p_value < alpha,
        epsilon_squared: h_statistic / (n - 1.0),
    })
}
