//! Pearson product-moment correlation.

use serde::{Deserialize, Serialize};

use super::distributions::t_two_tailed_p;
use super::StatisticsError;

/// Pearson correlation outcome.
///
/// `r` and its derived values are `None` when either variable is constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub n: usize,
    pub r: Option<f64>,
    pub r_squared: Option<f64>,
    /// `r * sqrt((n - 2) / (1 - r²))`; `None` when undefined or unbounded (|r| = 1).
    pub t_statistic: Option<f64>,
    pub df: usize,
    pub p_value: Option<f64>,
    pub significant: bool,
    pub strength: Option<CorrelationStrength>,
}

/// Verbal label for |r|.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Negligible,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    /// Bands at 0.1 / 0.3 / 0.5 / 0.7.
    pub fn from_r(r: f64) -> Self {
        match r.abs() {
            a if a >= 0.7 => CorrelationStrength::VeryStrong,
            a if a >= 0.5 => CorrelationStrength::Strong,
            a if a >= 0.3 => CorrelationStrength::Moderate,
            a if a >= 0.1 => CorrelationStrength::Weak,
            _ => CorrelationStrength::Negligible,
        }
    }
}

/// Correlates two paired samples.
///
/// # Errors
/// - `InvalidInput`: samples differ in length
/// - `InsufficientData`: fewer than 3 pairs
pub fn pearson_correlation(
    x: &[f64],
    y: &[f64],
    alpha: f64,
) -> Result<CorrelationResult, StatisticsError> {
    let n = paired_len(x, y, "Pearson correlation")?;
    let df = n - 2;

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Ok(CorrelationResult {
            n,
            r: None,
            r_squared: None,
            t_statistic: None,
            df,
            p_value: None,
            significant: false,
            strength: None,
        });
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let r_squared = r * r;

    let (t_statistic, p_value) = if r_squared < 1.0 {
        let t = r * (df as f64 / (1.0 - r_squared)).sqrt();
        (Some(t), t_two_tailed_p(t, df))
    } else {
        (None, 0.0)
    };

    Ok(CorrelationResult {
        n,
        r: Some(r),
        r_squared: Some(r_squared),
        t_statistic,
        df,
        p_value: Some(p_value),
        significant: p_value < alpha,
        strength: Some(CorrelationStrength::from_r(r)),
    })
}

/// Validates paired samples: equal length and at least 3 pairs.
pub(crate) fn paired_len(x: &[f64], y: &[f64], test: &str) -> Result<usize, StatisticsError> {
    if x.len() != y.len() {
        return Err(StatisticsError::invalid(format!(
            "{} needs paired samples of equal length, got {} and {}",
            test,
            x.len(),
            y.len()
        )));
    }
    if x.len() < 3 {
        return Err(StatisticsError::insufficient(format!(
            "{} needs at least 3 pairs, got {}",
            test,
            x.len()
        )));
    }
    Ok(x.len())
}
