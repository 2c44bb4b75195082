//! Simple linear regression (ordinary least squares).

use serde::{Deserialize, Serialize};

use super::correlation::paired_len;
use super::distributions::t_two_tailed_p;
use super::StatisticsError;

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionResult {
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    /// `1 - SSres / SStotal`; 0 when y is constant.
    pub r_squared: f64,
    /// Standard error of the estimate, `sqrt(SSres / (n - 2))`.
    pub residual_standard_error: f64,
    pub slope_standard_error: f64,
    /// `None` when the fit is exact and the slope is non-zero.
    pub t_statistic: Option<f64>,
    pub df: usize,
    pub p_value: f64,
    pub significant: bool,
}

impl RegressionResult {
    /// Predicted y for a given x.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Regresses `y` on `x`.
///
/// # Errors
/// - `InvalidInput`: samples differ in length, or x is constant
/// - `InsufficientData`: fewer than 3 pairs
pub fn linear_regression(
    x: &[f64],
    y: &[f64],
    alpha: f64,
) -> Result<RegressionResult, StatisticsError> {
    let n = paired_len(x, y, "Linear regression")?;
    let df = n - 2;

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        sxy += (xi - mean_x) * (yi - mean_y);
        sxx += (xi - mean_x).powi(2);
    }

    if sxx == 0.0 {
        return Err(StatisticsError::invalid(
            "Predictor has zero variance; the slope is undefined",
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_total: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    let ss_residual: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (yi - (intercept + slope * xi)).powi(2))
        .sum();

    let r_squared = if ss_total == 0.0 {
        0.0
    } else {
        1.0 - ss_residual / ss_total
    };

    let residual_standard_error = (ss_residual / df as f64).sqrt();
    let slope_standard_error = residual_standard_error / sxx.sqrt();

    let (t_statistic, p_value) = if slope_standard_error > 0.0 {
        let t = slope / slope_standard_error;
        (Some(t), t_two_tailed_p(t, df))
    } else if slope == 0.0 {
        (Some(0.0), 1.0)
    } else {
        (None, 0.0)
    };

    Ok(RegressionResult {
        n,
        slope,
        intercept,
        r_squared,
        residual_standard_error,
        slope_standard_error,
        t_statistic,
        df,
        p_value,
        significant: p_value < alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_known_line() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.2, 2.8, 3.6, 4.5, 5.1];
        let result = linear_regression(&x, &y, 0.05).unwrap();

        // Sxy = 7.5, Sxx = 10
        assert!((result.slope - 0.75).abs() < 1e-9);
        assert!((result.intercept - (3.64 - 0.75 * 3.0)).abs() < 1e-9);
        assert!(result.r_squared > 0.99);
        assert_eq!(result.df, 3);
        assert!(result.significant);
        assert!((result.predict(6.0) - (result.intercept + 0.75 * 6.0)).abs() < 1e-9);
    }

    #[test]
    fn exact_fit_is_maximally_significant() {
        let result = linear_regression(&[1.0, 2.0, 3.0], &[3.0, 5.0, 7.0], 0.05).unwrap();
        assert!((result.slope - 2.0).abs() < 1e-12);
        assert!((result.intercept - 1.0).abs() < 1e-12);
        assert!((result.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(result.t_statistic, None);
        assert_eq!(result.p_value, 0.0);
    }

    #[test]
    fn constant_y_has_zero_r_squared() {
        let result = linear_regression(&[1.0, 2.0, 3.0, 4.0], &[2.0, 2.0, 2.0, 2.0], 0.05).unwrap();
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.r_squared, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert!(!result.significant);
    }

    #[test]
    fn r_squared_matches_correlation_squared() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [2.0, 1.0, 4.0, 3.0, 6.0, 5.0];
        let result = linear_regression(&x, &y, 0.05).unwrap();
        let r = 14.5 / 17.5;
        assert!((result.r_squared - r * r).abs() < 1e-12);
    }

    #[test]
    fn rejects_constant_predictor() {
        let err = linear_regression(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0], 0.05).unwrap_err();
        assert!(matches!(err, StatisticsError::InvalidInput(_)));
    }

    #[test]
    fn requires_three_pairs() {
        let err = linear_regression(&[1.0, 2.0], &[1.0, 2.0], 0.05).unwrap_err();
        assert!(matches!(err, StatisticsError::InsufficientData(_)));
    }
}
