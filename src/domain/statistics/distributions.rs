//! Distribution approximations behind every p-value.
//!
//! These are closed-form approximations, not exact special functions:
//! - `erf`: Abramowitz-Stegun 7.1.26, absolute error below 1.5e-7
//! - Student-t: exact for df 1 and 2, Hill's normal approximation above
//! - Chi-squared: Wilson-Hilferty cube-root normal approximation
//! - F: chi-squared transform `F * df1` fed to Wilson-Hilferty
//!
//! Results differ slightly from incomplete beta/gamma implementations,
//! mostly in the far tails and at very small degrees of freedom.

use std::f64::consts::{PI, SQRT_2};

/// Error function (Abramowitz-Stegun rational approximation).
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / SQRT_2))
}

/// Two-tailed p-value for a z-score: `2 * (1 - Φ(|z|))`.
pub fn normal_two_tailed_p(z: f64) -> f64 {
    clamp_probability(2.0 * (1.0 - normal_cdf(z.abs())))
}

/// Student-t CDF. `df` must be at least 1.
pub fn t_cdf(t: f64, df: usize) -> f64 {
    if t.is_nan() || df == 0 {
        return f64::NAN;
    }
    if t.is_infinite() {
        return if t > 0.0 { 1.0 } else { 0.0 };
    }

    match df {
        1 => 0.5 + t.atan() / PI,
        2 => 0.5 + t / (2.0 * (2.0 + t * t).sqrt()),
        _ => {
            // Hill (1970): map t onto a normal deviate.
            let n = df as f64;
            let a = n - 0.5;
            let b = 48.0 * a * a;
            let w = (a * (t * t / n).ln_1p()).sqrt();
            let z = w + (w.powi(3) + 3.0 * w) / b
                - (4.0 * w.powi(7) + 33.0 * w.powi(5) + 240.0 * w.powi(3) + 855.0 * w)
                    / (10.0 * b * (b + 0.8 * w.powi(4) + 100.0));
            normal_cdf(z.copysign(t))
        }
    }
}

/// Two-tailed p-value for a t statistic: `2 * (1 - CDF(|t|, df))`.
pub fn t_two_tailed_p(t: f64, df: usize) -> f64 {
    clamp_probability(2.0 * (1.0 - t_cdf(t.abs(), df)))
}

/// Chi-squared CDF (Wilson-Hilferty).
pub fn chi_squared_cdf(x: f64, df: usize) -> f64 {
    if x.is_nan() || df == 0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }

    let k = df as f64;
    let variance = 2.0 / (9.0 * k);
    let z = ((x / k).cbrt() - (1.0 - variance)) / variance.sqrt();
    normal_cdf(z)
}

/// Upper-tail probability of the chi-squared distribution.
pub fn chi_squared_p(x: f64, df: usize) -> f64 {
    clamp_probability(1.0 - chi_squared_cdf(x, df))
}

/// F CDF via the chi-squared transform `χ² = F * df1`.
///
/// The denominator degrees of freedom only gate the domain; the transform
/// treats them as large.
pub fn f_cdf(f: f64, df1: usize, df2: usize) -> f64 {
    if f.is_nan() || df1 == 0 || df2 == 0 {
        return f64::NAN;
    }
    if f <= 0.0 {
        return 0.0;
    }
    chi_squared_cdf(f * df1 as f64, df1)
}

/// Upper-tail probability of the F distribution (ANOVA p-value).
pub fn f_p(f: f64, df1: usize, df2: usize) -> f64 {
    clamp_probability(1.0 - f_cdf(f, df1, df2))
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        p
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {} ± {}, got {}",
            expected,
            tol,
            actual
        );
    }

    #[test]
    fn erf_reference_values() {
        assert_close(erf(0.0), 0.0, 1e-8);
        assert_close(erf(0.5), 0.520_499_877_8, 2e-7);
        assert_close(erf(1.0), 0.842_700_792_9, 2e-7);
        assert_close(erf(2.0), 0.995_322_265_0, 2e-7);
    }

    #[test]
    fn erf_is_odd() {
        for x in [0.1, 0.7, 1.3, 2.9] {
            assert_close(erf(-x), -erf(x), 1e-12);
        }
    }

    #[test]
    fn normal_cdf_reference_values() {
        assert_close(normal_cdf(0.0), 0.5, 1e-7);
        assert_close(normal_cdf(1.96), 0.975_002_1, 1e-6);
        assert_close(normal_cdf(-1.0), 0.158_655_3, 1e-6);
    }

    #[test]
    fn normal_two_tailed_at_196_is_five_percent() {
        assert_close(normal_two_tailed_p(1.96), 0.05, 1e-4);
        assert_close(normal_two_tailed_p(-1.96), 0.05, 1e-4);
        assert_close(normal_two_tailed_p(0.0), 1.0, 1e-6);
    }

    #[test]
    fn t_cdf_closed_forms() {
        assert_close(t_cdf(1.0, 1), 0.75, 1e-12);
        assert_close(t_cdf(0.0, 1), 0.5, 1e-12);
        assert_close(t_cdf(2.0, 2), 0.5 + 2.0 / (2.0 * 6.0_f64.sqrt()), 1e-12);
        assert_close(t_cdf(-2.0, 2), 1.0 - t_cdf(2.0, 2), 1e-12);
    }

    #[test]
    fn t_cdf_hill_matches_critical_values() {
        // Two-tailed 5% critical values.
        assert_close(t_two_tailed_p(2.228, 10), 0.05, 2e-3);
        assert_close(t_two_tailed_p(2.042, 30), 0.05, 2e-3);
        assert_close(t_two_tailed_p(3.182, 3), 0.05, 3e-3);
        assert_close(t_two_tailed_p(2.776, 4), 0.05, 2e-3);
    }

    #[test]
    fn t_cdf_is_symmetric_and_centered() {
        assert_close(t_cdf(0.0, 12), 0.5, 1e-8);
        assert_close(t_cdf(-1.5, 12), 1.0 - t_cdf(1.5, 12), 1e-9);
    }

    #[test]
    fn t_cdf_handles_infinite_statistic() {
        assert_eq!(t_cdf(f64::INFINITY, 5), 1.0);
        assert_eq!(t_cdf(f64::NEG_INFINITY, 5), 0.0);
        assert_eq!(t_two_tailed_p(f64::INFINITY, 5), 0.0);
        assert!(t_cdf(1.0, 0).is_nan());
    }

    #[test]
    fn chi_squared_cdf_matches_critical_values() {
        assert_close(chi_squared_cdf(18.307, 10), 0.95, 2e-3);
        assert_close(chi_squared_cdf(5.991, 2), 0.95, 5e-3);
        // Wilson-Hilferty is loosest at df = 1.
        assert_close(chi_squared_cdf(3.841, 1), 0.95, 5e-3);
    }

    #[test]
    fn chi_squared_cdf_domain_edges() {
        assert_eq!(chi_squared_cdf(0.0, 3), 0.0);
        assert_eq!(chi_squared_cdf(-1.0, 3), 0.0);
        assert_eq!(chi_squared_cdf(f64::INFINITY, 3), 1.0);
        assert!(chi_squared_cdf(1.0, 0).is_nan());
        assert_eq!(chi_squared_p(0.0, 4), 1.0);
    }

    #[test]
    fn chi_squared_cdf_is_monotone() {
        let mut previous = 0.0;
        for i in 1..200 {
            let value = chi_squared_cdf(i as f64 * 0.25, 4);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn f_cdf_uses_chi_squared_transform() {
        assert_close(f_cdf(3.0, 2, 1000), chi_squared_cdf(6.0, 2), 1e-12);
        assert_close(f_cdf(3.0, 2, 1000), 1.0 - (-3.0_f64).exp(), 5e-3);
        assert_eq!(f_cdf(0.0, 2, 10), 0.0);
        assert!(f_cdf(1.0, 2, 0).is_nan());
        assert_eq!(f_p(0.0, 3, 20), 1.0);
    }
}
