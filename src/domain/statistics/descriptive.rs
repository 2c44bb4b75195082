//! Descriptive statistics over a numeric sample.

use serde::{Deserialize, Serialize};

/// Summary of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveSummary {
    pub n: usize,
    pub mean: f64,
    /// Sample variance (n - 1 divisor); 0 when n < 2.
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl DescriptiveSummary {
    /// Summarizes a sample, or `None` when it is empty.
    pub fn from_sample(sample: &[f64]) -> Option<Self> {
        let sorted = sorted(sample);
        let mean = mean(&sorted)?;
        let variance = variance(&sorted);
        let quartiles = quartiles_sorted(&sorted)?;

        Some(Self {
            n: sorted.len(),
            mean,
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            q1: quartiles.q1,
            median: quartiles.median,
            q3: quartiles.q3,
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// First, second and third quartile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Arithmetic mean, `None` for an empty sample.
pub fn mean(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Sample variance with the n - 1 divisor.
///
/// Defined as 0 (not undefined) for n < 2; callers check n themselves.
pub fn variance(sample: &[f64]) -> f64 {
    match mean(sample) {
        Some(m) if sample.len() >= 2 => sum_of_squares(sample, m) / (sample.len() - 1) as f64,
        _ => 0.0,
    }
}

/// Sample standard deviation; 0 for n < 2.
pub fn std_dev(sample: &[f64]) -> f64 {
    variance(sample).sqrt()
}

/// Smallest value.
pub fn min(sample: &[f64]) -> Option<f64> {
    sample.iter().copied().min_by(f64::total_cmp)
}

/// Largest value.
pub fn max(sample: &[f64]) -> Option<f64> {
    sample.iter().copied().max_by(f64::total_cmp)
}

/// Percentile by linear interpolation at index `p / 100 * (n - 1)` (R-7).
///
/// # Edge Cases
/// - Empty sample: `None`
/// - `p` outside 0..=100: `None`
/// - Single value: that value for every `p`
pub fn percentile(sample: &[f64], p: f64) -> Option<f64> {
    percentile_sorted(&sorted(sample), p)
}

/// Quartiles (R-7), `None` for an empty sample.
pub fn quartiles(sample: &[f64]) -> Option<Quartiles> {
    quartiles_sorted(&sorted(sample))
}

/// Σ(x - center)².
pub(crate) fn sum_of_squares(sample: &[f64], center: f64) -> f64 {
    sample.iter().map(|x| (x - center).powi(2)).sum()
}

pub(crate) fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut values = sample.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

fn quartiles_sorted(sorted: &[f64]) -> Option<Quartiles> {
    Some(Quartiles {
        q1: percentile_sorted(sorted, 25.0)?,
        median: percentile_sorted(sorted, 50.0)?,
        q3: percentile_sorted(sorted, 75.0)?,
    })
}

fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let index = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = index - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn variance_uses_n_minus_one() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Σ(x - 5)² = 32, / 7
        assert!((variance(&data) - 32.0 / 7.0).abs() < 1e-12);
        assert!((std_dev(&data) - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn variance_below_two_observations_is_zero() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[42.0]), 0.0);
        assert_eq!(std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn percentile_interpolates_r7() {
        let data = [1.0, 2.0, 3.0, 4.0];
        // index 0.75 -> 1 + 0.75
        assert_eq!(percentile(&data, 25.0), Some(1.75));
        assert_eq!(percentile(&data, 50.0), Some(2.5));
        assert_eq!(percentile(&data, 75.0), Some(3.25));
        assert_eq!(percentile(&data, 0.0), Some(1.0));
        assert_eq!(percentile(&data, 100.0), Some(4.0));
    }

    #[test]
    fn percentile_sorts_input() {
        assert_eq!(percentile(&[9.0, 1.0, 5.0], 50.0), Some(5.0));
    }

    #[test]
    fn percentile_edge_cases() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[3.0], 10.0), Some(3.0));
        assert_eq!(percentile(&[1.0, 2.0], 101.0), None);
        assert_eq!(percentile(&[1.0, 2.0], -1.0), None);
    }

    #[test]
    fn min_max() {
        let data = [3.0, -1.0, 8.5];
        assert_eq!(min(&data), Some(-1.0));
        assert_eq!(max(&data), Some(8.5));
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn summary_of_sample() {
        let summary = DescriptiveSummary::from_sample(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(summary.n, 5);
        assert_eq!(summary.mean, 3.0);
        assert!((summary.variance - 2.5).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.iqr(), 2.0);
    }

    #[test]
    fn summary_of_empty_is_none() {
        assert!(DescriptiveSummary::from_sample(&[]).is_none());
    }

    #[test]
    fn summary_of_single_value_has_zero_spread() {
        let summary = DescriptiveSummary::from_sample(&[7.0]).unwrap();
        assert_eq!(summary.variance, 0.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.q1, 7.0);
        assert_eq!(summary.q3, 7.0);
    }
}
