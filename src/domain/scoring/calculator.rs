//! Domain Score Calculator - Raw Likert answers to 0-100 domain scores.

use super::DomainScore;
use crate::domain::survey::{QuestionId, RawResponse, ScoreDomain};

/// Domains with more items than this need a minimum answered fraction;
/// smaller ones tolerate a single missing item.
pub const SMALL_DOMAIN_MAX_ITEMS: usize = 4;

/// Minimum answered share (in percent) for domains above `SMALL_DOMAIN_MAX_ITEMS`.
pub const MIN_ANSWERED_PERCENT: usize = 80;

/// Stateless scoring functions.
pub struct DomainScoreCalculator;

impl DomainScoreCalculator {
    /// Computes all six scores for one participant.
    ///
    /// `domain_mean` averages whichever of the four primary domains are
    /// defined; it ignores the two-item overall score.
    pub fn compute(response: &RawResponse) -> DomainScore {
        let score = |domain: ScoreDomain| {
            domain
                .items()
                .and_then(|items| Self::score_items(response, items))
        };

        let mut result = DomainScore {
            overall: score(ScoreDomain::Overall),
            physical: score(ScoreDomain::Physical),
            psychological: score(ScoreDomain::Psychological),
            social: score(ScoreDomain::Social),
            environment: score(ScoreDomain::Environment),
            domain_mean: None,
        };

        let defined: Vec<f64> = ScoreDomain::PRIMARY
            .iter()
            .filter_map(|d| result.get(*d))
            .collect();
        if !defined.is_empty() {
            result.domain_mean = Some(defined.iter().sum::<f64>() / defined.len() as f64);
        }

        result
    }

    /// Scores an arbitrary item list, or `None` when too few items were answered.
    ///
    /// # Algorithm
    /// Mean of the answered items (negatively worded ones reversed), then
    /// `(mean - 1) * 25`.
    pub fn score_items(response: &RawResponse, items: &[QuestionId]) -> Option<f64> {
        let answered: Vec<f64> = items
            .iter()
            .filter_map(|q| response.scored(*q))
            .map(|v| v.as_f64())
            .collect();

        if !Self::is_computable(items.len(), answered.len()) {
            return None;
        }

        let mean = answered.iter().sum::<f64>() / answered.len() as f64;
        Some(Self::transform(mean))
    }

    /// Missing-data tolerance.
    ///
    /// # Edge Cases
    /// - More than 4 items: at least 80% answered
    /// - 4 items or fewer: at most one missing, so a 4-item domain accepts 75%
    /// - Nothing answered: never computable
    pub fn is_computable(item_count: usize, answered: usize) -> bool {
        if answered == 0 || answered > item_count {
            return false;
        }
        if item_count > SMALL_DOMAIN_MAX_ITEMS {
            answered * 100 >= item_count * MIN_ANSWERED_PERCENT
        } else {
            answered + 1 >= item_count
        }
    }

    /// Maps a 1-5 mean onto the 0-100 scale.
    pub fn transform(mean: f64) -> f64 {
        (mean - 1.0) * 25.0
    }
}
