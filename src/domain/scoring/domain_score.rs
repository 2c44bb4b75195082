//! Per-participant domain scores.

use serde::{Deserialize, Serialize};

use crate::domain::survey::ScoreDomain;

/// The six reported scores of one participant, each on the 0-100 scale.
///
/// `None` means the score could not be computed (too many unanswered items).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainScore {
    pub overall: Option<f64>,
    pub physical: Option<f64>,
    pub psychological: Option<f64>,
    pub social: Option<f64>,
    pub environment: Option<f64>,
    pub domain_mean: Option<f64>,
}

impl DomainScore {
    /// Returns the score for a domain.
    pub fn get(&self, domain: ScoreDomain) -> Option<f64> {
        match domain {
            ScoreDomain::Overall => self.overall,
            ScoreDomain::Physical => self.physical,
            ScoreDomain::Psychological => self.psychological,
            ScoreDomain::Social => self.social,
            ScoreDomain::Environment => self.environment,
            ScoreDomain::DomainMean => self.domain_mean,
        }
    }

    /// Number of defined scores.
    pub fn defined_count(&self) -> usize {
        ScoreDomain::ALL
            .iter()
            .filter(|d| self.get(**d).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_maps_each_domain() {
        let score = DomainScore {
            overall: Some(1.0),
            physical: Some(2.0),
            psychological: Some(3.0),
            social: Some(4.0),
            environment: Some(5.0),
            domain_mean: None,
        };
        assert_eq!(score.get(ScoreDomain::Overall), Some(1.0));
        assert_eq!(score.get(ScoreDomain::Physical), Some(2.0));
        assert_eq!(score.get(ScoreDomain::Psychological), Some(3.0));
        assert_eq!(score.get(ScoreDomain::Social), Some(4.0));
        assert_eq!(score.get(ScoreDomain::Environment), Some(5.0));
        assert_eq!(score.get(ScoreDomain::DomainMean), None);
        assert_eq!(score.defined_count(), 5);
    }

    #[test]
    fn undefined_scores_serialize_as_null() {
        let json = serde_json::to_string(&DomainScore::default()).unwrap();
        assert!(json.contains("\"domainMean\":null"));
    }
}
