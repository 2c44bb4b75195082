//! Scoring domains and their item lists.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::QuestionId;
use super::QuestionId::*;

const OVERALL_ITEMS: &[QuestionId] = &[Q1, Q2];
const PHYSICAL_ITEMS: &[QuestionId] = &[Q3, Q4, Q10, Q15, Q16, Q17, Q18];
const PSYCHOLOGICAL_ITEMS: &[QuestionId] = &[Q5, Q6, Q7, Q11, Q19, Q26];
const SOCIAL_ITEMS: &[QuestionId] = &[Q20, Q21, Q22];
const ENVIRONMENT_ITEMS: &[QuestionId] = &[Q8, Q9, Q12, Q13, Q14, Q23, Q24, Q25];

/// One of the six reported scores.
///
/// Five are computed from items; `DomainMean` is derived from the four
/// primary domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDomain {
    Overall,
    Physical,
    Psychological,
    Social,
    Environment,
    DomainMean,
}

impl ScoreDomain {
    /// All scores in report order.
    pub const ALL: [ScoreDomain; 6] = [
        ScoreDomain::Overall,
        ScoreDomain::Physical,
        ScoreDomain::Psychological,
        ScoreDomain::Social,
        ScoreDomain::Environment,
        ScoreDomain::DomainMean,
    ];

    /// The four WHOQOL domains averaged into `DomainMean`.
    pub const PRIMARY: [ScoreDomain; 4] = [
        ScoreDomain::Physical,
        ScoreDomain::Psychological,
        ScoreDomain::Social,
        ScoreDomain::Environment,
    ];

    /// Items belonging to the domain, or `None` for the derived score.
    pub fn items(&self) -> Option<&'static [QuestionId]> {
        match self {
            ScoreDomain::Overall => Some(OVERALL_ITEMS),
            ScoreDomain::Physical => Some(PHYSICAL_ITEMS),
            ScoreDomain::Psychological => Some(PSYCHOLOGICAL_ITEMS),
            ScoreDomain::Social => Some(SOCIAL_ITEMS),
            ScoreDomain::Environment => Some(ENVIRONMENT_ITEMS),
            ScoreDomain::DomainMean => None,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreDomain::Overall => "Overall Quality of Life",
            ScoreDomain::Physical => "Physical Health",
            ScoreDomain::Psychological => "Psychological",
            ScoreDomain::Social => "Social Relationships",
            ScoreDomain::Environment => "Environment",
            ScoreDomain::DomainMean => "Mean of Domains",
        }
    }
}

impl fmt::Display for ScoreDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
