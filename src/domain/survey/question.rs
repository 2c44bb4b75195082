//! Question identifiers of the 26-item instrument.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the 26 fixed WHOQOL-BREF items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
    Q11,
    Q12,
    Q13,
    Q14,
    Q15,
    Q16,
    Q17,
    Q18,
    Q19,
    Q20,
    Q21,
    Q22,
    Q23,
    Q24,
    Q25,
    Q26,
}

/// Items whose wording is negative (pain, dependence on treatment,
/// negative feelings). Their answers are reversed before aggregation.
pub const NEGATIVELY_WORDED: &[QuestionId] = &[QuestionId::Q3, QuestionId::Q4, QuestionId::Q26];

impl QuestionId {
    /// All items in questionnaire order.
    pub const ALL: [QuestionId; 26] = [
        QuestionId::Q1,
        QuestionId::Q2,
        QuestionId::Q3,
        QuestionId::Q4,
        QuestionId::Q5,
        QuestionId::Q6,
        QuestionId::Q7,
        QuestionId::Q8,
        QuestionId::Q9,
        QuestionId::Q10,
        QuestionId::Q11,
        QuestionId::Q12,
        QuestionId::Q13,
        QuestionId::Q14,
        QuestionId::Q15,
        QuestionId::Q16,
        QuestionId::Q17,
        QuestionId::Q18,
        QuestionId::Q19,
        QuestionId::Q20,
        QuestionId::Q21,
        QuestionId::Q22,
        QuestionId::Q23,
        QuestionId::Q24,
        QuestionId::Q25,
        QuestionId::Q26,
    ];

    /// Returns the item number (1-based).
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    /// Looks up an item by its 1-based number.
    pub fn from_number(number: u8) -> Result<Self, ValidationError> {
        if !(1..=26).contains(&number) {
            return Err(ValidationError::out_of_range("question_id", 1, 26, number as i32));
        }
        Ok(Self::ALL[(number - 1) as usize])
    }

    /// Returns true if the item is scored in reverse.
    pub fn is_negatively_worded(&self) -> bool {
        NEGATIVELY_WORDED.contains(self)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

impl FromStr for QuestionId {
    type Err = ValidationError;

    /// Parses `"Q7"` or `"q7"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("question_id"));
        }
        let digits = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .ok_or_else(|| ValidationError::invalid_format("question_id", "expected Q1..Q26"))?;
        let number: u8 = digits
            .parse()
            .map_err(|_| ValidationError::invalid_format("question_id", "expected Q1..Q26"))?;
        Self::from_number(number)
    }
}
