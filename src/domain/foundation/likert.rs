//! Likert value object (1-5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A single survey answer on the five-point Likert scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertValue(u8);

impl LikertValue {
    /// Lowest answer on the scale.
    pub const MIN: Self = Self(1);

    /// Highest answer on the scale.
    pub const MAX: Self = Self(5);

    /// Creates a LikertValue, returning error if outside 1..=5.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&value) {
            return Err(ValidationError::out_of_range("likert", 1, 5, value as i32));
        }
        Ok(Self(value))
    }

    /// Returns the raw answer.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the answer with the scale reversed (`6 - value`).
    pub fn inverted(&self) -> Self {
        Self(6 - self.0)
    }

    /// Returns the answer as a float for aggregation.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for LikertValue {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<LikertValue> for u8 {
    fn from(value: LikertValue) -> Self {
        value.0
    }
}

impl fmt::Display for LikertValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
