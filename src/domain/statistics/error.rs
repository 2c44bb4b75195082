//! Failure taxonomy of the statistics engine.

use thiserror::Error;

/// Why a test could not produce a result.
///
/// These are anticipated data-shape problems, returned as values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatisticsError {
    /// Sample or group sizes are below the test's minimum.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Structurally inconsistent input (mismatched lengths, zero variance in a ratio, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StatisticsError {
    /// Creates an insufficient data error.
    pub fn insufficient(message: impl Into<String>) -> Self {
        StatisticsError::InsufficientData(message.into())
    }

    /// Creates an invalid input error.
    pub fn invalid(message: impl Into<String>) -> Self {
        StatisticsError::InvalidInput(message.into())
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        match self {
            StatisticsError::InsufficientData(m) | StatisticsError::InvalidInput(m) => m,
        }
    }
}
