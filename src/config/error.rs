//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Significance level must lie strictly between 0 and 1, got {0}")]
    InvalidSignificanceLevel(f64),

    #[error("Minimum group size must be at least 1")]
    InvalidMinGroupSize,

    #[error("Log level must not be empty")]
    EmptyLogLevel,
}
