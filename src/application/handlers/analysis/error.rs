//! Errors raised by the analysis handlers.

use thiserror::Error;

use crate::ports::ParticipantReaderError;

/// Why an analysis request could not be turned into a test.
///
/// Data-shape problems found by the statistics engine are not errors here;
/// they come back as failure variants of `TestResult`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to read participants: {0}")]
    Reader(#[from] ParticipantReaderError),

    #[error("No participant has a socioeconomic field named '{0}'")]
    UnknownField(String),

    #[error("No participant has {field} = '{label}'")]
    UnknownGroup { field: String, label: String },
}
