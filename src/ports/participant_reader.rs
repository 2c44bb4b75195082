use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::survey::ParticipantRecord;

/// Read-only port over stored survey submissions.
#[async_trait]
pub trait ParticipantReader: Send + Sync {
    /// Lists the participants matching the filter, in submission order.
    async fn list_participants(
        &self,
        filter: &ParticipantFilter,
    ) -> Result<Vec<ParticipantRecord>, ParticipantReaderError>;
}

/// Narrows the participant set by submission time.
///
/// Both bounds are inclusive. The default filter matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFilter {
    pub submitted_from: Option<DateTime<Utc>>,
    pub submitted_until: Option<DateTime<Utc>>,
}

impl ParticipantFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn since(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_from = Some(at);
        self
    }

    pub fn until(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_until = Some(at);
        self
    }

    /// Returns true if the record falls within the bounds.
    pub fn matches(&self, record: &ParticipantRecord) -> bool {
        self.submitted_from.map_or(true, |from| record.submitted_at >= from)
            && self
                .submitted_until
                .map_or(true, |until| record.submitted_at <= until)
    }
}

/// Errors that can occur while reading participants
#[derive(Debug, thiserror::Error)]
pub enum ParticipantReaderError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt participant record: {0}")]
    CorruptRecord(String),
}
