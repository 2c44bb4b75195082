//! In-Memory Participant Reader
//!
//! Holds submitted participants in memory.
//! Useful for testing and for callers that already loaded their records.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::survey::ParticipantRecord;
use crate::ports::{ParticipantFilter, ParticipantReader, ParticipantReaderError};

/// In-memory store of participant records
#[derive(Debug, Clone, Default)]
pub struct InMemoryParticipantReader {
    records: Arc<RwLock<Vec<ParticipantRecord>>>,
}

impl InMemoryParticipantReader {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with records
    pub fn with_records(records: Vec<ParticipantRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Add a participant
    pub async fn insert(&self, record: ParticipantRecord) {
        self.records.write().await.push(record);
    }

    /// Remove all participants (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Number of stored participants
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ParticipantReader for InMemoryParticipantReader {
    async fn list_participants(
        &self,
        filter: &ParticipantFilter,
    ) -> Result<Vec<ParticipantRecord>, ParticipantReaderError> {
        let records = self.records.read().await;
        let mut matching: Vec<ParticipantRecord> = records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matching.sort_by_key(|record| record.submitted_at);
        Ok(matching)
    }
}
