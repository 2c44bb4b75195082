//! Memory Adapters
//!
//! - **InMemoryParticipantReader** - Participants held in memory (testing/embedding)

mod in_memory_participant_reader;

pub use in_memory_participant_reader::InMemoryParticipantReader;
