//! Ports - Interfaces for external dependencies.
//!
//! The analysis layer never touches storage directly; it reads submitted
//! participants through `ParticipantReader`. Adapters implement the port.

mod participant_reader;

pub use participant_reader::{ParticipantFilter, ParticipantReader, ParticipantReaderError};
