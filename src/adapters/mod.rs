//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory participant storage

pub mod memory;

pub use memory::InMemoryParticipantReader;
