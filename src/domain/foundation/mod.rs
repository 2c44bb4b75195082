//! Foundation module - Shared value objects for the survey domain.
//!
//! - `ParticipantId` - Stable identifier of a survey participant
//! - `LikertValue` - A validated 1-5 answer
//! - `ValidationError` - Construction failures of the above

mod errors;
mod ids;
mod likert;

pub use errors::ValidationError;
pub use ids::ParticipantId;
pub use likert::LikertValue;
