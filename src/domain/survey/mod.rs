//! Survey module - The WHOQOL-BREF instrument vocabulary.
//!
//! Question identifiers, raw answers, scoring domains, and the participant
//! records handed over by the persistence layer.

mod participant;
mod question;
mod response;
mod score_domain;

pub use participant::{FieldValue, ParticipantRecord, SocioeconomicRecord};
pub use question::{QuestionId, NEGATIVELY_WORDED};
pub use response::RawResponse;
pub use score_domain::ScoreDomain;
