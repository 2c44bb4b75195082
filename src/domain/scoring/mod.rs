//! Scoring module - Raw answers to domain scores.
//!
//! Pure functions; no I/O, no shared state.

mod calculator;
mod domain_score;

pub use calculator::{DomainScoreCalculator, MIN_ANSWERED_PERCENT, SMALL_DOMAIN_MAX_ITEMS};
pub use domain_score::DomainScore;
