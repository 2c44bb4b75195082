//! Domain layer containing scoring and statistics.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `survey` - WHOQOL-BREF questions, answers, domains and participant records
//! - `scoring` - Raw answers to 0-100 domain scores
//! - `statistics` - Descriptive statistics, inferential tests, reliability

pub mod foundation;
pub mod scoring;
pub mod statistics;
pub mod survey;
