//! Application layer - Queries and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! All operations here are reads: participants come in through
//! `ParticipantReader`, results go out as values.

pub mod handlers;

pub use handlers::{
    AnalysisError, AnalysisOutcome, AnalysisRequest, DescribeDomainsHandler,
    DescribeDomainsQuery, DomainDescriptions, RunAnalysisHandler, RunAnalysisQuery, Variable,
};
