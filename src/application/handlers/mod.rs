//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    AnalysisError, AnalysisOutcome, AnalysisRequest, DescribeDomainsHandler,
    DescribeDomainsQuery, DomainDescriptions, RunAnalysisHandler, RunAnalysisQuery, Variable,
};
