//! Analysis query handlers.
//!
//! Handlers that read participants through the `ParticipantReader` port,
//! compute domain scores, and run the statistics engine over them.

mod describe_domains;
mod error;
mod run_analysis;
mod samples;

pub use describe_domains::{
    DescribeDomainsHandler, DescribeDomainsQuery, DomainDescription, DomainDescriptions,
    FieldFrequencies,
};
pub use error::AnalysisError;
pub use run_analysis::{
    AnalysisOutcome, AnalysisRequest, MultiGroupMethod, RunAnalysisHandler, RunAnalysisQuery,
    TwoGroupMethod,
};
pub use samples::Variable;
