//! DescribeDomainsHandler - Query handler for per-domain descriptive statistics.
//!
//! Scores every matching participant and summarizes each domain, optionally
//! with frequency tables for categorical socioeconomic fields.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::samples::ScoredParticipants;
use super::AnalysisError;
use crate::domain::statistics::{DescriptiveSummary, FrequencyTable};
use crate::domain::survey::ScoreDomain;
use crate::ports::{ParticipantFilter, ParticipantReader};

/// Query for domain descriptives.
#[derive(Debug, Clone, Default)]
pub struct DescribeDomainsQuery {
    pub filter: ParticipantFilter,
    /// Categorical fields to tabulate alongside the domains.
    pub frequency_fields: Vec<String>,
}

/// Descriptives of one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDescription {
    pub domain: ScoreDomain,
    /// `None` when no participant had a defined score.
    pub summary: Option<DescriptiveSummary>,
    /// Participants whose score was undefined under the missing-data rule.
    pub undefined_count: usize,
}

/// Frequencies of one categorical field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFrequencies {
    pub field: String,
    pub table: FrequencyTable,
}

/// Result of a describe query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDescriptions {
    pub participant_count: usize,
    pub domains: Vec<DomainDescription>,
    pub frequencies: Vec<FieldFrequencies>,
}

impl DomainDescriptions {
    pub fn get(&self, domain: ScoreDomain) -> Option<&DomainDescription> {
        self.domains.iter().find(|d| d.domain == domain)
    }
}

/// Handler for domain descriptives.
pub struct DescribeDomainsHandler {
    reader: Arc<dyn ParticipantReader>,
}

impl DescribeDomainsHandler {
    pub fn new(reader: Arc<dyn ParticipantReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: DescribeDomainsQuery,
    ) -> Result<DomainDescriptions, AnalysisError> {
        let records = self.reader.list_participants(&query.filter).await?;
        let scored = ScoredParticipants::new(&records);

        for field in &query.frequency_fields {
            scored.require_field(field)?;
        }

        let domains = ScoreDomain::ALL
            .iter()
            .map(|&domain| {
                let (sample, undefined_count) = scored.domain_sample(domain);
                DomainDescription {
                    domain,
                    summary: DescriptiveSummary::from_sample(&sample),
                    undefined_count,
                }
            })
            .collect();

        let frequencies = query
            .frequency_fields
            .iter()
            .map(|field| FieldFrequencies {
                field: field.clone(),
                table: FrequencyTable::from_values(scored.categorical(field).values),
            })
            .collect();

        debug!(
            participants = scored.len(),
            fields = query.frequency_fields.len(),
            "Described domain scores"
        );

        Ok(DomainDescriptions {
            participant_count: scored.len(),
            domains,
            frequencies,
        })
    }
}
