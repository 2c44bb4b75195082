//! Participant records as supplied by the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::RawResponse;
use crate::domain::foundation::ParticipantId;

/// A single socioeconomic answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Numeric(f64),
    Categorical(String),
}

/// Named socioeconomic fields (sex, age, education, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocioeconomicRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl SocioeconomicRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a categorical field.
    pub fn with_category(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), FieldValue::Categorical(value.into()));
        self
    }

    /// Adds a numeric field.
    pub fn with_number(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), FieldValue::Numeric(value));
        self
    }

    /// Returns the raw field value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns true if the field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the field as a category label.
    ///
    /// Numbers are rendered as labels; blank strings count as absent.
    pub fn category(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            FieldValue::Categorical(s) if s.trim().is_empty() => None,
            FieldValue::Categorical(s) => Some(s.trim().to_string()),
            FieldValue::Numeric(n) if n.is_finite() => Some(n.to_string()),
            FieldValue::Numeric(_) => None,
        }
    }

    /// Returns the field as a finite number, parsing numeric strings.
    pub fn number(&self, name: &str) -> Option<f64> {
        let value = match self.fields.get(name)? {
            FieldValue::Numeric(n) => *n,
            FieldValue::Categorical(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// One participant's submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    pub submitted_at: DateTime<Utc>,
    pub responses: RawResponse,
    #[serde(default)]
    pub socioeconomic: SocioeconomicRecord,
}

impl ParticipantRecord {
    /// Creates a record submitted now with no socioeconomic data.
    pub fn new(responses: RawResponse) -> Self {
        Self {
            id: ParticipantId::new(),
            submitted_at: Utc::now(),
            responses,
            socioeconomic: SocioeconomicRecord::new(),
        }
    }

    /// Attaches socioeconomic data.
    pub fn with_socioeconomic(mut self, socioeconomic: SocioeconomicRecord) -> Self {
        self.socioeconomic = socioeconomic;
        self
    }

    /// Overrides the submission time.
    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }
}
