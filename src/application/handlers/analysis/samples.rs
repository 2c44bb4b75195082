//! Turning participant records into the samples the statistics engine takes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::AnalysisError;
use crate::domain::scoring::{DomainScore, DomainScoreCalculator};
use crate::domain::statistics::{CategoricalField, GroupedSample};
use crate::domain::survey::{ParticipantRecord, ScoreDomain};

/// A numeric quantity measured once per participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// A 0-100 domain score.
    Domain(ScoreDomain),
    /// A numeric socioeconomic field, such as age.
    Field(String),
}

impl Variable {
    pub fn field(name: impl Into<String>) -> Self {
        Variable::Field(name.into())
    }

    pub fn name(&self) -> String {
        match self {
            Variable::Domain(domain) => domain.label().to_string(),
            Variable::Field(name) => name.clone(),
        }
    }
}

impl From<ScoreDomain> for Variable {
    fn from(domain: ScoreDomain) -> Self {
        Variable::Domain(domain)
    }
}

/// Participant records paired with their computed domain scores.
pub(crate) struct ScoredParticipants<'a> {
    entries: Vec<(&'a ParticipantRecord, DomainScore)>,
}

impl<'a> ScoredParticipants<'a> {
    pub fn new(records: &'a [ParticipantRecord]) -> Self {
        let entries = records
            .iter()
            .map(|record| (record, DomainScoreCalculator::compute(&record.responses)))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails unless at least one participant carries the field.
    pub fn require_field(&self, name: &str) -> Result<(), AnalysisError> {
        if self
            .entries
            .iter()
            .any(|(record, _)| record.socioeconomic.contains(name))
        {
            Ok(())
        } else {
            Err(AnalysisError::UnknownField(name.to_string()))
        }
    }

    pub fn require_variable(&self, variable: &Variable) -> Result<(), AnalysisError> {
        match variable {
            Variable::Domain(_) => Ok(()),
            Variable::Field(name) => self.require_field(name),
        }
    }

    /// Defined values of a variable, one per participant.
    pub fn values(&self, variable: &Variable) -> Vec<Option<f64>> {
        self.entries
            .iter()
            .map(|(record, scores)| match variable {
                Variable::Domain(domain) => scores.get(*domain),
                Variable::Field(name) => record.socioeconomic.number(name),
            })
            .collect()
    }

    /// Defined values of one domain, and how many participants had none.
    pub fn domain_sample(&self, domain: ScoreDomain) -> (Vec<f64>, usize) {
        let values = self.values(&Variable::Domain(domain));
        let undefined = values.iter().filter(|v| v.is_none()).count();
        (values.into_iter().flatten().collect(), undefined)
    }

    /// Pairs where both variables are defined.
    pub fn paired(&self, x: &Variable, y: &Variable) -> (Vec<f64>, Vec<f64>) {
        self.values(x)
            .into_iter()
            .zip(self.values(y))
            .filter_map(|(x, y)| Some((x?, y?)))
            .unzip()
    }

    /// Values of `variable` split by the category each participant has in `field`.
    ///
    /// Every category present in the data gets an entry, even when none of
    /// its participants has a defined value.
    pub fn grouped(&self, field: &str, variable: &Variable) -> GroupedSample {
        let mut groups: GroupedSample = BTreeMap::new();
        for ((record, _), value) in self.entries.iter().zip(self.values(variable)) {
            if let Some(label) = record.socioeconomic.category(field) {
                let sample = groups.entry(label).or_default();
                if let Some(value) = value {
                    sample.push(value);
                }
            }
        }
        groups
    }

    pub fn categorical(&self, field: &str) -> CategoricalField {
        CategoricalField::new(
            field,
            self.entries
                .iter()
                .map(|(record, _)| record.socioeconomic.category(field))
                .collect(),
        )
    }

    pub fn records(&self) -> impl Iterator<Item = &'a ParticipantRecord> + '_ {
        self.entries.iter().map(|(record, _)| *record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::LikertValue;
    use crate::domain::survey::{QuestionId, RawResponse, SocioeconomicRecord};

    fn participant(social: u8, sex: Option<&str>, age: Option<f64>) -> ParticipantRecord {
        let value = LikertValue::try_new(social).unwrap();
        let responses = RawResponse::new()
            .answer(QuestionId::Q20, value)
            .answer(QuestionId::Q21, value)
            .answer(QuestionId::Q22, value);
        let mut socio = SocioeconomicRecord::new();
        if let Some(sex) = sex {
            socio = socio.with_category("sex", sex);
        }
        if let Some(age) = age {
            socio = socio.with_number("age", age);
        }
        ParticipantRecord::new(responses).with_socioeconomic(socio)
    }

    #[test]
    fn groups_by_category() {
        let records = vec![
            participant(5, Some("F"), Some(30.0)),
            participant(1, Some("M"), None),
            participant(3, Some("F"), Some(40.0)),
            participant(2, None, Some(50.0)),
        ];
        let scored = ScoredParticipants::new(&records);

        let social = scored.grouped("sex", &ScoreDomain::Social.into());
        assert_eq!(social["F"], vec![100.0, 50.0]);
        assert_eq!(social["M"], vec![0.0]);

        let age = scored.grouped("sex", &Variable::field("age"));
        assert_eq!(age["F"], vec![30.0, 40.0]);
        assert!(age["M"].is_empty());
    }

    #[test]
    fn pairs_only_defined_values() {
        let records = vec![
            participant(5, None, Some(30.0)),
            participant(1, None, None),
            participant(3, None, Some(40.0)),
        ];
        let scored = ScoredParticipants::new(&records);
        let (x, y) = scored.paired(&Variable::field("age"), &ScoreDomain::Social.into());
        assert_eq!(x, vec![30.0, 40.0]);
        assert_eq!(y, vec![100.0, 50.0]);
    }

    #[test]
    fn domain_sample_counts_undefined() {
        let records = vec![
            participant(4, None, None),
            ParticipantRecord::new(RawResponse::new()),
        ];
        let scored = ScoredParticipants::new(&records);
        let (sample, undefined) = scored.domain_sample(ScoreDomain::Social);
        assert_eq!(sample, vec![75.0]);
        assert_eq!(undefined, 1);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let records = vec![participant(3, Some("F"), None)];
        let scored = ScoredParticipants::new(&records);
        assert!(scored.require_field("sex").is_ok());
        assert!(matches!(
            scored.require_variable(&Variable::field("income")),
            Err(AnalysisError::UnknownField(name)) if name == "income"
        ));
    }
}
