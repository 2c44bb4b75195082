//! Raw answers of one participant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::QuestionId;
use crate::domain::foundation::{LikertValue, ValidationError};

/// Mapping from question to answer. Absent keys mean "not answered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResponse {
    answers: BTreeMap<QuestionId, LikertValue>,
}

impl RawResponse {
    /// Creates an empty response (nothing answered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a response from `(question, raw value)` pairs, validating each value.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (QuestionId, u8)>,
    {
        let mut response = Self::new();
        for (question, value) in pairs {
            response.answers.insert(question, LikertValue::try_new(value)?);
        }
        Ok(response)
    }

    /// Records an answer, replacing any previous one.
    pub fn answer(mut self, question: QuestionId, value: LikertValue) -> Self {
        self.answers.insert(question, value);
        self
    }

    /// Returns the raw answer to a question.
    pub fn get(&self, question: QuestionId) -> Option<LikertValue> {
        self.answers.get(&question).copied()
    }

    /// Returns the answer with reversal applied to negatively worded items.
    pub fn scored(&self, question: QuestionId) -> Option<LikertValue> {
        self.get(question).map(|value| {
            if question.is_negatively_worded() {
                value.inverted()
            } else {
                value
            }
        })
    }

    /// Number of answered questions.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Returns true if nothing was answered.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterates over answered questions in questionnaire order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, LikertValue)> + '_ {
        self.answers.iter().map(|(q, v)| (*q, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_validates_values() {
        assert!(RawResponse::from_pairs(vec![(QuestionId::Q1, 3)]).is_ok());
        assert!(RawResponse::from_pairs(vec![(QuestionId::Q1, 6)]).is_err());
    }

    #[test]
    fn scored_inverts_negative_items_only() {
        let response =
            RawResponse::from_pairs(vec![(QuestionId::Q3, 1), (QuestionId::Q10, 1)]).unwrap();
        assert_eq!(response.scored(QuestionId::Q3).unwrap().value(), 5);
        assert_eq!(response.scored(QuestionId::Q10).unwrap().value(), 1);
        assert_eq!(response.get(QuestionId::Q3).unwrap().value(), 1);
    }

    #[test]
    fn missing_answers_are_absent() {
        let response = RawResponse::new();
        assert!(response.is_empty());
        assert!(response.get(QuestionId::Q5).is_none());
        assert!(response.scored(QuestionId::Q26).is_none());
    }

    #[test]
    fn serializes_as_question_keyed_map() {
        let response =
            RawResponse::from_pairs(vec![(QuestionId::Q2, 4), (QuestionId::Q1, 5)]).unwrap();
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"Q1":5,"Q2":4}"#);

        let back: RawResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn deserialize_rejects_invalid_answer() {
        assert!(serde_json::from_str::<RawResponse>(r#"{"Q1":0}"#).is_err());
    }
}
