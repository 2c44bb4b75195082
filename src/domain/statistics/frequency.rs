//! Categorical frequency tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Count and share of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
    /// Percentage of the non-empty values (0-100).
    pub percentage: f64,
}

/// Frequencies of every distinct label, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyTable {
    pub entries: Vec<FrequencyEntry>,
    /// Number of non-empty values (the percentage base).
    pub valid_count: usize,
    /// Number of absent or blank values.
    pub missing_count: usize,
}

impl FrequencyTable {
    /// Builds the table.
    ///
    /// # Edge Cases
    /// - Blank strings count as missing, like `None`
    /// - Labels are trimmed before counting
    /// - Equal counts are ordered by label
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut missing_count = 0;

        for value in values {
            match value {
                Some(label) if !label.as_ref().trim().is_empty() => {
                    *counts.entry(label.as_ref().trim().to_string()).or_insert(0) += 1;
                }
                _ => missing_count += 1,
            }
        }

        let valid_count: usize = counts.values().sum();
        let mut entries: Vec<FrequencyEntry> = counts
            .into_iter()
            .map(|(label, count)| FrequencyEntry {
                label,
                count,
                percentage: count as f64 * 100.0 / valid_count as f64,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        Self {
            entries,
            valid_count,
            missing_count,
        }
    }

    /// Returns the entry for a label.
    pub fn get(&self, label: &str) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// The most frequent label.
    pub fn mode(&self) -> Option<&str> {
        self.entries.first().map(|e| e.label.as_str())
    }
}
