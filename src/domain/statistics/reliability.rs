//! Internal-consistency reliability (Cronbach's alpha).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::descriptive::variance;
use super::StatisticsError;
use crate::domain::survey::{QuestionId, RawResponse, ScoreDomain};

/// Variance of one item across the complete cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemVariance {
    pub item: QuestionId,
    pub variance: f64,
}

/// Cronbach's alpha outcome.
///
/// `alpha` is not clamped: a negative value signals items that work against each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronbachAlphaResult {
    pub alpha: f64,
    pub item_count: usize,
    pub complete_cases: usize,
    /// Participants dropped for leaving at least one item blank.
    pub excluded_cases: usize,
    pub item_variances: Vec<ItemVariance>,
    pub item_variance_sum: f64,
    pub total_variance: f64,
    pub label: ReliabilityLabel,
}

/// Conventional interpretation of alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityLabel {
    Excellent,
    Good,
    Acceptable,
    Questionable,
    Poor,
    Unacceptable,
}

impl ReliabilityLabel {
    pub fn from_alpha(alpha: f64) -> Self {
        match alpha {
            a if a >= 0.9 => ReliabilityLabel::Excellent,
            a if a >= 0.8 => ReliabilityLabel::Good,
            a if a >= 0.7 => ReliabilityLabel::Acceptable,
            a if a >= 0.6 => ReliabilityLabel::Questionable,
            a if a >= 0.5 => ReliabilityLabel::Poor,
            _ => ReliabilityLabel::Unacceptable,
        }
    }
}

/// Cronbach's alpha over the listed items.
///
/// Only participants who answered every item take part; negatively worded
/// items are inverted first.
///
/// # Errors
/// - `InsufficientData`: fewer than 2 items or fewer than 2 complete cases
/// - `InvalidInput`: an item is listed twice
pub fn cronbach_alpha<'a, I>(
    responses: I,
    items: &[QuestionId],
) -> Result<CronbachAlphaResult, StatisticsError>
where
    I: IntoIterator<Item = &'a RawResponse>,
{
    if items.len() < 2 {
        return Err(StatisticsError::insufficient(format!(
            "Cronbach's alpha needs at least 2 items, got {}",
            items.len()
        )));
    }
    if items.iter().collect::<BTreeSet<_>>().len() != items.len() {
        return Err(StatisticsError::invalid("Item list contains duplicates"));
    }

    let mut matrix: Vec<Vec<f64>> = Vec::new();
    let mut excluded_cases = 0;
    for response in responses {
        let row: Option<Vec<f64>> = items
            .iter()
            .map(|&item| response.scored(item).map(|v| v.as_f64()))
            .collect();
        match row {
            Some(row) => matrix.push(row),
            None => excluded_cases += 1,
        }
    }

    if matrix.len() < 2 {
        return Err(StatisticsError::insufficient(format!(
            "Cronbach's alpha needs at least 2 complete cases, got {}",
            matrix.len()
        )));
    }

    let item_variances: Vec<ItemVariance> = items
        .iter()
        .enumerate()
        .map(|(column, &item)| {
            let values: Vec<f64> = matrix.iter().map(|row| row[column]).collect();
            ItemVariance {
                item,
                variance: variance(&values),
            }
        })
        .collect();
    let item_variance_sum: f64 = item_variances.iter().map(|iv| iv.variance).sum();

    let totals: Vec<f64> = matrix.iter().map(|row| row.iter().sum()).collect();
    let total_variance = variance(&totals);

    let k = items.len() as f64;
    let alpha = if total_variance == 0.0 {
        if item_variances.iter().all(|iv| iv.variance == 0.0) {
            1.0
        } else {
            0.0
        }
    } else {
        (k / (k - 1.0)) * (1.0 - item_variance_sum / total_variance)
    };

    Ok(CronbachAlphaResult {
        alpha,
        item_count: items.len(),
        complete_cases: matrix.len(),
        excluded_cases,
        item_variances,
        item_variance_sum,
        total_variance,
        label: ReliabilityLabel::from_alpha(alpha),
    })
}

/// Cronbach's alpha for the items of a scored domain.
///
/// # Errors
/// - `InvalidInput`: the domain is derived and has no items of its own
pub fn domain_reliability<'a, I>(
    responses: I,
    domain: ScoreDomain,
) -> Result<CronbachAlphaResult, StatisticsError>
where
    I: IntoIterator<Item = &'a RawResponse>,
{
    let items = domain.items().ok_or_else(|| {
        StatisticsError::invalid(format!("{} is derived and has no items", domain.label()))
    })?;
    cronbach_alpha(responses, items)
}
