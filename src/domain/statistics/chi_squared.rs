//! Chi-squared test of independence between two categorical fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::distributions::chi_squared_p;
use super::StatisticsError;

/// Expected counts below this are "low" under Cochran's rule.
pub const LOW_EXPECTED_COUNT: f64 = 5.0;

/// Share of low-expected cells above which the result carries a warning.
pub const MAX_LOW_EXPECTED_FRACTION: f64 = 0.2;

/// A named categorical variable, one entry per participant.
///
/// `None` and blank strings are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalField {
    pub name: String,
    pub values: Vec<Option<String>>,
}

impl CategoricalField {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    fn value_at(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Observed and expected counts of a cross-tabulation.
///
/// Labels are sorted; `observed[r][c]` counts rows with `row_labels[r]` and `column_labels[c]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContingencyTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub observed: Vec<Vec<u64>>,
    pub expected: Vec<Vec<f64>>,
    pub row_totals: Vec<u64>,
    pub column_totals: Vec<u64>,
    pub grand_total: u64,
}

impl ContingencyTable {
    /// Cross-tabulates the participants that have both values present.
    pub fn from_fields(rows: &CategoricalField, columns: &CategoricalField) -> Self {
        let pairs: Vec<(&str, &str)> = (0..rows.values.len())
            .filter_map(|i| Some((rows.value_at(i)?, columns.value_at(i)?)))
            .collect();

        let row_labels: Vec<String> = pairs
            .iter()
            .map(|(r, _)| *r)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect();
        let column_labels: Vec<String> = pairs
            .iter()
            .map(|(_, c)| *c)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect();

        let mut observed = vec![vec![0u64; column_labels.len()]; row_labels.len()];
        for (r, c) in &pairs {
            let (Ok(ri), Ok(ci)) = (
                row_labels.binary_search_by(|l| l.as_str().cmp(r)),
                column_labels.binary_search_by(|l| l.as_str().cmp(c)),
            ) else {
                continue;
            };
            observed[ri][ci] += 1;
        }

        Self::tabulate(row_labels, column_labels, observed)
    }

    /// Derives totals and expected counts from an observed matrix.
    ///
    /// # Errors
    /// - `InvalidInput`: `observed` is not `row_labels.len()` rows of
    ///   `column_labels.len()` cells
    pub fn from_observed(
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        observed: Vec<Vec<u64>>,
    ) -> Result<Self, StatisticsError> {
        check_shape(row_labels.len(), column_labels.len(), &observed)?;
        Ok(Self::tabulate(row_labels, column_labels, observed))
    }

    fn tabulate(
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        observed: Vec<Vec<u64>>,
    ) -> Self {
        let row_totals: Vec<u64> = observed.iter().map(|row| row.iter().sum()).collect();
        let column_totals: Vec<u64> = (0..column_labels.len())
            .map(|c| observed.iter().map(|row| row[c]).sum())
            .collect();
        let grand_total: u64 = row_totals.iter().sum();

        let expected = row_totals
            .iter()
            .map(|&rt| {
                column_totals
                    .iter()
                    .map(|&ct| {
                        if grand_total == 0 {
                            0.0
                        } else {
                            rt as f64 * ct as f64 / grand_total as f64
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            row_labels,
            column_labels,
            observed,
            expected,
            row_totals,
            column_totals,
            grand_total,
        }
    }

    /// (rows - 1) * (columns - 1).
    pub fn degrees_of_freedom(&self) -> usize {
        self.row_labels.len().saturating_sub(1) * self.column_labels.len().saturating_sub(1)
    }

    pub fn cell_count(&self) -> usize {
        self.row_labels.len() * self.column_labels.len()
    }

    /// Checks that every matrix agrees with the label counts.
    fn check_consistent(&self) -> Result<(), StatisticsError> {
        let (rows, columns) = (self.row_labels.len(), self.column_labels.len());
        check_shape(rows, columns, &self.observed)?;
        if self.expected.len() != rows
            || self.expected.iter().any(|row| row.len() != columns)
            || self.row_totals.len() != rows
            || self.column_totals.len() != columns
        {
            return Err(StatisticsError::invalid(format!(
                "Expected counts or totals do not match a {}x{} table",
                rows, columns
            )));
        }
        Ok(())
    }
}

fn check_shape(rows: usize, columns: usize, observed: &[Vec<u64>]) -> Result<(), StatisticsError> {
    if observed.len() != rows {
        return Err(StatisticsError::invalid(format!(
            "Observed matrix has {} rows for {} row labels",
            observed.len(),
            rows
        )));
    }
    if let Some((index, row)) = observed
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != columns)
    {
        return Err(StatisticsError::invalid(format!(
            "Observed row {} has {} cells for {} column labels",
            index,
            row.len(),
            columns
        )));
    }
    Ok(())
}

/// Chi-squared test outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChiSquaredResult {
    pub table: ContingencyTable,
    pub chi_squared: f64,
    pub df: usize,
    pub p_value: f64,
    pub significant: bool,
    /// sqrt(χ² / (N * (min(R, C) - 1))).
    pub cramers_v: f64,
    pub low_expected_cells: usize,
    pub low_expected_fraction: f64,
    /// Cochran's rule annotation; the result stands either way.
    pub warning: Option<String>,
}

/// Tests independence of two categorical fields.
///
/// # Errors
/// - `InvalidInput`: the same field on both axes, or fields of different length
/// - `InsufficientData`: fewer than 2 categories on either axis
pub fn chi_squared_test(
    rows: &CategoricalField,
    columns: &CategoricalField,
    alpha: f64,
) -> Result<ChiSquaredResult, StatisticsError> {
    if rows.name == columns.name {
        return Err(StatisticsError::invalid(format!(
            "Cannot cross-tabulate '{}' against itself",
            rows.name
        )));
    }
    if rows.values.len() != columns.values.len() {
        return Err(StatisticsError::invalid(format!(
            "Fields '{}' and '{}' differ in length ({} vs {})",
            rows.name,
            columns.name,
            rows.values.len(),
            columns.values.len()
        )));
    }

    let table = ContingencyTable::from_fields(rows, columns);
    chi_squared_from_table(table, alpha)
}

/// Runs the test on an already built table.
///
/// # Errors
/// - `InvalidInput`: matrix dimensions disagree with the label counts
/// - `InsufficientData`: fewer than 2 categories on either axis
pub fn chi_squared_from_table(
    table: ContingencyTable,
    alpha: f64,
) -> Result<ChiSquaredResult, StatisticsError> {
    table.check_consistent()?;
    if table.row_labels.len() < 2 || table.column_labels.len() < 2 {
        return Err(StatisticsError::insufficient(format!(
            "Chi-squared test needs at least 2 categories per variable, got {}x{}",
            table.row_labels.len(),
            table.column_labels.len()
        )));
    }

    let mut chi_squared = 0.0;
    let mut low_expected_cells = 0;
    for (observed_row, expected_row) in table.observed.iter().zip(&table.expected) {
        for (&o, &e) in observed_row.iter().zip(expected_row) {
            if e < LOW_EXPECTED_COUNT {
                low_expected_cells += 1;
            }
            if e > 0.0 {
                chi_squared += (o as f64 - e).powi(2) / e;
            }
        }
    }

    let df = table.degrees_of_freedom();
    let p_value = chi_squared_p(chi_squared, df);

    let min_dim = table.row_labels.len().min(table.column_labels.len()) - 1;
    let cramers_v = (chi_squared / (table.grand_total as f64 * min_dim as f64)).sqrt();

    let low_expected_fraction = low_expected_cells as f64 / table.cell_count() as f64;
    let warning = (low_expected_fraction > MAX_LOW_EXPECTED_FRACTION).then(|| {
        format!(
            "{} of {} cells ({:.0}%) have expected counts below {}; the chi-squared approximation may be unreliable",
            low_expected_cells,
            table.cell_count(),
            low_expected_fraction * 100.0,
            LOW_EXPECTED_COUNT
        )
    });

    Ok(ChiSquaredResult {
        table,
        chi_squared,
        df,
        p_value,
        significant: p_value < alpha,
        cramers_v,
        low_expected_cells,
        low_expected_fraction,
        warning,
    })
}
