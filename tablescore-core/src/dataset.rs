//! In-memory tabular dataset model.
//!
//! A [`Dataset`] is the single input shape the scoring engine accepts: a list
//! of named columns plus rows represented as JSON objects. Cells are scalar
//! JSON values; a key that is absent from a row is treated the same way as an
//! explicit `null` by the scorers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::error::{Result, TablescoreError};

/// A rectangular dataset ready for quality analysis.
///
/// Construction through [`Dataset::new`] or [`Dataset::from_rows`] validates
/// the structural contract up front, so analysis over a constructed dataset
/// only fails if the value was built through `Deserialize` and never checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names in presentation order
    columns: Vec<String>,
    /// Rows as JSON objects keyed by column name
    rows: Vec<Value>,
}

impl Dataset {
    /// Creates a dataset from explicit columns and rows, validating both.
    ///
    /// # Errors
    /// Returns `TablescoreError::InvalidDataset` if the column list is empty
    /// or duplicated, a row is not a JSON object, a row carries a key that is
    /// not a declared column, or a cell holds an array or nested object.
    pub fn new(columns: Vec<String>, rows: Vec<Value>) -> Result<Self> {
        let dataset = Self { columns, rows };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Creates a dataset from JSON object rows alone.
    ///
    /// The column set is the union of keys across all rows, in alphabetical
    /// order. An empty row list cannot name any columns and is rejected.
    ///
    /// # Errors
    /// Returns `TablescoreError::InvalidDataset` under the same conditions as
    /// [`Dataset::new`], or when `rows` is empty.
    pub fn from_rows(rows: Vec<Value>) -> Result<Self> {
        let mut names: BTreeSet<String> = BTreeSet::new();
        for (index, row) in rows.iter().enumerate() {
            let object = row.as_object().ok_or_else(|| {
                TablescoreError::invalid_dataset(format!(
                    "row {} is not a JSON object",
                    index + 1
                ))
            })?;
            names.extend(object.keys().cloned());
        }

        if names.is_empty() {
            return Err(TablescoreError::invalid_dataset(
                "cannot derive columns from an empty row set; use Dataset::new with explicit columns",
            ));
        }

        Self::new(names.into_iter().collect(), rows)
    }

    /// Checks the structural contract of this dataset.
    ///
    /// # Errors
    /// Returns `TablescoreError::InvalidDataset` describing the first
    /// violation found.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(TablescoreError::invalid_dataset(
                "dataset declares no columns",
            ));
        }

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for name in &self.columns {
            if name.trim().is_empty() {
                return Err(TablescoreError::invalid_dataset(
                    "column names must not be empty",
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(TablescoreError::invalid_dataset(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        for (index, row) in self.rows.iter().enumerate() {
            let object = row.as_object().ok_or_else(|| {
                TablescoreError::invalid_dataset(format!(
                    "row {} is not a JSON object",
                    index + 1
                ))
            })?;

            for (key, cell) in object {
                if !seen.contains(key.as_str()) {
                    return Err(TablescoreError::invalid_dataset(format!(
                        "row {} names undeclared column '{}'",
                        index + 1,
                        key
                    )));
                }
                if cell.is_array() || cell.is_object() {
                    return Err(TablescoreError::invalid_dataset(format!(
                        "row {} column '{}' holds a non-scalar value",
                        index + 1,
                        key
                    )));
                }
            }
        }

        Ok(())
    }

    /// Column names in presentation order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows as JSON objects.
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Extracts one cell per row for the named column.
    ///
    /// `None` marks a row where the key is absent entirely; an explicit JSON
    /// `null` comes back as `Some(&Value::Null)`. Scorers treat both as
    /// missing, but the distinction is kept here so callers can tell the
    /// shapes apart.
    pub fn column_cells(&self, column: &str) -> Vec<Option<&Value>> {
        self.rows
            .iter()
            .map(|row| row.as_object().and_then(|object| object.get(column)))
            .collect()
    }
}
