//! Uniqueness scoring.
//!
//! Per-column uniqueness is the distinct share of present values. Columns
//! inferred as identifiers escalate any duplication to a critical issue;
//! for every other type duplication is a medium observation, which means
//! low-cardinality columns (status flags, categories) will always carry one.
//! Designated key columns get a separate table-wide composite check.

use serde_json::Value;
use std::collections::HashSet;

use super::issues::{Issue, IssueKind, Severity};
use super::models::SemanticType;
use super::values::scalar_text;
use crate::dataset::Dataset;

/// Separator for composite key parts; never appears in scalar text.
const KEY_PART_SEPARATOR: char = '\u{1F}';
/// Stand-in for a missing key part, so missing parts still collide.
const MISSING_KEY_PART: &str = "\u{0}";

/// Outcome of scoring one column for uniqueness.
#[derive(Debug)]
pub struct UniquenessResult {
    /// Score on the 0-100 scale
    pub score: f64,
    /// Distinct present values
    pub distinct: u64,
    /// Issue raised when any value repeats
    pub issue: Option<Issue>,
}

/// Scores the distinct share of a column's present values.
///
/// A column with no present values scores 100.
pub fn assess(column: &str, present: &[&Value], semantic_type: SemanticType) -> UniquenessResult {
    if present.is_empty() {
        return UniquenessResult {
            score: 100.0,
            distinct: 0,
            issue: None,
        };
    }

    let total = present.len() as u64;
    let distinct = present
        .iter()
        .map(|value| scalar_text(value))
        .collect::<HashSet<_>>()
        .len() as u64;
    let score = (distinct as f64 / total as f64) * 100.0;

    let issue = (distinct < total).then(|| {
        let duplicates = total - distinct;
        if semantic_type == SemanticType::Identifier {
            let description = format!(
                "Identifier column '{}' has only {} distinct values among {} present; identifiers must be unique",
                column, distinct, total
            );
            Issue::new(IssueKind::DuplicateKey, Severity::Critical, description, column)
                .with_affected(duplicates, total)
        } else {
            let description = format!(
                "Column '{}' has {} duplicated values among {} present",
                column, duplicates, total
            );
            Issue::new(IssueKind::DuplicateValues, Severity::Medium, description, column)
                .with_affected(duplicates, total)
        }
    });

    UniquenessResult {
        score,
        distinct,
        issue,
    }
}

/// Checks that the designated key columns form a unique combination per row.
///
/// Returns a table-wide critical issue when any combination repeats. The
/// check is skipped entirely, with a warning, when a designated column does
/// not exist in the dataset; a partial key check would be misleading.
pub fn assess_key(dataset: &Dataset, key_columns: &[String]) -> Option<Issue> {
    if key_columns.is_empty() || dataset.row_count() == 0 {
        return None;
    }

    for column in key_columns {
        if !dataset.columns().contains(column) {
            tracing::warn!(
                "designated key column '{}' not found; skipping key uniqueness check",
                column
            );
            return None;
        }
    }

    let total = dataset.row_count() as u64;
    let mut combinations: HashSet<String> = HashSet::with_capacity(dataset.row_count());
    for row in dataset.rows() {
        let mut key = String::new();
        for column in key_columns {
            if !key.is_empty() {
                key.push(KEY_PART_SEPARATOR);
            }
            match row.as_object().and_then(|object| object.get(column)) {
                Some(value) if !value.is_null() => key.push_str(&scalar_text(value)),
                _ => key.push_str(MISSING_KEY_PART),
            }
        }
        combinations.insert(key);
    }

    let duplicates = total - combinations.len() as u64;
    (duplicates > 0).then(|| {
        let description = format!(
            "Designated key ({}) repeats: {} of {} rows duplicate an earlier key combination",
            key_columns.join(", "),
            duplicates,
            total
        );
        Issue::table_wide(IssueKind::DuplicateKey, Severity::Critical, description)
            .with_affected(duplicates, total)
    })
}
