//! Consistency scoring.
//!
//! Consistency measures representational uniformity, independent of
//! correctness. Pattern-bearing types (dates, numbers, phones, emails,
//! identifiers) score by the share of values matching the single most
//! common structural shape; vocabulary types (categorical, text, boolean)
//! score by casing and whitespace agreement within each value group.

use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::issues::{Issue, IssueKind, Severity};
use super::models::SemanticType;
use super::values::scalar_text;

/// Maps a character to its structural class.
///
/// Digits collapse to `#`, ASCII letters to `A`/`a` by case; everything
/// else (separators, punctuation, non-ASCII) represents itself.
fn char_class(c: char) -> char {
    if c.is_ascii_digit() {
        '#'
    } else if c.is_ascii_uppercase() {
        'A'
    } else if c.is_ascii_lowercase() {
        'a'
    } else {
        c
    }
}

/// Exact structural shape: one class character per input character.
///
/// Keeps digit-group lengths, so "2024-01-15" and "15/01/2024" map to
/// different shapes while "2024-01-15" and "2023-12-31" collide.
fn shape_signature(text: &str) -> String {
    text.chars().map(char_class).collect()
}

/// Collapsed structural shape: consecutive equal classes deduplicated.
///
/// Forgives length variation inside a run, so "AB-123" and "XYZ-45678"
/// share a shape while "AB-123" and "AB_123" do not.
fn collapsed_signature(text: &str) -> String {
    let mut signature = String::new();
    let mut last: Option<char> = None;
    for class in text.chars().map(char_class) {
        if last != Some(class) {
            signature.push(class);
            last = Some(class);
        }
    }
    signature
}

/// Outcome of scoring one column for consistency.
#[derive(Debug)]
pub struct ConsistencyResult {
    /// Score on the 0-100 scale
    pub score: f64,
    /// Distinct shapes or value groups observed
    pub patterns: u64,
    /// Issue raised when any value deviates from its dominant form
    pub issue: Option<Issue>,
}

impl ConsistencyResult {
    fn uniform() -> Self {
        Self {
            score: 100.0,
            patterns: 0,
            issue: None,
        }
    }
}

/// Scores the representational uniformity of a column's present values.
///
/// Unknown columns and columns with no present values score 100.
pub fn assess(column: &str, present: &[&Value], semantic_type: SemanticType) -> ConsistencyResult {
    if present.is_empty() {
        return ConsistencyResult::uniform();
    }

    let total = present.len() as u64;
    let (conforming, patterns, flavor) = match semantic_type {
        SemanticType::Date | SemanticType::Phone => {
            let counts = count_by(present, shape_signature);
            (dominant_total(&counts), counts.len() as u64, "structural pattern")
        }
        SemanticType::Numeric
        | SemanticType::Integer
        | SemanticType::Email
        | SemanticType::Identifier => {
            let counts = count_by(present, collapsed_signature);
            (dominant_total(&counts), counts.len() as u64, "structural pattern")
        }
        SemanticType::Categorical | SemanticType::Text | SemanticType::Boolean => {
            (casing_conformance(present), group_count(present), "formatting")
        }
        SemanticType::Unknown => return ConsistencyResult::uniform(),
    };

    let score = (conforming as f64 / total as f64) * 100.0;
    let nonconforming = total - conforming;

    let issue = (nonconforming > 0).then(|| {
        let ratio = nonconforming as f64 / total as f64;
        let description = format!(
            "Column '{}' has {} of {} values deviating from the dominant {} ({:.1}%)",
            column,
            nonconforming,
            total,
            flavor,
            ratio * 100.0
        );
        Issue::new(
            IssueKind::FormatInconsistency,
            Severity::Medium,
            description,
            column,
        )
        .with_affected(nonconforming, total)
    });

    ConsistencyResult {
        score,
        patterns,
        issue,
    }
}

/// Counts values by a derived signature.
fn count_by(present: &[&Value], signature: impl Fn(&str) -> String) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for value in present {
        let text = scalar_text(value);
        *counts.entry(signature(text.trim())).or_insert(0) += 1;
    }
    counts
}

/// Share of values matching the most common signature.
fn dominant_total(counts: &HashMap<String, u64>) -> u64 {
    counts.values().copied().max().unwrap_or(0)
}

/// Conforming count for vocabulary columns.
///
/// Values are grouped by their trimmed, lowercased form; within each group
/// the most frequent raw spelling is the canonical one and only values
/// written exactly that way conform. A column where every raw spelling is
/// unique is fully consistent: no value disagrees with a sibling.
fn casing_conformance(present: &[&Value]) -> u64 {
    let mut groups: HashMap<String, HashMap<String, u64>> = HashMap::new();
    for value in present {
        let text = scalar_text(value);
        let group_key = text.trim().to_lowercase();
        *groups
            .entry(group_key)
            .or_default()
            .entry(text.into_owned())
            .or_insert(0) += 1;
    }

    groups
        .values()
        .map(|variants| variants.values().copied().max().unwrap_or(0))
        .sum()
}

/// Number of distinct trimmed, lowercased value groups.
fn group_count(present: &[&Value]) -> u64 {
    present
        .iter()
        .map(|value| scalar_text(value).trim().to_lowercase())
        .collect::<HashSet<String>>()
        .len() as u64
}
