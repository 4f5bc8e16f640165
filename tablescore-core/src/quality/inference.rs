//! Semantic type inference for columns.
//!
//! Classification runs a fixed list of checks in declaration order and takes
//! the first match, so a column that would satisfy several checks lands on
//! the earliest one. Value checks operate on a bounded sample of present
//! values; distinctness evidence covers the whole column.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

use super::config::ScoringConfig;
use super::models::SemanticType;
use super::values::scalar_text;

/// Minimum fraction of sampled values that must parse as numbers.
const NUMERIC_MATCH_RATIO: f64 = 0.95;
/// Minimum fraction of sampled values that must match a pattern check.
const PATTERN_MATCH_RATIO: f64 = 0.90;
/// Minimum sample uniqueness for the value-based identifier route.
const IDENTIFIER_UNIQUE_RATIO: f64 = 0.95;
/// Maximum length spread for identifier-shaped values.
const IDENTIFIER_LENGTH_SPREAD: usize = 2;

// Pattern regexes - compiled once at startup
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid regex: email")
});
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ().\-]+$").expect("Invalid regex: phone"));
static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("Invalid regex: identifier"));

/// Date formats recognized alongside RFC 3339 timestamps.
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Datetime formats tried before plain date formats.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a trimmed string under the recognized date vocabulary.
///
/// Used both for inference and for the correctness rule, so the two stages
/// can never disagree about what counts as a date.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, format) {
            return Some(timestamp.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    None
}

/// Everything the classifiers need to know about one column.
pub(crate) struct ColumnEvidence {
    /// Lowercased column name for name-hint checks
    name_lower: String,
    /// Trimmed text of the first `inference_sample_size` present values
    sample: Vec<String>,
    /// Distinct values within the sample
    sample_distinct: usize,
    /// Distinct values across all present values
    distinct_present: usize,
    /// Present value count for the whole column
    present_count: usize,
    /// Total row count including missing rows
    total_rows: usize,
}

impl ColumnEvidence {
    pub(crate) fn gather(
        column: &str,
        present: &[&Value],
        total_rows: usize,
        config: &ScoringConfig,
    ) -> Self {
        let sample: Vec<String> = present
            .iter()
            .take(config.inference_sample_size)
            .map(|value| scalar_text(value).trim().to_string())
            .collect();

        let sample_distinct = sample.iter().collect::<HashSet<_>>().len();
        let distinct_present = present
            .iter()
            .map(|value| scalar_text(value))
            .collect::<HashSet<_>>()
            .len();

        Self {
            name_lower: column.to_lowercase(),
            sample,
            sample_distinct,
            distinct_present,
            present_count: present.len(),
            total_rows,
        }
    }

    /// Fraction of sampled values satisfying the predicate.
    fn match_ratio(&self, matches: impl Fn(&str) -> bool) -> f64 {
        if self.sample.is_empty() {
            return 0.0;
        }
        let matched = self.sample.iter().filter(|text| matches(text)).count();
        matched as f64 / self.sample.len() as f64
    }
}

type TypePredicate = fn(&ColumnEvidence, &ScoringConfig) -> bool;

/// Classifiers in precedence order; the first match wins.
const TYPE_CHECKS: &[(TypePredicate, SemanticType)] = &[
    (looks_numeric, SemanticType::Numeric),
    (looks_date, SemanticType::Date),
    (looks_email, SemanticType::Email),
    (looks_phone, SemanticType::Phone),
    (looks_boolean, SemanticType::Boolean),
    (looks_identifier, SemanticType::Identifier),
    (looks_categorical, SemanticType::Categorical),
];

/// Infers the semantic type of a column from its present values.
///
/// Columns with no present values at all come back as
/// [`SemanticType::Unknown`]; everything else falls through the ordered
/// checks and defaults to [`SemanticType::Text`].
pub fn infer_column_type(
    column: &str,
    present: &[&Value],
    total_rows: usize,
    config: &ScoringConfig,
) -> SemanticType {
    if present.is_empty() {
        return SemanticType::Unknown;
    }

    let evidence = ColumnEvidence::gather(column, present, total_rows, config);

    for (check, inferred) in TYPE_CHECKS {
        if check(&evidence, config) {
            if *inferred == SemanticType::Numeric && all_sampled_integers(&evidence) {
                return SemanticType::Integer;
            }
            return *inferred;
        }
    }

    SemanticType::Text
}

fn looks_numeric(evidence: &ColumnEvidence, _config: &ScoringConfig) -> bool {
    evidence.match_ratio(|text| parses_finite(text)) >= NUMERIC_MATCH_RATIO
}

fn looks_date(evidence: &ColumnEvidence, _config: &ScoringConfig) -> bool {
    evidence.match_ratio(|text| parse_date(text).is_some()) >= PATTERN_MATCH_RATIO
}

fn looks_email(evidence: &ColumnEvidence, _config: &ScoringConfig) -> bool {
    evidence.match_ratio(is_email) >= PATTERN_MATCH_RATIO
}

fn looks_phone(evidence: &ColumnEvidence, _config: &ScoringConfig) -> bool {
    evidence.match_ratio(is_phone_shaped) >= PATTERN_MATCH_RATIO
}

fn looks_boolean(evidence: &ColumnEvidence, _config: &ScoringConfig) -> bool {
    evidence.match_ratio(is_boolean_token) >= PATTERN_MATCH_RATIO
}

fn looks_identifier(evidence: &ColumnEvidence, _config: &ScoringConfig) -> bool {
    if name_suggests_identifier(&evidence.name_lower) {
        return true;
    }

    // Value route: nearly unique, identifier-shaped, near-constant length
    if evidence.sample.is_empty() {
        return false;
    }
    let unique_ratio = evidence.sample_distinct as f64 / evidence.sample.len() as f64;
    if unique_ratio < IDENTIFIER_UNIQUE_RATIO {
        return false;
    }
    if !evidence
        .sample
        .iter()
        .all(|text| !text.is_empty() && IDENTIFIER_PATTERN.is_match(text))
    {
        return false;
    }

    let lengths = evidence.sample.iter().map(String::len);
    let min_len = lengths.clone().min().unwrap_or(0);
    let max_len = lengths.max().unwrap_or(0);
    max_len - min_len <= IDENTIFIER_LENGTH_SPREAD
}

fn looks_categorical(evidence: &ColumnEvidence, config: &ScoringConfig) -> bool {
    if evidence.present_count == 0 {
        return false;
    }
    let within_count = evidence.distinct_present <= config.categorical_max_distinct;
    let within_ratio = evidence.distinct_present as f64
        <= config.categorical_max_ratio * evidence.total_rows as f64;
    within_count || within_ratio
}

fn all_sampled_integers(evidence: &ColumnEvidence) -> bool {
    evidence
        .sample
        .iter()
        .filter_map(|text| text.parse::<f64>().ok())
        .all(|number| number.fract() == 0.0)
}

fn parses_finite(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(|number| number.is_finite())
}

/// True when the trimmed text matches the email structural grammar.
pub(crate) fn is_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}

/// True when the text is phone-shaped: allowed separators and 7-15 digits.
pub(crate) fn is_phone_shaped(text: &str) -> bool {
    if !PHONE_PATTERN.is_match(text) {
        return false;
    }
    let digits = text.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

/// True when the text belongs to the recognized boolean vocabulary.
pub(crate) fn is_boolean_token(text: &str) -> bool {
    const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "yes", "no", "y", "n"];
    BOOLEAN_TOKENS
        .iter()
        .any(|token| text.eq_ignore_ascii_case(token))
}

/// Name hints that mark a column as an identifier regardless of values.
///
/// The token list is deliberately short: a false identifier hit turns every
/// repeated value into a critical duplicate-key issue, so names like
/// "country_code" must not land here.
fn name_suggests_identifier(name_lower: &str) -> bool {
    if name_lower == "id" || name_lower == "identifier" {
        return true;
    }
    if name_lower.ends_with("_id") || name_lower.ends_with("-id") {
        return true;
    }
    name_lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| matches!(token, "uuid" | "guid"))
}
