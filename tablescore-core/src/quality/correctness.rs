//! Correctness validation.
//!
//! Each inferred type carries at most one validation rule. Types without a
//! format of their own (identifier, categorical, text, unknown) are treated
//! as correct unless the caller supplied an allowed value set for the
//! column; there is no way to validate free-form values without domain
//! knowledge.

use chrono::Datelike;
use serde_json::Value;

use super::config::ScoringConfig;
use super::inference::{is_boolean_token, is_email, is_phone_shaped, parse_date};
use super::issues::{Issue, IssueKind, violation_severity};
use super::models::SemanticType;
use super::values::{parse_numeric, scalar_text};

/// How one value fared against its column's rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleVerdict {
    /// Value satisfies the rule
    Valid,
    /// Value does not match the expected structure
    BadFormat,
    /// Value parses but falls outside the plausible range
    OutOfRange,
}

type ValidationRule = fn(&Value, &ScoringConfig) -> RuleVerdict;

/// Returns the validation rule for an inferred type, if it has one.
fn rule_for(semantic_type: SemanticType) -> Option<ValidationRule> {
    match semantic_type {
        SemanticType::Numeric | SemanticType::Integer => Some(check_numeric),
        SemanticType::Date => Some(check_date),
        SemanticType::Email => Some(check_email),
        SemanticType::Phone => Some(check_phone),
        SemanticType::Boolean => Some(check_boolean),
        SemanticType::Identifier
        | SemanticType::Categorical
        | SemanticType::Text
        | SemanticType::Unknown => None,
    }
}

fn check_numeric(value: &Value, config: &ScoringConfig) -> RuleVerdict {
    match parse_numeric(value) {
        Some(number) if number >= config.numeric_min && number <= config.numeric_max => {
            RuleVerdict::Valid
        }
        Some(_) => RuleVerdict::OutOfRange,
        None => RuleVerdict::BadFormat,
    }
}

fn check_date(value: &Value, config: &ScoringConfig) -> RuleVerdict {
    match parse_date(scalar_text(value).trim()) {
        Some(date) if date.year() >= config.min_year && date.year() <= config.max_year => {
            RuleVerdict::Valid
        }
        Some(_) => RuleVerdict::OutOfRange,
        None => RuleVerdict::BadFormat,
    }
}

fn check_email(value: &Value, _config: &ScoringConfig) -> RuleVerdict {
    if is_email(scalar_text(value).trim()) {
        RuleVerdict::Valid
    } else {
        RuleVerdict::BadFormat
    }
}

fn check_phone(value: &Value, _config: &ScoringConfig) -> RuleVerdict {
    if is_phone_shaped(scalar_text(value).trim()) {
        RuleVerdict::Valid
    } else {
        RuleVerdict::BadFormat
    }
}

fn check_boolean(value: &Value, _config: &ScoringConfig) -> RuleVerdict {
    if is_boolean_token(scalar_text(value).trim()) {
        RuleVerdict::Valid
    } else {
        RuleVerdict::BadFormat
    }
}

/// Outcome of scoring one column for correctness.
#[derive(Debug)]
pub struct CorrectnessResult {
    /// Score on the 0-100 scale
    pub score: f64,
    /// Values failing the structural check
    pub invalid_format: u64,
    /// Values parsing but outside the plausible range
    pub out_of_range: u64,
    /// Issues raised, at most one per violation kind
    pub issues: Vec<Issue>,
}

impl CorrectnessResult {
    fn vacuous() -> Self {
        Self {
            score: 100.0,
            invalid_format: 0,
            out_of_range: 0,
            issues: Vec::new(),
        }
    }
}

/// Scores a column's present values against its type rule.
///
/// A column with no present values scores 100; missingness is already
/// penalized by the completeness dimension and is not double-counted here.
pub fn assess(
    column: &str,
    present: &[&Value],
    semantic_type: SemanticType,
    config: &ScoringConfig,
) -> CorrectnessResult {
    if present.is_empty() {
        return CorrectnessResult::vacuous();
    }

    let mut invalid_format: u64 = 0;
    let mut out_of_range: u64 = 0;

    if let Some(rule) = rule_for(semantic_type) {
        for value in present {
            match rule(value, config) {
                RuleVerdict::Valid => {}
                RuleVerdict::BadFormat => invalid_format += 1,
                RuleVerdict::OutOfRange => out_of_range += 1,
            }
        }
    } else if let Some(allowed) = config.allowed_values.get(column) {
        for value in present {
            if !allowed.contains(scalar_text(value).trim()) {
                invalid_format += 1;
            }
        }
    } else {
        return CorrectnessResult::vacuous();
    }

    let total = present.len() as u64;
    let valid = total - invalid_format - out_of_range;
    let score = (valid as f64 / total as f64) * 100.0;

    let mut issues = Vec::new();
    if invalid_format > 0 {
        let ratio = invalid_format as f64 / total as f64;
        let description = format!(
            "Column '{}' has {} of {} values that do not match the expected {} format ({:.1}%)",
            column,
            invalid_format,
            total,
            semantic_type,
            ratio * 100.0
        );
        issues.push(
            Issue::new(
                IssueKind::FormatViolation,
                violation_severity(ratio),
                description,
                column,
            )
            .with_affected(invalid_format, total),
        );
    }
    if out_of_range > 0 {
        let ratio = out_of_range as f64 / total as f64;
        let description = format!(
            "Column '{}' has {} of {} values outside the plausible {} range ({:.1}%)",
            column,
            out_of_range,
            total,
            semantic_type,
            ratio * 100.0
        );
        issues.push(
            Issue::new(
                IssueKind::OutOfRange,
                violation_severity(ratio),
                description,
                column,
            )
            .with_affected(out_of_range, total),
        );
    }

    CorrectnessResult {
        score,
        invalid_format,
        out_of_range,
        issues,
    }
}
