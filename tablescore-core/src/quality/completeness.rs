//! Completeness scoring.
//!
//! Completeness measures the presence of values. A cell counts as missing
//! when its key is absent, the value is null, the string is blank after
//! trimming, or the text is a conventional null marker.

use serde_json::Value;

use super::issues::{Issue, IssueKind, missing_severity};
use super::values::is_missing;

/// Outcome of scoring one column for completeness.
#[derive(Debug)]
pub struct CompletenessResult {
    /// Score on the 0-100 scale
    pub score: f64,
    /// Number of missing cells
    pub missing: u64,
    /// Total rows inspected
    pub total: u64,
    /// Issue raised when any cell is missing
    pub issue: Option<Issue>,
}

/// Scores a column for completeness.
///
/// A zero-row column scores 100 with no issue; there is nothing to be
/// incomplete about.
pub fn assess(column: &str, cells: &[Option<&Value>]) -> CompletenessResult {
    let total = cells.len() as u64;
    if total == 0 {
        return CompletenessResult {
            score: 100.0,
            missing: 0,
            total: 0,
            issue: None,
        };
    }

    let missing = cells.iter().filter(|cell| is_missing(**cell)).count() as u64;
    let present = total - missing;
    let score = (present as f64 / total as f64) * 100.0;

    let issue = (missing > 0).then(|| {
        let missing_ratio = missing as f64 / total as f64;
        let description = format!(
            "Column '{}' is missing {} of {} values ({:.1}%)",
            column,
            missing,
            total,
            missing_ratio * 100.0
        );
        Issue::new(
            IssueKind::MissingValues,
            missing_severity(missing_ratio),
            description,
            column,
        )
        .with_affected(missing, total)
    });

    CompletenessResult {
        score,
        missing,
        total,
        issue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::issues::Severity;
    use serde_json::json;

    fn assess_values(values: Vec<Value>) -> CompletenessResult {
        let cells: Vec<Option<&Value>> = values.iter().map(Some).collect();
        assess("email", &cells)
    }

    #[test]
    fn test_all_present_scores_100() {
        let result = assess_values(vec![json!("a"), json!("b"), json!("c")]);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.missing, 0);
        assert!(result.issue.is_none());
    }

    #[test]
    fn test_zero_rows_scores_100() {
        let result = assess("email", &[]);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.total, 0);
        assert!(result.issue.is_none());
    }

    #[test]
    fn test_ten_percent_missing() {
        let mut values = vec![json!("")];
        for index in 0..9 {
            values.push(json!(format!("user{}@example.com", index)));
        }
        let result = assess_values(values);

        assert_eq!(result.score, 90.0);
        assert_eq!(result.missing, 1);

        let issue = result.issue.unwrap();
        assert_eq!(issue.kind, IssueKind::MissingValues);
        assert_eq!(issue.severity, Severity::Medium);
        assert_eq!(issue.affected_rows, Some(1));
        assert_eq!(issue.affected_pct, Some(10.0));
        assert!(issue.description.contains("'email'"));
        assert!(issue.description.contains("1 of 10"));
    }

    #[test]
    fn test_null_markers_and_blanks_count_as_missing() {
        let result = assess_values(vec![
            json!("real value"),
            Value::Null,
            json!("   "),
            json!("N/A"),
            json!("none"),
        ]);

        assert_eq!(result.missing, 4);
        assert_eq!(result.score, 20.0);
    }

    #[test]
    fn test_absent_keys_count_as_missing() {
        let value = json!("present");
        let cells = vec![Some(&value), None, None, None];
        let result = assess("email", &cells);

        assert_eq!(result.missing, 3);
        assert_eq!(result.score, 25.0);
    }

    #[test]
    fn test_severity_escalates_with_missing_ratio() {
        // 1 of 100: low
        let mut values = vec![Value::Null];
        values.extend((0..99).map(|index| json!(index.to_string())));
        let issue = assess_values(values).issue.unwrap();
        assert_eq!(issue.severity, Severity::Low);

        // 10 of 100: medium
        let mut values: Vec<Value> = (0..10).map(|_| Value::Null).collect();
        values.extend((0..90).map(|index| json!(index.to_string())));
        let issue = assess_values(values).issue.unwrap();
        assert_eq!(issue.severity, Severity::Medium);

        // 30 of 100: high
        let mut values: Vec<Value> = (0..30).map(|_| Value::Null).collect();
        values.extend((0..70).map(|index| json!(index.to_string())));
        let issue = assess_values(values).issue.unwrap();
        assert_eq!(issue.severity, Severity::High);

        // 60 of 100: critical
        let mut values: Vec<Value> = (0..60).map(|_| Value::Null).collect();
        values.extend((0..40).map(|index| json!(index.to_string())));
        let issue = assess_values(values).issue.unwrap();
        assert_eq!(issue.severity, Severity::Critical);
    }
}
