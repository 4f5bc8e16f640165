//! Property-based tests for the scoring engine.
//!
//! These tests verify invariants that must hold for any input dataset:
//! score bounds, determinism, the completeness formula, and issue ordering.

use proptest::prelude::*;
use serde_json::{Value, json};

use tablescore_core::{Dataset, IssueKind, QualityAnalyzer, QualityGrade};

fn column_dataset(name: &str, values: Vec<Value>) -> Dataset {
    let rows = values.into_iter().map(|v| json!({ name: v })).collect();
    Dataset::new(vec![name.to_string()], rows).unwrap()
}

proptest! {
    /// Properties tested:
    /// - Every emitted score lies in [0, 100]
    /// - Issues are ordered from most to least severe
    #[test]
    fn test_scores_bounded_and_issues_ordered(
        values in proptest::collection::vec(
            proptest::option::of("[a-z0-9 @.\\-]{0,12}"),
            1..60
        )
    ) {
        let values: Vec<Value> = values
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::String))
            .collect();
        let dataset = column_dataset("value", values);

        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "generated")
            .unwrap();

        let field = &report.field_analyses[0];
        for score in [
            field.completeness_score,
            field.correctness_score,
            field.uniqueness_score,
            field.consistency_score,
            field.overall_score,
            report.table_scores.overall_score,
        ] {
            prop_assert!((0.0..=100.0).contains(&score));
        }

        for pair in report.issues.windows(2) {
            prop_assert!(pair[0].severity <= pair[1].severity);
        }
    }

    /// Properties tested:
    /// - Analyzing the same dataset twice yields byte-identical reports
    #[test]
    fn test_analysis_is_deterministic(
        values in proptest::collection::vec(
            proptest::option::of("[a-zA-Z0-9@.\\- ]{0,10}"),
            1..40
        )
    ) {
        let values: Vec<Value> = values
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::String))
            .collect();
        let dataset = column_dataset("value", values);

        let first = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "generated")
            .unwrap();
        let second = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "generated")
            .unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Properties tested:
    /// - Completeness equals present / total, scaled to 100
    /// - The missing_values issue carries the exact missing count
    #[test]
    fn test_completeness_matches_missing_count(
        missing_flags in proptest::collection::vec(any::<bool>(), 1..80)
    ) {
        let total = missing_flags.len();
        let missing = missing_flags.iter().filter(|&&m| m).count();
        let values: Vec<Value> = missing_flags
            .iter()
            .enumerate()
            .map(|(i, &m)| if m { Value::Null } else { json!(format!("v{}", i)) })
            .collect();
        let dataset = column_dataset("value", values);

        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "generated")
            .unwrap();

        let expected = ((total - missing) as f64 / total as f64) * 100.0;
        let field = &report.field_analyses[0];
        prop_assert!((field.completeness_score - expected).abs() < 1e-9);

        let missing_issue = report
            .issues
            .iter()
            .find(|i| i.kind == IssueKind::MissingValues);
        if missing > 0 {
            let issue = missing_issue.unwrap();
            prop_assert_eq!(issue.affected_rows, Some(missing as u64));
        } else {
            prop_assert!(missing_issue.is_none());
        }
    }

    /// Properties tested:
    /// - A column of all-distinct values scores 100 on uniqueness
    /// - No duplicate issues are raised for it
    #[test]
    fn test_distinct_values_score_full_uniqueness(total in 1usize..60) {
        let values: Vec<Value> = (0..total).map(|i| json!(format!("v{}", i))).collect();
        let dataset = column_dataset("value", values);

        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "generated")
            .unwrap();

        prop_assert_eq!(report.field_analyses[0].uniqueness_score, 100.0);
        prop_assert!(!report.issues.iter().any(|i| matches!(
            i.kind,
            IssueKind::DuplicateKey | IssueKind::DuplicateValues
        )));
    }

    /// Properties tested:
    /// - Appending a missing value never raises completeness
    #[test]
    fn test_more_missing_never_raises_completeness(
        missing_flags in proptest::collection::vec(any::<bool>(), 1..50)
    ) {
        let mut values: Vec<Value> = missing_flags
            .iter()
            .enumerate()
            .map(|(i, &m)| if m { Value::Null } else { json!(format!("v{}", i)) })
            .collect();

        let before = QualityAnalyzer::with_defaults()
            .analyze(&column_dataset("value", values.clone()), "generated")
            .unwrap()
            .field_analyses[0]
            .completeness_score;

        values.push(Value::Null);
        let after = QualityAnalyzer::with_defaults()
            .analyze(&column_dataset("value", values), "generated")
            .unwrap()
            .field_analyses[0]
            .completeness_score;

        prop_assert!(after <= before);
    }

    /// Properties tested:
    /// - Grades follow the published bands after one-decimal rounding
    #[test]
    fn test_grades_follow_score_bands(
        values in proptest::collection::vec(
            proptest::option::of("[a-z0-9]{0,8}"),
            1..50
        )
    ) {
        let values: Vec<Value> = values
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::String))
            .collect();
        let dataset = column_dataset("value", values);

        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "generated")
            .unwrap();

        for field in &report.field_analyses {
            let rounded = (field.overall_score * 10.0).round() / 10.0;
            let expected = if rounded >= 90.0 {
                QualityGrade::A
            } else if rounded >= 75.0 {
                QualityGrade::B
            } else if rounded >= 60.0 {
                QualityGrade::C
            } else if rounded >= 40.0 {
                QualityGrade::D
            } else {
                QualityGrade::F
            };
            prop_assert_eq!(field.quality_grade, expected);
        }
    }
}
