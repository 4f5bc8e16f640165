//! Quality analyzer facade.
//!
//! This module provides the main `QualityAnalyzer` that orchestrates type
//! inference and the four dimension scorers, and assembles the final
//! report.

use crate::Result;
use crate::dataset::Dataset;

use super::aggregate;
use super::completeness;
use super::config::ScoringConfig;
use super::consistency;
use super::correctness;
use super::inference::infer_column_type;
use super::issues::IssueCollector;
use super::models::{FieldAnalysis, QualityGrade, QualityReport};
use super::uniqueness;
use super::values::present_values;

/// Quality analyzer for scoring tabular datasets.
///
/// The analyzer is a stateless value: each [`analyze`](Self::analyze) call
/// works on its own dataset snapshot and produces an independent report, so
/// one analyzer can be shared or rebuilt freely.
///
/// # Example
///
/// ```rust,ignore
/// use tablescore_core::quality::{QualityAnalyzer, ScoringConfig};
///
/// let analyzer = QualityAnalyzer::with_defaults();
/// let report = analyzer.analyze(&dataset, "orders.csv")?;
/// println!("Overall: {:.1} ({})", report.table_scores.overall_score, report.table_scores.quality_grade);
/// ```
#[derive(Debug, Clone)]
pub struct QualityAnalyzer {
    config: ScoringConfig,
}

impl QualityAnalyzer {
    /// Creates a new quality analyzer with the given configuration.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Creates a new quality analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ScoringConfig::default())
    }

    /// Returns a reference to the analyzer configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Analyzes a dataset and returns its quality report.
    ///
    /// For every column, in declaration order, this infers a semantic type
    /// and scores the four dimensions; a designated-key check runs once at
    /// the end when the configuration names key columns. Per-value
    /// anomalies always degrade into scores and issues; the only error this
    /// method returns is a malformed dataset.
    ///
    /// # Arguments
    /// * `dataset` - The dataset to score
    /// * `label` - Display name for the table in the report
    ///
    /// # Errors
    /// Returns `TablescoreError::InvalidDataset` when the dataset violates
    /// its structural contract.
    pub fn analyze(&self, dataset: &Dataset, label: &str) -> Result<QualityReport> {
        // Datasets built through Deserialize may never have been checked
        dataset.validate()?;

        tracing::debug!(
            "Analyzing table '{}': {} columns, {} rows",
            label,
            dataset.columns().len(),
            dataset.row_count()
        );

        let weights = &self.config.weights;
        let mut collector = IssueCollector::new();
        let mut field_analyses = Vec::with_capacity(dataset.columns().len());

        for column in dataset.columns() {
            let cells = dataset.column_cells(column);
            let completeness = completeness::assess(column, &cells);
            let present = present_values(&cells);

            let data_type = infer_column_type(column, &present, cells.len(), &self.config);
            let correctness = correctness::assess(column, &present, data_type, &self.config);
            let uniqueness = uniqueness::assess(column, &present, data_type);
            let consistency = consistency::assess(column, &present, data_type);

            let overall_score = aggregate::field_overall(
                completeness.score,
                correctness.score,
                uniqueness.score,
                consistency.score,
                weights,
            );

            tracing::debug!(
                "Column '{}' typed as {}: completeness {:.1} ({} of {} missing), correctness {:.1} ({} invalid, {} out of range), uniqueness {:.1} ({} distinct), consistency {:.1} ({} patterns)",
                column,
                data_type,
                completeness.score,
                completeness.missing,
                completeness.total,
                correctness.score,
                correctness.invalid_format,
                correctness.out_of_range,
                uniqueness.score,
                uniqueness.distinct,
                consistency.score,
                consistency.patterns
            );

            collector.extend(completeness.issue);
            collector.extend(correctness.issues);
            collector.extend(uniqueness.issue);
            collector.extend(consistency.issue);

            field_analyses.push(FieldAnalysis {
                field_name: column.clone(),
                data_type,
                completeness_score: completeness.score,
                correctness_score: correctness.score,
                uniqueness_score: uniqueness.score,
                consistency_score: consistency.score,
                overall_score,
                quality_grade: QualityGrade::from_score(overall_score),
            });
        }

        if let Some(issue) = uniqueness::assess_key(dataset, &self.config.key_columns) {
            collector.push(issue);
        }

        let table_scores = aggregate::table_scores(&field_analyses);

        tracing::info!(
            "Table '{}' scored {:.1} (grade {}) with {} issue(s)",
            label,
            table_scores.overall_score,
            table_scores.quality_grade,
            collector.len()
        );

        Ok(QualityReport {
            table_name: label.to_string(),
            analyzed_rows: dataset.row_count() as u64,
            table_scores,
            field_analyses,
            issues: collector.into_ordered(),
            detected_domain: None,
            ai_insights: None,
        })
    }

    /// Analyzes multiple labeled datasets and returns a report for each.
    ///
    /// Datasets that fail analysis are logged and skipped rather than
    /// aborting the entire batch. This ensures partial results are still
    /// available when individual tables are malformed.
    pub fn analyze_all(&self, tables: &[(String, Dataset)]) -> Vec<QualityReport> {
        let mut reports = Vec::with_capacity(tables.len());
        for (label, dataset) in tables {
            match self.analyze(dataset, label) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::warn!("Quality analysis failed for table '{}': {}", label, e);
                }
            }
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::issues::{IssueKind, Severity};
    use crate::quality::models::SemanticType;
    use serde_json::json;

    fn create_dataset(columns: &[&str], rows: Vec<serde_json::Value>) -> Dataset {
        Dataset::new(
            columns.iter().map(|name| name.to_string()).collect(),
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_clean_table_scores_perfectly() {
        let dataset = create_dataset(
            &["id", "email"],
            vec![
                json!({"id": "u-01", "email": "a@example.com"}),
                json!({"id": "u-02", "email": "b@example.com"}),
                json!({"id": "u-03", "email": "c@example.com"}),
            ],
        );
        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "users")
            .unwrap();

        assert_eq!(report.table_name, "users");
        assert_eq!(report.analyzed_rows, 3);
        assert_eq!(report.table_scores.overall_score, 100.0);
        assert!(report.issues.is_empty());

        let id_field = &report.field_analyses[0];
        assert_eq!(id_field.field_name, "id");
        assert_eq!(id_field.data_type, SemanticType::Identifier);
        assert_eq!(id_field.overall_score, 100.0);
    }

    #[test]
    fn test_zero_row_dataset_scores_100_with_no_issues() {
        let dataset = create_dataset(&["id", "amount"], vec![]);
        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "empty")
            .unwrap();

        assert_eq!(report.analyzed_rows, 0);
        assert_eq!(report.table_scores.overall_score, 100.0);
        assert_eq!(report.table_scores.quality_grade.to_string(), "A");
        assert!(report.issues.is_empty());
        assert_eq!(report.field_analyses.len(), 2);
        for field in &report.field_analyses {
            assert_eq!(field.data_type, SemanticType::Unknown);
            assert_eq!(field.overall_score, 100.0);
        }
    }

    #[test]
    fn test_all_missing_column_scores_zero_completeness() {
        let dataset = create_dataset(
            &["name", "ghost"],
            vec![
                json!({"name": "Ada", "ghost": null}),
                json!({"name": "Grace", "ghost": ""}),
                json!({"name": "Alan"}),
            ],
        );
        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "people")
            .unwrap();

        let ghost = &report.field_analyses[1];
        assert_eq!(ghost.field_name, "ghost");
        assert_eq!(ghost.data_type, SemanticType::Unknown);
        assert_eq!(ghost.completeness_score, 0.0);
        assert_eq!(ghost.correctness_score, 100.0);
        assert_eq!(ghost.uniqueness_score, 100.0);
        assert_eq!(ghost.consistency_score, 100.0);
        assert_eq!(ghost.overall_score, 75.0);

        let critical: Vec<_> = report
            .issues
            .iter()
            .filter(|issue| issue.severity == Severity::Critical)
            .collect();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].kind, IssueKind::MissingValues);
        assert_eq!(critical[0].field, "ghost");
    }

    #[test]
    fn test_issues_ordered_by_severity_then_column() {
        let dataset = create_dataset(
            &["status", "id"],
            vec![
                json!({"status": "Active", "id": "x"}),
                json!({"status": "active", "id": "x"}),
                json!({"status": "active", "id": "x"}),
            ],
        );
        let report = QualityAnalyzer::with_defaults()
            .analyze(&dataset, "t")
            .unwrap();

        // The identifier duplication outranks every medium issue despite
        // the id column being declared last
        assert_eq!(report.issues[0].severity, Severity::Critical);
        assert_eq!(report.issues[0].field, "id");
        for pair in report.issues.windows(2) {
            assert!(pair[0].severity <= pair[1].severity);
        }
    }

    #[test]
    fn test_designated_key_check_runs_after_columns() {
        let config = ScoringConfig::default().with_key_columns(["region", "order"]);
        let dataset = create_dataset(
            &["region", "order"],
            vec![
                json!({"region": "eu", "order": "A1"}),
                json!({"region": "eu", "order": "A1"}),
            ],
        );
        let report = QualityAnalyzer::new(config).analyze(&dataset, "orders").unwrap();

        let table_wide: Vec<_> = report
            .issues
            .iter()
            .filter(|issue| issue.field == "-")
            .collect();
        assert_eq!(table_wide.len(), 1);
        assert_eq!(table_wide[0].kind, IssueKind::DuplicateKey);
        assert_eq!(table_wide[0].severity, Severity::Critical);
    }

    #[test]
    fn test_invalid_dataset_is_the_only_failure() {
        let dataset = create_dataset(
            &["payload"],
            vec![json!({"payload": "fine"})],
        );
        // Sneak a nested value past construction via serde
        let mut raw = serde_json::to_value(&dataset).unwrap();
        raw["rows"][0]["payload"] = json!({"nested": true});
        let tampered: Dataset = serde_json::from_value(raw).unwrap();

        let result = QualityAnalyzer::with_defaults().analyze(&tampered, "t");
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_all_skips_failing_tables() {
        let good = create_dataset(&["a"], vec![json!({"a": "1"})]);
        let mut raw = serde_json::to_value(&good).unwrap();
        raw["rows"][0]["a"] = json!([1, 2]);
        let bad: Dataset = serde_json::from_value(raw).unwrap();

        let tables = vec![
            ("good".to_string(), good),
            ("bad".to_string(), bad),
        ];
        let reports = QualityAnalyzer::with_defaults().analyze_all(&tables);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].table_name, "good");
    }

    #[test]
    fn test_reports_are_idempotent() {
        let dataset = create_dataset(
            &["id", "email", "amount"],
            vec![
                json!({"id": "a1", "email": "x@example.com", "amount": "10"}),
                json!({"id": "b2", "email": "broken", "amount": "20"}),
                json!({"id": "c3", "email": null, "amount": "9999999999"}),
            ],
        );
        let analyzer = QualityAnalyzer::with_defaults();

        let first = serde_json::to_string(&analyzer.analyze(&dataset, "t").unwrap()).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(&dataset, "t").unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights_change_field_overall() {
        let config = ScoringConfig::default().with_weights(
            crate::quality::DimensionWeights::new()
                .with_completeness(1.0)
                .with_correctness(0.0)
                .with_uniqueness(0.0)
                .with_consistency(0.0),
        );
        let dataset = create_dataset(
            &["v"],
            vec![
                json!({"v": "x"}),
                json!({"v": "x"}),
                json!({"v": null}),
                json!({"v": "y"}),
            ],
        );
        let report = QualityAnalyzer::new(config).analyze(&dataset, "t").unwrap();

        // Only completeness counts: 3 of 4 present
        assert_eq!(report.field_analyses[0].overall_score, 75.0);
    }
}
