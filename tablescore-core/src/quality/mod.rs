//! Data quality scoring module.
//!
//! This module provides the scoring engine:
//! - **Completeness**: share of rows with a usable value
//! - **Correctness**: share of present values passing their type rule
//! - **Uniqueness**: distinct share of present values, plus key checks
//! - **Consistency**: representational uniformity of present values
//!
//! Type inference runs first and feeds the correctness, uniqueness, and
//! consistency scorers; the aggregator combines dimension scores into field
//! and table scores with letter grades.
//!
//! # Guarantees
//! - Reports expose counts, ratios, and column names only, never cell values
//! - Offline-only operation with no network dependencies
//! - Deterministic: equal inputs produce byte-identical serialized reports
//!
//! # Example
//! ```rust,ignore
//! use tablescore_core::quality::{QualityAnalyzer, ScoringConfig};
//!
//! let analyzer = QualityAnalyzer::new(ScoringConfig::default());
//! let report = analyzer.analyze(&dataset, "orders.csv")?;
//! println!("Grade: {}", report.table_scores.quality_grade);
//! ```

mod aggregate;
mod analyzer;
mod completeness;
mod config;
mod consistency;
mod correctness;
mod inference;
mod issues;
mod models;
mod uniqueness;
mod values;

// Re-export public API
pub use aggregate::table_scores;
pub use analyzer::QualityAnalyzer;
pub use config::{ConfigValidationError, DimensionWeights, ScoringConfig};
pub use inference::infer_column_type;
pub use issues::{Issue, IssueCollector, IssueKind, Severity, TABLE_WIDE_FIELD};
pub use models::{FieldAnalysis, QualityGrade, QualityReport, SemanticType, TableScores};
