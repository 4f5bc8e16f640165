//! Core scoring engine and data structures for Tablescore.
//!
//! This crate provides dataset ingestion, semantic type inference, and the
//! four-dimension quality scoring pipeline shared by the CLI and embedding
//! tools. It implements the offline-capable, value-silent architecture that
//! defines Tablescore.
//!
//! # Guarantees
//! - Raw cell values never appear in logs or error messages; reports carry
//!   counts and aggregate percentages only
//! - Scoring is deterministic: the same rows and configuration always
//!   produce an identical report
//! - Zero network dependencies; analysis runs entirely offline
//!
//! # Architecture
//! The core library follows these patterns:
//! - Column-oriented assessment over a validated row-major dataset
//! - One module per quality dimension behind a single analyzer facade
//! - JSON Schema validation of every emitted report

pub mod dataset;
pub mod error;
pub mod ingest;
pub mod insight;
pub mod logging;
pub mod quality;
pub mod validation;

// Re-export commonly used types
pub use dataset::Dataset;
pub use error::{Result, TablescoreError};
pub use ingest::{SourceFormat, read_dataset};
pub use insight::{InsightContext, InsightGenerator, enrich_report};
pub use logging::init_logging;
pub use quality::{
    DimensionWeights, FieldAnalysis, Issue, IssueKind, QualityAnalyzer, QualityGrade,
    QualityReport, ScoringConfig, SemanticType, Severity, TableScores,
};
pub use validation::{
    ValidationError, initialize_report_validator, validate_and_parse_report, validate_report_json,
};
