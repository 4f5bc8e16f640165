//! Data quality report models.
//!
//! This module defines the data structures for analysis results. All models
//! are designed to be safe for output - they contain only counts, scores,
//! and column names, never actual data values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::issues::{Issue, Severity};

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Values parse as real numbers
    Numeric,
    /// Values parse as whole numbers
    Integer,
    /// Values parse as calendar dates or timestamps
    Date,
    /// Values look like email addresses
    Email,
    /// Values look like phone numbers
    Phone,
    /// Values use a small true/false vocabulary
    Boolean,
    /// Values act as record identifiers
    Identifier,
    /// Values draw from a small repeated vocabulary
    Categorical,
    /// Free-form text
    Text,
    /// No present values to infer from
    Unknown,
}

impl SemanticType {
    /// Stable lowercase name used in reports and log lines.
    pub fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Boolean => "boolean",
            Self::Identifier => "identifier",
            Self::Categorical => "categorical",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum rounded score for an A grade.
const GRADE_A_FLOOR: f64 = 90.0;
/// Minimum rounded score for a B grade.
const GRADE_B_FLOOR: f64 = 75.0;
/// Minimum rounded score for a C grade.
const GRADE_C_FLOOR: f64 = 60.0;
/// Minimum rounded score for a D grade.
const GRADE_D_FLOOR: f64 = 40.0;

/// Letter grade summarizing a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    /// Score of 90 or above
    A,
    /// Score of 75 up to 90
    B,
    /// Score of 60 up to 75
    C,
    /// Score of 40 up to 60
    D,
    /// Score below 40
    F,
}

impl QualityGrade {
    /// Assigns the grade for a score on the 0-100 scale.
    ///
    /// The score is rounded to one decimal place before banding, so a
    /// computed 89.96 reports as 90.0 and earns an A rather than straddling
    /// the boundary with its printed value.
    pub fn from_score(score: f64) -> Self {
        let rounded = (score * 10.0).round() / 10.0;
        if rounded >= GRADE_A_FLOOR {
            Self::A
        } else if rounded >= GRADE_B_FLOOR {
            Self::B
        } else if rounded >= GRADE_C_FLOOR {
            Self::C
        } else if rounded >= GRADE_D_FLOOR {
            Self::D
        } else {
            Self::F
        }
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// Per-column analysis results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAnalysis {
    /// Column name
    pub field_name: String,
    /// Inferred semantic type
    pub data_type: SemanticType,
    /// Fraction of rows with a usable value (0-100)
    pub completeness_score: f64,
    /// Fraction of present values passing type validation (0-100)
    pub correctness_score: f64,
    /// Fraction of present values that are distinct (0-100)
    pub uniqueness_score: f64,
    /// Fraction of present values matching the dominant pattern (0-100)
    pub consistency_score: f64,
    /// Weighted combination of the four dimensions (0-100)
    pub overall_score: f64,
    /// Letter grade for the overall score
    pub quality_grade: QualityGrade,
}

/// Table-level score summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableScores {
    /// Mean field completeness (0-100)
    pub completeness_score: f64,
    /// Mean field correctness (0-100)
    pub correctness_score: f64,
    /// Mean field uniqueness (0-100)
    pub uniqueness_score: f64,
    /// Mean field consistency (0-100)
    pub consistency_score: f64,
    /// Mean field overall score (0-100)
    pub overall_score: f64,
    /// Letter grade for the table overall score
    pub quality_grade: QualityGrade,
}

impl Default for TableScores {
    fn default() -> Self {
        Self {
            completeness_score: 100.0,
            correctness_score: 100.0,
            uniqueness_score: 100.0,
            consistency_score: 100.0,
            overall_score: 100.0,
            quality_grade: QualityGrade::A,
        }
    }
}

/// Complete quality report for one table.
///
/// Reports are deterministic: the same dataset and configuration always
/// serialize to byte-identical JSON. Nothing here depends on wall-clock
/// time or iteration order of unordered containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Label for the analyzed table
    pub table_name: String,
    /// Number of rows inspected
    pub analyzed_rows: u64,
    /// Table-level score summary
    pub table_scores: TableScores,
    /// Per-column results in column declaration order
    pub field_analyses: Vec<FieldAnalysis>,
    /// Detected issues ordered by severity
    pub issues: Vec<Issue>,
    /// Domain label supplied by an enrichment pass, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_domain: Option<String>,
    /// Narrative insights supplied by an enrichment pass, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<Value>,
}

impl QualityReport {
    /// Attaches a detected domain label to the report.
    pub fn with_detected_domain(mut self, domain: impl Into<String>) -> Self {
        self.detected_domain = Some(domain.into());
        self
    }

    /// Attaches generated insights to the report.
    pub fn with_ai_insights(mut self, insights: Value) -> Self {
        self.ai_insights = Some(insights);
        self
    }

    /// Counts issues at or above the given severity.
    pub fn issues_at_or_above(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity <= severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bands() {
        assert_eq!(QualityGrade::from_score(100.0), QualityGrade::A);
        assert_eq!(QualityGrade::from_score(90.0), QualityGrade::A);
        assert_eq!(QualityGrade::from_score(89.9), QualityGrade::B);
        assert_eq!(QualityGrade::from_score(75.0), QualityGrade::B);
        assert_eq!(QualityGrade::from_score(74.9), QualityGrade::C);
        assert_eq!(QualityGrade::from_score(60.0), QualityGrade::C);
        assert_eq!(QualityGrade::from_score(59.9), QualityGrade::D);
        assert_eq!(QualityGrade::from_score(40.0), QualityGrade::D);
        assert_eq!(QualityGrade::from_score(39.9), QualityGrade::F);
        assert_eq!(QualityGrade::from_score(0.0), QualityGrade::F);
    }

    #[test]
    fn test_grade_rounds_before_banding() {
        // 89.96 prints as 90.0, so it must also grade as 90.0
        assert_eq!(QualityGrade::from_score(89.96), QualityGrade::A);
        assert_eq!(QualityGrade::from_score(89.94), QualityGrade::B);
    }

    #[test]
    fn test_semantic_type_names() {
        assert_eq!(SemanticType::Email.name(), "email");
        assert_eq!(SemanticType::Identifier.to_string(), "identifier");
        assert_eq!(
            serde_json::to_string(&SemanticType::Categorical).unwrap(),
            "\"categorical\""
        );
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&QualityGrade::A).unwrap(), "\"A\"");
        assert_eq!(serde_json::to_string(&QualityGrade::F).unwrap(), "\"F\"");
    }

    #[test]
    fn test_report_omits_absent_enrichment() {
        let report = QualityReport {
            table_name: "orders".to_string(),
            analyzed_rows: 0,
            table_scores: TableScores::default(),
            field_analyses: Vec::new(),
            issues: Vec::new(),
            detected_domain: None,
            ai_insights: None,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("detected_domain"));
        assert!(!json.contains("ai_insights"));

        let enriched = report
            .with_detected_domain("ecommerce")
            .with_ai_insights(serde_json::json!("clean order table"));
        let json = serde_json::to_string(&enriched).unwrap();
        assert!(json.contains("\"detected_domain\":\"ecommerce\""));
        assert!(json.contains("\"ai_insights\":\"clean order table\""));
    }

    #[test]
    fn test_issue_count_at_or_above_severity() {
        use super::super::issues::{Issue, IssueKind};

        let report = QualityReport {
            table_name: "t".to_string(),
            analyzed_rows: 10,
            table_scores: TableScores::default(),
            field_analyses: Vec::new(),
            issues: vec![
                Issue::new(IssueKind::DuplicateKey, Severity::Critical, "a", "x"),
                Issue::new(IssueKind::FormatViolation, Severity::High, "b", "y"),
                Issue::new(IssueKind::MissingValues, Severity::Medium, "c", "z"),
            ],
            detected_domain: None,
            ai_insights: None,
        };

        assert_eq!(report.issues_at_or_above(Severity::Critical), 1);
        assert_eq!(report.issues_at_or_above(Severity::High), 2);
        assert_eq!(report.issues_at_or_above(Severity::Low), 3);
    }
}
