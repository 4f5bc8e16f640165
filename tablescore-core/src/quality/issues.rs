//! Issue model and severity classification.
//!
//! Scorers hand their findings to an [`IssueCollector`] as they run; the
//! collector orders everything by severity at the end while keeping the
//! original discovery order inside each severity band, which is what makes
//! report output deterministic.

use serde::{Deserialize, Serialize};

/// Fraction of missing rows at or above which the issue is critical.
pub(crate) const MISSING_CRITICAL_RATIO: f64 = 0.50;
/// Fraction of missing rows at or above which the issue is high.
pub(crate) const MISSING_HIGH_RATIO: f64 = 0.20;
/// Fraction of missing rows at or above which the issue is medium.
pub(crate) const MISSING_MEDIUM_RATIO: f64 = 0.05;
/// Fraction of invalid values above which a violation is high severity.
pub(crate) const VIOLATION_HIGH_RATIO: f64 = 0.20;

/// Severity of a detected issue, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Data is unusable for its apparent purpose
    Critical,
    /// Serious defect needing prompt attention
    High,
    /// Notable defect worth scheduling
    Medium,
    /// Minor blemish
    Low,
    /// Informational observation
    Info,
}

impl Severity {
    /// Stable lowercase name used in reports and log lines.
    pub fn name(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies a missing-value ratio into a severity band.
pub(crate) fn missing_severity(missing_ratio: f64) -> Severity {
    if missing_ratio >= MISSING_CRITICAL_RATIO {
        Severity::Critical
    } else if missing_ratio >= MISSING_HIGH_RATIO {
        Severity::High
    } else if missing_ratio >= MISSING_MEDIUM_RATIO {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Classifies a validation-failure ratio into a severity band.
pub(crate) fn violation_severity(invalid_ratio: f64) -> Severity {
    if invalid_ratio > VIOLATION_HIGH_RATIO {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Category of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Rows lack a usable value
    MissingValues,
    /// Present values fail the format expected for the inferred type
    FormatViolation,
    /// Present values parse but fall outside the plausible range
    OutOfRange,
    /// An identifier or designated key column repeats values
    DuplicateKey,
    /// A non-key column repeats values enough to look suspicious
    DuplicateValues,
    /// Present values split across competing structural patterns
    FormatInconsistency,
}

/// One detected quality issue.
///
/// Descriptions carry column names, counts, and percentages only; cell
/// contents never appear in an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue category
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Severity classification
    pub severity: Severity,
    /// Human-readable summary built from counts and column names
    pub description: String,
    /// Affected column, or "-" for table-wide issues
    pub field: String,
    /// Number of rows involved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_rows: Option<u64>,
    /// Involved rows as a percentage of total, one decimal place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_pct: Option<f64>,
}

/// Field marker for issues that concern the whole table.
pub const TABLE_WIDE_FIELD: &str = "-";

impl Issue {
    /// Creates an issue tied to a specific column.
    pub fn new(
        kind: IssueKind,
        severity: Severity,
        description: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            field: field.into(),
            affected_rows: None,
            affected_pct: None,
        }
    }

    /// Creates an issue that concerns the table as a whole.
    pub fn table_wide(kind: IssueKind, severity: Severity, description: impl Into<String>) -> Self {
        Self::new(kind, severity, description, TABLE_WIDE_FIELD)
    }

    /// Records how many rows the issue touches out of a total.
    pub fn with_affected(mut self, rows: u64, total: u64) -> Self {
        self.affected_rows = Some(rows);
        if total > 0 {
            let pct = (rows as f64 / total as f64) * 100.0;
            self.affected_pct = Some((pct * 10.0).round() / 10.0);
        }
        self
    }
}

/// Accumulates issues during analysis and orders them for the report.
#[derive(Debug, Default)]
pub struct IssueCollector {
    issues: Vec<Issue>,
}

impl IssueCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one issue.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Records a batch of issues in the order given.
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Number of issues collected so far.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consumes the collector, returning issues ordered by severity.
    ///
    /// The sort is stable, so issues of equal severity keep the order in
    /// which the scorers found them (column order, then scorer order).
    pub fn into_ordered(mut self) -> Vec<Issue> {
        self.issues.sort_by_key(|issue| issue.severity);
        self.issues
    }
}
