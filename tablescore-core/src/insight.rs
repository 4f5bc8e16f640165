//! Optional report enrichment hooks for domain labels and narratives.
//!
//! Scoring never depends on this module. Callers that classify a dataset's
//! business domain or produce a narrative summary (locally or through an
//! external model) can attach those results to a finished report here. A
//! failing generator degrades to a report without insights; scores and
//! issues are never modified.

use serde_json::Value;
use tracing::warn;

use crate::quality::{Issue, QualityReport, TableScores};

/// Read-only view of a finished report handed to insight generators.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    /// Logical table name from the report
    pub table_name: &'a str,
    /// Business domain the caller classified the dataset into
    pub domain: &'a str,
    /// Aggregated table-level scores
    pub scores: &'a TableScores,
    /// Detected issues, ordered by severity
    pub issues: &'a [Issue],
}

/// Produces a human-readable narrative for a scored table.
///
/// # Object Safety
/// This trait is object-safe, allowing dynamic dispatch through
/// `Box<dyn InsightGenerator>` or `&dyn InsightGenerator`.
///
/// Implementations only see aggregated scores and issue counts, never raw
/// cell values, so narratives cannot leak dataset contents the report
/// itself does not carry.
pub trait InsightGenerator: Send + Sync {
    /// Generates a narrative summary for the given report context.
    ///
    /// # Errors
    /// Returns an error when the narrative cannot be produced. Callers
    /// treat this as a degraded (not failed) enrichment.
    fn generate(
        &self,
        context: &InsightContext<'_>,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Attaches a domain label and, when available, a generated narrative to a
/// finished report.
///
/// The domain label is always recorded. The narrative is recorded only when
/// the generator succeeds; a generator failure is logged and the report is
/// returned without insights. Scores and issues are never touched.
pub fn enrich_report(
    report: &mut QualityReport,
    domain: impl Into<String>,
    generator: &dyn InsightGenerator,
) {
    let domain = domain.into();

    let context = InsightContext {
        table_name: &report.table_name,
        domain: &domain,
        scores: &report.table_scores,
        issues: &report.issues,
    };

    match generator.generate(&context) {
        Ok(narrative) => {
            report.ai_insights = Some(Value::String(narrative));
        }
        Err(e) => {
            warn!(
                table = %report.table_name,
                error = %e,
                "Insight generation failed, continuing without narrative"
            );
        }
    }

    report.detected_domain = Some(domain);
}
