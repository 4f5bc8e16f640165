//! Score aggregation.
//!
//! Field overall scores are weighted means of the four dimensions; table
//! scores are unweighted means across fields, so every column counts
//! equally regardless of type. The table-level dimension scores are
//! computed independently of the overall-score weighting.

use super::config::DimensionWeights;
use super::models::{FieldAnalysis, QualityGrade, TableScores};

/// Combines the four dimension scores into one field score.
pub(crate) fn field_overall(
    completeness: f64,
    correctness: f64,
    uniqueness: f64,
    consistency: f64,
    weights: &DimensionWeights,
) -> f64 {
    let weights = weights.normalized();
    let combined = completeness * weights.completeness
        + correctness * weights.correctness
        + uniqueness * weights.uniqueness
        + consistency * weights.consistency;
    combined.clamp(0.0, 100.0)
}

/// Rolls field analyses up into table-level scores.
///
/// A table with no fields cannot happen through the public entry point,
/// but the guard keeps the rollup total: everything defaults to 100.
pub fn table_scores(fields: &[FieldAnalysis]) -> TableScores {
    if fields.is_empty() {
        return TableScores::default();
    }

    let count = fields.len() as f64;
    let completeness_score =
        fields.iter().map(|field| field.completeness_score).sum::<f64>() / count;
    let correctness_score =
        fields.iter().map(|field| field.correctness_score).sum::<f64>() / count;
    let uniqueness_score =
        fields.iter().map(|field| field.uniqueness_score).sum::<f64>() / count;
    let consistency_score =
        fields.iter().map(|field| field.consistency_score).sum::<f64>() / count;
    let overall_score = fields.iter().map(|field| field.overall_score).sum::<f64>() / count;

    TableScores {
        completeness_score,
        correctness_score,
        uniqueness_score,
        consistency_score,
        overall_score,
        quality_grade: QualityGrade::from_score(overall_score),
    }
}
