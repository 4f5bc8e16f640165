//! Scoring configuration.
//!
//! This module provides configuration for quality analysis including
//! dimension weights, plausibility ranges, and key column designation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Default weight given to each scoring dimension.
const DEFAULT_WEIGHT: f64 = 0.25;
/// Default magnitude bound for plausible numeric values.
const DEFAULT_NUMERIC_BOUND: f64 = 1.0e9;
/// Default earliest plausible year for date values.
const DEFAULT_MIN_YEAR: i32 = 1900;
/// Default latest plausible year for date values.
const DEFAULT_MAX_YEAR: i32 = 2100;
/// Default cap on distinct values for categorical detection.
const DEFAULT_CATEGORICAL_MAX_DISTINCT: usize = 20;
/// Default cap on the distinct-to-present ratio for categorical detection.
const DEFAULT_CATEGORICAL_MAX_RATIO: f64 = 0.10;
/// Default number of present values sampled during type inference.
const DEFAULT_INFERENCE_SAMPLE: usize = 100;

/// Relative importance of the four scoring dimensions.
///
/// Weights are renormalized to sum to 1.0 at scoring time, so any
/// non-negative mix works. Setting a weight to zero removes that dimension
/// from the overall score entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DimensionWeights {
    /// Weight for completeness
    pub completeness: f64,
    /// Weight for correctness
    pub correctness: f64,
    /// Weight for uniqueness
    pub uniqueness: f64,
    /// Weight for consistency
    pub consistency: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            completeness: DEFAULT_WEIGHT,
            correctness: DEFAULT_WEIGHT,
            uniqueness: DEFAULT_WEIGHT,
            consistency: DEFAULT_WEIGHT,
        }
    }
}

/// Replaces a negative or non-finite weight with zero, warning once.
fn sanitize_weight(dimension: &str, weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        tracing::warn!(
            "weight for {} must be a finite non-negative number, got {}; using 0.0",
            dimension,
            weight
        );
        0.0
    }
}

impl DimensionWeights {
    /// Creates weights with the default equal split.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the completeness weight.
    pub fn with_completeness(mut self, weight: f64) -> Self {
        self.completeness = sanitize_weight("completeness", weight);
        self
    }

    /// Builder method to set the correctness weight.
    pub fn with_correctness(mut self, weight: f64) -> Self {
        self.correctness = sanitize_weight("correctness", weight);
        self
    }

    /// Builder method to set the uniqueness weight.
    pub fn with_uniqueness(mut self, weight: f64) -> Self {
        self.uniqueness = sanitize_weight("uniqueness", weight);
        self
    }

    /// Builder method to set the consistency weight.
    pub fn with_consistency(mut self, weight: f64) -> Self {
        self.consistency = sanitize_weight("consistency", weight);
        self
    }

    /// Returns these weights scaled to sum to 1.0.
    ///
    /// A degenerate all-zero mix falls back to the default equal split so a
    /// score can always be produced.
    pub fn normalized(&self) -> Self {
        let sum = self.completeness + self.correctness + self.uniqueness + self.consistency;
        if !sum.is_finite() || sum <= f64::EPSILON {
            return Self::default();
        }
        Self {
            completeness: self.completeness / sum,
            correctness: self.correctness / sum,
            uniqueness: self.uniqueness / sum,
            consistency: self.consistency / sum,
        }
    }
}

/// Scoring configuration.
///
/// Controls dimension weights, plausibility ranges for correctness checks,
/// categorical detection limits, and designated key columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Dimension weights for the overall field score
    pub weights: DimensionWeights,
    /// Lower bound of the plausible numeric range
    pub numeric_min: f64,
    /// Upper bound of the plausible numeric range
    pub numeric_max: f64,
    /// Earliest plausible year for date values
    pub min_year: i32,
    /// Latest plausible year for date values
    pub max_year: i32,
    /// Maximum distinct values for a column to count as categorical
    pub categorical_max_distinct: usize,
    /// Maximum distinct-to-present ratio for categorical detection (0.0-1.0)
    pub categorical_max_ratio: f64,
    /// Number of present values sampled during type inference
    pub inference_sample_size: usize,
    /// Columns whose combination must be unique across rows
    pub key_columns: Vec<String>,
    /// Per-column allowed value sets, compared after trimming
    pub allowed_values: BTreeMap<String, BTreeSet<String>>,
}

/// Validation errors for scoring configuration.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("weight for {0} must be a finite non-negative number, got {1}")]
    InvalidWeight(&'static str, f64),
    #[error("at least one dimension weight must be positive")]
    ZeroWeights,
    #[error("numeric range minimum {0} exceeds maximum {1}")]
    InvalidNumericRange(f64, f64),
    #[error("year range minimum {0} exceeds maximum {1}")]
    InvalidYearRange(i32, i32),
    #[error("categorical_max_ratio must be between 0.0 and 1.0, got {0}")]
    InvalidCategoricalRatio(f64),
    #[error("inference_sample_size must be at least 1, got {0}")]
    InvalidSampleSize(usize),
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: DimensionWeights::default(),
            numeric_min: -DEFAULT_NUMERIC_BOUND,
            numeric_max: DEFAULT_NUMERIC_BOUND,
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            categorical_max_distinct: DEFAULT_CATEGORICAL_MAX_DISTINCT,
            categorical_max_ratio: DEFAULT_CATEGORICAL_MAX_RATIO,
            inference_sample_size: DEFAULT_INFERENCE_SAMPLE,
            key_columns: Vec::new(),
            allowed_values: BTreeMap::new(),
        }
    }
}

impl ScoringConfig {
    /// Creates a new scoring config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set dimension weights.
    pub fn with_weights(mut self, weights: DimensionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Builder method to set the plausible numeric range.
    pub fn with_numeric_range(mut self, min: f64, max: f64) -> Self {
        if min > max {
            tracing::warn!(
                "numeric range [{}, {}] is inverted; swapping bounds",
                min,
                max
            );
            self.numeric_min = max;
            self.numeric_max = min;
        } else {
            self.numeric_min = min;
            self.numeric_max = max;
        }
        self
    }

    /// Builder method to set the plausible year range.
    pub fn with_year_range(mut self, min: i32, max: i32) -> Self {
        if min > max {
            tracing::warn!("year range [{}, {}] is inverted; swapping bounds", min, max);
            self.min_year = max;
            self.max_year = min;
        } else {
            self.min_year = min;
            self.max_year = max;
        }
        self
    }

    /// Builder method to set categorical detection limits.
    pub fn with_categorical_limits(mut self, max_distinct: usize, max_ratio: f64) -> Self {
        if !(0.0..=1.0).contains(&max_ratio) {
            tracing::warn!(
                "categorical_max_ratio {} clamped to valid range [0.0, 1.0]",
                max_ratio
            );
        }
        self.categorical_max_distinct = max_distinct;
        self.categorical_max_ratio = max_ratio.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the inference sample size.
    pub fn with_inference_sample_size(mut self, sample_size: usize) -> Self {
        if sample_size == 0 {
            tracing::warn!("inference_sample_size 0 raised to minimum of 1");
            self.inference_sample_size = 1;
        } else {
            self.inference_sample_size = sample_size;
        }
        self
    }

    /// Builder method to designate key columns.
    ///
    /// The combination of these columns must be unique per row; duplicated
    /// combinations raise a critical table-wide issue.
    pub fn with_key_columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.key_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to restrict a column to an allowed value set.
    ///
    /// Membership is checked on trimmed text. Allowed value sets only apply
    /// to columns whose inferred type carries no format rule of its own.
    pub fn with_allowed_values(
        mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allowed_values
            .insert(column.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error if weights are unusable, a range is inverted, or a
    /// limit is outside its valid domain.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let weights = [
            ("completeness", self.weights.completeness),
            ("correctness", self.weights.correctness),
            ("uniqueness", self.weights.uniqueness),
            ("consistency", self.weights.consistency),
        ];
        for (dimension, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigValidationError::InvalidWeight(dimension, weight));
            }
        }
        if weights.iter().map(|(_, weight)| weight).sum::<f64>() <= 0.0 {
            return Err(ConfigValidationError::ZeroWeights);
        }
        if self.numeric_min > self.numeric_max {
            return Err(ConfigValidationError::InvalidNumericRange(
                self.numeric_min,
                self.numeric_max,
            ));
        }
        if self.min_year > self.max_year {
            return Err(ConfigValidationError::InvalidYearRange(
                self.min_year,
                self.max_year,
            ));
        }
        if !(0.0..=1.0).contains(&self.categorical_max_ratio) {
            return Err(ConfigValidationError::InvalidCategoricalRatio(
                self.categorical_max_ratio,
            ));
        }
        if self.inference_sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(
                self.inference_sample_size,
            ));
        }
        Ok(())
    }
}
