//! JSON Schema validation for the Tablescore report format.
//!
//! This module validates the `.tablescore.json` output format using JSON
//! Schema. It ensures consistent output across ingestion front ends and
//! gives embedding tools a way to check reports they did not produce.
//!
//! # Guarantees
//! - Scores are confirmed to lie in [0, 100]
//! - Grades, issue kinds, and severities are confirmed to use the
//!   published vocabularies
//! - Unknown extra fields are tolerated for forward compatibility
//!
//! # Example
//! ```rust
//! use tablescore_core::validation::{initialize_report_validator, validate_report_json};
//! use serde_json::Value;
//!
//! # fn example(report: &Value) -> Result<(), Box<dyn std::error::Error>> {
//! initialize_report_validator()?;
//! validate_report_json(report)?;
//! println!("Report validation passed!");
//! # Ok(())
//! # }
//! ```

use jsonschema::Validator;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

use crate::quality::QualityReport;

/// Report validation errors with field-level detail
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema compilation failed during initialization
    #[error("JSON Schema compilation failed: {message}")]
    SchemaCompilation { message: String },

    /// Validation failed with specific field errors
    #[error("Report validation failed with {error_count} errors: {errors:?}")]
    ValidationFailed {
        error_count: usize,
        errors: Vec<String>,
    },

    /// JSON parsing error
    #[error("JSON parsing failed: {source}")]
    JsonParsing {
        #[from]
        source: serde_json::Error,
    },
}

/// Embedded JSON Schema for the v1 report format
const REPORT_SCHEMA_V1: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Tablescore Quality Report Format v1",
  "type": "object",
  "required": ["table_name", "analyzed_rows", "table_scores", "field_analyses", "issues"],
  "properties": {
    "table_name": { "type": "string", "minLength": 1 },
    "analyzed_rows": { "type": "integer", "minimum": 0 },
    "table_scores": {
      "type": "object",
      "required": [
        "completeness_score",
        "correctness_score",
        "uniqueness_score",
        "consistency_score",
        "overall_score",
        "quality_grade"
      ],
      "properties": {
        "completeness_score": { "type": "number", "minimum": 0, "maximum": 100 },
        "correctness_score": { "type": "number", "minimum": 0, "maximum": 100 },
        "uniqueness_score": { "type": "number", "minimum": 0, "maximum": 100 },
        "consistency_score": { "type": "number", "minimum": 0, "maximum": 100 },
        "overall_score": { "type": "number", "minimum": 0, "maximum": 100 },
        "quality_grade": { "enum": ["A", "B", "C", "D", "F"] }
      }
    },
    "field_analyses": {
      "type": "array",
      "items": {
        "type": "object",
        "required": [
          "field_name",
          "data_type",
          "completeness_score",
          "correctness_score",
          "uniqueness_score",
          "consistency_score",
          "overall_score",
          "quality_grade"
        ],
        "properties": {
          "field_name": { "type": "string", "minLength": 1 },
          "data_type": {
            "enum": [
              "numeric",
              "integer",
              "date",
              "email",
              "phone",
              "boolean",
              "identifier",
              "categorical",
              "text",
              "unknown"
            ]
          },
          "completeness_score": { "type": "number", "minimum": 0, "maximum": 100 },
          "correctness_score": { "type": "number", "minimum": 0, "maximum": 100 },
          "uniqueness_score": { "type": "number", "minimum": 0, "maximum": 100 },
          "consistency_score": { "type": "number", "minimum": 0, "maximum": 100 },
          "overall_score": { "type": "number", "minimum": 0, "maximum": 100 },
          "quality_grade": { "enum": ["A", "B", "C", "D", "F"] }
        }
      }
    },
    "issues": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["type", "severity", "description", "field"],
        "properties": {
          "type": {
            "enum": [
              "missing_values",
              "format_violation",
              "out_of_range",
              "duplicate_key",
              "duplicate_values",
              "format_inconsistency"
            ]
          },
          "severity": { "enum": ["critical", "high", "medium", "low", "info"] },
          "description": { "type": "string", "minLength": 1 },
          "field": { "type": "string", "minLength": 1 },
          "affected_rows": { "type": "integer", "minimum": 0 },
          "affected_pct": { "type": "number", "minimum": 0, "maximum": 100 }
        }
      }
    },
    "detected_domain": { "type": "string" },
    "ai_insights": {}
  }
}"#;

/// Compiled JSON Schema instance (initialized once)
static COMPILED_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Initialize and compile the JSON Schema for report validation
///
/// This function compiles the embedded JSON Schema and caches it for reuse.
/// It should be called once during application startup.
///
/// # Errors
/// Returns `ValidationError::SchemaCompilation` if the embedded schema is invalid.
pub fn initialize_report_validator() -> Result<(), ValidationError> {
    let schema_json: Value =
        serde_json::from_str(REPORT_SCHEMA_V1).map_err(|e| ValidationError::SchemaCompilation {
            message: format!("Failed to parse embedded schema: {}", e),
        })?;

    let compiled = jsonschema::validator_for(&schema_json).map_err(|e| {
        ValidationError::SchemaCompilation {
            message: format!("Schema compilation error: {}", e),
        }
    })?;

    // Try to set the compiled schema, but don't error if it's already set
    let _ = COMPILED_SCHEMA.set(compiled);

    Ok(())
}

/// Validate a quality report JSON value against the report schema
///
/// # Arguments
/// * `json_value` - The JSON representation of a `QualityReport`
///
/// # Errors
/// Returns detailed validation errors if the JSON doesn't conform to the
/// report schema, or a `SchemaCompilation` error when the validator was
/// never initialized.
pub fn validate_report_json(json_value: &Value) -> Result<(), ValidationError> {
    let schema = COMPILED_SCHEMA
        .get()
        .ok_or_else(|| ValidationError::SchemaCompilation {
            message: "Report validator not initialized. Call initialize_report_validator() first."
                .to_string(),
        })?;

    if let Err(validation_error) = schema.validate(json_value) {
        let error_message = format!("Report validation failed: {}", validation_error);

        return Err(ValidationError::ValidationFailed {
            error_count: 1,
            errors: vec![error_message],
        });
    }

    Ok(())
}

/// Validate and load a `QualityReport` from JSON
///
/// This function combines JSON parsing, schema validation, and
/// deserialization into a single operation with detailed error reporting.
///
/// # Arguments
/// * `json_str` - JSON string representation of a quality report
///
/// # Errors
/// Returns validation errors for malformed JSON or schema violations.
///
/// # Example
/// ```rust
/// use tablescore_core::validation::{initialize_report_validator, validate_and_parse_report};
///
/// # fn example(json_str: &str) -> Result<(), Box<dyn std::error::Error>> {
/// initialize_report_validator()?;
/// let report = validate_and_parse_report(json_str)?;
/// println!("Loaded report for table: {}", report.table_name);
/// # Ok(())
/// # }
/// ```
pub fn validate_and_parse_report(json_str: &str) -> Result<QualityReport, ValidationError> {
    let json_value: Value = serde_json::from_str(json_str)?;

    validate_report_json(&json_value)?;

    let report: QualityReport = serde_json::from_value(json_value)?;

    Ok(report)
}

/// Get the embedded report schema as a parsed Value for external use
///
/// This provides access to the schema definition for tools that validate
/// reports without linking against this crate's types.
pub fn get_report_schema() -> Result<Value, ValidationError> {
    serde_json::from_str(REPORT_SCHEMA_V1).map_err(|e| ValidationError::SchemaCompilation {
        message: format!("Failed to parse embedded schema: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_report() -> Value {
        json!({
            "table_name": "orders",
            "analyzed_rows": 0,
            "table_scores": {
                "completeness_score": 100.0,
                "correctness_score": 100.0,
                "uniqueness_score": 100.0,
                "consistency_score": 100.0,
                "overall_score": 100.0,
                "quality_grade": "A"
            },
            "field_analyses": [],
            "issues": []
        })
    }

    #[test]
    fn test_schema_compiles() {
        initialize_report_validator().unwrap();
        assert!(get_report_schema().is_ok());
    }

    #[test]
    fn test_minimal_report_validates() {
        initialize_report_validator().unwrap();
        validate_report_json(&minimal_report()).unwrap();
    }

    #[test]
    fn test_full_report_validates() {
        initialize_report_validator().unwrap();
        let mut report = minimal_report();
        report["analyzed_rows"] = json!(100);
        report["field_analyses"] = json!([{
            "field_name": "email",
            "data_type": "email",
            "completeness_score": 90.0,
            "correctness_score": 100.0,
            "uniqueness_score": 100.0,
            "consistency_score": 100.0,
            "overall_score": 97.5,
            "quality_grade": "A"
        }]);
        report["issues"] = json!([{
            "type": "missing_values",
            "severity": "medium",
            "description": "Column 'email' is missing 10 of 100 values (10.0%)",
            "field": "email",
            "affected_rows": 10,
            "affected_pct": 10.0
        }]);
        report["detected_domain"] = json!("ecommerce");

        validate_report_json(&report).unwrap();
    }

    #[test]
    fn test_rejects_out_of_bounds_score() {
        initialize_report_validator().unwrap();
        let mut report = minimal_report();
        report["table_scores"]["overall_score"] = json!(101.0);

        assert!(matches!(
            validate_report_json(&report),
            Err(ValidationError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_grade() {
        initialize_report_validator().unwrap();
        let mut report = minimal_report();
        report["table_scores"]["quality_grade"] = json!("E");

        assert!(validate_report_json(&report).is_err());
    }

    #[test]
    fn test_rejects_missing_required_field() {
        initialize_report_validator().unwrap();
        let mut report = minimal_report();
        report.as_object_mut().unwrap().remove("issues");

        assert!(validate_report_json(&report).is_err());
    }

    #[test]
    fn test_rejects_unknown_issue_type() {
        initialize_report_validator().unwrap();
        let mut report = minimal_report();
        report["issues"] = json!([{
            "type": "surprise",
            "severity": "medium",
            "description": "x",
            "field": "y"
        }]);

        assert!(validate_report_json(&report).is_err());
    }

    #[test]
    fn test_validate_and_parse_roundtrip() {
        initialize_report_validator().unwrap();
        let text = minimal_report().to_string();
        let report = validate_and_parse_report(&text).unwrap();

        assert_eq!(report.table_name, "orders");
        assert_eq!(report.analyzed_rows, 0);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        initialize_report_validator().unwrap();
        assert!(matches!(
            validate_and_parse_report("not json"),
            Err(ValidationError::JsonParsing { .. })
        ));
    }

    #[test]
    fn test_tolerates_extra_fields() {
        initialize_report_validator().unwrap();
        let mut report = minimal_report();
        report["future_extension"] = json!({"anything": true});

        validate_report_json(&report).unwrap();
    }
}
