//! Dataset ingestion from CSV and JSON sources.
//!
//! Ingestion is deliberately forgiving about row shape (ragged CSV rows are
//! padded or truncated to the header width) and deliberately strict about
//! structure (no headers, non-object JSON rows, and nested values are
//! errors). Cell whitespace is preserved as-is: trailing spaces and blank
//! cells are exactly the kind of signal the scorers measure.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{Result, TablescoreError};

/// Supported dataset source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of flat objects
    Json,
}

impl SourceFormat {
    /// Detects the format from a file extension, case-insensitively.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Reads a dataset from a file, detecting the format when not given.
///
/// # Errors
/// Returns a configuration error when the format cannot be detected, an I/O
/// error when the file cannot be read, and an invalid-dataset error when
/// the content does not form a valid dataset.
pub fn read_dataset(path: &Path, format: Option<SourceFormat>) -> Result<Dataset> {
    let format = match format {
        Some(format) => format,
        None => SourceFormat::from_extension(path).ok_or_else(|| {
            TablescoreError::configuration(format!(
                "cannot detect dataset format from '{}'; expected a .csv or .json extension",
                path.display()
            ))
        })?,
    };

    let content = fs::read_to_string(path)
        .map_err(|e| TablescoreError::io_failed(format!("reading '{}'", path.display()), e))?;

    match format {
        SourceFormat::Csv => parse_csv(&content),
        SourceFormat::Json => parse_json(&content),
    }
}

/// Parses CSV content into a dataset.
///
/// The first record is the header row; header names are trimmed. Data rows
/// shorter than the header are padded with nulls, longer rows are truncated
/// to the header width, and rows the CSV parser rejects outright are
/// skipped with a warning.
///
/// # Errors
/// Returns an invalid-dataset error when the content has no usable header
/// row, and an ingestion error when the header itself cannot be parsed.
pub fn parse_csv(content: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| TablescoreError::ingest_failed("parsing CSV header row", e))?
        .iter()
        .map(|name| name.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|name| name.is_empty()) {
        return Err(TablescoreError::invalid_dataset(
            "CSV input has no header row",
        ));
    }

    let mut rows: Vec<Value> = Vec::new();
    let mut skipped_rows: usize = 0;
    let mut truncated_rows: usize = 0;

    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if record.len() > headers.len() {
                    truncated_rows += 1;
                }
                let mut object = Map::with_capacity(headers.len());
                for (position, name) in headers.iter().enumerate() {
                    let cell = match record.get(position) {
                        Some(text) => Value::String(text.to_string()),
                        None => Value::Null,
                    };
                    object.insert(name.clone(), cell);
                }
                rows.push(Value::Object(object));
            }
            Err(e) => {
                skipped_rows += 1;
                // +2 for 1-based indexing and the header row
                tracing::warn!("Skipping malformed CSV row {}: {}", index + 2, e);
            }
        }
    }

    if truncated_rows > 0 {
        tracing::warn!(
            "{} CSV row(s) had more cells than the header and were truncated to {} columns",
            truncated_rows,
            headers.len()
        );
    }
    if skipped_rows > 0 {
        tracing::info!(
            "CSV parsing complete: {} row(s) kept, {} skipped",
            rows.len(),
            skipped_rows
        );
    }

    Dataset::new(headers, rows)
}

/// Parses a JSON array of flat objects into a dataset.
///
/// Columns are the union of keys across all objects, ordered
/// alphabetically.
///
/// # Errors
/// Returns a serialization error when the content is not valid JSON and an
/// invalid-dataset error when it is not an array of flat objects.
pub fn parse_json(content: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| TablescoreError::serialization_failed("parsing JSON dataset", e))?;

    let rows = match value {
        Value::Array(rows) => rows,
        _ => {
            return Err(TablescoreError::invalid_dataset(
                "JSON dataset must be an array of objects",
            ));
        }
    };

    Dataset::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_csv_basic() {
        let dataset = parse_csv("id,email\n1,a@example.com\n2,b@example.com\n").unwrap();

        assert_eq!(dataset.columns(), &["id", "email"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[0]["id"], json!("1"));
        assert_eq!(dataset.rows()[1]["email"], json!("b@example.com"));
    }

    #[test]
    fn test_parse_csv_preserves_cell_whitespace() {
        let dataset = parse_csv(" id , note \nx,  padded  \n").unwrap();

        assert_eq!(dataset.columns(), &["id", "note"]);
        assert_eq!(dataset.rows()[0]["note"], json!("  padded  "));
    }

    #[test]
    fn test_parse_csv_pads_short_rows() {
        let dataset = parse_csv("a,b,c\n1,2\n").unwrap();

        assert_eq!(dataset.rows()[0]["b"], json!("2"));
        assert_eq!(dataset.rows()[0]["c"], Value::Null);
    }

    #[test]
    fn test_parse_csv_truncates_long_rows() {
        let dataset = parse_csv("a,b\n1,2,3,4\n").unwrap();

        assert_eq!(dataset.columns(), &["a", "b"]);
        assert_eq!(dataset.rows()[0]["b"], json!("2"));
        assert!(dataset.rows()[0].get("c").is_none());
    }

    #[test]
    fn test_parse_csv_header_only_yields_zero_rows() {
        let dataset = parse_csv("id,email\n").unwrap();
        assert_eq!(dataset.row_count(), 0);
        assert_eq!(dataset.columns().len(), 2);
    }

    #[test]
    fn test_parse_csv_rejects_empty_content() {
        assert!(parse_csv("").is_err());
    }

    #[test]
    fn test_parse_json_basic() {
        let dataset =
            parse_json(r#"[{"b": "2", "a": "1"}, {"a": "3", "c": null}]"#).unwrap();

        assert_eq!(dataset.columns(), &["a", "b", "c"]);
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(parse_json(r#"{"a": 1}"#).is_err());
        assert!(parse_json("not json at all").is_err());
    }

    #[test]
    fn test_parse_json_rejects_nested_values() {
        let result = parse_json(r#"[{"a": {"nested": true}}]"#);
        assert!(matches!(
            result,
            Err(TablescoreError::InvalidDataset { .. })
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SourceFormat::from_extension(Path::new("data.csv")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_extension(Path::new("DATA.JSON")),
            Some(SourceFormat::Json)
        );
        assert_eq!(SourceFormat::from_extension(Path::new("data.parquet")), None);
        assert_eq!(SourceFormat::from_extension(Path::new("no_extension")), None);
    }

    #[test]
    fn test_read_dataset_detects_format() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "id,name").unwrap();
        writeln!(file, "1,Ada").unwrap();
        file.flush().unwrap();

        let dataset = read_dataset(file.path(), None).unwrap();
        assert_eq!(dataset.columns(), &["id", "name"]);
        assert_eq!(dataset.row_count(), 1);
    }

    #[test]
    fn test_read_dataset_unknown_extension_is_configuration_error() {
        let result = read_dataset(Path::new("mystery.dat"), None);
        assert!(matches!(
            result,
            Err(TablescoreError::Configuration { .. })
        ));
    }

    #[test]
    fn test_read_dataset_missing_file_is_io_error() {
        let result = read_dataset(Path::new("/nonexistent/file.csv"), None);
        assert!(matches!(result, Err(TablescoreError::Io { .. })));
    }
}
