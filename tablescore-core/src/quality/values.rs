//! Shared cell interpretation helpers used by every scorer.
//!
//! Missingness and text extraction have to agree across dimensions, so the
//! rules live here once: a cell is missing when the key is absent, the value
//! is JSON `null`, the string is blank after trimming, or the trimmed string
//! case-insensitively matches a conventional null marker.

use serde_json::Value;
use std::borrow::Cow;

/// Strings treated as explicit null markers, compared case-insensitively
/// after trimming.
pub(crate) const NULL_MARKERS: [&str; 5] = ["null", "na", "n/a", "none", "nil"];

/// Returns true when the cell counts as missing.
pub(crate) fn is_missing(cell: Option<&Value>) -> bool {
    match cell {
        None => true,
        Some(Value::Null) => true,
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            trimmed.is_empty()
                || NULL_MARKERS
                    .iter()
                    .any(|marker| trimmed.eq_ignore_ascii_case(marker))
        }
        Some(_) => false,
    }
}

/// Filters a column down to its present values, preserving row order.
pub(crate) fn present_values<'a>(cells: &[Option<&'a Value>]) -> Vec<&'a Value> {
    cells
        .iter()
        .filter(|cell| !is_missing(**cell))
        .filter_map(|cell| *cell)
        .collect()
}

/// Renders a scalar cell as text for pattern and distinctness work.
///
/// Strings are borrowed as-is; numbers and booleans use their JSON
/// rendering, so `1.5` and `"1.5"` compare equal downstream.
pub(crate) fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Attempts to read a cell as a finite floating point number.
pub(crate) fn parse_numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}
