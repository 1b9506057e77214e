//! Cell-level parsing and formatting shared by all entities.
//!
//! Spreadsheet cells are untyped text: integers are parsed from the cell
//! string, booleans are stored as the literal `"True"`/`"False"` and read
//! back with a case-insensitive comparison against `"true"` (anything else
//! deserializes to false).

use crate::errors::ModelError;
use crate::Record;

/// Text of a header-keyed field; missing keys read as empty.
pub fn text(rec: &Record, key: &str) -> String {
    rec.get(key).cloned().unwrap_or_default()
}

/// Integer field from a header-keyed record.
pub fn int(rec: &Record, key: &str) -> Result<i64, ModelError> {
    parse_int(key, rec.get(key).map(String::as_str).unwrap_or(""))
}

/// Boolean field from a header-keyed record.
pub fn flag(rec: &Record, key: &str) -> bool {
    parse_bool(rec.get(key).map(String::as_str).unwrap_or(""))
}

/// Positional cell from a raw row; trailing cells may be truncated by the
/// backing store, in which case they read as empty.
pub fn at(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

pub fn parse_int(field: &str, value: &str) -> Result<i64, ModelError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ModelError::Malformed(format!("{field}: {value:?} is not an integer")))
}

pub fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
