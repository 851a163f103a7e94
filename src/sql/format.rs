//! Value serialization for bound parameters and preview literals
//!
//! Both renderings follow one rule set so that the i-th parameter of a
//! built query and the i-th literal of its preview always describe the same
//! value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static JSON_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*jsonb?\s*$").expect("valid JSON type pattern"));

/// Whether a declared data type belongs to the JSON family (`json`, `jsonb`)
pub fn is_json_type(data_type: &str) -> bool {
    JSON_TYPE_RE.is_match(data_type)
}

/// Value to bind for a column of the given declared type
///
/// Objects and arrays destined for a JSON column become compact JSON text;
/// everything else, booleans, nulls and arrays for array columns included,
/// is bound as-is for the driver to encode.
pub fn serialize_param(value: &Value, data_type: &str) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) if is_json_type(data_type) => {
            Value::String(value.to_string())
        }
        _ => value.clone(),
    }
}

/// Quote text as a SQL string literal, doubling embedded single quotes
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Inline SQL literal for a value, used by previews
///
/// `NULL`, `TRUE`/`FALSE` and numbers are unquoted; strings are quoted.
/// Objects and arrays render as quoted compact JSON.
pub fn render_literal(value: &Value, data_type: &str) -> String {
    match serialize_param(value, data_type) {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_literal(&s),
        other => quote_literal(&other.to_string()),
    }
}
