//! YAML field helpers
//!
//! Small utilities for walking a `serde_yaml::Value` with precise schema
//! errors: a missing field and a present-but-mistyped field both report as
//! schema violations, with distinct messages.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// Get a required string field
pub(crate) fn get_str(obj: &YamlValue, field: &str) -> Result<String> {
    match obj.get(field) {
        None => Err(missing(field)),
        Some(value) => value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| wrong_type(field, "a string", value)),
    }
}

/// Get an optional string field; present but non-string is an error
pub(crate) fn get_opt_str(obj: &YamlValue, field: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| wrong_type(field, "a string", value)),
    }
}

/// Get an optional sequence field; present but non-sequence is an error
pub(crate) fn get_opt_sequence<'a>(
    obj: &'a YamlValue,
    field: &str,
) -> Result<Option<&'a Vec<YamlValue>>> {
    match obj.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_sequence()
            .map(Some)
            .ok_or_else(|| wrong_type(field, "a sequence", value)),
    }
}

/// Schema violation for a missing required field
pub(crate) fn missing(field: &str) -> ParseError {
    ParseError::SchemaViolation {
        field: field.to_string(),
        message: "required field is missing".to_string(),
    }
}

/// Schema violation for a present field with the wrong type
pub(crate) fn wrong_type(field: &str, expected: &str, actual: &YamlValue) -> ParseError {
    ParseError::SchemaViolation {
        field: field.to_string(),
        message: format!("expected {}, got {}", expected, type_name(actual)),
    }
}

fn type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}
