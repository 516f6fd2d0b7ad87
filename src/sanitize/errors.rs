//! # Sanitization Errors

use thiserror::Error;

/// Errors raised by the sanitization pipeline.
///
/// With a tagged JSON value type every leaf is already a legal JSON value,
/// so the only contract left to enforce at runtime is that a payload is a
/// map at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    #[error("expected a JSON object payload, got {0}")]
    TypeMismatch(&'static str),
}

/// Human-readable name of a JSON value's type, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
