//! Response shape checks.
//!
//! The backend owns these payloads; the client only verifies the outer
//! shape each endpoint documents and reports anything else as
//! [`ApiError::MalformedResponse`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::client::ApiError;

/// JSON object as returned by the backend.
pub type JsonObject = Map<String, Value>;

/// Name of a JSON value's type, for error messages.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(what: &str, expected: &str, got: &Value) -> ApiError {
    ApiError::malformed(format!(
        "expected {} to be {}, got {}",
        what,
        expected,
        describe(got)
    ))
}

pub(crate) fn object(value: Value, what: &str) -> Result<JsonObject, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(mismatch(what, "an object", &other)),
    }
}

pub(crate) fn object_or_null(value: Value, what: &str) -> Result<Option<JsonObject>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(mismatch(what, "an object or null", &other)),
    }
}

pub(crate) fn array(value: Value, what: &str) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(what, "an array", &other)),
    }
}

/// Take one non-null field out of an object body.
pub(crate) fn field(value: Value, name: &str, what: &str) -> Result<Value, ApiError> {
    let mut map = object(value, what)?;
    match map.remove(name) {
        Some(Value::Null) | None => Err(ApiError::malformed(format!(
            "{} is missing the '{}' field",
            what, name
        ))),
        Some(inner) => Ok(inner),
    }
}

pub(crate) fn string(value: Value, what: &str) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(mismatch(what, "a string", &other)),
    }
}

pub(crate) fn typed<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::malformed(format!("failed to parse {}: {}", what, e)))
}
