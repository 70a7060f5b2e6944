//! Fail-fast argument checks run at every entry point taking identifiers.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Returns `value` unchanged, or `InvalidArgument` when it is empty or
/// whitespace-only.
pub fn require_non_empty<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(name));
    }
    Ok(value)
}

/// Nullable variant of [`require_non_empty`]: `None` fails the same way.
pub fn require_present<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value {
        Some(value) => require_non_empty(value, name),
        None => Err(Error::invalid_argument(name)),
    }
}

/// Unwraps a JSON object, rejecting scalars, arrays and null.
pub fn require_object(value: Value, name: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::invalid_argument(name)),
    }
}
