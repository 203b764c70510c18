//! Nested-path lookups over a raw response document.
//!
//! Two flavours are provided and every accessor on [`ResultSet`](super::ResultSet)
//! goes through exactly one of them:
//!
//! - [`lookup`] walks a path and returns `None` on the first missing key. Defaulting
//!   accessors map that `None` to their documented empty value.
//! - [`require`] walks the same path but reports the missing location as
//!   [`ResultsError::MissingField`]. Strict accessors propagate it.

use serde_json::Value;

use super::ResultsError;

/// Safely walk `path` from `root`, stopping at the first absent key.
///
/// Non-object intermediate values are treated as absent.
pub(crate) fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |node, key| node.as_object().and_then(|map| map.get(*key)))
}

/// Walk `path` from `root`, failing with the dotted path if any key is missing.
///
/// An explicit JSON `null` counts as missing.
pub(crate) fn require<'a>(root: &'a Value, path: &[&str]) -> Result<&'a Value, ResultsError> {
    match lookup(root, path) {
        Some(Value::Null) | None => Err(ResultsError::MissingField {
            path: dotted(path),
        }),
        Some(value) => Ok(value),
    }
}

/// Look up an array, returning an empty slice when absent or not an array.
pub(crate) fn array_or_empty<'a>(root: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Look up a required array.
pub(crate) fn require_array<'a>(
    root: &'a Value,
    path: &[&str],
) -> Result<&'a [Value], ResultsError> {
    require(root, path)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ResultsError::InvalidField {
            path: dotted(path),
            expected: "array",
        })
}

/// Look up a required string.
pub(crate) fn require_str<'a>(root: &'a Value, path: &[&str]) -> Result<&'a str, ResultsError> {
    require(root, path)?
        .as_str()
        .ok_or_else(|| ResultsError::InvalidField {
            path: dotted(path),
            expected: "string",
        })
}

/// Look up a required unsigned integer.
pub(crate) fn require_u64(root: &Value, path: &[&str]) -> Result<u64, ResultsError> {
    let value = require(root, path)?;
    as_count(value).ok_or_else(|| ResultsError::InvalidField {
        path: dotted(path),
        expected: "non-negative integer",
    })
}

/// Read a count that the provider may send as a number or a numeric string.
pub(crate) fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a string field of an object, or an empty string.
pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

pub(crate) fn dotted(path: &[&str]) -> String {
    path.join(".")
}
