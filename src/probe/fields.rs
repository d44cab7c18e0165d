// src/probe/fields.rs
//! Lookups into JSON response bodies by dotted path (`data.projects`).

use super::failure::FailureReason;
use serde_json::Value;

pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// Present and not `null`.
pub fn require<'a>(value: &'a Value, path: &str) -> Result<&'a Value, FailureReason> {
    lookup(value, path)
        .filter(|v| !v.is_null())
        .ok_or_else(|| FailureReason::MissingField(path.to_string()))
}

pub fn require_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, FailureReason> {
    require(value, path)?
        .as_str()
        .ok_or_else(|| FailureReason::unexpected_value(path, "expected a string"))
}

pub fn require_u64(value: &Value, path: &str) -> Result<u64, FailureReason> {
    require(value, path)?
        .as_u64()
        .ok_or_else(|| FailureReason::unexpected_value(path, "expected a non-negative integer"))
}

pub fn require_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, FailureReason> {
    require(value, path)?
        .as_array()
        .ok_or_else(|| FailureReason::unexpected_value(path, "expected an array"))
}

pub fn require_object(value: &Value, path: &str) -> Result<(), FailureReason> {
    if require(value, path)?.is_object() {
        Ok(())
    } else {
        Err(FailureReason::unexpected_value(path, "expected an object"))
    }
}

/// The service wraps every payload in `{success, message, data}`. Anything
/// other than `success: true` is a rejection carrying the server's message.
pub fn require_success(value: &Value) -> Result<(), FailureReason> {
    match value.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(()),
        _ => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            Err(FailureReason::Rejected(message.to_string()))
        }
    }
}

/// Render an optional field for a progress note.
pub fn display(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => fallback.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Length of an optional array field, zero when absent.
pub fn count(value: &Value, path: &str) -> usize {
    lookup(value, path)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
