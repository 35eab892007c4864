//! Response envelope normalisation.
//!
//! The remote service nests each command's payload under a command-specific
//! key (`SearchResponse`, `DomainInfoResponse`, ...). The key name is not known
//! statically, so the envelope is located by its `Response` suffix and checked
//! for the two failure markers the service uses:
//!
//! - `ResponseCode` equal to `-1`
//! - `Status` equal to `"error"`
//!
//! A body with no envelope, or an envelope without a failure marker, is a
//! success and is returned whole.

use serde_json::{Map, Value};

use crate::{CommandError, CommandName, CommandResponse, Outcome};

/// Suffix identifying the wrapper key of a response envelope.
pub const ENVELOPE_SUFFIX: &str = "Response";

const CODE_FIELD: &str = "ResponseCode";
const STATUS_FIELD: &str = "Status";
const ERROR_FIELD: &str = "Error";
const MESSAGE_FIELD: &str = "Message";

const FAILURE_CODE: i64 = -1;
const FAILURE_STATUS: &str = "error";

/// Parses a 2xx response body into an [`Outcome`].
///
/// Malformed JSON, and JSON that is not an object, are transport failures:
/// the remote service always answers with an object.
pub fn normalize_body(command: &CommandName, body: &[u8]) -> Outcome {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        CommandError::transport(format!("{command} returned malformed JSON: {e}"))
    })?;

    let Value::Object(map) = value else {
        return Err(CommandError::transport(format!(
            "{command} returned a JSON {} where an object was expected",
            json_type_name(&value)
        )));
    };

    match find_envelope(&map).and_then(|(_, inner)| envelope_failure(inner)) {
        Some(message) => {
            tracing::debug!(command = %command, error = %message, "Remote service reported an error");
            Err(CommandError::application(message))
        }
        None => Ok(CommandResponse::new(map)),
    }
}

/// Locates the `*Response` wrapper in a top-level object.
///
/// When several keys carry the suffix the smallest key is chosen, so the
/// choice does not depend on map iteration order, and a warning is logged.
pub fn find_envelope(body: &Map<String, Value>) -> Option<(&str, &Value)> {
    let mut candidates: Vec<(&String, &Value)> = body
        .iter()
        .filter(|(key, _)| key.ends_with(ENVELOPE_SUFFIX))
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(b.0));

    let (&(key, value), rest) = candidates.split_first()?;
    if !rest.is_empty() {
        let ignored: Vec<&str> = rest.iter().map(|(k, _)| k.as_str()).collect();
        tracing::warn!(
            chosen = key.as_str(),
            ignored = ?ignored,
            "Multiple response envelopes found; using the first by key order"
        );
    }
    Some((key.as_str(), value))
}

/// Returns the failure message if `envelope` signals an error.
///
/// The message comes from `Error`, then `Message`, then the whole envelope
/// serialised as JSON.
pub fn envelope_failure(envelope: &Value) -> Option<String> {
    let fields = envelope.as_object()?;

    let code_failed = fields.get(CODE_FIELD).is_some_and(is_failure_code);
    let status_failed = fields.get(STATUS_FIELD).and_then(Value::as_str) == Some(FAILURE_STATUS);
    if !code_failed && !status_failed {
        return None;
    }

    let message = [ERROR_FIELD, MESSAGE_FIELD]
        .iter()
        .filter_map(|field| fields.get(*field))
        .find(|value| !value.is_null())
        .map(value_text)
        .unwrap_or_else(|| envelope.to_string());
    Some(message)
}

// The service quotes codes in some commands, so "-1" counts as well as -1.
fn is_failure_code(code: &Value) -> bool {
    match code {
        Value::Number(n) => {
            n.as_i64() == Some(FAILURE_CODE) || n.as_f64() == Some(FAILURE_CODE as f64)
        }
        Value::String(s) => s.trim().parse::<i64>().ok() == Some(FAILURE_CODE),
        _ => false,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
