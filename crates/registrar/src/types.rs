//! Shared value types for command results.
//!
//! Every remote command returns a differently shaped payload, so a successful
//! result is kept as the raw top-level JSON object. Callers pick out the fields
//! they need; this layer only guarantees that no error was detected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CommandError;

/// The normalised result of one command invocation.
pub type Outcome = Result<CommandResponse, CommandError>;

// ---------------------------------------------------------------------------

/// A successful response body, exactly as the remote service sent it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandResponse(Map<String, Value>);

impl CommandResponse {
    /// Wraps a parsed top-level object.
    pub fn new(body: Map<String, Value>) -> Self {
        Self(body)
    }

    /// Returns a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the nested payload under the `*Response` wrapper key, if any.
    pub fn payload(&self) -> Option<&Value> {
        crate::envelope::find_envelope(&self.0).map(|(_, value)| value)
    }

    /// Converts the body into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
