//! Host-facing replies.
//!
//! A [`ToolReply`] is what a tool host shows to its caller: text plus an
//! explicit error marker. Failures are never turned into an empty success.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use registrar::{CommandInvoker, Outcome};

use crate::{ArgumentError, Operation};

/// Text reply for one operation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReply {
    /// Set when the call failed; `text` then holds the failure message.
    pub is_error: bool,
    /// Rendered response body or failure message.
    pub text: String,
}

impl ToolReply {
    /// A successful reply.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            text: text.into(),
        }
    }

    /// A reply marked as an error.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            text: text.into(),
        }
    }

    /// Renders an outcome: the full body as pretty JSON, or the failure message.
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Ok(response) => match serde_json::to_string_pretty(&response) {
                Ok(text) => Self::success(text),
                Err(err) => Self::error(format!("failed to render response: {err}")),
            },
            Err(err) => Self::error(err.to_string()),
        }
    }
}

impl From<ArgumentError> for ToolReply {
    fn from(err: ArgumentError) -> Self {
        Self::error(err.to_string())
    }
}

/// Validates `args`, invokes the operation's command and renders the result.
pub async fn call(
    invoker: &dyn CommandInvoker,
    operation: &Operation,
    args: &Map<String, Value>,
) -> ToolReply {
    let request = match operation.request(args) {
        Ok(request) => request,
        Err(err) => {
            tracing::info!(operation = operation.name, error = %err, "Rejected tool arguments");
            return err.into();
        }
    };

    tracing::debug!(operation = operation.name, command = operation.command, "Calling operation");
    ToolReply::from_outcome(invoker.invoke(request).await)
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod tests;
