//! Failure taxonomy for registrar command invocations.
//!
//! [`CommandError`] is the failure half of an [`crate::Outcome`]. Every way an
//! invocation can go wrong after startup is one of its variants; nothing is
//! thrown past the invocation boundary.
//!
//! [`ConfigError`] is the only failure that happens before a client exists. It
//! is fatal: the process does not start with an invalid configuration.
//!
//! [`RetryPolicy`] is advisory. This layer never retries; it only tells the
//! caller whether a retry could plausibly succeed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CommandName;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry.
///
/// ## Rules
///
/// - `Retryable`: connection failures, 5xx responses, malformed bodies.
/// - `NonRetryable`: timeouts, 4xx rejections, application errors reported by
///   the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried, on the caller's own back-off schedule.
    Retryable,
    /// The operation must not be retried automatically.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Invocation failures
// ---------------------------------------------------------------------------

/// Coarse classification of a [`CommandError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The deadline elapsed before the exchange completed.
    Timeout,
    /// The exchange failed, returned a non-2xx status, or produced an
    /// unparseable body.
    Transport,
    /// The remote service's own envelope signalled failure.
    Application,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
            FailureKind::Application => "application",
        };
        f.write_str(s)
    }
}

/// A classified, terminal failure of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The configured deadline elapsed and the in-flight exchange was cancelled.
    #[error("{command} timed out after {deadline:?}")]
    Timeout {
        /// Command that was in flight.
        command: CommandName,
        /// The deadline that elapsed.
        deadline: Duration,
    },

    /// The exchange could not be completed or its result could not be read.
    #[error("{message}")]
    Transport {
        /// Underlying cause, or `"<code> <reason>"` for a rejected status.
        message: String,
        /// HTTP status code when the failure is a non-2xx response.
        status: Option<u16>,
    },

    /// The remote service answered 200 but its envelope reported an error.
    #[error("{message}")]
    Application {
        /// Message extracted from the envelope.
        message: String,
    },
}

impl CommandError {
    /// Creates a transport failure that did not involve an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        CommandError::Transport {
            message: message.into(),
            status: None,
        }
    }

    /// Creates a transport failure for a non-2xx response.
    ///
    /// The message is `"<code> <reason>"`, or just the code when the status
    /// has no canonical reason phrase.
    pub fn status(code: u16, reason: Option<&str>) -> Self {
        let message = match reason {
            Some(reason) if !reason.is_empty() => format!("{code} {reason}"),
            _ => code.to_string(),
        };
        CommandError::Transport {
            message,
            status: Some(code),
        }
    }

    /// Creates an application failure.
    pub fn application(message: impl Into<String>) -> Self {
        CommandError::Application {
            message: message.into(),
        }
    }

    /// Returns the coarse kind of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            CommandError::Timeout { .. } => FailureKind::Timeout,
            CommandError::Transport { .. } => FailureKind::Transport,
            CommandError::Application { .. } => FailureKind::Application,
        }
    }

    /// Returns whether a caller could reasonably retry this invocation.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            CommandError::Transport {
                status: Some(code), ..
            } if (400..500).contains(code) => RetryPolicy::NonRetryable,
            CommandError::Transport { .. } => RetryPolicy::Retryable,
            CommandError::Timeout { .. } | CommandError::Application { .. } => {
                RetryPolicy::NonRetryable
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Startup failures
// ---------------------------------------------------------------------------

/// Configuration problems detected while constructing a [`crate::ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No credential was supplied, or it was blank.
    #[error("Configuration error: an API key is required")]
    MissingCredential,

    /// The deadline must be strictly positive.
    #[error("Configuration error: timeout must be greater than zero")]
    InvalidDeadline,
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
