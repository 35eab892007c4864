//! Argument validation failures.
//!
//! These are raised before a request is built, so nothing is sent to the
//! remote service when one occurs.

use thiserror::Error;

/// Host-supplied arguments that do not fit an operation's schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No operation with this name exists.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A required argument was absent, null or empty.
    #[error("{operation}: missing required argument '{argument}'")]
    Missing {
        /// Operation being called.
        operation: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// An argument the operation does not declare.
    #[error("{operation}: unknown argument '{argument}'")]
    Unknown {
        /// Operation being called.
        operation: &'static str,
        /// Argument name as supplied by the host.
        argument: String,
    },

    /// An argument of the wrong JSON type.
    #[error("{operation}: argument '{argument}' must be of type {expected}")]
    InvalidType {
        /// Operation being called.
        operation: &'static str,
        /// Name of the offending argument.
        argument: &'static str,
        /// JSON Schema type the argument must have.
        expected: &'static str,
    },
}
