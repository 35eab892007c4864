//! Core command domain for the Dynadot tooling workspace.
//!
//! This crate turns a command name and caller arguments into an outbound
//! request, and turns a raw response body into a uniform [`Outcome`]. It
//! defines the [`CommandInvoker`] port; the `dynadot` crate implements it over
//! HTTP.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a command invocation is; infrastructure crates define
//! *how* it is carried.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtypes (`CommandName`, `ApiKey`) |
//! | [`config`] | Endpoint selection and immutable client configuration |
//! | [`request`] | Request builder: omission rules, list fan-out, reserved fields |
//! | [`envelope`] | `*Response` envelope detection and failure extraction |
//! | [`types`] | `CommandResponse` and the `Outcome` alias |
//! | [`errors`] | Failure taxonomy and retry policy |
//! | [`invoker`] | The `CommandInvoker` port |

pub mod config;
pub mod envelope;
pub mod errors;
pub mod identifiers;
pub mod invoker;
pub mod request;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{ClientConfig, Endpoint, DEFAULT_DEADLINE};
pub use envelope::normalize_body;
pub use errors::{CommandError, ConfigError, FailureKind, RetryPolicy};
pub use identifiers::{ApiKey, CommandName};
pub use invoker::CommandInvoker;
pub use request::CommandRequest;
pub use types::{CommandResponse, Outcome};
