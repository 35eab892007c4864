//! Dynadot command API adapter.
//!
//! Implements the [`registrar::CommandInvoker`] port over the remote service's
//! HTTP command interface: a single `GET` endpoint that takes the credential,
//! the command name and command-specific fields as query parameters and
//! answers with a JSON envelope.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection pooling, deadline enforcement, status
//! handling and body reading live here. Envelope interpretation is delegated
//! to [`registrar::envelope`]; callers only ever see a [`registrar::Outcome`].
//!
//! ## Transport
//!
//! [`DynadotClient`] is generic over [`Transport`]. Production code uses
//! [`HttpTransport`] (reqwest with rustls); tests substitute an in-process
//! transport to observe cancellation and concurrency.

pub mod client;
pub mod transport;

pub use client::DynadotClient;
pub use transport::{HttpTransport, Transport, TransportError};
