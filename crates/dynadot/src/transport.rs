//! HTTP transport for the command endpoint.
//!
//! A [`Transport`] performs exactly one `GET` exchange and hands back the raw
//! body of a 2xx response. It does not parse JSON and does not apply the
//! deadline; both are the client's job.

use std::error::Error as _;

use async_trait::async_trait;
use registrar::CommandError;
use thiserror::Error;

/// Failures of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The exchange could not be established or completed.
    #[error("{0}")]
    Exchange(String),

    /// The server answered with a non-2xx status. The body was not read.
    #[error("HTTP status {code}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Canonical reason phrase, if the code has one.
        reason: Option<String>,
    },
}

impl From<TransportError> for CommandError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Exchange(message) => CommandError::transport(message),
            TransportError::Status { code, reason } => CommandError::status(code, reason.as_deref()),
        }
    }
}

/// One request/response exchange with the command endpoint.
///
/// Dropping the returned future must abandon the exchange; the client relies
/// on this to cancel requests that exceed their deadline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `GET url?query` and returns the body of a 2xx response.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Vec<u8>, TransportError>;
}

// ---------------------------------------------------------------------------

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport with the workspace user agent.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dynadot-tools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(exchange_error)?;
        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one with custom TLS or proxy settings.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(exchange_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().map(str::to_string),
            });
        }

        let body = response.bytes().await.map_err(exchange_error)?;
        Ok(body.to_vec())
    }
}

// The request URL carries the credential in its query string, so it is
// stripped before the error is rendered.
fn exchange_error(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TransportError::Exchange(message)
}
