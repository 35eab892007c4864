//! Command client: dispatch, deadline, classification.
//!
//! [`DynadotClient::invoke`] is the single entry point. It never returns early
//! with anything other than an [`Outcome`]; each call is one round trip with
//! no retry.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use registrar::{
    normalize_body, ClientConfig, CommandError, CommandInvoker, CommandName, CommandRequest,
    Outcome,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::transport::{HttpTransport, Transport, TransportError};

/// Invokes remote commands against the configured endpoint.
///
/// Cloning is cheap; clones share the configuration and transport.
#[derive(Debug)]
pub struct DynadotClient<T = HttpTransport> {
    config: Arc<ClientConfig>,
    transport: Arc<T>,
}

impl<T> Clone for DynadotClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl DynadotClient<HttpTransport> {
    /// Builds a client that talks HTTP to `config.base_url()`.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> DynadotClient<T> {
    /// Builds a client over an explicit transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs `request` under the configured deadline.
    pub async fn invoke(&self, request: CommandRequest) -> Outcome {
        let span = tracing::info_span!(
            "invoke",
            command = %request.command(),
            request_id = %Uuid::new_v4(),
            endpoint = %self.config.endpoint()
        );
        self.dispatch(request).instrument(span).await
    }

    /// Convenience form of [`DynadotClient::invoke`] taking raw name/value pairs.
    pub async fn invoke_command<I, K, V>(&self, command: CommandName, params: I) -> Outcome
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.invoke(CommandRequest::from_pairs(command, params)).await
    }

    async fn dispatch(&self, request: CommandRequest) -> Outcome {
        let deadline = self.config.deadline();
        let query = request.to_query(self.config.credential());
        let started = Instant::now();

        tracing::debug!(params = request.params().len(), "Dispatching command");

        // Dropping the exchange future on expiry cancels the in-flight request.
        let exchange = self.transport.get(self.config.base_url(), &query);
        let outcome = match tokio::time::timeout(deadline, exchange).await {
            Err(_) => Err(CommandError::Timeout {
                command: request.command().clone(),
                deadline,
            }),
            Ok(Err(err)) => Err(CommandError::from(err)),
            Ok(Ok(body)) => normalize_body(request.command(), &body),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => tracing::debug!(elapsed_ms, "Command succeeded"),
            Err(err) => tracing::warn!(
                elapsed_ms,
                kind = %err.kind(),
                error = %err,
                "Command failed"
            ),
        }
        outcome
    }
}

#[async_trait]
impl<T: Transport + 'static> CommandInvoker for DynadotClient<T> {
    async fn invoke(&self, request: CommandRequest) -> Outcome {
        DynadotClient::invoke(self, request).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
