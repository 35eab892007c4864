//! Port trait for executing commands.
//!
//! Operation definitions and resource readers depend on [`CommandInvoker`]
//! only. The HTTP implementation lives in the `dynadot` crate; tests supply
//! canned outcomes.

use async_trait::async_trait;

use crate::{CommandRequest, Outcome};

/// Executes one command and returns its normalised [`Outcome`].
///
/// Implementations never panic or return early past this boundary: every
/// failure is a [`crate::CommandError`] value. Calls are independent; an
/// implementation may be shared across concurrent tasks.
#[async_trait]
pub trait CommandInvoker: Send + Sync {
    /// Runs `request` as a single round trip.
    async fn invoke(&self, request: CommandRequest) -> Outcome;
}

#[async_trait]
impl<T: CommandInvoker + ?Sized> CommandInvoker for std::sync::Arc<T> {
    async fn invoke(&self, request: CommandRequest) -> Outcome {
        (**self).invoke(request).await
    }
}
