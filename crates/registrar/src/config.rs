//! Immutable endpoint configuration.
//!
//! A [`ClientConfig`] is built once at startup and handed to the client. The
//! command layer never reads the environment itself.

use std::time::Duration;

use crate::{ApiKey, ConfigError};

/// Deadline applied to each invocation when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

const PRODUCTION_URL: &str = "https://api.dynadot.com/api3.json";
const SANDBOX_URL: &str = "https://api-sandbox.dynadot.com/api3.json";

/// Which instance of the remote service to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    /// The live service.
    #[default]
    Production,
    /// The isolated test instance.
    Sandbox,
}

impl Endpoint {
    /// Selects an endpoint from the sandbox flag.
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Endpoint::Sandbox
        } else {
            Endpoint::Production
        }
    }

    /// Returns the fixed base address for this endpoint.
    pub fn base_url(self) -> &'static str {
        match self {
            Endpoint::Production => PRODUCTION_URL,
            Endpoint::Sandbox => SANDBOX_URL,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Production => f.write_str("production"),
            Endpoint::Sandbox => f.write_str("sandbox"),
        }
    }
}

/// Everything a client needs to reach the remote service.
///
/// `base_url` normally comes from [`Endpoint::base_url`];
/// [`ClientConfig::with_base_url`] exists so tests can point the client at a
/// local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: Endpoint,
    base_url: String,
    credential: ApiKey,
    deadline: Duration,
}

impl ClientConfig {
    /// Builds a configuration with the default deadline.
    ///
    /// Fails with [`ConfigError::MissingCredential`] when `credential` is
    /// absent or blank.
    pub fn new(credential: Option<String>, endpoint: Endpoint) -> Result<Self, ConfigError> {
        let credential = credential
            .and_then(ApiKey::new)
            .ok_or(ConfigError::MissingCredential)?;
        Ok(Self {
            endpoint,
            base_url: endpoint.base_url().to_string(),
            credential,
            deadline: DEFAULT_DEADLINE,
        })
    }

    /// Replaces the per-invocation deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Result<Self, ConfigError> {
        if deadline.is_zero() {
            return Err(ConfigError::InvalidDeadline);
        }
        self.deadline = deadline;
        Ok(self)
    }

    /// Overrides the base address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The selected endpoint.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// The address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential attached to every request.
    pub fn credential(&self) -> &ApiKey {
        &self.credential
    }

    /// Upper bound on a single invocation.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
