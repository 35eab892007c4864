//! Read-only account resources.
//!
//! Resources are rendered as JSON text. A failed read becomes
//! `{"error": "<message>"}` in the rendered text rather than an error of the
//! read itself, so a host can always display something.

use chrono::Utc;
use serde_json::{json, Value};

use registrar::{CommandInvoker, CommandName, CommandRequest, Outcome};

/// A readable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Account info, balance and domain list in one document.
    AccountSnapshot,
    /// Output of `account_info`.
    AccountInfo,
    /// Output of `get_account_balance`.
    AccountBalance,
    /// Output of `list_domain`.
    Domains,
}

impl Resource {
    /// Every resource, in listing order.
    pub const ALL: [Resource; 4] = [
        Resource::AccountSnapshot,
        Resource::AccountInfo,
        Resource::AccountBalance,
        Resource::Domains,
    ];

    /// The `dynadot://` URI the resource is read by.
    pub fn uri(self) -> &'static str {
        match self {
            Resource::AccountSnapshot => "dynadot://account/snapshot",
            Resource::AccountInfo => "dynadot://account/info",
            Resource::AccountBalance => "dynadot://account/balance",
            Resource::Domains => "dynadot://domains",
        }
    }

    /// One-line description for resource listings.
    pub fn description(self) -> &'static str {
        match self {
            Resource::AccountSnapshot => "Account details, balance and domain list",
            Resource::AccountInfo => "Account details and defaults",
            Resource::AccountBalance => "Current account balance",
            Resource::Domains => "All domains in the account",
        }
    }

    /// Resolves a URI, returning `None` for unknown ones.
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.uri() == uri)
    }
}

/// Reads the resource at `uri` and returns its JSON text.
pub async fn read(invoker: &dyn CommandInvoker, uri: &str) -> String {
    let value = match Resource::from_uri(uri) {
        Some(resource) => read_value(invoker, resource).await,
        None => json!({"error": format!("unknown resource: {uri}")}),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|err| {
        json!({"error": format!("failed to render resource: {err}")}).to_string()
    })
}

async fn read_value(invoker: &dyn CommandInvoker, resource: Resource) -> Value {
    match resource {
        Resource::AccountSnapshot => {
            let (account, balance, domains) = tokio::join!(
                fetch(invoker, "account_info"),
                fetch(invoker, "get_account_balance"),
                fetch(invoker, "list_domain"),
            );
            json!({
                "generated_at": Utc::now().to_rfc3339(),
                "account": account,
                "balance": balance,
                "domains": domains,
            })
        }
        Resource::AccountInfo => fetch(invoker, "account_info").await,
        Resource::AccountBalance => fetch(invoker, "get_account_balance").await,
        Resource::Domains => fetch(invoker, "list_domain").await,
    }
}

async fn fetch(invoker: &dyn CommandInvoker, command: &'static str) -> Value {
    let Some(command) = CommandName::new(command) else {
        return json!({"error": "empty command name"});
    };
    render(invoker.invoke(CommandRequest::new(command)).await)
}

fn render(outcome: Outcome) -> Value {
    match outcome {
        Ok(response) => response.into_value(),
        Err(err) => {
            tracing::warn!(kind = %err.kind(), error = %err, "Resource read failed");
            json!({"error": err.to_string()})
        }
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
