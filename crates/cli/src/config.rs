//! Command-line and environment configuration.
//!
//! Every setting can come from a flag or its environment variable. The values
//! are read once, here, and turned into an immutable
//! [`registrar::ClientConfig`]; nothing downstream reads the environment.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use registrar::{ClientConfig, ConfigError, Endpoint, DEFAULT_DEADLINE};

#[derive(Parser, Debug)]
#[command(name = "dynadot-tools")]
#[command(version, about = "Call Dynadot API commands as typed operations", long_about = None)]
pub struct Cli {
    /// API key for the Dynadot command API
    #[arg(long, env = "DYNADOT_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Use the sandbox endpoint instead of production
    ///
    /// The environment variable accepts true/false, yes/no, on/off and 1/0.
    #[arg(
        long,
        env = "DYNADOT_SANDBOX",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::BoolishValueParser::new(),
        global = true
    )]
    pub sandbox: bool,

    /// Per-call deadline in seconds
    #[arg(long, env = "DYNADOT_TIMEOUT_SECS", default_value_t = DEFAULT_DEADLINE.as_secs(), global = true)]
    pub timeout_secs: u64,

    /// Log output format (filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available operations
    Operations,

    /// Print the input schema of an operation
    Schema {
        /// Operation name
        operation: String,
    },

    /// Invoke an operation
    Call {
        /// Operation name
        operation: String,

        /// Argument as name=value (repeatable)
        #[arg(long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,

        /// Arguments as a JSON object; --arg values take precedence
        #[arg(long)]
        json: Option<String>,
    },

    /// List readable resources
    Resources,

    /// Read a resource by URI
    Read {
        /// Resource URI, e.g. dynadot://account/snapshot
        uri: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    /// Builds the client configuration. Fails if no API key was supplied.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::new(self.api_key.clone(), Endpoint::from_sandbox_flag(self.sandbox))?
            .with_deadline(Duration::from_secs(self.timeout_secs))
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing argument name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
