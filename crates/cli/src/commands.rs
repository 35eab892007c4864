//! Subcommand handlers.
//!
//! Output goes to stdout; failures of a call are printed to stderr and turned
//! into a non-zero exit code by the caller.

use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use dynadot::DynadotClient;
use operations::{Catalog, Operation, ParamKind, Resource, ToolReply};
use serde_json::{Map, Value};

use crate::config::{Cli, Command};

/// Exit code used when a call is interrupted with Ctrl-C.
const INTERRUPTED: u8 = 130;

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let catalog = Catalog::default();

    match &cli.command {
        Command::Operations => {
            for operation in catalog.iter() {
                let access = if operation.is_read_only() { "read " } else { "write" };
                println!("{:<32} {access}  {}", operation.name, operation.description);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Schema { operation } => {
            let operation = find(&catalog, operation)?;
            println!("{}", serde_json::to_string_pretty(&operation.input_schema())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Resources => {
            for resource in Resource::ALL {
                println!("{:<32} {}", resource.uri(), resource.description());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Call {
            operation,
            args,
            json,
        } => {
            let operation = find(&catalog, operation)?;
            let args = build_args(operation, args, json.as_deref())?;
            let client = connect(&cli)?;

            tokio::select! {
                reply = operations::call(&client, operation, &args) => Ok(print_reply(reply)),
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!(operation = operation.name, "Interrupted; abandoning call");
                    Ok(ExitCode::from(INTERRUPTED))
                }
            }
        }
        Command::Read { uri } => {
            let client = connect(&cli)?;

            tokio::select! {
                text = operations::resources::read(&client, uri) => {
                    println!("{text}");
                    Ok(ExitCode::SUCCESS)
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!(uri = uri.as_str(), "Interrupted; abandoning read");
                    Ok(ExitCode::from(INTERRUPTED))
                }
            }
        }
    }
}

fn connect(cli: &Cli) -> anyhow::Result<DynadotClient> {
    let client = DynadotClient::new(cli.client_config()?).context("failed to build HTTP client")?;
    tracing::info!(
        endpoint = %client.config().endpoint(),
        deadline_secs = client.config().deadline().as_secs(),
        "Configured command client"
    );
    Ok(client)
}

fn find(catalog: &Catalog, name: &str) -> anyhow::Result<&'static Operation> {
    catalog
        .find(name)
        .ok_or_else(|| anyhow!("unknown operation '{name}' (see `dynadot-tools operations`)"))
}

fn print_reply(reply: ToolReply) -> ExitCode {
    if reply.is_error {
        eprintln!("error: {}", reply.text);
        ExitCode::FAILURE
    } else {
        println!("{}", reply.text);
        ExitCode::SUCCESS
    }
}

/// Merges `--json` and `--arg` input into one argument object.
///
/// `--arg` values are strings, except for flag arguments, which accept
/// `true`/`false`, `yes`/`no` and `1`/`0`.
pub fn build_args(
    operation: &Operation,
    pairs: &[(String, String)],
    json: Option<&str>,
) -> anyhow::Result<Map<String, Value>> {
    let mut args = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("--json is not valid JSON")? {
            Value::Object(map) => map,
            _ => bail!("--json must be a JSON object"),
        },
        None => Map::new(),
    };

    for (name, raw) in pairs {
        let kind = operation
            .params
            .iter()
            .find(|p| p.name == name.as_str())
            .map(|p| p.kind);
        let value = match kind {
            Some(ParamKind::Flag) => Value::Bool(parse_flag(raw).ok_or_else(|| {
                anyhow!("argument '{name}' expects true or false, got '{raw}'")
            })?),
            _ => Value::String(raw.clone()),
        };
        args.insert(name.clone(), value);
    }
    Ok(args)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
