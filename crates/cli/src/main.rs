//! Dynadot tools CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration**: flags with environment fallbacks
//!    (`DYNADOT_API_KEY`, `DYNADOT_SANDBOX`, `DYNADOT_TIMEOUT_SECS`). A missing
//!    API key is fatal for any subcommand that talks to the remote service.
//! 2. **Wire observability**: configure `tracing-subscriber` (pretty or JSON
//!    to stderr) and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: build the [`dynadot::DynadotClient`] and
//!    hand it to the [`operations`] layer as a `CommandInvoker`.
//! 4. **Host operations**: list operations and schemas, invoke one operation,
//!    or read a resource. Ctrl-C abandons an in-flight call.

mod commands;
mod config;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;

use config::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let telemetry = telemetry::init(cli.log_format)?;

    let result = commands::run(cli).await;

    telemetry.shutdown();
    result
}
