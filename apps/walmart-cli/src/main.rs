//! Walmart Marketplace command line client.
//!
//! Every connection setting can come from a flag or the environment:
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `WALMART_CONSUMER_ID` | | Consumer id (required) |
//! | `WALMART_PRIVATE_KEY` | | Signing key (required) |
//! | `WALMART_CHANNEL_TYPE` | | `WM_CONSUMER.CHANNEL.TYPE` header (required) |
//! | `WALMART_ENV` | `production` | `production`, `staging` or `mock` |
//! | `WALMART_COUNTRY` | | `ca` routes through `/v3/ca` |
//! | `WALMART_MAX_RETRIES` | `3` | Retries for transient failures |
//! | `WALMART_BASE_URL` | | Base URL override |
//! | `WALMART_TIMEOUT_SECS` | `30` | Per-request timeout |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | | Overrides `LOG_LEVEL` when set |
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = cli.connection.client_config()?;
    let output = commands::run(cli.command, &config).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("failed to render output")?
    );
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    Ok(())
}
