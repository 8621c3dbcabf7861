//! splunk-rest - run Splunk searches from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Layer configuration: connection file, then `SPLUNK_*` environment, then flags.
//! - Run the search through the shared client library and print the rows.
//!
//! Does NOT handle:
//! - REST API or partitioning logic (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide `SPLUNK_CONFIG_PATH`.
//! - Logs go to stderr; stdout carries only result rows.

mod args;
mod commands;
mod error;
mod formatters;

use anyhow::{Context, Result};
use args::{Cli, Commands, SearchArgs};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use splunk_rest_config::{Config, ConfigLoader};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = tokio::select! {
        outcome = run(cli) => match outcome {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("{:#}", e);
                e.exit_code()
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("^C\nOperation cancelled by user");
            ExitCode::Interrupted
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;

    if config.connection.skip_verify {
        tracing::warn!("TLS certificate verification is disabled");
    }

    match cli.command {
        Commands::Search(args) => commands::search::run(config, args).await,
    }
}

/// Layer the connection file, environment and flags into one [`Config`].
fn build_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    // Blank values fall back to the environment/defaults.
    if let Some(ref path) = cli.config_path
        && !path.as_os_str().is_empty()
    {
        loader = loader
            .from_file(path)
            .context("Failed to load configuration file")?;
    }

    loader = loader
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(auth_type) = cli.auth_type {
        loader = loader.with_auth_type(auth_type);
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(ref token) = cli.token {
        loader = loader.with_api_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    let Commands::Search(ref args) = cli.command;
    loader = apply_search_overrides(loader, args);

    loader.build().context("Failed to build configuration")
}

fn apply_search_overrides(mut loader: ConfigLoader, args: &SearchArgs) -> ConfigLoader {
    if let Some(max_count) = args.max_count {
        loader = loader.with_max_count(max_count);
    }
    if args.allow_partition {
        loader = loader.with_allow_partition(true);
    }
    if let Some(count) = args.partition_count {
        loader = loader.with_partition_count(count);
    }
    if let Some(secs) = args.poll_interval {
        loader = loader.with_poll_interval(Duration::from_secs(secs));
    }
    if let Some(secs) = args.max_wait {
        loader = loader.with_max_wait(Duration::from_secs(secs));
    }
    if let Some(polls) = args.max_polls {
        loader = loader.with_max_polls(polls);
    }
    loader
}
