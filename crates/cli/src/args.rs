//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not read `SPLUNK_*` connection variables; `ConfigLoader::from_env` does that
//!   so file, environment and flag precedence stays in one place.

use clap::{Parser, Subcommand};
use splunk_rest_config::AuthType;
use std::path::PathBuf;

use crate::formatters::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "splunk-rest")]
#[command(about = "Run Splunk searches from the command line, splitting large time ranges automatically", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  splunk-rest search 'search index=main | head 10'\n  splunk-rest search 'search index=main' --earliest 2024-01-01T00:00:00Z --latest 2024-01-02T00:00:00Z --allow-partition\n  splunk-rest --config splunk.toml search 'search index=_internal' --format ndjson\n"
)]
pub struct Cli {
    /// Path to a TOML connection file.
    ///
    /// Can also be set via SPLUNK_CONFIG_PATH environment variable.
    #[arg(long = "config", global = true, env = "SPLUNK_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Base URL of the Splunk management port (e.g., https://localhost:8089)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Authentication type (basic, authentication-token, authorization-token)
    #[arg(long, global = true)]
    pub auth_type: Option<AuthType>,

    /// Username for basic or session authentication
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for basic or session authentication
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Bearer token for token authentication
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// How many times to retry a rate-limited (HTTP 429) request
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a search query and print every result row
    Search(SearchArgs),
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// The search query to execute (e.g., 'search index=main | head 10')
    pub query: String,

    /// Earliest event time, RFC 3339 or MM/DD/YYYY:HH:MM:SS (UTC)
    #[arg(short, long)]
    pub earliest: Option<String>,

    /// Latest event time (exclusive), RFC 3339 or MM/DD/YYYY:HH:MM:SS (UTC)
    #[arg(short, long)]
    pub latest: Option<String>,

    /// Maximum number of rows a single job may return
    #[arg(short = 'c', long)]
    pub max_count: Option<usize>,

    /// Split the time range and search again when a job hits the row cap
    #[arg(long)]
    pub allow_partition: bool,

    /// Number of sub-ranges per split
    #[arg(long)]
    pub partition_count: Option<usize>,

    /// Seconds between job status polls
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Give up on a job after this many seconds
    #[arg(long)]
    pub max_wait: Option<u64>,

    /// Give up on a job after this many status polls
    #[arg(long)]
    pub max_polls: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}
