//! Search command implementation.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, Utc};
use splunk_rest::{MetricsCollector, SearchOptions, SplunkClient, redact_query};
use splunk_rest_config::Config;
use splunk_rest_config::constants::SPLUNK_TIME_FORMAT;
use tracing::info;

use crate::args::SearchArgs;
use crate::formatters::get_formatter;

/// Parse a time bound given as RFC 3339 or `MM/DD/YYYY:HH:MM:SS` in UTC.
pub fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, SPLUNK_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .with_context(|| {
            format!("Invalid time '{value}': expected RFC 3339 or MM/DD/YYYY:HH:MM:SS")
        })
}

/// Build the per-search options from configuration and the command's time bounds.
pub fn search_options(config: &Config, args: &SearchArgs) -> Result<SearchOptions> {
    let mut options = SearchOptions::from_config(&config.search);

    if let Some(earliest) = args.earliest.as_deref() {
        options = options.earliest(parse_time(earliest).context("--earliest")?);
    }
    if let Some(latest) = args.latest.as_deref() {
        options = options.latest(parse_time(latest).context("--latest")?);
    }
    if let Some(window) = options.window()
        && window.earliest >= window.latest
    {
        bail!(
            "--earliest ({}) must be before --latest ({})",
            window.earliest,
            window.latest
        );
    }

    Ok(options)
}

pub async fn run(config: Config, args: SearchArgs) -> Result<()> {
    info!("Executing search: {}", redact_query(&args.query));

    let options = search_options(&config, &args)?;
    let client = SplunkClient::builder()
        .from_config(&config)
        .metrics(MetricsCollector::new())
        .build()?;

    info!("Connecting to {}", client.base_url());

    let results = client.search(&args.query, &options).await?;
    info!(rows = results.len(), "Search complete");

    let formatter = get_formatter(args.format);
    let output = formatter.format_search_results(&results)?;
    print!("{}", output);

    Ok(())
}
