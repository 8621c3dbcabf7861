//! Output formatters for search results.
//!
//! Responsibilities:
//! - Define the supported output formats.
//! - Render result rows for stdout.
//!
//! Invariants:
//! - Every rendered row is followed by a newline.
//! - Field order within a row is the order the server sent.

mod json;
mod ndjson;

use anyhow::Result;
use splunk_rest::ResultRow;

pub use json::JsonFormatter;
pub use ndjson::NdjsonFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// A single pretty-printed JSON array.
    Json,
    /// One compact JSON object per line.
    #[value(alias = "jsonl")]
    Ndjson,
}

/// Renders result rows.
pub trait Formatter {
    fn format_search_results(&self, results: &[ResultRow]) -> Result<String>;
}

/// The formatter for `format`.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Ndjson => Box::new(NdjsonFormatter),
    }
}
