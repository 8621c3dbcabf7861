//! NDJSON formatter implementation.
//!
//! Invariants:
//! - Each line is a valid JSON object
//! - Records are separated by newlines (no trailing comma)

use anyhow::Result;
use serde::Serialize;
use splunk_rest::ResultRow;

use super::Formatter;

/// NDJSON formatter.
pub struct NdjsonFormatter;

fn to_ndjson<T: Serialize>(items: &[T]) -> Result<String> {
    let mut output = String::new();
    for item in items {
        let line = serde_json::to_string(item)?;
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

impl Formatter for NdjsonFormatter {
    fn format_search_results(&self, results: &[ResultRow]) -> Result<String> {
        to_ndjson(results)
    }
}
