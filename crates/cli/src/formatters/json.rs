//! JSON formatter implementation.

use anyhow::Result;
use splunk_rest::ResultRow;

use super::Formatter;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_search_results(&self, results: &[ResultRow]) -> Result<String> {
        let mut output = serde_json::to_string_pretty(results)?;
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_results_are_an_empty_array() {
        let output = JsonFormatter.format_search_results(&[]).unwrap();
        assert_eq!(output, "[]\n");
    }

    #[test]
    fn test_rows_keep_field_order() {
        let row = json!({"_time": "2024-01-01T00:00:00Z", "host": "web-01", "count": "3"});
        let rows = vec![row.as_object().unwrap().clone()];

        let output = JsonFormatter.format_search_results(&rows).unwrap();
        let time_at = output.find("_time").unwrap();
        let host_at = output.find("host").unwrap();
        let count_at = output.find("count").unwrap();
        assert!(time_at < host_at && host_at < count_at);
    }
}
