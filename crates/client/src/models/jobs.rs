//! Search job status and result models.
//!
//! # What this module handles:
//! - Decoding the job status payload into a [`JobStatus`] snapshot
//! - Reducing a snapshot to the poller's three-way [`JobState`]
//! - Decoding the results payload into [`ResultRow`]s
//!
//! # Invariants
//! - A failed job is `Failed` whether or not it also reports done.
//! - A payload with no `entry` items is still `Pending`.

use serde::Deserialize;
use serde_json::Value;

use super::common::{SplunkMessage, SplunkMessages};

/// One result row: field name to value, in the order the server sent them.
pub type ResultRow = serde_json::Map<String, Value>;

/// Where a job is in its lifecycle, as far as the poller is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Still queued or running.
    Pending,
    /// Finished successfully; results can be fetched.
    Done,
    /// Finished unsuccessfully, with every diagnostic as `TYPE: text` lines.
    Failed(String),
}

/// Snapshot of a job's status, decoded fresh on every poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStatus {
    pub is_done: bool,
    pub is_failed: bool,
    pub messages: Vec<SplunkMessage>,
    pub dispatch_state: Option<String>,
    pub done_progress: Option<f64>,
    pub result_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    #[serde(default)]
    messages: Vec<SplunkMessage>,
    #[serde(default)]
    entry: Vec<StatusEntry>,
}

#[derive(Debug, Deserialize)]
struct StatusEntry {
    #[serde(default)]
    content: StatusContent,
}

#[derive(Debug, Default, Deserialize)]
struct StatusContent {
    #[serde(default, rename = "isDone")]
    is_done: bool,
    #[serde(default, rename = "isFailed")]
    is_failed: bool,
    #[serde(default)]
    messages: Vec<SplunkMessage>,
    #[serde(default, rename = "dispatchState")]
    dispatch_state: Option<String>,
    #[serde(default, rename = "doneProgress")]
    done_progress: Option<f64>,
    #[serde(
        default,
        rename = "resultCount",
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    result_count: Option<u64>,
}

/// Splunk reports counts as numbers or numeric strings depending on version.
fn opt_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum U64OrString {
        U64(u64),
        String(String),
    }

    match Option::<U64OrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(U64OrString::U64(v)) => Ok(Some(v)),
        Some(U64OrString::String(s)) => s.parse::<u64>().map(Some).map_err(D::Error::custom),
    }
}

impl JobStatus {
    /// Decode a job status response body.
    ///
    /// Diagnostics come from the top-level `messages` list, or from the first
    /// entry's content when the top level carries none.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let envelope: StatusEnvelope = serde_json::from_str(body)?;
        let mut status = JobStatus {
            messages: envelope.messages,
            ..Default::default()
        };

        if let Some(entry) = envelope.entry.into_iter().next() {
            let content = entry.content;
            status.is_done = content.is_done;
            status.is_failed = content.is_failed;
            status.dispatch_state = content.dispatch_state;
            status.done_progress = content.done_progress;
            status.result_count = content.result_count;
            if status.messages.is_empty() {
                status.messages = content.messages;
            }
        }

        Ok(status)
    }

    /// Every diagnostic as `TYPE: text`, one per line.
    pub fn diagnostics(&self) -> String {
        SplunkMessages {
            messages: self.messages.clone(),
        }
        .joined("\n")
    }

    /// Reduce the snapshot to the state the poller acts on.
    pub fn state(&self) -> JobState {
        if self.is_failed {
            JobState::Failed(self.diagnostics())
        } else if self.is_done {
            JobState::Done
        } else {
            JobState::Pending
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultsEnvelope {
    Wrapped {
        #[serde(default)]
        results: Vec<ResultRow>,
    },
    Bare(Vec<ResultRow>),
}

/// Decode a results response body into rows, preserving server order.
///
/// An empty body, or an object without `results`, is zero rows.
pub fn parse_results(body: &str) -> Result<Vec<ResultRow>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_str::<ResultsEnvelope>(body)? {
        ResultsEnvelope::Wrapped { results } => results,
        ResultsEnvelope::Bare(rows) => rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageType;

    #[test]
    fn test_done_job() {
        let status =
            JobStatus::from_json(r#"{"entry": [{"content": {"isDone": true, "isFailed": false}}]}"#)
                .unwrap();
        assert_eq!(status.state(), JobState::Done);
    }

    #[test]
    fn test_failed_wins_over_done() {
        let body = r#"{
            "messages": [
                {"type": "FATAL", "text": "Error in 'search' command"},
                {"type": "ERROR", "text": "second problem"}
            ],
            "entry": [{"content": {"isDone": true, "isFailed": true}}]
        }"#;
        let status = JobStatus::from_json(body).unwrap();
        assert_eq!(
            status.state(),
            JobState::Failed("FATAL: Error in 'search' command\nERROR: second problem".to_string())
        );
    }

    #[test]
    fn test_failed_without_done() {
        let body = r#"{"entry": [{"content": {"isDone": false, "isFailed": true}}]}"#;
        let status = JobStatus::from_json(body).unwrap();
        assert!(matches!(status.state(), JobState::Failed(ref m) if m.is_empty()));
    }

    #[test]
    fn test_empty_entry_is_pending() {
        let status = JobStatus::from_json(r#"{"entry": []}"#).unwrap();
        assert_eq!(status.state(), JobState::Pending);

        let status = JobStatus::from_json("{}").unwrap();
        assert_eq!(status.state(), JobState::Pending);
    }

    #[test]
    fn test_messages_fall_back_to_content() {
        let body = r#"{"entry": [{"content": {
            "isDone": true,
            "isFailed": true,
            "messages": [{"type": "ERROR", "text": "from content"}]
        }}]}"#;
        let status = JobStatus::from_json(body).unwrap();
        assert_eq!(status.messages[0].message_type, MessageType::Error);
        assert_eq!(status.diagnostics(), "ERROR: from content");
    }

    #[test]
    fn test_informational_fields() {
        let body = r#"{"entry": [{"content": {
            "isDone": false,
            "dispatchState": "RUNNING",
            "doneProgress": 0.42,
            "resultCount": "17"
        }}]}"#;
        let status = JobStatus::from_json(body).unwrap();
        assert_eq!(status.dispatch_state.as_deref(), Some("RUNNING"));
        assert_eq!(status.done_progress, Some(0.42));
        assert_eq!(status.result_count, Some(17));
        assert_eq!(status.state(), JobState::Pending);
    }

    #[test]
    fn test_malformed_status_is_error() {
        assert!(JobStatus::from_json("<html>").is_err());
    }

    #[test]
    fn test_parse_results_preserves_field_order() {
        let rows = parse_results(r#"{"results": [{"zeta": "1", "alpha": "2", "mid": "3"}]}"#)
            .unwrap();
        let keys: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_results_shapes() {
        assert!(parse_results("").unwrap().is_empty());
        assert!(parse_results(r#"{"preview": false}"#).unwrap().is_empty());
        assert_eq!(parse_results(r#"[{"a": 1}, {"a": 2}]"#).unwrap().len(), 2);
        assert!(parse_results(r#"{"results": "nope"}"#).is_err());
    }
}
