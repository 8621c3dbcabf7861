//! Error types for the Splunk search client.
//!
//! Every failure of the search pipeline is a [`ClientError`]. The variants are
//! grouped by the stage that produced them (see [`SearchStage`]) so callers can
//! branch on where a search broke without matching every variant.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while running a search.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server did not accept the search job.
    #[error("Failed to create search job (HTTP {status}): {message}")]
    JobCreation {
        status: u16,
        message: String,
        body: String,
    },

    /// A status poll could not be completed or understood.
    #[error("Failed to get status of job {sid}: {message}")]
    JobStatus { sid: String, message: String },

    /// The job reported itself as failed.
    #[error("Search job {sid} failed:\n{messages}")]
    JobFailed { sid: String, messages: String },

    /// A configured polling bound ran out before the job finished.
    #[error("Search job {sid} still running after {polls} polls ({elapsed:?})")]
    PollLimitExceeded {
        sid: String,
        polls: u32,
        elapsed: Duration,
    },

    /// Results could not be fetched or decoded.
    #[error("Failed to fetch results of job {sid}: {message}")]
    ResultsFetch { sid: String, message: String },

    /// A sub-search over a partitioned time window failed.
    #[error("Partition {index} [{earliest}, {latest}) failed: {source}")]
    Partition {
        index: usize,
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
        #[source]
        source: Box<ClientError>,
    },

    /// A partition task ended without producing an outcome (panic or abort).
    #[error("Partition task {index} did not complete: {message}")]
    PartitionTask { index: usize, message: String },

    /// The success handler of an asynchronous search returned an error.
    #[error("Result handler failed: {0}")]
    Callback(#[source] anyhow::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response format from Splunk.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),
}

/// The pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStage {
    /// Building credentials or logging in.
    Auth,
    /// The HTTP exchange itself.
    Transport,
    /// Submitting the search job.
    Creation,
    /// Waiting for the job to finish.
    Poll,
    /// Reading the job's results.
    Fetch,
    /// Fanning out over sub-windows.
    Partition,
    /// The caller's result handler.
    Callback,
}

impl SearchStage {
    /// Returns the string label for this stage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SearchStage::Auth => "auth",
            SearchStage::Transport => "transport",
            SearchStage::Creation => "creation",
            SearchStage::Poll => "poll",
            SearchStage::Fetch => "fetch",
            SearchStage::Partition => "partition",
            SearchStage::Callback => "callback",
        }
    }
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClientError {
    /// Classify this error by the stage that produced it.
    ///
    /// A [`ClientError::Partition`] reports `Partition` even when the
    /// underlying sub-search failed elsewhere; use [`Self::root_cause`] to
    /// reach the innermost failure.
    pub fn stage(&self) -> SearchStage {
        match self {
            Self::AuthFailed(_) => SearchStage::Auth,
            Self::HttpError(_)
            | Self::InvalidUrl(_)
            | Self::InvalidResponse(_)
            | Self::MaxRetriesExceeded(_) => SearchStage::Transport,
            Self::JobCreation { .. } => SearchStage::Creation,
            Self::JobStatus { .. } | Self::JobFailed { .. } | Self::PollLimitExceeded { .. } => {
                SearchStage::Poll
            }
            Self::ResultsFetch { .. } => SearchStage::Fetch,
            Self::Partition { .. } | Self::PartitionTask { .. } => SearchStage::Partition,
            Self::Callback(_) => SearchStage::Callback,
        }
    }

    /// Follow nested partition failures down to the sub-search error that started them.
    pub fn root_cause(&self) -> &ClientError {
        let mut current = self;
        while let Self::Partition { source, .. } = current {
            current = source;
        }
        current
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.root_cause(), Self::AuthFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 40).unwrap(),
        )
    }

    #[test]
    fn test_stage_classification() {
        assert_eq!(
            ClientError::AuthFailed("nope".into()).stage(),
            SearchStage::Auth
        );
        assert_eq!(
            ClientError::JobCreation {
                status: 400,
                message: "bad".into(),
                body: String::new(),
            }
            .stage(),
            SearchStage::Creation
        );
        assert_eq!(
            ClientError::JobFailed {
                sid: "1".into(),
                messages: "FATAL: boom".into(),
            }
            .stage(),
            SearchStage::Poll
        );
        assert_eq!(
            ClientError::ResultsFetch {
                sid: "1".into(),
                message: "HTTP 500".into(),
            }
            .stage(),
            SearchStage::Fetch
        );
        assert_eq!(
            ClientError::Callback(anyhow::anyhow!("handler")).stage(),
            SearchStage::Callback
        );
    }

    #[test]
    fn test_root_cause_unwraps_nested_partitions() {
        let (earliest, latest) = window();
        let inner = ClientError::AuthFailed("expired".into());
        let nested = ClientError::Partition {
            index: 3,
            earliest,
            latest,
            source: Box::new(ClientError::Partition {
                index: 1,
                earliest,
                latest,
                source: Box::new(inner),
            }),
        };

        assert_eq!(nested.stage(), SearchStage::Partition);
        assert!(matches!(nested.root_cause(), ClientError::AuthFailed(_)));
        assert!(nested.is_auth_error());
    }

    #[test]
    fn test_job_failed_display_keeps_all_messages() {
        let err = ClientError::JobFailed {
            sid: "1700000000.1".into(),
            messages: "FATAL: first\nERROR: second".into(),
        };
        let text = err.to_string();
        assert!(text.contains("FATAL: first"));
        assert!(text.contains("ERROR: second"));
    }

    #[test]
    fn test_partition_display_names_window() {
        let (earliest, latest) = window();
        let err = ClientError::Partition {
            index: 2,
            earliest,
            latest,
            source: Box::new(ClientError::InvalidResponse("truncated".into())),
        };
        let text = err.to_string();
        assert!(text.starts_with("Partition 2"));
        assert!(text.contains("2024-01-01 00:00:00 UTC"));
        assert!(text.contains("truncated"));
    }
}
