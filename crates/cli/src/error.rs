//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).
//! - A partition failure exits with the code of the error that caused it.

use splunk_rest::ClientError;

/// Structured exit codes for splunk-rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - invalid credentials or rejected login.
    ///
    /// Scripts should refresh credentials or prompt for re-authentication.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Validation error - invalid SPL, bad parameters.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Permission denied - insufficient privileges.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 Too Many Requests.
    ///
    /// Scripts should back off and retry later.
    RateLimited = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// The search job failed or did not finish within its polling bounds.
    SearchFailed = 9,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }

    fn from_status(status: u16) -> Self {
        match status {
            400 => ExitCode::ValidationError,
            401 => ExitCode::AuthenticationFailed,
            403 => ExitCode::PermissionDenied,
            429 => ExitCode::RateLimited,
            502..=504 => ExitCode::ServiceUnavailable,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) => ExitCode::AuthenticationFailed,

            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::JobCreation { status, .. } => Self::from_status(*status),
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,

            ClientError::JobFailed { .. } | ClientError::PollLimitExceeded { .. } => {
                ExitCode::SearchFailed
            }

            // Only HTTP 429 is retried, so exhausted retries mean rate limiting.
            ClientError::MaxRetriesExceeded(_) => ExitCode::RateLimited,

            ClientError::Partition { source, .. } => Self::from(source.as_ref()),

            ClientError::JobStatus { .. }
            | ClientError::ResultsFetch { .. }
            | ClientError::PartitionTask { .. }
            | ClientError::Callback(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if the error is not a ClientError.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ClientError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::AuthenticationFailed.as_i32(), 2);
        assert_eq!(ExitCode::SearchFailed.as_i32(), 9);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_is_retryable() {
        assert!(!ExitCode::GeneralError.is_retryable());
        assert!(!ExitCode::AuthenticationFailed.is_retryable());
        assert!(ExitCode::ConnectionError.is_retryable());
        assert!(!ExitCode::ValidationError.is_retryable());
        assert!(ExitCode::RateLimited.is_retryable());
        assert!(ExitCode::ServiceUnavailable.is_retryable());
        assert!(!ExitCode::SearchFailed.is_retryable());
    }

    #[test]
    fn test_from_auth_failed() {
        let err = ClientError::AuthFailed("invalid credentials".to_string());
        assert_eq!(ExitCode::from(&err), ExitCode::AuthenticationFailed);
    }

    #[test]
    fn test_from_job_creation_status() {
        let creation = |status| ClientError::JobCreation {
            status,
            message: String::new(),
            body: String::new(),
        };
        assert_eq!(ExitCode::from(&creation(400)), ExitCode::ValidationError);
        assert_eq!(ExitCode::from(&creation(401)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&creation(403)), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&creation(429)), ExitCode::RateLimited);
        assert_eq!(ExitCode::from(&creation(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&creation(500)), ExitCode::GeneralError);
    }

    #[test]
    fn test_from_poll_limit() {
        let err = ClientError::PollLimitExceeded {
            sid: "1".to_string(),
            polls: 3,
            elapsed: Duration::from_secs(15),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::SearchFailed);
    }

    #[test]
    fn test_from_partition_uses_cause() {
        let inner = ClientError::JobFailed {
            sid: "2".to_string(),
            messages: "FATAL: boom".to_string(),
        };
        let middle = ClientError::Partition {
            index: 3,
            earliest: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            latest: Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap(),
            source: Box::new(inner),
        };
        let outer = ClientError::Partition {
            index: 0,
            earliest: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            latest: Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap(),
            source: Box::new(middle),
        };
        assert_eq!(ExitCode::from(&outer), ExitCode::SearchFailed);
    }

    #[test]
    fn test_anyhow_chain_with_context() {
        let err = anyhow::Error::new(ClientError::MaxRetriesExceeded(3)).context("searching");
        assert_eq!(err.exit_code(), ExitCode::RateLimited);

        let plain = anyhow::anyhow!("not a client error");
        assert_eq!(plain.exit_code(), ExitCode::GeneralError);
    }
}
