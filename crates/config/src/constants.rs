//! Centralized constants for the splunk-rest workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Default session key time-to-live in seconds (1 hour).
///
/// Splunk resets the session key timer on every use, so this is a sliding window.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed session TTL in seconds (24 hours).
pub const MAX_SESSION_TTL_SECS: u64 = 86400;

/// Default Splunk management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
///
/// Zero disables retrying: any failed call fails the enclosing search.
pub const DEFAULT_MAX_RETRIES: usize = 0;

/// Maximum allowed value for the retry count.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Search & Polling Defaults
// =============================================================================

/// Default maximum number of rows a search job may return.
pub const DEFAULT_MAX_COUNT: usize = 10_000;

/// Default interval between job status polls in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default number of sub-windows a truncated search is split into.
pub const DEFAULT_PARTITION_COUNT: usize = 5;

/// Smallest partition count that still shrinks a window.
pub const MIN_PARTITION_COUNT: usize = 2;

/// strftime-style format sent to Splunk as `time_format`.
pub const SPLUNK_TIME_FORMAT: &str = "%m/%d/%Y:%H:%M:%S";
