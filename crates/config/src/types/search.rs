//! Search execution settings.
//!
//! Responsibilities:
//! - Row cap and partitioning defaults applied to every search.
//! - Polling policy (interval and optional bounds).
//!
//! Invariants:
//! - `max_wait` and `max_polls` default to `None`: polling is unbounded
//!   unless a bound is configured.

use crate::constants::{DEFAULT_MAX_COUNT, DEFAULT_PARTITION_COUNT, DEFAULT_POLL_INTERVAL_SECS};
use crate::types::connection::duration_seconds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod opt_duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

/// Search execution defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Row cap requested from the server for each job.
    pub max_count: usize,
    /// Whether truncated searches may be split into sub-window searches.
    pub allow_partition: bool,
    /// Number of sub-windows a truncated search is split into.
    pub partition_count: usize,
    /// Delay between job status polls (serialized as seconds).
    #[serde(with = "duration_seconds")]
    pub poll_interval: Duration,
    /// Give up waiting for a job after this long.
    #[serde(default, with = "opt_duration_seconds")]
    pub max_wait: Option<Duration>,
    /// Give up waiting for a job after this many status polls.
    #[serde(default)]
    pub max_polls: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            allow_partition: false,
            partition_count: DEFAULT_PARTITION_COUNT,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_wait: None,
            max_polls: None,
        }
    }
}
