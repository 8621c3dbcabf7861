//! Metrics collection for search execution.
//!
//! This module provides metrics collection for the search pipeline, including:
//! - Request latency histograms and request counters per endpoint
//! - Error counters labeled by [`SearchStage`]
//! - Job, poll and partition fan-out counters
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a recorder from the `metrics` ecosystem)
//!
//! # Invariants
//! - Metric recording is infallible and never disrupts a search
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "splunk_rest_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "splunk_rest_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "splunk_rest_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "splunk_rest_errors_total";

/// Metric name for created jobs.
pub const METRIC_JOBS_CREATED: &str = "splunk_rest_jobs_created_total";

/// Metric name for status polls.
pub const METRIC_POLLS_TOTAL: &str = "splunk_rest_job_polls_total";

/// Metric name for partition fan-outs.
pub const METRIC_PARTITIONS_TOTAL: &str = "splunk_rest_partition_fanouts_total";

/// Metric name for truncated result sets that could not be partitioned.
pub const METRIC_TRUNCATED_TOTAL: &str = "splunk_rest_truncated_results_total";

/// Metrics collector for the search pipeline.
///
/// A thin wrapper over the `metrics` macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry after HTTP 429 (`attempt` is 1-based).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record a failed search, labeled by the stage that failed.
    pub fn record_error(&self, error: &ClientError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "stage" => error.stage().as_str(),
        )
        .increment(1);
    }

    /// Record a successfully created search job.
    pub fn record_job_created(&self) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_JOBS_CREATED).increment(1);
    }

    /// Record one job status poll.
    pub fn record_poll(&self) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_POLLS_TOTAL).increment(1);
    }

    /// Record a fan-out into `partitions` sub-searches.
    pub fn record_partition_fanout(&self, partitions: usize) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_PARTITIONS_TOTAL,
            "partitions" => partitions.to_string(),
        )
        .increment(1);
    }

    /// Record a truncated result set returned without partitioning.
    pub fn record_truncated(&self) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_TRUNCATED_TOTAL).increment(1);
    }
}
