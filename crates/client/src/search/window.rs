//! Time windows and their subdivision.
//!
//! # Invariants
//! - [`split_window`] returns exactly `parts` windows.
//! - Windows are contiguous: each starts where the previous one ended, the
//!   first starts at the parent's `earliest`, and none ends past the
//!   parent's `latest`. Together they tile the parent with no gap or overlap.
//! - The step is whole seconds, the resolution of the Splunk time format.

use chrono::{DateTime, Duration, Utc};

/// A half-open interval `[earliest, latest)` of event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(earliest: DateTime<Utc>, latest: DateTime<Utc>) -> Self {
        Self { earliest, latest }
    }

    pub fn duration(&self) -> Duration {
        self.latest - self.earliest
    }

    /// Whether splitting would yield windows strictly narrower than this one.
    ///
    /// Windows of one second or less cannot shrink further, since bounds
    /// are sent with second resolution.
    pub fn is_divisible(&self) -> bool {
        self.duration() > Duration::seconds(1)
    }
}

/// Seconds per sub-window: `ceil(duration / parts)`.
pub fn partition_step(window: &TimeWindow, parts: usize) -> Duration {
    let span_ms = window.duration().num_milliseconds().max(0);
    let divisor = 1000 * parts.max(1) as i64;
    Duration::seconds((span_ms + divisor - 1) / divisor)
}

/// Split `window` into `parts` contiguous sub-windows of `partition_step` seconds.
///
/// Every end is clamped to the parent's `latest`, so when the rounded-up
/// step overshoots, the trailing windows are shorter or empty.
pub fn split_window(window: &TimeWindow, parts: usize) -> Vec<TimeWindow> {
    let step = partition_step(window, parts);
    let mut start = window.earliest;

    (0..parts)
        .map(|_| {
            let end = (start + step).min(window.latest);
            let sub = TimeWindow::new(start, end);
            start = end;
            sub
        })
        .collect()
}
