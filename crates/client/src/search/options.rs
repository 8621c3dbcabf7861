//! Per-search options.

use chrono::{DateTime, Utc};
use splunk_rest_config::SearchConfig;
use splunk_rest_config::constants::DEFAULT_MAX_COUNT;

use super::window::TimeWindow;

/// Options for a single search invocation.
///
/// Each partition gets its own copy with narrowed bounds; everything else
/// is inherited unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Row cap for the job. `0` means [`DEFAULT_MAX_COUNT`].
    pub max_count: usize,
    /// Inclusive lower time bound.
    pub earliest_time: Option<DateTime<Utc>>,
    /// Exclusive upper time bound.
    pub latest_time: Option<DateTime<Utc>>,
    /// Split truncated searches over sub-windows and merge the results.
    pub allow_partition: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying the row cap and partitioning flag from configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            max_count: config.max_count,
            allow_partition: config.allow_partition,
            ..Self::default()
        }
    }

    pub fn max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn earliest(mut self, earliest: DateTime<Utc>) -> Self {
        self.earliest_time = Some(earliest);
        self
    }

    pub fn latest(mut self, latest: DateTime<Utc>) -> Self {
        self.latest_time = Some(latest);
        self
    }

    pub fn allow_partition(mut self, allow: bool) -> Self {
        self.allow_partition = allow;
        self
    }

    /// The row cap actually sent to the server.
    pub fn effective_max_count(&self) -> usize {
        if self.max_count == 0 {
            DEFAULT_MAX_COUNT
        } else {
            self.max_count
        }
    }

    /// The bounded window, when both bounds are set.
    pub fn window(&self) -> Option<TimeWindow> {
        Some(TimeWindow::new(self.earliest_time?, self.latest_time?))
    }

    /// A copy of these options restricted to `window`.
    pub fn with_window(&self, window: TimeWindow) -> Self {
        Self {
            earliest_time: Some(window.earliest),
            latest_time: Some(window.latest),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_zero_max_count_uses_default() {
        assert_eq!(SearchOptions::new().effective_max_count(), 10_000);
        assert_eq!(SearchOptions::new().max_count(250).effective_max_count(), 250);
    }

    #[test]
    fn test_window_needs_both_bounds() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(SearchOptions::new().earliest(t0).window().is_none());
        assert!(SearchOptions::new().latest(t0).window().is_none());
        assert!(
            SearchOptions::new()
                .earliest(t0)
                .latest(t0 + chrono::Duration::seconds(10))
                .window()
                .is_some()
        );
    }

    #[test]
    fn test_with_window_keeps_other_fields() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let parent = SearchOptions::new()
            .max_count(100)
            .allow_partition(true)
            .earliest(t0)
            .latest(t0 + chrono::Duration::seconds(500));
        let child = parent.with_window(TimeWindow::new(
            t0 + chrono::Duration::seconds(100),
            t0 + chrono::Duration::seconds(200),
        ));

        assert_eq!(child.max_count, 100);
        assert!(child.allow_partition);
        assert_eq!(child.earliest_time, Some(t0 + chrono::Duration::seconds(100)));
        assert_eq!(child.latest_time, Some(t0 + chrono::Duration::seconds(200)));
    }

    #[test]
    fn test_from_config() {
        let config = SearchConfig {
            max_count: 42,
            allow_partition: true,
            ..SearchConfig::default()
        };
        let options = SearchOptions::from_config(&config);
        assert_eq!(options.max_count, 42);
        assert!(options.allow_partition);
        assert!(options.window().is_none());
    }
}
