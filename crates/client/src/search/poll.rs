//! Waiting for a job to finish.
//!
//! # Invariants
//! - A poll is always taken before the first sleep.
//! - Transport or decode errors end the wait immediately; they are not retried here.
//! - With the default policy the wait has no bound.

use splunk_rest_config::SearchConfig;
use splunk_rest_config::constants::DEFAULT_POLL_INTERVAL_SECS;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::JobState;

use super::api::SearchJobApi;

/// How often, and for how long, to poll a job's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Sleep between consecutive polls.
    pub interval: Duration,
    /// Give up once waiting any longer would pass this much time.
    pub max_wait: Option<Duration>,
    /// Give up after this many polls report the job still pending.
    pub max_polls: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_wait: None,
            max_polls: None,
        }
    }
}

impl PollPolicy {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_wait: config.max_wait,
            max_polls: config.max_polls,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }
}

/// Poll job `sid` until it is done.
///
/// Returns [`ClientError::JobFailed`] as soon as the job reports failure,
/// and [`ClientError::PollLimitExceeded`] when a policy bound runs out.
pub async fn wait_for_job<A>(
    api: &A,
    sid: &str,
    policy: &PollPolicy,
    metrics: Option<&MetricsCollector>,
) -> Result<()>
where
    A: SearchJobApi + ?Sized,
{
    let start = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let status = api.get_job_status(sid).await?;
        polls += 1;
        if let Some(m) = metrics {
            m.record_poll();
        }

        match status.state() {
            JobState::Done => {
                debug!(sid = %sid, polls, "Job done");
                return Ok(());
            }
            JobState::Failed(messages) => {
                return Err(ClientError::JobFailed {
                    sid: sid.to_string(),
                    messages,
                });
            }
            JobState::Pending => {
                debug!(
                    sid = %sid,
                    polls,
                    dispatch_state = status.dispatch_state.as_deref().unwrap_or("unknown"),
                    progress = status.done_progress.unwrap_or_default(),
                    "Job still running"
                );
            }
        }

        let elapsed = start.elapsed();
        let polls_exhausted = policy.max_polls.is_some_and(|max| polls >= max);
        let wait_exhausted = policy
            .max_wait
            .is_some_and(|max| elapsed + policy.interval > max);
        if polls_exhausted || wait_exhausted {
            return Err(ClientError::PollLimitExceeded {
                sid: sid.to_string(),
                polls,
                elapsed,
            });
        }

        tokio::time::sleep(policy.interval).await;
    }
}
