//! The search pipeline and its time-window partitioning.
//!
//! A search runs create → wait → fetch. When the fetched row count equals
//! the row cap the result set is assumed truncated; if partitioning is
//! allowed and both time bounds are set, the window is split into
//! `partition_count` sub-windows and the whole pipeline runs again on each
//! of them concurrently, recursing as deep as truncation demands.
//!
//! # Invariants
//! - Every sub-search is joined before the outcome is decided; none is cancelled early.
//! - Merged rows are per-partition server order, concatenated by ascending partition index.
//! - Any failing partition fails the whole search; the error names the lowest failing index.

use futures::future::{BoxFuture, join_all};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use splunk_rest_config::constants::{DEFAULT_PARTITION_COUNT, MIN_PARTITION_COUNT};

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ResultRow;
use crate::redact_query;

use super::api::SearchJobApi;
use super::options::SearchOptions;
use super::poll::{PollPolicy, wait_for_job};
use super::window::{TimeWindow, split_window};

/// Runs searches, with partitioning, against any [`SearchJobApi`].
pub struct SearchExecutor<A: ?Sized> {
    api: Arc<A>,
    poll_policy: PollPolicy,
    partition_count: usize,
    metrics: Option<MetricsCollector>,
}

impl<A: ?Sized> Clone for SearchExecutor<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            poll_policy: self.poll_policy,
            partition_count: self.partition_count,
            metrics: self.metrics.clone(),
        }
    }
}

impl<A> SearchExecutor<A>
where
    A: SearchJobApi + ?Sized + 'static,
{
    /// An executor with the default poll policy and five partitions per split.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            poll_policy: PollPolicy::default(),
            partition_count: DEFAULT_PARTITION_COUNT,
            metrics: None,
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Set how many sub-windows each split produces (at least two).
    pub fn with_partition_count(mut self, count: usize) -> Self {
        self.partition_count = count.max(MIN_PARTITION_COUNT);
        self
    }

    pub fn with_metrics(mut self, metrics: Option<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll_policy
    }

    pub fn partition_count(&self) -> usize {
        self.partition_count
    }

    /// Run `query` to completion and return every row.
    pub async fn execute(&self, query: &str, options: &SearchOptions) -> Result<Vec<ResultRow>> {
        let outcome = self.dispatch(query.to_string(), options.clone()).await;
        if let (Err(e), Some(m)) = (&outcome, &self.metrics) {
            m.record_error(e);
        }
        outcome
    }

    /// Run `query` on a background task and hand the outcome to exactly one handler.
    ///
    /// `on_error` fires once if the search fails, or if `on_success`
    /// itself returns an error (wrapped as [`ClientError::Callback`]).
    /// The returned handle only lets callers wait for the handlers to run.
    pub fn spawn_search_and_exec<S, E>(
        &self,
        query: impl Into<String>,
        options: SearchOptions,
        on_success: S,
        on_error: E,
    ) -> JoinHandle<()>
    where
        S: FnOnce(Vec<ResultRow>) -> anyhow::Result<()> + Send + 'static,
        E: FnOnce(ClientError) + Send + 'static,
    {
        let executor = self.clone();
        let query = query.into();
        tokio::spawn(async move {
            match executor.execute(&query, &options).await {
                Ok(rows) => {
                    if let Err(e) = on_success(rows) {
                        let err = ClientError::Callback(e);
                        if let Some(m) = &executor.metrics {
                            m.record_error(&err);
                        }
                        on_error(err);
                    }
                }
                Err(e) => on_error(e),
            }
        })
    }

    /// One level of the pipeline, boxed so partitions can recurse into it.
    fn dispatch(
        &self,
        query: String,
        options: SearchOptions,
    ) -> BoxFuture<'static, Result<Vec<ResultRow>>> {
        let executor = self.clone();
        Box::pin(async move { executor.run(&query, &options).await })
    }

    async fn run(&self, query: &str, options: &SearchOptions) -> Result<Vec<ResultRow>> {
        let sid = self.api.create_search_job(query, options).await?;
        info!(sid = %sid, query = %redact_query(query), "Created search job");
        if let Some(m) = &self.metrics {
            m.record_job_created();
        }

        wait_for_job(&*self.api, &sid, &self.poll_policy, self.metrics.as_ref()).await?;

        let rows = self.api.get_job_results(&sid).await?;
        let max_count = options.effective_max_count();
        if rows.len() != max_count {
            return Ok(rows);
        }

        warn!(sid = %sid, max_count, "Number of records returned equal to max count");

        let window = match (options.allow_partition, options.window()) {
            (true, Some(window)) if window.is_divisible() => window,
            (true, Some(window)) => {
                warn!(
                    sid = %sid,
                    earliest = %window.earliest,
                    latest = %window.latest,
                    "Window too narrow to partition; returning truncated results"
                );
                return Ok(self.truncated(rows));
            }
            (true, None) => {
                warn!(sid = %sid, "Partitioning needs both time bounds; returning truncated results");
                return Ok(self.truncated(rows));
            }
            (false, _) => {
                warn!(sid = %sid, "Partitioning disabled; returning truncated results");
                return Ok(self.truncated(rows));
            }
        };

        self.partition(query, options, window).await
    }

    fn truncated(&self, rows: Vec<ResultRow>) -> Vec<ResultRow> {
        if let Some(m) = &self.metrics {
            m.record_truncated();
        }
        rows
    }

    async fn partition(
        &self,
        query: &str,
        options: &SearchOptions,
        window: TimeWindow,
    ) -> Result<Vec<ResultRow>> {
        let windows = split_window(&window, self.partition_count);
        if let Some(m) = &self.metrics {
            m.record_partition_fanout(windows.len());
        }

        let handles: Vec<_> = windows
            .iter()
            .enumerate()
            .map(|(index, sub)| {
                debug!(
                    index,
                    earliest = %sub.earliest,
                    latest = %sub.latest,
                    "Starting partition"
                );
                tokio::spawn(self.dispatch(query.to_string(), options.with_window(*sub)))
            })
            .collect();

        let outcomes = join_all(handles).await;

        let mut merged = Vec::new();
        for (index, (outcome, sub)) in outcomes.into_iter().zip(&windows).enumerate() {
            match outcome {
                Ok(Ok(rows)) => {
                    debug!(index, count = rows.len(), "Partition results");
                    merged.extend(rows);
                }
                Ok(Err(source)) => {
                    return Err(ClientError::Partition {
                        index,
                        earliest: sub.earliest,
                        latest: sub.latest,
                        source: Box::new(source),
                    });
                }
                Err(join_error) => {
                    return Err(ClientError::PartitionTask {
                        index,
                        message: join_error.to_string(),
                    });
                }
            }
        }

        Ok(merged)
    }
}
