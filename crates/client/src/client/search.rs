//! Search methods on [`SplunkClient`].

use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{JobStatus, ResultRow};
use crate::search::{SearchExecutor, SearchJobApi, SearchOptions};

#[async_trait]
impl SearchJobApi for SplunkClient {
    async fn create_search_job(&self, query: &str, options: &SearchOptions) -> Result<String> {
        let auth = self.authorization_header().await?;
        endpoints::create_job(
            &self.http,
            &self.base_url,
            &auth,
            query,
            options,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    async fn get_job_status(&self, sid: &str) -> Result<JobStatus> {
        let auth = self.authorization_header().await?;
        endpoints::get_job_status(
            &self.http,
            &self.base_url,
            &auth,
            sid,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    async fn get_job_results(&self, sid: &str) -> Result<Vec<ResultRow>> {
        let auth = self.authorization_header().await?;
        endpoints::get_job_results(
            &self.http,
            &self.base_url,
            &auth,
            sid,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }
}

impl SplunkClient {
    /// A search executor over this client, using its poll policy and partition count.
    pub fn executor(&self) -> SearchExecutor<SplunkClient> {
        SearchExecutor::new(Arc::new(self.clone()))
            .with_poll_policy(self.poll_policy)
            .with_partition_count(self.partition_count)
            .with_metrics(self.metrics.clone())
    }

    /// Run a search to completion, partitioning truncated results when allowed.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<ResultRow>> {
        self.executor().execute(query, options).await
    }

    /// Run a search in the background and deliver the outcome to a handler.
    ///
    /// See [`SearchExecutor::spawn_search_and_exec`].
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
        self.executor()
            .spawn_search_and_exec(query, options, on_success, on_error)
    }
}
