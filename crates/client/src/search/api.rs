//! The job-level operations the search engine is built on.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{JobStatus, ResultRow};

use super::options::SearchOptions;

/// Job-level operations of the Splunk search API.
///
/// [`crate::SplunkClient`] implements this over HTTP. The engine in
/// [`super::SearchExecutor`] only ever talks to this trait.
#[async_trait]
pub trait SearchJobApi: Send + Sync {
    /// Submit `query` as a new job and return its sid.
    async fn create_search_job(&self, query: &str, options: &SearchOptions) -> Result<String>;

    /// Take a fresh status snapshot of job `sid`.
    async fn get_job_status(&self, sid: &str) -> Result<JobStatus>;

    /// Fetch every result row of the finished job `sid`.
    async fn get_job_results(&self, sid: &str) -> Result<Vec<ResultRow>>;
}
