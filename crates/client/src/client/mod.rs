//! Main Splunk REST API client.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: `Authorization` header production and login (private module)
//! - `search`: [`SearchJobApi`](crate::search::SearchJobApi) over HTTP and search entry points
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Polling and partitioning (delegated to [`crate::search::SearchExecutor`])
//!
//! # Invariants
//! - Clones share one session: a login performed through any clone serves all of them.
//! - At most one login is in flight at a time.

pub mod builder;
mod search;
mod session;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::SessionManager;
use crate::metrics::MetricsCollector;
use crate::search::PollPolicy;

/// Splunk REST API client.
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
///
/// ```rust,ignore
/// use splunk_rest::{AuthStrategy, SearchOptions, SplunkClient};
/// use secrecy::SecretString;
///
/// let client = SplunkClient::builder()
///     .base_url("https://localhost:8089".to_string())
///     .auth_strategy(AuthStrategy::ApiToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .build()?;
/// let rows = client.search("search index=main | head 10", &SearchOptions::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SplunkClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session: Arc<Mutex<SessionManager>>,
    pub(crate) session_login: bool,
    pub(crate) max_retries: usize,
    pub(crate) poll_policy: PollPolicy,
    pub(crate) partition_count: usize,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl SplunkClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SplunkClientBuilder {
        builder::SplunkClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The poll policy searches started from this client use.
    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll_policy
    }

    /// Sub-windows per partitioning step.
    pub fn partition_count(&self) -> usize {
        self.partition_count
    }
}
