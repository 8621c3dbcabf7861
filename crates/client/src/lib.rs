//! Splunk search-job REST client.
//!
//! This crate runs searches against the Splunk REST API: it authenticates,
//! submits each query as an asynchronous job, polls until the job finishes
//! and fetches its rows. When a result set comes back exactly at the row
//! cap, the time window can be split into sub-windows that are searched
//! concurrently and recursively, and their rows merged back in time order.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;
mod redact;
pub mod search;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{AuthStrategy, SessionManager};
pub use client::SplunkClient;
pub use client::builder::SplunkClientBuilder;
pub use error::{ClientError, Result, SearchStage};
pub use metrics::MetricsCollector;
pub use models::{JobState, JobStatus, MessageType, ResultRow, SplunkMessage};
pub use redact::redact_query;
pub use search::{PollPolicy, SearchExecutor, SearchJobApi, SearchOptions, TimeWindow};
