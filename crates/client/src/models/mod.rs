//! Data models for Splunk API responses.

mod common;
mod jobs;

pub use common::{MessageType, SplunkMessage, SplunkMessages};
pub use jobs::{JobState, JobStatus, ResultRow, parse_results};
