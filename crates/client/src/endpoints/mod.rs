//! Splunk REST API endpoints used by the search pipeline.
//!
//! Each endpoint is a free function over a borrowed `reqwest::Client`, the
//! base URL and a ready-made `Authorization` header value, so the functions
//! know nothing of session handling.

mod auth;
mod jobs;
mod request;
pub mod url_encoding;

pub use auth::login;
pub use jobs::{create_job, create_job_form, get_job_results, get_job_status};
pub use request::{error_message, send_request_with_retry};
pub use url_encoding::encode_path_segment;
