//! Common test utilities for integration tests.
//!
//! Re-exports the types most test files need so they can `use common::*;`.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root

use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;

#[allow(unused_imports)]
pub use splunk_rest::testing::{FakeSearchApi, load_fixture};

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use splunk_rest::endpoints;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed reference instant used as `T0` throughout the tests.
#[allow(dead_code)]
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// `t0()` plus `secs` seconds.
#[allow(dead_code)]
pub fn at(secs: i64) -> DateTime<Utc> {
    t0() + chrono::Duration::seconds(secs)
}

#[allow(dead_code)]
pub fn api_token_client(base_url: &str) -> splunk_rest::SplunkClient {
    splunk_rest::SplunkClient::builder()
        .base_url(base_url.to_string())
        .auth_strategy(splunk_rest::AuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        })
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn session_client(base_url: &str) -> splunk_rest::SplunkClient {
    splunk_rest::SplunkClient::builder()
        .base_url(base_url.to_string())
        .auth_strategy(splunk_rest::AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("changeme".to_string().into()),
        })
        .build()
        .unwrap()
}
