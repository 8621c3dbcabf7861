//! Shared test utilities for splunk-rest CLI integration tests.
//!
//! Invariants / Assumptions:
//! - Every command built here is hermetic: no `.env`, no host `SPLUNK_*` variables.

use assert_cmd::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPLUNK_VARS: &[&str] = &[
    "SPLUNK_BASE_URL",
    "SPLUNK_AUTH_TYPE",
    "SPLUNK_USERNAME",
    "SPLUNK_PASSWORD",
    "SPLUNK_API_TOKEN",
    "SPLUNK_CONFIG_PATH",
    "SPLUNK_SKIP_VERIFY",
    "SPLUNK_TIMEOUT",
    "SPLUNK_MAX_RETRIES",
    "SPLUNK_SESSION_TTL",
    "SPLUNK_MAX_COUNT",
    "SPLUNK_ALLOW_PARTITION",
    "SPLUNK_PARTITION_COUNT",
    "SPLUNK_POLL_INTERVAL",
    "SPLUNK_MAX_WAIT",
    "SPLUNK_MAX_POLLS",
];

/// Returns a hermetic `splunk-rest` command.
pub fn splunk_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("splunk-rest");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("RUST_LOG");
    for var in SPLUNK_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// A hermetic command pointed at `base_url` with a bearer token.
#[allow(dead_code)]
pub fn splunk_cmd_with_token(base_url: &str) -> Command {
    let mut cmd = splunk_cmd();
    cmd.env("SPLUNK_BASE_URL", base_url)
        .env("SPLUNK_API_TOKEN", "test-token");
    cmd
}

/// Mount a job that is created as `sid`, is done on the first poll and returns `rows`.
#[allow(dead_code)]
pub async fn mount_finished_job(server: &MockServer, sid: &str, rows: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "sid": sid })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{sid}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "entry": [{ "content": { "isDone": true, "isFailed": false, "dispatchState": "DONE" } }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{sid}/results")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": rows })))
        .mount(server)
        .await;
}
