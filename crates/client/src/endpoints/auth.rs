//! Authentication endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::{error_message, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Login to Splunk with username and password, returning the session key.
///
/// Any failure, including transport errors, is reported as
/// [`ClientError::AuthFailed`].
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<String> {
    debug!("Logging in to Splunk as {}", username);

    let url = format!("{}/services/auth/login", base_url);
    let builder = client.post(&url).form(&[
        ("username", username),
        ("password", password),
        ("output_mode", "json"),
    ]);
    let response = send_request_with_retry(
        builder,
        max_retries,
        "/services/auth/login",
        "POST",
        metrics,
    )
    .await
    .map_err(|e| ClientError::AuthFailed(format!("login request failed: {e}")))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::AuthFailed(format!("could not read login response: {e}")))?;

    if status != 200 {
        return Err(ClientError::AuthFailed(format!(
            "login returned HTTP {}: {}",
            status,
            error_message(&body)
        )));
    }

    let resp: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| ClientError::AuthFailed(format!("unparseable login response: {e}")))?;

    // `{ "sessionKey": ".." }` from output_mode=json, or the feed shape
    // `{ "entry": [ { "content": { "sessionKey": ".." } } ] }`.
    resp.get("sessionKey")
        .and_then(|v| v.as_str())
        .or_else(|| {
            resp.get("entry")?
                .get(0)?
                .get("content")?
                .get("sessionKey")?
                .as_str()
        })
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClientError::AuthFailed("Missing sessionKey in response".to_string()))
}
