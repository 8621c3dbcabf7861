//! Request sending with optional retry on HTTP 429.
//!
//! Responses are handed back whatever their status; each endpoint decides
//! which statuses count as success for its stage of the pipeline.

use reqwest::{RequestBuilder, Response};
use std::time::Instant;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::SplunkMessages;

/// Sends an HTTP request, retrying HTTP 429 responses with exponential backoff.
///
/// With `max_retries == 0` the request is sent exactly once and a 429 is
/// returned to the caller like any other status. Otherwise each 429 is
/// followed by a `2^attempt` second sleep, and `MaxRetriesExceeded` is
/// returned once every attempt was rate limited.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if max_retries == 0 {
        return send_once(builder, endpoint, method, metrics).await;
    }

    for attempt in 0..=max_retries {
        let Some(attempt_builder) = builder.try_clone() else {
            debug!("Request builder cannot be cloned, single attempt only");
            return send_once(builder, endpoint, method, metrics).await;
        };

        if attempt > 0
            && let Some(m) = metrics
        {
            m.record_retry(endpoint, method, attempt);
        }

        let response = send_once(attempt_builder, endpoint, method, metrics).await?;
        if response.status().as_u16() != 429 {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if attempt < max_retries {
            let backoff_secs = 2u64.pow(attempt as u32);
            debug!(
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                backoff_secs = backoff_secs,
                "Rate limited (HTTP 429), retrying with exponential backoff"
            );
            tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
        }
    }

    debug!(
        attempts = max_retries + 1,
        "Max retries exhausted for rate-limited request"
    );
    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

async fn send_once(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let start = Instant::now();
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }

    let outcome = builder.send().await;

    if let Some(m) = metrics {
        let status = outcome.as_ref().ok().map(|r| r.status().as_u16());
        m.record_request_duration(endpoint, method, start.elapsed(), status);
    }
    outcome.map_err(ClientError::from)
}

/// Summarize an error response body for humans.
///
/// Splunk error bodies carry a `messages` list; those are rendered as
/// `TYPE: text` joined by `; `. Anything else is returned unchanged.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<SplunkMessages>(body) {
        Ok(m) if !m.messages.is_empty() => m.joined("; "),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_splunk_messages() {
        let body = r#"{"messages":[{"type":"ERROR","text":"Unknown search command 'foo'."}]}"#;
        assert_eq!(error_message(body), "ERROR: Unknown search command 'foo'.");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("  Service Unavailable \n"), "Service Unavailable");
        assert_eq!(error_message(r#"{"messages": []}"#), r#"{"messages": []}"#);
    }
}
