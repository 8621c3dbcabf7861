//! Search job endpoints.
//!
//! # What this module handles:
//! - Creating search jobs (`POST /services/search/jobs`)
//! - Getting job status (`GET /services/search/jobs/{sid}`)
//! - Retrieving job results (`GET /services/search/jobs/{sid}/results`)
//!
//! # What this module does NOT handle:
//! - Waiting for completion or partitioning (see [`crate::search`])
//! - Choosing the `Authorization` header (callers pass it in)
//!
//! # Invariants
//! - Job creation succeeds only on HTTP 201; status and results only on HTTP 200.
//! - Time bounds are sent in UTC using the `SPLUNK_TIME_FORMAT` layout, and only when set.

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use splunk_rest_config::constants::SPLUNK_TIME_FORMAT;
use tracing::debug;

use crate::endpoints::{encode_path_segment, error_message, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{JobStatus, ResultRow, parse_results};
use crate::redact_query;
use crate::search::SearchOptions;

/// Build the form body for job creation.
pub fn create_job_form(query: &str, options: &SearchOptions) -> Vec<(&'static str, String)> {
    let mut form_data: Vec<(&'static str, String)> = vec![
        ("search", query.to_string()),
        ("output_mode", "json".to_string()),
        ("max_count", options.effective_max_count().to_string()),
        ("time_format", SPLUNK_TIME_FORMAT.to_string()),
    ];

    if let Some(earliest) = options.earliest_time {
        form_data.push((
            "earliest_time",
            earliest.format(SPLUNK_TIME_FORMAT).to_string(),
        ));
    }
    if let Some(latest) = options.latest_time {
        form_data.push(("latest_time", latest.format(SPLUNK_TIME_FORMAT).to_string()));
    }

    form_data
}

/// Create a new search job and return its sid.
pub async fn create_job(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    query: &str,
    options: &SearchOptions,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<String> {
    debug!("Creating search job: {}", redact_query(query));

    let url = format!("{}/services/search/jobs", base_url);
    let form_data = create_job_form(query, options);

    for (key, value) in &form_data {
        if *key == "search" {
            debug!("  {}: {}", key, redact_query(value));
        } else {
            debug!("  {}: {}", key, value);
        }
    }

    let builder = client
        .post(&url)
        .header(AUTHORIZATION, auth_header)
        .form(&form_data);
    let response = send_request_with_retry(
        builder,
        max_retries,
        "/services/search/jobs",
        "POST",
        metrics,
    )
    .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    if status != 201 {
        return Err(ClientError::JobCreation {
            status,
            message: error_message(&body),
            body,
        });
    }

    let resp: serde_json::Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            return Err(ClientError::JobCreation {
                status,
                message: format!("unparseable response: {e}"),
                body,
            });
        }
    };

    // Splunk can return either:
    // - `{ "sid": "<sid>" }`
    // - `{ "entry": [ { "content": { "sid": "<sid>" } } ] }` (older/alternate shape)
    let sid = resp
        .get("sid")
        .and_then(|v| v.as_str())
        .or_else(|| {
            resp.get("entry")?
                .get(0)?
                .get("content")?
                .get("sid")?
                .as_str()
        })
        .filter(|sid| !sid.is_empty())
        .map(str::to_string);

    match sid {
        Some(sid) => Ok(sid),
        None => Err(ClientError::JobCreation {
            status,
            message: "Missing sid in response".to_string(),
            body,
        }),
    }
}

/// Get the status of a search job.
pub async fn get_job_status(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    sid: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<JobStatus> {
    debug!("Getting status for job: {}", sid);

    let url = format!("{}/services/search/jobs/{}", base_url, encode_path_segment(sid));
    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header)
        .query(&[("output_mode", "json")]);
    let response = send_request_with_retry(
        builder,
        max_retries,
        "/services/search/jobs/{sid}",
        "GET",
        metrics,
    )
    .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    if status != 200 {
        return Err(ClientError::JobStatus {
            sid: sid.to_string(),
            message: format!("HTTP {}: {}", status, error_message(&body)),
        });
    }

    JobStatus::from_json(&body).map_err(|e| ClientError::JobStatus {
        sid: sid.to_string(),
        message: format!("Failed to parse job status: {e}"),
    })
}

/// Get every materialized result row of a finished job.
pub async fn get_job_results(
    client: &Client,
    base_url: &str,
    auth_header: &str,
    sid: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<ResultRow>> {
    debug!("Getting results for job: {}", sid);

    let url = format!(
        "{}/services/search/jobs/{}/results",
        base_url,
        encode_path_segment(sid)
    );
    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header)
        .query(&[("output_mode", "json"), ("count", "0")]);
    let response = send_request_with_retry(
        builder,
        max_retries,
        "/services/search/jobs/{sid}/results",
        "GET",
        metrics,
    )
    .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    if status != 200 {
        return Err(ClientError::ResultsFetch {
            sid: sid.to_string(),
            message: format!("HTTP {}: {}", status, error_message(&body)),
        });
    }

    let rows = parse_results(&body).map_err(|e| ClientError::ResultsFetch {
        sid: sid.to_string(),
        message: format!("Failed to parse results: {e}"),
    })?;
    debug!(sid = %sid, rows = rows.len(), "Fetched job results");
    Ok(rows)
}
