//! An in-memory [`SearchJobApi`] backed by a list of event timestamps.
//!
//! Each created job selects the events inside its `[earliest, latest)`
//! window, in time order, capped at the job's row cap, just as a real
//! index would. Failure can be injected per window and slowness per backend.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{ClientError, Result};
use crate::models::{JobStatus, MessageType, ResultRow, SplunkMessage};
use crate::search::{SearchJobApi, SearchOptions, TimeWindow};

/// A job as it was submitted to the fake.
#[derive(Debug, Clone)]
pub struct CreatedJob {
    pub sid: String,
    pub query: String,
    pub options: SearchOptions,
}

#[derive(Debug)]
struct FakeJob {
    options: SearchOptions,
    polls: u32,
}

#[derive(Debug, Default)]
struct FakeState {
    next_sid: u64,
    jobs: HashMap<String, FakeJob>,
    created: Vec<CreatedJob>,
    total_polls: u32,
}

/// In-memory search backend for exercising the engine without HTTP.
#[derive(Debug)]
pub struct FakeSearchApi {
    events: Vec<DateTime<Utc>>,
    polls_until_done: Option<u32>,
    failing: Vec<TimeWindow>,
    state: Mutex<FakeState>,
}

impl FakeSearchApi {
    /// A backend holding exactly these events.
    pub fn new(events: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        let mut events: Vec<_> = events.into_iter().collect();
        events.sort();
        Self {
            events,
            polls_until_done: Some(1),
            failing: Vec::new(),
            state: Mutex::new(FakeState::default()),
        }
    }

    /// `count` events, one every `spacing`, starting at `start`.
    pub fn evenly_spaced(start: DateTime<Utc>, count: usize, spacing: Duration) -> Self {
        Self::new((0..count).map(|i| start + spacing * i as i32))
    }

    /// Jobs report done on their `polls`-th status poll (default 1).
    pub fn finishing_after(mut self, polls: u32) -> Self {
        self.polls_until_done = Some(polls.max(1));
        self
    }

    /// Jobs never leave the pending state.
    pub fn never_finishing(mut self) -> Self {
        self.polls_until_done = None;
        self
    }

    /// Jobs searching exactly `window` report failure.
    pub fn failing_window(mut self, window: TimeWindow) -> Self {
        self.failing.push(window);
        self
    }

    /// Every job created so far, in creation order.
    pub fn created_jobs(&self) -> Vec<CreatedJob> {
        self.lock().created.clone()
    }

    /// Total status polls across all jobs.
    pub fn total_polls(&self) -> u32 {
        self.lock().total_polls
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn covers(options: &SearchOptions, ts: DateTime<Utc>) -> bool {
        options.earliest_time.is_none_or(|e| ts >= e) && options.latest_time.is_none_or(|l| ts < l)
    }
}

#[async_trait]
impl SearchJobApi for FakeSearchApi {
    async fn create_search_job(&self, query: &str, options: &SearchOptions) -> Result<String> {
        let mut state = self.lock();
        state.next_sid += 1;
        let sid = format!("fake-{}", state.next_sid);
        state.jobs.insert(
            sid.clone(),
            FakeJob {
                options: options.clone(),
                polls: 0,
            },
        );
        state.created.push(CreatedJob {
            sid: sid.clone(),
            query: query.to_string(),
            options: options.clone(),
        });
        Ok(sid)
    }

    async fn get_job_status(&self, sid: &str) -> Result<JobStatus> {
        let mut state = self.lock();
        state.total_polls += 1;
        let job = state.jobs.get_mut(sid).ok_or_else(|| ClientError::JobStatus {
            sid: sid.to_string(),
            message: "HTTP 404: unknown sid".to_string(),
        })?;
        job.polls += 1;

        if job
            .options
            .window()
            .is_some_and(|window| self.failing.contains(&window))
        {
            return Ok(JobStatus {
                is_done: true,
                is_failed: true,
                messages: vec![SplunkMessage {
                    message_type: MessageType::Fatal,
                    text: "injected failure".to_string(),
                }],
                ..Default::default()
            });
        }

        let is_done = self.polls_until_done.is_some_and(|n| job.polls >= n);
        Ok(JobStatus {
            is_done,
            dispatch_state: Some(if is_done { "DONE" } else { "RUNNING" }.to_string()),
            ..Default::default()
        })
    }

    async fn get_job_results(&self, sid: &str) -> Result<Vec<ResultRow>> {
        let state = self.lock();
        let job = state.jobs.get(sid).ok_or_else(|| ClientError::ResultsFetch {
            sid: sid.to_string(),
            message: "HTTP 404: unknown sid".to_string(),
        })?;

        Ok(self
            .events
            .iter()
            .filter(|ts| Self::covers(&job.options, **ts))
            .take(job.options.effective_max_count())
            .map(|ts| {
                let mut row = ResultRow::new();
                row.insert("_time".to_string(), Value::String(ts.to_rfc3339()));
                row.insert("sid".to_string(), Value::String(sid.to_string()));
                row
            })
            .collect())
    }
}
