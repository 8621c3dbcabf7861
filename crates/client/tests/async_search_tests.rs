//! Background search tests.
//!
//! # Invariants
//! - Exactly one of the two handlers runs, exactly once
//! - An error from the success handler is delivered to the error handler

mod common;

use anyhow::anyhow;
use chrono::Duration;
use common::*;
use splunk_rest::{ClientError, ResultRow, SearchExecutor, SearchOptions, SearchStage, TimeWindow};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct Calls {
    successes: AtomicUsize,
    errors: Mutex<Vec<ClientError>>,
}

fn options() -> SearchOptions {
    SearchOptions::new().earliest(at(0)).latest(at(100))
}

#[tokio::test]
async fn test_success_handler_receives_rows() {
    let api = Arc::new(FakeSearchApi::evenly_spaced(t0(), 20, Duration::seconds(1)));
    let executor = SearchExecutor::new(api);
    let calls = Arc::new(Calls::default());
    let received: Arc<Mutex<Vec<ResultRow>>> = Arc::default();

    let (on_ok, on_err, sink) = (Arc::clone(&calls), Arc::clone(&calls), Arc::clone(&received));
    executor
        .spawn_search_and_exec(
            "search index=main",
            options(),
            move |rows| {
                on_ok.successes.fetch_add(1, Ordering::SeqCst);
                *sink.lock().unwrap() = rows;
                Ok(())
            },
            move |err| on_err.errors.lock().unwrap().push(err),
        )
        .await
        .unwrap();

    assert_eq!(calls.successes.load(Ordering::SeqCst), 1);
    assert!(calls.errors.lock().unwrap().is_empty());
    assert_eq!(received.lock().unwrap().len(), 20);
}

#[tokio::test]
async fn test_search_failure_goes_to_error_handler() {
    let api = Arc::new(
        FakeSearchApi::evenly_spaced(t0(), 20, Duration::seconds(1))
            .failing_window(TimeWindow::new(at(0), at(100))),
    );
    let executor = SearchExecutor::new(api);
    let calls = Arc::new(Calls::default());

    let (on_ok, on_err) = (Arc::clone(&calls), Arc::clone(&calls));
    executor
        .spawn_search_and_exec(
            "search index=main",
            options(),
            move |_rows| {
                on_ok.successes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            move |err| on_err.errors.lock().unwrap().push(err),
        )
        .await
        .unwrap();

    assert_eq!(calls.successes.load(Ordering::SeqCst), 0);
    let errors = calls.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ClientError::JobFailed { .. }));
}

#[tokio::test]
async fn test_success_handler_error_is_routed_once() {
    let api = Arc::new(FakeSearchApi::evenly_spaced(t0(), 20, Duration::seconds(1)));
    let executor = SearchExecutor::new(api);
    let calls = Arc::new(Calls::default());

    let (on_ok, on_err) = (Arc::clone(&calls), Arc::clone(&calls));
    executor
        .spawn_search_and_exec(
            "search index=main",
            options(),
            move |_rows| {
                on_ok.successes.fetch_add(1, Ordering::SeqCst);
                Err(anyhow!("downstream sink is closed"))
            },
            move |err| on_err.errors.lock().unwrap().push(err),
        )
        .await
        .unwrap();

    assert_eq!(calls.successes.load(Ordering::SeqCst), 1);
    let errors = calls.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].stage(), SearchStage::Callback);
    assert!(errors[0].to_string().contains("downstream sink is closed"));
}

#[tokio::test]
async fn test_spawned_search_runs_concurrently_with_caller() {
    let api = Arc::new(FakeSearchApi::evenly_spaced(t0(), 250, Duration::seconds(2)));
    let executor = SearchExecutor::new(Arc::clone(&api));
    let total = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let total = Arc::clone(&total);
            executor.spawn_search_and_exec(
                "search index=main",
                SearchOptions::new()
                    .max_count(100)
                    .earliest(at(0))
                    .latest(at(500))
                    .allow_partition(true),
                move |rows| {
                    total.fetch_add(rows.len(), Ordering::SeqCst);
                    Ok(())
                },
                |err| panic!("unexpected error: {err}"),
            )
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(total.load(Ordering::SeqCst), 750);
    assert_eq!(api.created_jobs().len(), 18);
}
