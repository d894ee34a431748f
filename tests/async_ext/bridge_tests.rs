//! Tests for driving async operations from synchronous chains.

use outcome_rail::async_ext::{AsyncBridge, INSIDE_RUNTIME};
use outcome_rail::prelude::*;

async fn fetch_name(id: i64) -> Result<String, Exception> {
    tokio::task::yield_now().await;
    match id {
        1 => Ok("ada".to_owned()),
        _ => Err(Exception::msg(format!("user {} not found", id))),
    }
}

#[test]
fn async_steps_in_a_sync_chain() {
    let bridge = AsyncBridge::new();

    let outcome = Outcome::ok_value(1)
        .on_success(bridge.blocking_with_value(|v: Value| async move {
            fetch_name(v.as_i64().unwrap_or_default()).await
        }))
        .finish();

    assert_eq!(outcome, Outcome::ok_value("ada"));
    assert!(bridge.is_initialized());
}

#[test]
fn async_failures_are_retried_like_sync_ones() {
    let bridge = AsyncBridge::new();

    let outcome = Outcome::ok_value(7)
        .on_success(retry(2, bridge.blocking_with_value(|v: Value| async move {
            fetch_name(v.as_i64().unwrap_or_default()).await
        })))
        .finish();
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert_eq!(detail.more_data().len(), 2);
    assert_eq!(detail.exception().map(ToString::to_string), Some("user 7 not found".to_owned()));
}

#[test]
fn shared_bridge_runs_parameterless_steps() {
    let outcome = Outcome::ok()
        .on_success(AsyncBridge::shared().blocking(|| async { 5 }))
        .finish();

    assert_eq!(outcome, Outcome::ok_value(5));
}

#[test]
fn bridge_with_supplied_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let bridge = AsyncBridge::with_runtime(runtime);

    assert!(bridge.is_initialized());
    assert_eq!(bridge.block_on(fetch_name(1)), Outcome::ok_value("ada"));
}

#[tokio::test]
async fn refuses_to_block_inside_a_runtime() {
    let bridge = AsyncBridge::new();
    let outcome = Outcome::ok().on_success(bridge.blocking(|| async { 5 })).finish();

    assert_eq!(outcome.status_code(), 400);
    assert_eq!(outcome.detail().and_then(Detail::message), Some(INSIDE_RUNTIME));
    assert!(!bridge.is_initialized());
}
