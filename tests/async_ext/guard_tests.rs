//! Tests for the async boundary.

use std::time::Duration;

use outcome_rail::prelude_async::*;
use outcome_rail::BreakSignal;

async fn divide(a: i64, b: i64) -> Result<i64, Exception> {
    tokio::time::sleep(Duration::from_millis(1)).await;
    if b == 0 {
        return Err(Exception::msg("Cannot divide by zero"));
    }
    Ok(a / b)
}

async fn divide_outcome(a: i64, b: i64) -> Outcome {
    tokio::task::yield_now().await;
    if b == 0 {
        return fail!(bad_request, "Cannot divide by zero");
    }
    Outcome::ok_value(a / b)
}

#[tokio::test]
async fn plain_values_become_ok() {
    assert_eq!(guard_async(divide(10, 5)).await, Outcome::ok_value(2));
}

#[tokio::test]
async fn raised_errors_become_exception_details() {
    let outcome = guard_async(divide(10, 0)).await;
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert!(outcome.is_fail());
    assert_eq!(detail.title(), "An exception occurred");
    assert_eq!(detail.message(), Some("Cannot divide by zero"));
}

#[tokio::test]
async fn outcome_futures_are_not_rewrapped() {
    assert_eq!(guard_async(divide_outcome(10, 2)).await, Outcome::ok_value(5));

    let outcome = guard_async(divide_outcome(10, 0)).await;
    assert_eq!(outcome.status_code(), 400);
    assert_eq!(outcome.detail().and_then(Detail::message), Some("Cannot divide by zero"));
}

#[tokio::test]
async fn futures_without_output_succeed() {
    assert_eq!(guard_async(async {}).await, Outcome::ok());
}

#[tokio::test]
async fn breaks_yield_their_outcome() {
    let ok = Outcome::ok_value(1).with_detail(Detail::success());
    let failed = Outcome::fail_with(Detail::error());

    assert_eq!(guard_async(async { BreakSignal::new(ok.clone()) }).await, ok);
    assert_eq!(guard_async(async { Rail::broken(failed.clone()) }).await, failed);
}

#[tokio::test]
async fn chains_inside_futures() {
    let outcome = guard_async(async {
        let value = divide(20, 2).await?;
        Ok::<_, Exception>(Outcome::ok_value(value).on_success(|v: &Value| v.as_i64().map(|n| n * 3)))
    })
    .await;

    assert_eq!(outcome, Outcome::ok_value(30));
}

#[tokio::test]
async fn custom_exception_mapping() {
    let future = GuardFuture::new(divide(1, 0), |e: Exception| Detail::from_exception(e).with_code(422));
    assert_eq!(future.await.status_code(), 422);
}
