//! Tests for the async retry executor.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use outcome_rail::async_ext::execute_async;
use outcome_rail::invoke::{Executed, Policy};
use outcome_rail::prelude_async::*;

fn fake() -> Exception {
    Exception::msg("fake")
}

#[tokio::test]
async fn succeeds_after_transient_errors() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let outcome = retry_async(3, move || {
        let c = counter_clone.clone();
        async move {
            let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 3 {
                Err(fake())
            } else {
                Ok(attempt)
            }
        }
    })
    .await
    .finish();

    assert_eq!(outcome, Outcome::ok_value(3));
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exhausted_attempts_are_aggregated() {
    let outcome = retry_async(2, || async { Err::<(), _>(fake()) }).await.finish();
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert_eq!(detail.title(), "An error occurred");
    assert_eq!(detail.exception(), Some(&fake()));
    assert_eq!(detail.more_data(), &[Entry::from(fake()), Entry::from(fake())]);
}

#[tokio::test]
async fn single_attempt_failure_message() {
    let outcome = try_func_async(|| async { Err::<(), _>(fake()) }).await.finish();

    assert_eq!(
        outcome.detail().and_then(Detail::message),
        Some(
            "Operation failed with 1 attempts. The details of the 1 errors are stored in the \
             more_data field. At least one of the errors was an exception type, the first \
             exception being stored in the exception field."
        )
    );
}

#[tokio::test]
async fn nothing_returned_is_ok() {
    assert_eq!(try_func_async(|| async {}).await.finish(), Outcome::ok());
}

#[tokio::test]
async fn returned_failures_follow_the_policy() {
    let counter = Arc::new(AtomicU32::new(0));

    let calls = counter.clone();
    let executed = execute_async(
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Outcome::fail_with(Detail::conflict()) }
        },
        Policy { attempts: 3, try_only_on_exceptions: true },
    )
    .await;
    assert_eq!(executed, Executed::Failure(Outcome::fail_with(Detail::conflict())));
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let calls = counter.clone();
    let executed = execute_async(
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Outcome::fail_with(Detail::conflict()) }
        },
        Policy { attempts: 3, try_only_on_exceptions: false },
    )
    .await;
    match executed {
        Executed::Failure(outcome) => {
            assert_eq!(outcome.detail().map(|d| d.more_data().len()), Some(3));
        },
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn break_stops_retrying() {
    let counter = Arc::new(AtomicU32::new(0));
    let calls = counter.clone();

    let rail = retry_async(5, move || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Rail::broken(Outcome::ok_value("done")) }
    })
    .await;

    assert!(rail.is_broken());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
