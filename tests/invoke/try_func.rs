use outcome_rail::invoke::{execute, Executed, Policy};
use outcome_rail::{retry, try_func, Detail, Entry, Exception, Outcome, RailConfig, Retry};
use serde_json::Value;

const TWO_EXCEPTIONS: &str = "Operation failed with 2 attempts. The details of the 2 errors are \
                              stored in the more_data field. At least one of the errors was an \
                              exception type, the first exception being stored in the exception \
                              field.";

fn fake() -> Exception {
    Exception::msg("fake")
}

fn raise_fake() -> Result<(), Exception> {
    Err(fake())
}

#[test]
fn values_and_outcomes_become_the_result() {
    assert_eq!(try_func(|| Outcome::ok_value(5)).finish(), Outcome::ok_value(5));
    assert_eq!(try_func(|| 5).finish(), Outcome::ok_value(5));
    assert_eq!(try_func(|| ()).finish(), Outcome::ok());
}

#[test]
fn missing_operation_is_a_validation_error() {
    let outcome = try_func(None::<fn() -> i32>).finish();
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert!(outcome.is_fail());
    assert_eq!(detail.code(), Some(400));
    assert_eq!(detail.message(), Some("The input function is not valid."));
}

#[test]
fn parameters_cannot_be_supplied_outside_a_chain() {
    let outcome = try_func(|v: &Value| v.clone()).finish();
    let message = outcome.detail().and_then(Detail::message).unwrap_or_default().to_owned();

    assert!(outcome.is_fail());
    assert_eq!(outcome.status_code(), 400);
    assert!(message.ends_with("() takes 1 arguments. It cannot be executed."), "{message}");
}

#[test]
fn exhausted_exceptions_are_aggregated() {
    let outcome = try_func(retry(2, raise_fake)).finish();
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert!(outcome.is_fail());
    assert_eq!(detail.title(), "An error occurred");
    assert_eq!(detail.code(), Some(500));
    assert_eq!(detail.message(), Some(TWO_EXCEPTIONS));
    assert_eq!(detail.exception(), Some(&fake()));
    assert_eq!(detail.more_data(), &[Entry::from(fake()), Entry::from(fake())]);
}

#[test]
fn returned_failures_are_not_retried_by_default() {
    let mut calls = 0;
    let outcome = try_func(retry(2, || {
        calls += 1;
        Outcome::fail()
    }))
    .finish();

    assert_eq!(outcome, Outcome::fail());
    assert_eq!(calls, 1);
}

#[test]
fn returned_failures_without_detail_leave_no_records() {
    let op = retry(2, Outcome::fail).try_only_on_exceptions(false);
    let outcome = try_func(op).finish();
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert_eq!(detail.message(), Some("Operation failed with 2 attempts. There is no more information."));
    assert!(detail.more_data().is_empty());
}

#[test]
fn returned_failure_details_are_recorded() {
    let fake_error = Detail::error().with_title("fake");
    let op = retry(2, || Outcome::fail_with(Detail::error().with_title("fake")))
        .try_only_on_exceptions(false);
    let outcome = try_func(op).finish();
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert_eq!(
        detail.message(),
        Some("Operation failed with 2 attempts. The details of the 2 errors are stored in the more_data field. ")
    );
    assert_eq!(detail.more_data(), &[Entry::from(fake_error.clone()), Entry::from(fake_error)]);
    assert!(detail.exception().is_none());
}

#[test]
fn retries_stop_at_first_success() {
    let mut calls = 0;
    let outcome = try_func(retry(5, || {
        calls += 1;
        if calls < 3 {
            Err(fake())
        } else {
            Ok(calls)
        }
    }))
    .finish();

    assert_eq!(outcome, Outcome::ok_value(3));
    assert_eq!(calls, 3);
}

#[test]
fn zero_attempts_behave_as_one() {
    let mut calls = 0;
    let outcome = try_func(retry(0, || {
        calls += 1;
        raise_fake()
    }))
    .finish();

    assert_eq!(calls, 1);
    assert_eq!(outcome.detail().map(|d| d.more_data().len()), Some(1));
}

#[test]
fn invalid_operations_are_never_retried() {
    let mut op = retry(3, None::<fn()>);
    match execute(&mut op, None) {
        Executed::Rejected(detail) => assert_eq!(detail.code(), Some(400)),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn retry_from_config() {
    let config = RailConfig::new().with_attempts(4).with_try_only_on_exceptions(false);
    let op = Retry::from_config(&config, raise_fake);

    assert_eq!(op.policy(), Policy { attempts: 4, try_only_on_exceptions: false });
    assert_eq!(try_func(op).finish().detail().map(|d| d.more_data().len()), Some(4));
}
