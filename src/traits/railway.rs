//! The combinator surface shared by [`Outcome`] and [`Rail`].
//!
//! Every combinator consumes the chain and returns a [`Rail`]. A broken rail
//! passes through every combinator untouched, so a break raised deep inside a
//! chain surfaces unchanged at [`Rail::finish`].
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{retry, Detail, Exception, Outcome, Railway};
//! use serde_json::Value;
//!
//! let outcome = Outcome::ok_value(5)
//!     .on_success(|v: &Value| v.as_i64().map(|n| n + 5))
//!     .on_success_add_more_data("success data")
//!     .on_success_new_detail(Some(Detail::created()))
//!     .on_success_tee(|| Err::<(), _>(Exception::msg("audit log down")), true)
//!     .on_fail_add_more_data("fail data")
//!     .finish();
//!
//! assert_eq!(outcome.value(), Some(&Value::from(10)));
//! assert_eq!(outcome.status_code(), 201);
//!
//! let failed = Outcome::ok()
//!     .on_success(retry(2, || Err::<(), _>(Exception::msg("fake"))))
//!     .on_fail_add_more_data("fail data")
//!     .finish();
//!
//! assert_eq!(failed.detail().map(|d| d.more_data().len()), Some(3));
//! ```

use serde_json::Value;
use tracing::trace;

use crate::invoke::{execute, Executed, Operation, Step};
use crate::traits::condition::{Condition, Verdict};
use crate::types::{Detail, Entry, Outcome, Polarity, Rail};

/// Message reported when `try_func` follows a failure with an operation that
/// cannot see the failure.
pub const PREVIOUS_FAILED: &str = "The previous function failed. The new function does not have a \
                                   parameter to get the previous result. Either define a function \
                                   that accepts a parameter or set ignore_previous_error to true.";

/// Railway combinators.
///
/// Implementors only provide [`into_rail`](Railway::into_rail); every
/// combinator is a provided method. Retries are requested by wrapping the
/// operation with [`retry`](crate::retry).
pub trait Railway: Sized {
    /// The chain state this value represents.
    fn into_rail(self) -> Rail;

    /// Runs `op` when the outcome is a success.
    ///
    /// A returned value becomes `ok(value)`, a returned outcome replaces the
    /// current one and returning nothing keeps the current outcome.
    fn on_success<M, O>(self, mut op: O) -> Rail
    where
        O: Operation<M>,
    {
        on_running(self, |current| {
            if current.is_fail() {
                return Rail::Running(current);
            }
            execute(&mut op, Some(&current)).resolve(current)
        })
    }

    /// Runs `op` when the outcome is a failure.
    fn on_fail<M, O>(self, mut op: O) -> Rail
    where
        O: Operation<M>,
    {
        on_running(self, |current| {
            if current.is_success() {
                return Rail::Running(current);
            }
            execute(&mut op, Some(&current)).resolve(current)
        })
    }

    /// Runs `op` whatever the status, refusing to hide a previous failure
    /// from an operation that takes no parameters.
    #[inline]
    fn try_func<M, O>(self, op: O) -> Rail
    where
        O: Operation<M>,
    {
        self.try_func_with(op, false)
    }

    /// Runs `op` whatever the status. With `ignore_previous_error` a
    /// parameterless operation may also run after a failure.
    fn try_func_with<M, O>(self, mut op: O, ignore_previous_error: bool) -> Rail
    where
        O: Operation<M>,
    {
        on_running(self, |current| {
            if current.is_fail() && op.arity() == 0 && !ignore_previous_error {
                return Rail::Running(Outcome::fail_with(
                    Detail::error().with_message(PREVIOUS_FAILED),
                ));
            }
            execute(&mut op, Some(&current)).resolve(current)
        })
    }

    /// Appends `data` to the detail's `more_data` on success, creating a
    /// `SuccessDetail` when there is none. `null` is ignored.
    #[inline]
    fn on_success_add_more_data<V>(self, data: V) -> Rail
    where
        V: Into<Value>,
    {
        add_more_data(self.into_rail(), Polarity::Success, data.into())
    }

    /// Appends `data` to the detail's `more_data` on failure, creating an
    /// `ErrorDetail` when there is none. `null` is ignored.
    #[inline]
    fn on_fail_add_more_data<V>(self, data: V) -> Rail
    where
        V: Into<Value>,
    {
        add_more_data(self.into_rail(), Polarity::Error, data.into())
    }

    /// Like [`on_success_add_more_data`](Railway::on_success_add_more_data)
    /// with the data computed by `op`.
    ///
    /// A failing resolver replaces the outcome unless `ignore_errors` is set.
    #[inline]
    fn on_success_add_more_data_with<M, O>(self, op: O, ignore_errors: bool) -> Rail
    where
        O: Operation<M>,
    {
        add_more_data_with(self.into_rail(), Polarity::Success, op, ignore_errors)
    }

    /// Like [`on_fail_add_more_data`](Railway::on_fail_add_more_data) with the
    /// data computed by `op`.
    #[inline]
    fn on_fail_add_more_data_with<M, O>(self, op: O, ignore_errors: bool) -> Rail
    where
        O: Operation<M>,
    {
        add_more_data_with(self.into_rail(), Polarity::Error, op, ignore_errors)
    }

    /// Replaces the detail of a success. `None` clears it; an error-family
    /// detail is rejected with a 500 failure.
    #[inline]
    fn on_success_new_detail(self, detail: Option<Detail>) -> Rail {
        new_detail(self.into_rail(), Polarity::Success, detail)
    }

    /// Replaces the detail of a failure. `None` clears it; a success-family
    /// detail is rejected with a 500 failure.
    #[inline]
    fn on_fail_new_detail(self, detail: Option<Detail>) -> Rail {
        new_detail(self.into_rail(), Polarity::Error, detail)
    }

    /// Replaces the detail of a success with the one `op` returns.
    #[inline]
    fn on_success_new_detail_with<M, O>(self, op: O) -> Rail
    where
        O: Operation<M>,
    {
        new_detail_with(self.into_rail(), Polarity::Success, op)
    }

    /// Replaces the detail of a failure with the one `op` returns.
    #[inline]
    fn on_fail_new_detail_with<M, O>(self, op: O) -> Rail
    where
        O: Operation<M>,
    {
        new_detail_with(self.into_rail(), Polarity::Error, op)
    }

    /// Runs `op` on success for its side effect only.
    ///
    /// A failing `op` replaces the outcome unless `ignore_errors` is set.
    #[inline]
    fn on_success_tee<M, O>(self, op: O, ignore_errors: bool) -> Rail
    where
        O: Operation<M>,
    {
        tee(self.into_rail(), Some(true), op, ignore_errors)
    }

    /// Runs `op` on failure for its side effect only.
    #[inline]
    fn on_fail_tee<M, O>(self, op: O, ignore_errors: bool) -> Rail
    where
        O: Operation<M>,
    {
        tee(self.into_rail(), Some(false), op, ignore_errors)
    }

    /// Runs `op` whatever the status for its side effect only. Its failure
    /// always replaces the outcome.
    #[inline]
    fn finally_tee<M, O>(self, op: O) -> Rail
    where
        O: Operation<M>,
    {
        tee(self.into_rail(), None, op, false)
    }

    /// Runs `op` when `condition` holds, whatever the status.
    ///
    /// With `break_rails` the outcome `op` produced ends the chain.
    #[inline]
    fn operate_when<CM, C, M, O>(self, condition: C, op: O, break_rails: bool) -> Rail
    where
        C: Condition<CM>,
        O: Operation<M>,
    {
        operate_when(self.into_rail(), None, condition, op, break_rails)
    }

    /// [`operate_when`](Railway::operate_when) restricted to successes.
    #[inline]
    fn on_success_operate_when<CM, C, M, O>(self, condition: C, op: O, break_rails: bool) -> Rail
    where
        C: Condition<CM>,
        O: Operation<M>,
    {
        operate_when(self.into_rail(), Some(true), condition, op, break_rails)
    }

    /// [`operate_when`](Railway::operate_when) restricted to failures.
    #[inline]
    fn on_fail_operate_when<CM, C, M, O>(self, condition: C, op: O, break_rails: bool) -> Rail
    where
        C: Condition<CM>,
        O: Operation<M>,
    {
        operate_when(self.into_rail(), Some(false), condition, op, break_rails)
    }

    /// Fails with a default `ErrorDetail` when `condition` holds.
    #[inline]
    fn fail_when<CM, C>(self, condition: C) -> Rail
    where
        C: Condition<CM>,
    {
        self.fail_when_with(condition, None, false)
    }

    /// Fails with `detail` (or a default `ErrorDetail`) when `condition`
    /// holds. With `add_prev_detail` the replaced detail is appended to the
    /// new detail's `more_data` as a [`Entry::PrevDetail`].
    fn fail_when_with<CM, C>(
        self,
        mut condition: C,
        detail: Option<Detail>,
        add_prev_detail: bool,
    ) -> Rail
    where
        C: Condition<CM>,
    {
        on_running(self, |current| match condition.evaluate(&current) {
            Verdict::Holds(_) => {
                let mut detail = detail.unwrap_or_else(Detail::error);
                if add_prev_detail {
                    let previous = current.into_detail().map(Box::new);
                    detail.push_more_data(Entry::PrevDetail(previous));
                }
                Rail::Running(Outcome::fail_with(detail))
            },
            Verdict::Fails => Rail::Running(current),
            Verdict::Errored(outcome) => Rail::Running(outcome),
            Verdict::Broke(signal) => Rail::Broken(signal),
        })
    }

    /// Breaks the chain when `condition` holds.
    ///
    /// The break carries the current outcome, or the successful outcome a
    /// computed condition returned.
    #[inline]
    fn break_rails<CM, C>(self, condition: C) -> Rail
    where
        C: Condition<CM>,
    {
        break_when(self.into_rail(), None, condition)
    }

    /// [`break_rails`](Railway::break_rails) restricted to successes.
    #[inline]
    fn on_success_break<CM, C>(self, condition: C) -> Rail
    where
        C: Condition<CM>,
    {
        break_when(self.into_rail(), Some(true), condition)
    }

    /// [`break_rails`](Railway::break_rails) restricted to failures.
    #[inline]
    fn on_fail_break<CM, C>(self, condition: C) -> Rail
    where
        C: Condition<CM>,
    {
        break_when(self.into_rail(), Some(false), condition)
    }
}

impl Railway for Outcome {
    #[inline]
    fn into_rail(self) -> Rail {
        Rail::Running(self)
    }
}

impl Railway for Rail {
    #[inline]
    fn into_rail(self) -> Rail {
        self
    }
}

/// Applies `f` to a running chain; broken chains pass through.
#[inline]
fn on_running<R, F>(rail: R, f: F) -> Rail
where
    R: Railway,
    F: FnOnce(Outcome) -> Rail,
{
    match rail.into_rail() {
        Rail::Running(current) => f(current),
        broken @ Rail::Broken(_) => broken,
    }
}

/// `true` when the guard (success-only, failure-only or none) admits `current`.
#[inline]
fn admits(guard: Option<bool>, current: &Outcome) -> bool {
    match guard {
        Some(success) => current.is_success() == success,
        None => true,
    }
}

fn default_detail(polarity: Polarity) -> Detail {
    match polarity {
        Polarity::Success => Detail::success(),
        Polarity::Error => Detail::error(),
    }
}

fn guard_of(polarity: Polarity) -> Option<bool> {
    Some(polarity == Polarity::Success)
}

fn add_more_data(rail: Rail, polarity: Polarity, data: Value) -> Rail {
    on_running(rail, |mut current| {
        if !admits(guard_of(polarity), &current) || data.is_null() {
            return Rail::Running(current);
        }
        current.detail_or_insert_with(|| default_detail(polarity)).push_more_data(data);
        Rail::Running(current)
    })
}

fn add_more_data_with<M, O>(rail: Rail, polarity: Polarity, op: O, ignore_errors: bool) -> Rail
where
    O: Operation<M>,
{
    on_running(rail, |mut current| {
        if !admits(guard_of(polarity), &current) {
            return Rail::Running(current);
        }
        let mut capture = CaptureDetail { op, captured: None };
        match execute(&mut capture, Some(&current)) {
            Executed::Keep => {
                if let Some(detail) = capture.captured {
                    current.detail_or_insert_with(|| default_detail(polarity)).push_more_data(detail);
                }
                Rail::Running(current)
            },
            Executed::Success(resolved) => match resolved.into_value() {
                Some(data) => add_more_data(Rail::Running(current), polarity, data),
                None => Rail::Running(current),
            },
            Executed::Failure(_) if ignore_errors => Rail::Running(current),
            Executed::Failure(failure) => Rail::Running(failure),
            Executed::Rejected(detail) => Rail::Running(Outcome::fail_with(detail)),
            Executed::Break(signal) => Rail::Broken(signal),
        }
    })
}

fn replace_detail(mut current: Outcome, expected: Polarity, detail: Option<Detail>) -> Rail {
    if let Some(given) = &detail {
        if given.polarity() != expected {
            return Rail::Running(Outcome::fail_with(Detail::error().with_message(format!(
                "Type of new detail '{}' is not instance of '{}'",
                given.kind().name(),
                expected.base_name()
            ))));
        }
    }
    current.set_detail(detail);
    Rail::Running(current)
}

fn new_detail(rail: Rail, polarity: Polarity, detail: Option<Detail>) -> Rail {
    on_running(rail, |current| {
        if !admits(guard_of(polarity), &current) {
            return Rail::Running(current);
        }
        replace_detail(current, polarity, detail)
    })
}

fn new_detail_with<M, O>(rail: Rail, polarity: Polarity, op: O) -> Rail
where
    O: Operation<M>,
{
    on_running(rail, |current| {
        if !admits(guard_of(polarity), &current) {
            return Rail::Running(current);
        }
        let mut capture = CaptureDetail { op, captured: None };
        match execute(&mut capture, Some(&current)) {
            Executed::Keep => replace_detail(current, polarity, capture.captured),
            Executed::Success(resolved) => replace_detail(current, polarity, resolved.into_detail()),
            Executed::Failure(failure) => Rail::Running(failure),
            Executed::Rejected(detail) => Rail::Running(Outcome::fail_with(detail)),
            Executed::Break(signal) => Rail::Broken(signal),
        }
    })
}

fn tee<M, O>(rail: Rail, guard: Option<bool>, mut op: O, ignore_errors: bool) -> Rail
where
    O: Operation<M>,
{
    on_running(rail, |current| {
        if !admits(guard, &current) {
            return Rail::Running(current);
        }
        match execute(&mut op, Some(&current)) {
            Executed::Keep | Executed::Success(_) => Rail::Running(current),
            Executed::Failure(_) if ignore_errors => {
                trace!(operation = %op.name(), "ignored tee failure");
                Rail::Running(current)
            },
            Executed::Failure(failure) => Rail::Running(failure),
            Executed::Rejected(detail) => Rail::Running(Outcome::fail_with(detail)),
            Executed::Break(signal) => Rail::Broken(signal),
        }
    })
}

fn operate_when<CM, C, M, O>(
    rail: Rail,
    guard: Option<bool>,
    mut condition: C,
    mut op: O,
    break_rails: bool,
) -> Rail
where
    C: Condition<CM>,
    O: Operation<M>,
{
    on_running(rail, |current| {
        if !admits(guard, &current) {
            return Rail::Running(current);
        }
        match condition.evaluate(&current) {
            Verdict::Holds(_) => match execute(&mut op, Some(&current)).resolve(current) {
                Rail::Running(outcome) if break_rails => Rail::broken(outcome),
                rail => rail,
            },
            Verdict::Fails => Rail::Running(current),
            Verdict::Errored(outcome) => Rail::Running(outcome),
            Verdict::Broke(signal) => Rail::Broken(signal),
        }
    })
}

fn break_when<CM, C>(rail: Rail, guard: Option<bool>, mut condition: C) -> Rail
where
    C: Condition<CM>,
{
    on_running(rail, |current| {
        if !admits(guard, &current) {
            return Rail::Running(current);
        }
        match condition.evaluate(&current) {
            Verdict::Holds(Some(outcome)) => Rail::broken(outcome),
            Verdict::Holds(None) => Rail::broken(current),
            Verdict::Fails => Rail::Running(current),
            Verdict::Errored(outcome) => Rail::Running(outcome),
            Verdict::Broke(signal) => Rail::Broken(signal),
        }
    })
}

/// Keeps a returned detail aside instead of promoting it to an outcome, so
/// an error-family detail handed to `*_new_detail_with` or
/// `*_add_more_data_with` is not mistaken for a failed attempt.
struct CaptureDetail<O> {
    op: O,
    captured: Option<Detail>,
}

impl<M, O> Operation<M> for CaptureDetail<O>
where
    O: Operation<M>,
{
    #[inline]
    fn arity(&self) -> usize {
        self.op.arity()
    }

    fn invoke(&mut self, previous: Option<&Outcome>) -> Step {
        match self.op.invoke(previous) {
            Step::Detail(detail) => {
                self.captured = Some(*detail);
                Step::Keep
            },
            step => step,
        }
    }

    #[inline]
    fn name(&self) -> std::borrow::Cow<'static, str> {
        self.op.name()
    }

    #[inline]
    fn policy(&self) -> crate::invoke::Policy {
        self.op.policy()
    }
}
