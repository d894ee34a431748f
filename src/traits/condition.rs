//! Conditions gating `operate_when`, `fail_when` and the break combinators.
//!
//! A condition is either a literal `bool` or any [`Operation`]. Operations
//! are called once (no retries) against the current outcome and their result
//! is truth-tested:
//!
//! | operation returns       | holds when                  |
//! |-------------------------|-----------------------------|
//! | nothing (`()`, `None`)  | never                       |
//! | a value                 | the value is truthy         |
//! | an `Outcome` / `Detail` | it is a success             |
//! | `Err(e)`                | never; the chain fails      |
//! | a broken `Rail`         | never; the chain breaks     |
//!
//! Only these two shapes are accepted, so an unrecognized condition type is a
//! compile error rather than a runtime `ValidationError`.

use core::marker::PhantomData;

use crate::invoke::{is_truthy, Operation, Step};
use crate::types::{BreakSignal, Detail, Outcome};

/// Marker: a literal boolean condition.
#[derive(Debug, Clone, Copy)]
pub struct Literal;

/// Marker: a condition computed by an operation.
#[derive(Debug, Clone, Copy)]
pub struct Computed<M>(PhantomData<M>);

/// Result of evaluating a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The condition holds. A computed condition that returned a successful
    /// outcome hands it over; break combinators use it as the final result.
    Holds(Option<Outcome>),
    /// The condition does not hold.
    Fails,
    /// Evaluating the condition failed; the chain continues with this outcome.
    Errored(Outcome),
    /// The condition itself broke the chain.
    Broke(BreakSignal),
}

impl Verdict {
    #[inline]
    pub fn holds(&self) -> bool {
        matches!(self, Verdict::Holds(_))
    }
}

/// A predicate over the current outcome.
pub trait Condition<Marker> {
    fn evaluate(&mut self, current: &Outcome) -> Verdict;
}

impl Condition<Literal> for bool {
    #[inline]
    fn evaluate(&mut self, _current: &Outcome) -> Verdict {
        if *self {
            Verdict::Holds(None)
        } else {
            Verdict::Fails
        }
    }
}

impl<M, F> Condition<Computed<M>> for F
where
    F: Operation<M>,
{
    fn evaluate(&mut self, current: &Outcome) -> Verdict {
        let outcome = match self.invoke(Some(current)) {
            Step::Keep => return Verdict::Fails,
            Step::Value(value) => {
                return if is_truthy(&value) { Verdict::Holds(None) } else { Verdict::Fails };
            },
            Step::Outcome(outcome) => outcome,
            Step::Detail(detail) => Outcome::from_detail(*detail),
            Step::Raised(exception) => {
                return Verdict::Errored(Outcome::fail_with(Detail::from_exception(exception)));
            },
            Step::Break(signal) => return Verdict::Broke(signal),
            Step::Invalid(detail) => return Verdict::Errored(Outcome::fail_with(*detail)),
        };

        if outcome.is_success() {
            Verdict::Holds(Some(outcome))
        } else {
            Verdict::Fails
        }
    }
}
