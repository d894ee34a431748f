//! Dispatch of user operations: arity selection, return normalization and
//! multi-attempt execution.
//!
//! - [`Operation`]: a callable plus its calling convention (chosen by marker)
//! - [`IntoStep`] / [`Step`]: what a single call produced
//! - [`Retry`] / [`execute`]: the retry executor and failure aggregation
//! - [`DynFn`]: callables described at runtime
//!
//! # Examples
//!
//! ```
//! use outcome_rail::invoke::{execute, Executed};
//! use outcome_rail::{retry, Exception, Outcome};
//!
//! let mut calls = 0;
//! let mut flaky = retry(3, || {
//!     calls += 1;
//!     if calls < 3 { Err(Exception::msg("busy")) } else { Ok(calls) }
//! });
//!
//! assert_eq!(execute(&mut flaky, None), Executed::Success(Outcome::ok_value(3)));
//! ```

pub mod dynamic;
pub mod operation;
pub mod retry;
pub mod step;

pub use dynamic::{parameter_detection_kind, Arity, DynFn};
pub use operation::{
    cannot_execute, invalid_function, Dynamic, Maybe, NoArgs, Operation, WithOutcome, WithValue,
    WithValueAndOutcome,
};
pub use retry::{aggregate_failure, execute, retry, Executed, Policy, Retry};
pub use step::{is_truthy, IntoStep, Step};

use crate::types::{Outcome, Rail};

/// Runs an operation outside of any chain.
///
/// There is no previous outcome, so only operations without parameters can
/// run; the others report a `ValidationError`. An operation returning
/// nothing yields `ok()`.
///
/// ```
/// use outcome_rail::{retry, try_func, Exception};
///
/// let outcome = try_func(retry(2, || Err::<(), _>(Exception::msg("fake")))).finish();
/// let detail = outcome.detail().unwrap();
///
/// assert_eq!(detail.code(), Some(500));
/// assert_eq!(detail.more_data().len(), 2);
/// ```
pub fn try_func<M, O>(mut op: O) -> Rail
where
    O: Operation<M>,
{
    execute(&mut op, None).resolve(Outcome::ok())
}
