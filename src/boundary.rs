//! Function boundaries that speak [`Outcome`].
//!
//! [`guard`] runs a function and folds every way it can end into an outcome:
//!
//! - `Err(e)` becomes `fail(ExceptionError)` carrying `e`
//! - a broken [`Rail`](crate::Rail) or a [`BreakSignal`](crate::BreakSignal)
//!   yields the outcome it carries
//! - an `Outcome` is returned unchanged
//! - any other value `v` becomes `ok(v)`, and nothing becomes `ok()`
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{guard, Exception, Outcome};
//!
//! fn divide(a: i64, b: i64) -> Result<i64, Exception> {
//!     if b == 0 {
//!         return Err(Exception::msg("Cannot divide by zero"));
//!     }
//!     Ok(a / b)
//! }
//!
//! assert_eq!(guard(|| divide(10, 2)), Outcome::ok_value(5));
//!
//! let failed = guard(|| divide(10, 0));
//! let detail = failed.detail().unwrap();
//! assert_eq!(detail.title(), "An exception occurred");
//! assert_eq!(detail.message(), Some("Cannot divide by zero"));
//! ```

use tracing::{debug, trace};

use crate::invoke::{IntoStep, Step};
use crate::types::{Detail, Exception, Outcome};

/// Runs `f`, reporting raised errors as `ExceptionError` details.
#[inline]
pub fn guard<F, R>(f: F) -> Outcome
where
    F: FnOnce() -> R,
    R: IntoStep,
{
    guard_with(f, Detail::from_exception)
}

/// Runs `f`, describing raised errors with `on_exception`.
///
/// ```
/// use outcome_rail::{guard_with, Detail, Exception};
///
/// let outcome = guard_with(
///     || Err::<(), _>(Exception::msg("upstream timed out")),
///     |e| Detail::from_exception(e).with_code(504),
/// );
/// assert_eq!(outcome.status_code(), 504);
/// ```
pub fn guard_with<F, R, E>(f: F, on_exception: E) -> Outcome
where
    F: FnOnce() -> R,
    R: IntoStep,
    E: FnOnce(Exception) -> Detail,
{
    settle(f().into_step(), on_exception)
}

/// Folds a single step into the boundary's outcome.
pub(crate) fn settle<E>(step: Step, on_exception: E) -> Outcome
where
    E: FnOnce(Exception) -> Detail,
{
    match step {
        Step::Raised(exception) => {
            debug!(exception_type = exception.type_name(), error = %exception, "boundary caught an error");
            Outcome::fail_with(on_exception(exception))
        },
        Step::Break(signal) => {
            trace!("boundary unwrapped a break");
            signal.into_outcome()
        },
        step => Outcome::convert(step, true),
    }
}
