//! Multi-attempt execution of async operations.
//!
//! Same rules as the sync [`execute`](crate::invoke::execute): raised errors
//! are always retried, returned failures only when the policy allows it, and
//! exhausted attempts are aggregated into one `ErrorDetail`. Attempts run one
//! after another; a running attempt is never cancelled.

use core::future::Future;

use crate::invoke::retry::Attempts;
use crate::invoke::{Executed, IntoStep, Policy};
use crate::types::{Outcome, Rail};

/// Runs the futures produced by `op` according to `policy`.
pub async fn execute_async<F, Fut>(mut op: F, policy: Policy) -> Executed
where
    F: FnMut() -> Fut,
    Fut: Future,
    Fut::Output: IntoStep,
{
    let name = core::any::type_name::<F>();
    let mut attempts = Attempts::new(policy);
    while attempts.start() {
        if let Some(done) = attempts.observe(name, op().await.into_step()) {
            return done;
        }
    }
    attempts.finish(name)
}

/// Runs `op` up to `attempts` times, retrying raised errors.
///
/// ```rust
/// use outcome_rail::async_ext::retry_async;
/// use outcome_rail::Exception;
///
/// # async fn demo() {
/// let outcome = retry_async(2, || async { Err::<(), _>(Exception::msg("fake")) }).await.finish();
/// assert_eq!(outcome.detail().map(|d| d.more_data().len()), Some(2));
/// # }
/// ```
pub async fn retry_async<F, Fut>(attempts: u32, op: F) -> Rail
where
    F: FnMut() -> Fut,
    Fut: Future,
    Fut::Output: IntoStep,
{
    let policy = Policy { attempts, ..Policy::default() };
    execute_async(op, policy).await.resolve(Outcome::ok())
}

/// Runs `op` once outside of any chain. Returning nothing yields `ok()`.
#[inline]
pub async fn try_func_async<F, Fut>(op: F) -> Rail
where
    F: FnMut() -> Fut,
    Fut: Future,
    Fut::Output: IntoStep,
{
    retry_async(1, op).await
}
