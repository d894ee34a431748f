//! Future wrapper applying the boundary rules to an async function.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;

use crate::boundary::settle;
use crate::invoke::IntoStep;
use crate::types::{Detail, Exception, Outcome};

pin_project! {
    /// Resolves to the [`Outcome`] of the wrapped future, with the same rules
    /// as [`guard`](crate::guard).
    ///
    /// # Cancel Safety
    ///
    /// `GuardFuture` is cancel-safe if the inner future is cancel-safe.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome_rail::async_ext::guard_async;
    /// use outcome_rail::{Exception, Outcome};
    ///
    /// # async fn demo() {
    /// let outcome = guard_async(async { Err::<i32, _>(Exception::msg("offline")) }).await;
    /// assert!(outcome.is_fail());
    ///
    /// assert_eq!(guard_async(async { 5 }).await, Outcome::ok_value(5));
    /// # }
    /// ```
    #[must_use = "futures do nothing unless polled"]
    pub struct GuardFuture<Fut, E> {
        #[pin]
        future: Fut,
        on_exception: Option<E>,
    }
}

/// Wraps `future`, reporting raised errors as `ExceptionError` details.
#[inline]
pub fn guard_async<Fut>(future: Fut) -> GuardFuture<Fut, fn(Exception) -> Detail>
where
    Fut: Future,
    Fut::Output: IntoStep,
{
    GuardFuture::new(future, Detail::from_exception as fn(Exception) -> Detail)
}

impl<Fut, E> GuardFuture<Fut, E> {
    /// Wraps `future`, describing raised errors with `on_exception`.
    #[inline]
    pub fn new(future: Fut, on_exception: E) -> Self {
        Self { future, on_exception: Some(on_exception) }
    }
}

impl<Fut, E> Future for GuardFuture<Fut, E>
where
    Fut: Future,
    Fut::Output: IntoStep,
    E: FnOnce(Exception) -> Detail,
{
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        this.future.poll(cx).map(|output| {
            let on_exception = this.on_exception.take().expect("GuardFuture polled after completion");
            settle(output.into_step(), on_exception)
        })
    }
}

impl<Fut, E> FusedFuture for GuardFuture<Fut, E>
where
    Fut: FusedFuture,
    Fut::Output: IntoStep,
    E: FnOnce(Exception) -> Detail,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.on_exception.is_none() || self.future.is_terminated()
    }
}
