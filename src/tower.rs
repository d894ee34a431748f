//! Tower integration.
//!
//! [`RailLayer`] wraps a service so that every call resolves to an
//! [`Outcome`], with the same rules as [`guard`](crate::guard): an `Err`
//! response becomes a failed outcome carrying the error, an `Outcome`
//! response passes through, and any other response `r` becomes `ok(r)`.
//! Readiness errors are still reported as the service's own error.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use outcome_rail::tower::RailLayer;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(RailLayer::new())
//!     .service(my_service);
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::async_ext::GuardFuture;
use crate::invoke::IntoStep;
use crate::types::{Detail, Exception, Outcome};

type OnException = fn(Exception) -> Detail;

/// A Tower [`Layer`] turning service responses into [`Outcome`]s.
#[derive(Clone, Copy, Debug)]
pub struct RailLayer {
    on_exception: OnException,
}

impl Default for RailLayer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl RailLayer {
    /// Errors become `ExceptionError` details.
    #[inline]
    pub const fn new() -> Self {
        Self { on_exception: Detail::from_exception }
    }

    /// Errors are described by `on_exception`.
    #[inline]
    pub const fn with_exception_detail(on_exception: OnException) -> Self {
        Self { on_exception }
    }
}

impl<S> Layer<S> for RailLayer {
    type Service = RailService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        RailService { inner, on_exception: self.on_exception }
    }
}

/// A Tower [`Service`] whose responses are [`Outcome`]s.
#[derive(Clone, Debug)]
pub struct RailService<S> {
    inner: S,
    on_exception: OnException,
}

impl<S> RailService<S> {
    #[inline]
    pub fn new(inner: S) -> Self {
        Self { inner, on_exception: Detail::from_exception }
    }

    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, Request> Service<Request> for RailService<S>
where
    S: Service<Request>,
    S::Response: IntoStep,
    S::Error: Into<Exception>,
{
    type Response = Outcome;
    type Error = S::Error;
    type Future = RailFuture<S::Future>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    #[inline]
    fn call(&mut self, request: Request) -> Self::Future {
        RailFuture { inner: GuardFuture::new(self.inner.call(request), self.on_exception) }
    }
}

pin_project! {
    /// Future returned by [`RailService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct RailFuture<F> {
        #[pin]
        inner: GuardFuture<F, OnException>,
    }
}

impl<F, T, E> Future for RailFuture<F>
where
    F: Future<Output = Result<T, E>>,
    T: IntoStep,
    E: Into<Exception>,
{
    type Output = Result<Outcome, E>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll(cx).map(Ok)
    }
}

impl<F, T, E> FusedFuture for RailFuture<F>
where
    F: FusedFuture<Output = Result<T, E>>,
    T: IntoStep,
    E: Into<Exception>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.inner.is_terminated()
    }
}

/// Extension trait for wrapping services.
pub trait ServiceOutcomeExt<Request>: Service<Request> + Sized {
    /// Wraps this service so its responses are [`Outcome`]s.
    fn with_outcomes(self) -> RailService<Self> {
        RailService::new(self)
    }
}

impl<S, Request> ServiceOutcomeExt<Request> for S where S: Service<Request> {}
