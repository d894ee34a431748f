//! Driving async operations from synchronous chains.
//!
//! # Feature Flag
//!
//! Requires the `async-tokio` feature:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["async-tokio"] }
//! ```

use core::future::Future;
use std::sync::OnceLock;

use serde_json::Value;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

use crate::boundary::settle;
use crate::invoke::{IntoStep, Step};
use crate::types::{Detail, Outcome};

/// Message reported when a bridge is used from inside a running runtime.
pub const INSIDE_RUNTIME: &str =
    "Cannot block on an async operation from inside a running Tokio runtime.";

/// Runs futures to completion on a lazily built current-thread runtime.
///
/// The runtime is created on first use and reused afterwards. Pass a bridge
/// explicitly where possible; [`AsyncBridge::shared`] exists for call sites
/// that cannot.
///
/// # Examples
///
/// ```rust
/// use outcome_rail::async_ext::AsyncBridge;
/// use outcome_rail::{Outcome, Railway};
///
/// let bridge = AsyncBridge::new();
/// let outcome = Outcome::ok()
///     .on_success(bridge.blocking(|| async { 5 }))
///     .finish();
///
/// assert_eq!(outcome, Outcome::ok_value(5));
/// ```
#[derive(Debug, Default)]
pub struct AsyncBridge {
    runtime: OnceLock<Runtime>,
}

impl AsyncBridge {
    /// A bridge that builds its runtime on first use.
    #[inline]
    pub fn new() -> Self {
        Self { runtime: OnceLock::new() }
    }

    /// A bridge driving futures on `runtime`.
    pub fn with_runtime(runtime: Runtime) -> Self {
        let bridge = Self::new();
        // A fresh OnceLock cannot be occupied yet.
        let _ = bridge.runtime.set(runtime);
        bridge
    }

    /// The process-wide bridge.
    pub fn shared() -> &'static AsyncBridge {
        static SHARED: OnceLock<AsyncBridge> = OnceLock::new();
        SHARED.get_or_init(AsyncBridge::new)
    }

    /// `true` once the runtime has been built.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.runtime.get().is_some()
    }

    /// Drives `future` to completion and folds its output with the rules of
    /// [`guard`](crate::guard).
    ///
    /// Inside a running Tokio runtime this returns a `ValidationError`
    /// instead of blocking.
    pub fn block_on<Fut>(&self, future: Fut) -> Outcome
    where
        Fut: Future,
        Fut::Output: IntoStep,
    {
        settle(self.run(future), Detail::from_exception)
    }

    /// Adapts an async closure into a synchronous operation taking no
    /// parameters.
    pub fn blocking<'a, F, Fut>(&'a self, mut f: F) -> impl FnMut() -> Step + 'a
    where
        F: FnMut() -> Fut + 'a,
        Fut: Future,
        Fut::Output: IntoStep,
    {
        move || self.run(f())
    }

    /// Adapts an async closure over the carried value into a synchronous
    /// operation. The closure receives its own copy of the value.
    pub fn blocking_with_value<'a, F, Fut>(&'a self, mut f: F) -> impl FnMut(&Value) -> Step + 'a
    where
        F: FnMut(Value) -> Fut + 'a,
        Fut: Future,
        Fut::Output: IntoStep,
    {
        move |value: &Value| self.run(f(value.clone()))
    }

    fn run<Fut>(&self, future: Fut) -> Step
    where
        Fut: Future,
        Fut::Output: IntoStep,
    {
        if Handle::try_current().is_ok() {
            debug!("refusing to block inside a running runtime");
            return Step::Invalid(Box::new(Detail::validation().with_message(INSIDE_RUNTIME)));
        }
        match self.runtime() {
            Ok(runtime) => runtime.block_on(future).into_step(),
            Err(error) => Step::Raised(error.into()),
        }
    }

    fn runtime(&self) -> std::io::Result<&Runtime> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }
        let runtime = Builder::new_current_thread().enable_all().build()?;
        debug!("built async bridge runtime");
        Ok(self.runtime.get_or_init(|| runtime))
    }
}
