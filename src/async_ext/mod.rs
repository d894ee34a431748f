//! Async extensions.
//!
//! - [`GuardFuture`] / [`guard_async`]: the [`guard`](crate::guard) boundary for futures
//! - [`execute_async`], [`retry_async`], [`try_func_async`]: the retry executor
//!   for async operations
//! - [`AsyncBridge`] (`async-tokio`): drives async operations from synchronous
//!   chains
//!
//! # Feature Flag
//!
//! Requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["async"] }
//! ```

mod guard_future;
mod retry;

#[cfg(feature = "async-tokio")]
mod bridge;

pub use guard_future::{guard_async, GuardFuture};
pub use retry::{execute_async, retry_async, try_func_async};

#[cfg(feature = "async-tokio")]
pub use bridge::{AsyncBridge, INSIDE_RUNTIME};
