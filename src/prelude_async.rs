//! Async prelude - everything from [`prelude`](crate::prelude) plus the
//! async extensions.
//!
//! ```ignore
//! use outcome_rail::prelude_async::*;
//!
//! async fn load(id: u64) -> Outcome {
//!     retry_async(3, || fetch_user(id)).await.finish()
//! }
//! ```

pub use crate::prelude::*;

pub use crate::async_ext::{guard_async, retry_async, try_func_async, GuardFuture};

#[cfg(feature = "async-tokio")]
pub use crate::async_ext::AsyncBridge;
