//! Railway-oriented outcomes with adaptive operation dispatch.
//!
//! An [`Outcome`] carries a success flag, an optional JSON value and an
//! optional [`Detail`]. Combinators from [`Railway`] thread it through user
//! operations, short-circuiting on failure, retrying on request and stopping
//! the whole chain when a break is raised. A chain ends at [`Rail::finish`]
//! or at a [`guard`] boundary.
//!
//! # Examples
//!
//! ## Chaining
//!
//! ```
//! use outcome_rail::{Detail, Outcome, Railway};
//! use serde_json::Value;
//!
//! let outcome = Outcome::convert(5, true)
//!     .on_success(|v: &Value| v.as_i64().map(|n| n + 5))
//!     .on_success_new_detail(Some(Detail::created()))
//!     .on_fail_add_more_data("fail data")
//!     .finish();
//!
//! assert_eq!(outcome.value(), Some(&Value::from(10)));
//! assert_eq!(outcome.status_code(), 201);
//! ```
//!
//! ## Retries
//!
//! ```
//! use outcome_rail::{retry, try_func, Entry, Exception};
//!
//! let fake = Exception::msg("fake");
//! let outcome = try_func(retry(2, || Err::<(), _>(fake.clone()))).finish();
//! let detail = outcome.detail().unwrap();
//!
//! assert_eq!(detail.title(), "An error occurred");
//! assert_eq!(detail.exception(), Some(&fake));
//! assert_eq!(detail.more_data(), &[Entry::from(fake.clone()), Entry::from(fake)]);
//! ```
//!
//! ## Breaking the chain
//!
//! ```
//! use outcome_rail::{Outcome, Railway};
//!
//! let rail = Outcome::ok_value(1)
//!     .on_success(|| 5)
//!     .break_rails(true)
//!     .on_success(|| 6);
//!
//! assert_eq!(rail.into_result().unwrap_err().into_outcome(), Outcome::ok_value(5));
//! ```

/// Boundary wrappers folding a function's result into an outcome
pub mod boundary;
/// Operation dispatch and the retry executor
pub mod invoke;
/// Shorthand macros for failures and breaks
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Combinator traits
pub mod traits;
/// Outcomes, details, exceptions and chain state
pub mod types;

/// Async extensions (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

/// Async prelude (requires `async` feature)
#[cfg(feature = "async")]
pub mod prelude_async;

/// Tower integration (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use boundary::{guard, guard_with};
pub use invoke::{retry, try_func, DynFn, Retry};
pub use traits::{Condition, Railway};
pub use types::{
    BreakSignal, CustomKind, Detail, DetailKind, Entry, Exception, MessageError, Outcome,
    Polarity, Rail, RailConfig,
};
