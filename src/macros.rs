//! Shorthand macros for building failures and breaking chains.
//!
//! - [`macro@crate::fail`] - A failed [`Outcome`](crate::Outcome) with a detail from the
//!   catalog and an optional formatted message.
//! - [`macro@crate::rail_break`] - Returns early from the enclosing function with a
//!   broken chain.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{fail, rail_break, Outcome, Rail, Railway};
//!
//! fn lookup(id: u64) -> Rail {
//!     if id == 0 {
//!         rail_break!(fail!(bad_request, "id must be positive"));
//!     }
//!     Outcome::ok_value(id).on_success(|| "found")
//! }
//!
//! assert!(lookup(0).is_broken());
//! assert_eq!(lookup(0).finish().status_code(), 400);
//! assert_eq!(lookup(7).finish(), Outcome::ok_value("found"));
//! ```

/// Builds a failed [`Outcome`](crate::Outcome) from a detail constructor.
///
/// The first argument names a [`Detail`](crate::Detail) constructor
/// (`error`, `validation`, `not_found`, ...); the rest, when present, is a
/// `format!` message.
///
/// ```
/// use outcome_rail::fail;
///
/// let id = 42;
/// let outcome = fail!(not_found, "user {} does not exist", id);
///
/// assert_eq!(outcome.status_code(), 404);
/// assert_eq!(outcome.detail().and_then(|d| d.message()), Some("user 42 does not exist"));
/// assert_eq!(fail!(conflict).status_code(), 409);
/// ```
#[macro_export]
macro_rules! fail {
    ($kind:ident $(,)?) => {
        $crate::Outcome::fail_with($crate::Detail::$kind())
    };
    ($kind:ident, $($arg:tt)+) => {
        $crate::Outcome::fail_with($crate::Detail::$kind().with_message(format!($($arg)+)))
    };
}

/// Returns early with a chain broken by the given outcome.
///
/// The enclosing function must return a type convertible from
/// [`BreakSignal`](crate::BreakSignal), such as [`Rail`](crate::Rail).
#[macro_export]
macro_rules! rail_break {
    ($outcome:expr $(,)?) => {
        return ::core::convert::From::from($crate::BreakSignal::new($outcome))
    };
}
