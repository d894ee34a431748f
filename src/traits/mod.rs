//! Combinator traits.
//!
//! - [`Railway`]: every chain combinator, implemented for [`Outcome`](crate::Outcome)
//!   and [`Rail`](crate::Rail)
//! - [`Condition`]: literal or computed predicates gating `operate_when`,
//!   `fail_when` and the break combinators
//!
//! # Examples
//!
//! ```
//! use outcome_rail::traits::Railway;
//! use outcome_rail::{Detail, Entry, Outcome};
//!
//! let outcome = Outcome::fail_with(Detail::error().with_title("fake"))
//!     .fail_when_with(true, None, true)
//!     .finish();
//!
//! let prev = outcome.detail().map(|d| d.more_data()[0].clone());
//! assert!(matches!(prev, Some(Entry::PrevDetail(Some(_)))));
//! ```

pub mod condition;
pub mod railway;

pub use condition::{Computed, Condition, Literal, Verdict};
pub use railway::{Railway, PREVIOUS_FAILED};
