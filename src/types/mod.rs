//! Data model of a chain: outcomes, details, exceptions and break signals.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{Detail, Entry, Outcome};
//! use serde_json::json;
//!
//! let outcome = Outcome::fail_with(
//!     Detail::bad_request()
//!         .with_message("missing field")
//!         .with_more_data([Entry::data(json!({"field": "email"}))]),
//! );
//!
//! assert_eq!(outcome.status_code(), 400);
//! assert_eq!(outcome.detail().map(|d| d.more_data().len()), Some(1));
//! ```
use smallvec::SmallVec;

pub mod break_signal;
pub mod config;
pub mod detail;
pub mod exception;
pub mod outcome;
pub mod rail;

pub use break_signal::*;
pub use config::*;
pub use detail::*;
pub use exception::*;
pub use outcome::*;
pub use rail::*;

/// SmallVec-backed collection of failure records gathered across attempts.
///
/// Inline storage covers the common one- and two-attempt cases.
pub type Records = SmallVec<[Entry; 2]>;
