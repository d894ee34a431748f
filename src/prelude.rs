//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use outcome_rail::prelude::*;
//!
//! let outcome = Outcome::ok()
//!     .on_success(retry(3, || 5))
//!     .fail_when(false)
//!     .finish();
//!
//! assert_eq!(outcome, Outcome::ok_value(5));
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`fail!`], [`rail_break!`]
//! - **Types**: [`Outcome`], [`Detail`], [`Entry`], [`Exception`], [`Rail`]
//! - **Traits**: [`Railway`]
//! - **Functions**: [`guard`], [`retry`], [`try_func`]

// Macros
pub use crate::{fail, rail_break};

// Core types
pub use crate::types::{Detail, Entry, Exception, Outcome, Rail};

// Traits
pub use crate::traits::Railway;

// Functions
pub use crate::boundary::guard;
pub use crate::invoke::{retry, try_func};

pub use serde_json::Value;
