use core::fmt;

use crate::types::outcome::Outcome;

/// Interrupt that short-circuits the rest of a chain.
///
/// A signal carries exactly one terminal [`Outcome`]. Combinators never
/// inspect or rewrite it: a [`Rail`](crate::Rail) holding a signal skips
/// every later stage, and only the boundary ([`Rail::finish`](crate::Rail::finish),
/// [`guard`](crate::guard)) unwraps it as the chain's effective result.
///
/// # Examples
///
/// ```
/// use outcome_rail::{BreakSignal, Outcome, Rail, Railway};
///
/// let rail = Rail::from(BreakSignal::new(Outcome::ok_value(5)))
///     .on_success(|| 10);
///
/// assert!(rail.is_broken());
/// assert_eq!(rail.finish(), Outcome::ok_value(5));
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct BreakSignal {
    outcome: Outcome,
}

impl BreakSignal {
    #[inline]
    pub fn new(outcome: Outcome) -> Self {
        Self { outcome }
    }

    /// The outcome that becomes the chain's final result.
    #[inline]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[inline]
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

impl fmt::Display for BreakSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain broken with outcome:\n{}", self.outcome)
    }
}

impl std::error::Error for BreakSignal {}

impl From<Outcome> for BreakSignal {
    #[inline]
    fn from(outcome: Outcome) -> Self {
        Self::new(outcome)
    }
}
