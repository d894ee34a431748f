use crate::types::break_signal::BreakSignal;
use crate::types::outcome::Outcome;

/// State of a chain between two combinators.
///
/// A chain is either still running on an [`Outcome`] (success or failure) or
/// broken by a [`BreakSignal`]. `Broken` is terminal: every combinator passes
/// it through untouched until the boundary unwraps it.
///
/// # Examples
///
/// ```
/// use outcome_rail::{Outcome, Railway};
///
/// let rail = Outcome::ok_value(1)
///     .break_rails(true)
///     .on_success(|| 2);
///
/// assert!(rail.is_broken());
/// assert_eq!(rail.finish(), Outcome::ok_value(1));
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Rail {
    /// The chain continues with this outcome.
    Running(Outcome),
    /// The chain was interrupted; the signal's outcome is final.
    Broken(BreakSignal),
}

impl Rail {
    /// Breaks the chain with `outcome`.
    #[inline]
    pub fn broken(outcome: Outcome) -> Self {
        Rail::Broken(BreakSignal::new(outcome))
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        matches!(self, Rail::Broken(_))
    }

    /// The outcome the chain currently holds, whether running or broken.
    #[inline]
    pub fn outcome(&self) -> &Outcome {
        match self {
            Rail::Running(outcome) => outcome,
            Rail::Broken(signal) => signal.outcome(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.outcome().is_success()
    }

    /// Ends the chain, unwrapping a break signal as the effective result.
    #[inline]
    pub fn finish(self) -> Outcome {
        match self {
            Rail::Running(outcome) => outcome,
            Rail::Broken(signal) => signal.into_outcome(),
        }
    }

    /// Ends the chain, surfacing a break as `Err` for callers that need to
    /// tell the two exits apart.
    #[inline]
    pub fn into_result(self) -> Result<Outcome, BreakSignal> {
        match self {
            Rail::Running(outcome) => Ok(outcome),
            Rail::Broken(signal) => Err(signal),
        }
    }
}

impl From<Outcome> for Rail {
    #[inline]
    fn from(outcome: Outcome) -> Self {
        Rail::Running(outcome)
    }
}

impl From<BreakSignal> for Rail {
    #[inline]
    fn from(signal: BreakSignal) -> Self {
        Rail::Broken(signal)
    }
}

impl From<Rail> for Outcome {
    #[inline]
    fn from(rail: Rail) -> Self {
        rail.finish()
    }
}
