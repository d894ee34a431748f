#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Crate-wide defaults for retries and status codes.
///
/// Combinators default to a single attempt; a `RailConfig` lets an
/// application pick its own defaults once and build [`Retry`](crate::Retry)
/// wrappers and status lookups from it.
///
/// # Examples
///
/// ```
/// use outcome_rail::{Outcome, RailConfig};
///
/// let config = RailConfig::new().with_attempts(3).with_default_codes(204, 503);
///
/// assert_eq!(config.attempts, 3);
/// assert_eq!(Outcome::ok().status_code_for(&config), 204);
/// assert_eq!(Outcome::fail().status_code_for(&config), 503);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RailConfig {
    /// Attempts per retried operation. Zero is treated as one.
    pub attempts: u32,
    /// Retry only raised exceptions, returning failed outcomes as-is.
    pub try_only_on_exceptions: bool,
    /// Status code reported for successes without a detail code.
    pub default_ok_code: u32,
    /// Status code reported for failures without a detail code.
    pub default_err_code: u32,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            attempts: 1,
            try_only_on_exceptions: true,
            default_ok_code: 200,
            default_err_code: 500,
        }
    }
}

impl RailConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    #[inline]
    pub fn with_try_only_on_exceptions(mut self, enabled: bool) -> Self {
        self.try_only_on_exceptions = enabled;
        self
    }

    #[inline]
    pub fn with_default_codes(mut self, ok: u32, err: u32) -> Self {
        self.default_ok_code = ok;
        self.default_err_code = err;
        self
    }

    /// Attempts clamped to at least one.
    #[inline]
    pub fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }
}
