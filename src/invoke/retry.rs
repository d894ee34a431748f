//! Multi-attempt execution of operations.
//!
//! [`execute`] calls an operation up to `attempts` times. Raised exceptions
//! are always retried; failed outcomes are retried only when the policy says
//! so. When every attempt fails, one aggregated `ErrorDetail` describes all of
//! them (see [`aggregate_failure`]).

use std::borrow::Cow;

use tracing::{debug, trace, warn};

use crate::invoke::operation::Operation;
use crate::invoke::step::Step;
use crate::types::{BreakSignal, Detail, Entry, Outcome, RailConfig, Records};

/// How many times an operation is tried and what counts as retryable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Attempts before giving up. Zero is treated as one.
    pub attempts: u32,
    /// When set, a returned failure ends the loop immediately and is handed
    /// back unchanged; only raised exceptions are retried.
    pub try_only_on_exceptions: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self { attempts: 1, try_only_on_exceptions: true }
    }
}

impl Policy {
    #[inline]
    pub fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }
}

impl From<&RailConfig> for Policy {
    fn from(config: &RailConfig) -> Self {
        Self { attempts: config.attempts, try_only_on_exceptions: config.try_only_on_exceptions }
    }
}

/// Wraps an operation with a retry [`Policy`].
///
/// # Examples
///
/// ```
/// use outcome_rail::{retry, Exception, Outcome, Railway};
///
/// let outcome = Outcome::ok()
///     .on_success(retry(2, || Err::<(), _>(Exception::msg("fake"))))
///     .finish();
///
/// let detail = outcome.detail().unwrap();
/// assert_eq!(detail.title(), "An error occurred");
/// assert_eq!(detail.more_data().len(), 2);
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct Retry<F> {
    op: F,
    policy: Policy,
}

/// Shorthand for `Retry::new(op).attempts(attempts)`.
#[inline]
pub fn retry<F>(attempts: u32, op: F) -> Retry<F> {
    Retry::new(op).attempts(attempts)
}

impl<F> Retry<F> {
    #[inline]
    pub fn new(op: F) -> Self {
        Self { op, policy: Policy::default() }
    }

    /// Builds the wrapper from application-wide defaults.
    #[inline]
    pub fn from_config(config: &RailConfig, op: F) -> Self {
        Self { op, policy: Policy::from(config) }
    }

    #[inline]
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.policy.attempts = attempts;
        self
    }

    /// Chooses whether returned failures are retried (`false`) or handed back
    /// as-is (`true`, the default).
    #[inline]
    pub fn try_only_on_exceptions(mut self, enabled: bool) -> Self {
        self.policy.try_only_on_exceptions = enabled;
        self
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    #[inline]
    pub fn into_inner(self) -> F {
        self.op
    }
}

impl<M, F> Operation<M> for Retry<F>
where
    F: Operation<M>,
{
    #[inline]
    fn arity(&self) -> usize {
        self.op.arity()
    }

    #[inline]
    fn invoke(&mut self, previous: Option<&Outcome>) -> Step {
        self.op.invoke(previous)
    }

    #[inline]
    fn name(&self) -> Cow<'static, str> {
        self.op.name()
    }

    #[inline]
    fn policy(&self) -> Policy {
        self.policy
    }
}

/// What the retry executor concluded.
#[derive(Debug, Clone, PartialEq)]
pub enum Executed {
    /// The operation returned nothing; keep the incoming outcome.
    Keep,
    /// The operation produced a successful outcome.
    Success(Outcome),
    /// The operation failed: a returned failure or the aggregate of all
    /// failed attempts.
    Failure(Outcome),
    /// The operation could not be invoked. Never swallowed by `ignore_errors`.
    Rejected(Detail),
    /// The operation broke the chain.
    Break(BreakSignal),
}

impl Executed {
    /// Resolves against the incoming outcome the way `on_success`/`on_fail` do.
    #[inline]
    pub fn resolve(self, current: Outcome) -> crate::Rail {
        match self {
            Executed::Keep => crate::Rail::Running(current),
            Executed::Success(outcome) | Executed::Failure(outcome) => {
                crate::Rail::Running(outcome)
            },
            Executed::Rejected(detail) => crate::Rail::Running(Outcome::fail_with(detail)),
            Executed::Break(signal) => crate::Rail::Broken(signal),
        }
    }
}

/// Runs `op` according to its policy against the previous outcome.
pub fn execute<M, O>(op: &mut O, previous: Option<&Outcome>) -> Executed
where
    O: Operation<M> + ?Sized,
{
    let name = op.name();
    let mut attempts = Attempts::new(op.policy());
    while attempts.start() {
        if let Some(done) = attempts.observe(&name, op.invoke(previous)) {
            return done;
        }
    }
    attempts.finish(&name)
}

/// Attempt bookkeeping shared by the sync and async executors.
pub(crate) struct Attempts {
    policy: Policy,
    attempt: u32,
    records: Records,
}

impl Attempts {
    #[inline]
    pub(crate) fn new(policy: Policy) -> Self {
        Self { policy, attempt: 0, records: Records::new() }
    }

    /// Begins the next attempt; `false` once every attempt is used.
    #[inline]
    pub(crate) fn start(&mut self) -> bool {
        if self.attempt >= self.policy.effective_attempts() {
            return false;
        }
        self.attempt += 1;
        true
    }

    /// Records one attempt. `Some` ends the loop with that result.
    pub(crate) fn observe(&mut self, name: &str, step: Step) -> Option<Executed> {
        let (attempt, attempts) = (self.attempt, self.policy.effective_attempts());
        let outcome = match step {
            Step::Keep => return Some(Executed::Keep),
            Step::Value(value) => return Some(Executed::Success(Outcome::ok_value(value))),
            Step::Break(signal) => {
                trace!(operation = name, attempt, "operation broke the chain");
                return Some(Executed::Break(signal));
            },
            Step::Invalid(detail) => {
                debug!(operation = name, "operation could not be invoked");
                return Some(Executed::Rejected(*detail));
            },
            Step::Raised(exception) => {
                debug!(operation = name, attempt, attempts, error = %exception, "attempt raised");
                self.records.push(Entry::Exception(exception));
                return None;
            },
            Step::Outcome(outcome) => outcome,
            Step::Detail(detail) => Outcome::from_detail(*detail),
        };

        if outcome.is_success() {
            return Some(Executed::Success(outcome));
        }
        if self.policy.try_only_on_exceptions {
            return Some(Executed::Failure(outcome));
        }

        debug!(operation = name, attempt, attempts, "attempt returned a failure");
        if let Some(detail) = outcome.into_detail() {
            self.records.push(Entry::Detail(Box::new(detail)));
        }
        None
    }

    /// Aggregates the recorded failures once every attempt failed.
    pub(crate) fn finish(self, name: &str) -> Executed {
        let attempts = self.policy.effective_attempts();
        warn!(operation = name, attempts, failures = self.records.len(), "all attempts failed");
        Executed::Failure(Outcome::fail_with(aggregate_failure(attempts, self.records)))
    }
}

/// Builds the single `ErrorDetail` describing a run where every attempt
/// failed.
///
/// `more_data` receives every record in order and `exception` the first
/// raised exception, if any.
///
/// ```
/// use outcome_rail::invoke::aggregate_failure;
///
/// let detail = aggregate_failure(2, []);
/// assert_eq!(detail.message(), Some("Operation failed with 2 attempts. There is no more information."));
/// ```
pub fn aggregate_failure<I>(attempts: u32, records: I) -> Detail
where
    I: IntoIterator<Item = Entry>,
{
    let records: Vec<Entry> = records.into_iter().collect();
    let first_exception = records.iter().find_map(Entry::as_exception).cloned();

    let mut message = format!("Operation failed with {} attempts. ", attempts);
    if records.is_empty() {
        message.push_str("There is no more information.");
    } else {
        message.push_str(&format!(
            "The details of the {} errors are stored in the more_data field. ",
            records.len()
        ));
        if first_exception.is_some() {
            message.push_str(
                "At least one of the errors was an exception type, the first exception being \
                 stored in the exception field.",
            );
        }
    }

    let detail = Detail::error().with_message(message).with_more_data(records);
    match first_exception {
        Some(exception) => detail.with_exception(exception),
        None => detail,
    }
}
