//! The success/failure unit threaded through a chain.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::invoke::{is_truthy, IntoStep, Step};
use crate::types::detail::Detail;

/// An immutable success/failure flag with an optional payload and detail.
///
/// `is_success` is always explicit: it is never inferred from the detail or
/// the value. The value is free to be present on failures and absent on
/// successes.
///
/// # Examples
///
/// ```
/// use outcome_rail::{Detail, Outcome};
/// use serde_json::json;
///
/// let created = Outcome::ok_value(json!({"id": 7})).with_detail(Detail::created());
/// assert!(created.is_success());
/// assert_eq!(created.status_code(), 201);
///
/// let failed = Outcome::fail();
/// assert_eq!(failed.status_code(), 500);
/// assert_eq!(failed.to_string(), "success: false\n");
/// ```
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    success: bool,
    detail: Option<Detail>,
    value: Option<Value>,
}

impl Outcome {
    /// Creates an outcome from all of its parts.
    #[inline]
    pub fn new(success: bool, detail: Option<Detail>, value: Option<Value>) -> Self {
        Self { success, detail, value }
    }

    /// A success without value or detail.
    #[inline]
    pub fn ok() -> Self {
        Self::new(true, None, None)
    }

    /// A success carrying `value`.
    #[inline]
    pub fn ok_value<V: Into<Value>>(value: V) -> Self {
        Self::new(true, None, Some(value.into()))
    }

    /// A failure without detail.
    #[inline]
    pub fn fail() -> Self {
        Self::new(false, None, None)
    }

    /// A failure described by `detail`.
    #[inline]
    pub fn fail_with(detail: Detail) -> Self {
        Self::new(false, Some(detail), None)
    }

    /// Replaces the detail.
    #[inline]
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Replaces the value.
    #[inline]
    pub fn with_value<V: Into<Value>>(mut self, value: V) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Normalizes anything an operation may return into an outcome.
    ///
    /// Outcomes pass through unchanged, "nothing" (`()` or `None`) becomes
    /// `ok()` or `fail()` depending on `none_means_success`, and any other
    /// value becomes `ok(value)`.
    ///
    /// ```
    /// use outcome_rail::Outcome;
    ///
    /// assert_eq!(Outcome::convert(5, true), Outcome::ok_value(5));
    /// assert_eq!(Outcome::convert(None::<i32>, false), Outcome::fail());
    /// assert_eq!(Outcome::convert(Outcome::fail(), true), Outcome::fail());
    /// ```
    pub fn convert<X: IntoStep>(x: X, none_means_success: bool) -> Self {
        match x.into_step() {
            Step::Keep if none_means_success => Self::ok(),
            Step::Keep => Self::fail(),
            Step::Value(value) => Self::ok_value(value),
            Step::Outcome(outcome) => outcome,
            Step::Detail(detail) => Self::from_detail(*detail),
            Step::Raised(exception) => Self::fail_with(Detail::from_exception(exception)),
            Step::Break(signal) => signal.into_outcome(),
            Step::Invalid(detail) => Self::fail_with(*detail),
        }
    }

    /// An outcome whose status follows the detail's family.
    #[inline]
    pub fn from_detail(detail: Detail) -> Self {
        Self::new(detail.is_success(), Some(detail), None)
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[inline]
    pub fn is_fail(&self) -> bool {
        !self.success
    }

    #[inline]
    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    #[inline]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns `detail.code` when present, otherwise 200 or 500 by status.
    #[inline]
    pub fn status_code(&self) -> u32 {
        self.status_code_with(200, 500)
    }

    /// Returns `detail.code` when present, otherwise the matching default.
    pub fn status_code_with(&self, default_ok: u32, default_err: u32) -> u32 {
        match self.detail.as_ref().and_then(Detail::code) {
            Some(code) => code,
            None if self.success => default_ok,
            None => default_err,
        }
    }

    /// Same as `status_code_with`, reading defaults from a [`RailConfig`](crate::RailConfig).
    #[inline]
    pub fn status_code_for(&self, config: &crate::RailConfig) -> u32 {
        self.status_code_with(config.default_ok_code, config.default_err_code)
    }

    /// Renders the outcome as `success/Value/Detail` lines.
    #[inline]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Splits the outcome into its parts.
    #[inline]
    pub fn into_parts(self) -> (bool, Option<Detail>, Option<Value>) {
        (self.success, self.detail, self.value)
    }

    #[inline]
    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    #[inline]
    pub fn into_detail(self) -> Option<Detail> {
        self.detail
    }

    /// Converts a failure into `Err(detail)`, using a default `ErrorDetail`
    /// when the failure carries none.
    ///
    /// ```
    /// use outcome_rail::{Detail, Outcome};
    ///
    /// let err = Outcome::fail_with(Detail::not_found()).into_result().unwrap_err();
    /// assert_eq!(err.code(), Some(404));
    /// assert_eq!(Outcome::ok_value(1).into_result().unwrap(), Some(1.into()));
    /// ```
    pub fn into_result(self) -> Result<Option<Value>, Detail> {
        if self.success {
            Ok(self.value)
        } else {
            Err(self.detail.unwrap_or_else(Detail::error))
        }
    }

    /// Mutable access used by the append-only `more_data` combinators.
    #[inline]
    pub(crate) fn detail_or_insert_with<F>(&mut self, default: F) -> &mut Detail
    where
        F: FnOnce() -> Detail,
    {
        self.detail.get_or_insert_with(default)
    }

    #[inline]
    pub(crate) fn set_detail(&mut self, detail: Option<Detail>) {
        self.detail = detail;
    }
}

impl Default for Outcome {
    #[inline]
    fn default() -> Self {
        Self::ok()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "success: {}", self.success)?;
        match &self.value {
            Some(value) if !is_truthy(value) => {},
            None => {},
            Some(Value::String(text)) => writeln!(f, "Value: {}", text)?,
            Some(value) => writeln!(f, "Value: {}", value)?,
        }
        if let Some(detail) = &self.detail {
            writeln!(f, "Detail:\n{}", detail)?;
        }
        Ok(())
    }
}

impl From<Detail> for Outcome {
    #[inline]
    fn from(detail: Detail) -> Self {
        Self::from_detail(detail)
    }
}
