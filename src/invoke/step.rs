//! Normalization of whatever a user operation returns.

use serde_json::{Map, Value};

use crate::types::{BreakSignal, Detail, Exception, Outcome, Rail};

/// The normalized result of calling an operation once.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The operation returned nothing; the incoming outcome is preserved.
    Keep,
    /// A bare value, promoted to `ok(value)`.
    Value(Value),
    /// An outcome that replaces the incoming one.
    Outcome(Outcome),
    /// A detail, promoted to an outcome of the detail's family.
    Detail(Box<Detail>),
    /// The operation raised (returned `Err`).
    Raised(Exception),
    /// The operation broke the chain.
    Break(BreakSignal),
    /// The operation could not be invoked at all. Never retried.
    Invalid(Box<Detail>),
}

/// Conversion of operation return types into a [`Step`].
///
/// `()` and `None` mean "nothing to report", `Err(e)` is a raised exception,
/// outcomes, rails and details keep their meaning, and plain values become
/// the next carried value.
///
/// # Examples
///
/// ```
/// use outcome_rail::invoke::{IntoStep, Step};
/// use outcome_rail::Outcome;
///
/// assert_eq!(().into_step(), Step::Keep);
/// assert_eq!(None::<i32>.into_step(), Step::Keep);
/// assert_eq!(5.into_step(), Step::Value(5.into()));
/// assert_eq!(Outcome::fail().into_step(), Step::Outcome(Outcome::fail()));
/// ```
pub trait IntoStep {
    fn into_step(self) -> Step;
}

impl IntoStep for Step {
    #[inline]
    fn into_step(self) -> Step {
        self
    }
}

impl IntoStep for () {
    #[inline]
    fn into_step(self) -> Step {
        Step::Keep
    }
}

impl IntoStep for Outcome {
    #[inline]
    fn into_step(self) -> Step {
        Step::Outcome(self)
    }
}

impl IntoStep for Rail {
    #[inline]
    fn into_step(self) -> Step {
        match self {
            Rail::Running(outcome) => Step::Outcome(outcome),
            Rail::Broken(signal) => Step::Break(signal),
        }
    }
}

impl IntoStep for BreakSignal {
    #[inline]
    fn into_step(self) -> Step {
        Step::Break(self)
    }
}

impl IntoStep for Detail {
    #[inline]
    fn into_step(self) -> Step {
        Step::Detail(Box::new(self))
    }
}

impl IntoStep for Value {
    #[inline]
    fn into_step(self) -> Step {
        match self {
            Value::Null => Step::Keep,
            value => Step::Value(value),
        }
    }
}

impl<T: IntoStep> IntoStep for Option<T> {
    #[inline]
    fn into_step(self) -> Step {
        match self {
            Some(inner) => inner.into_step(),
            None => Step::Keep,
        }
    }
}

impl<T, E> IntoStep for Result<T, E>
where
    T: IntoStep,
    E: Into<Exception>,
{
    #[inline]
    fn into_step(self) -> Step {
        match self {
            Ok(inner) => inner.into_step(),
            Err(error) => Step::Raised(error.into()),
        }
    }
}

impl<T: Into<Value>> IntoStep for Vec<T> {
    #[inline]
    fn into_step(self) -> Step {
        Step::Value(Value::from(self))
    }
}

impl IntoStep for Map<String, Value> {
    #[inline]
    fn into_step(self) -> Step {
        Step::Value(Value::Object(self))
    }
}

impl IntoStep for &str {
    #[inline]
    fn into_step(self) -> Step {
        Step::Value(Value::from(self))
    }
}

macro_rules! impl_into_step_for_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoStep for $ty {
                #[inline]
                fn into_step(self) -> Step {
                    Step::Value(Value::from(self))
                }
            }
        )*
    };
}

impl_into_step_for_value!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String);

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays and
/// objects are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
