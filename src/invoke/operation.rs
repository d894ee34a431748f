//! Arity-aware dispatch of user operations.
//!
//! Instead of inspecting a callable at runtime, the parameter list of a
//! closure selects one of the marker types below at compile time:
//!
//! | closure shape                       | marker                  | receives                 |
//! |-------------------------------------|-------------------------|--------------------------|
//! | `FnMut() -> R`                      | [`NoArgs`]              | nothing                  |
//! | `FnMut(&Value) -> R`                | [`WithValue`]           | the carried value        |
//! | `FnMut(&Outcome) -> R`              | [`WithOutcome`]         | the previous outcome     |
//! | `FnMut(&Value, &Outcome) -> R`      | [`WithValueAndOutcome`] | both                     |
//!
//! Closures taking a parameter need the parameter type spelled out
//! (`|v: &Value| ..`) so the compiler can pick the marker.

use core::marker::PhantomData;
use std::borrow::Cow;

use serde_json::Value;

use crate::invoke::retry::Policy;
use crate::invoke::step::{IntoStep, Step};
use crate::types::{Detail, Outcome};

/// Stand-in for an absent carried value.
static NULL: Value = Value::Null;

/// Marker: the operation takes no parameters.
#[derive(Debug, Clone, Copy)]
pub struct NoArgs;

/// Marker: the operation takes the carried value.
#[derive(Debug, Clone, Copy)]
pub struct WithValue;

/// Marker: the operation takes the previous outcome.
#[derive(Debug, Clone, Copy)]
pub struct WithOutcome;

/// Marker: the operation takes the carried value and the previous outcome.
#[derive(Debug, Clone, Copy)]
pub struct WithValueAndOutcome;

/// Marker: an optional operation (`Option<F>`).
#[derive(Debug, Clone, Copy)]
pub struct Maybe<M>(PhantomData<M>);

/// Marker: a runtime-described [`DynFn`](crate::invoke::DynFn).
#[derive(Debug, Clone, Copy)]
pub struct Dynamic;

/// A user-supplied callable the combinators know how to invoke.
///
/// `invoke` receives the previous outcome, or `None` when the operation runs
/// outside of a chain (see [`try_func`](crate::try_func)). Operations that
/// need a previous outcome report an invalid step in that case.
pub trait Operation<Marker> {
    /// Number of parameters the operation declares.
    fn arity(&self) -> usize;

    /// Calls the operation once.
    fn invoke(&mut self, previous: Option<&Outcome>) -> Step;

    /// Name used in diagnostics.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(core::any::type_name::<Self>())
    }

    /// Retry policy applied by the retry executor.
    fn policy(&self) -> Policy {
        Policy::default()
    }
}

/// Detail reported when an operation is missing or not callable.
pub fn invalid_function() -> Detail {
    Detail::validation().with_message("The input function is not valid.")
}

/// Detail reported when an operation needs arguments nobody can supply.
pub fn cannot_execute(name: &str, arity: usize) -> Detail {
    Detail::validation().with_message(format!(
        "{}() takes {} arguments. It cannot be executed.",
        name, arity
    ))
}

impl<F, R> Operation<NoArgs> for F
where
    F: FnMut() -> R,
    R: IntoStep,
{
    #[inline]
    fn arity(&self) -> usize {
        0
    }

    #[inline]
    fn invoke(&mut self, _previous: Option<&Outcome>) -> Step {
        self().into_step()
    }
}

impl<F, R> Operation<WithValue> for F
where
    F: FnMut(&Value) -> R,
    R: IntoStep,
{
    #[inline]
    fn arity(&self) -> usize {
        1
    }

    fn invoke(&mut self, previous: Option<&Outcome>) -> Step {
        match previous {
            Some(outcome) => self(outcome.value().unwrap_or(&NULL)).into_step(),
            None => {
                let name = <Self as Operation<WithValue>>::name(self);
                Step::Invalid(Box::new(cannot_execute(&name, 1)))
            },
        }
    }
}

impl<F, R> Operation<WithOutcome> for F
where
    F: FnMut(&Outcome) -> R,
    R: IntoStep,
{
    #[inline]
    fn arity(&self) -> usize {
        1
    }

    fn invoke(&mut self, previous: Option<&Outcome>) -> Step {
        match previous {
            Some(outcome) => self(outcome).into_step(),
            None => {
                let name = <Self as Operation<WithOutcome>>::name(self);
                Step::Invalid(Box::new(cannot_execute(&name, 1)))
            },
        }
    }
}

impl<F, R> Operation<WithValueAndOutcome> for F
where
    F: FnMut(&Value, &Outcome) -> R,
    R: IntoStep,
{
    #[inline]
    fn arity(&self) -> usize {
        2
    }

    fn invoke(&mut self, previous: Option<&Outcome>) -> Step {
        match previous {
            Some(outcome) => self(outcome.value().unwrap_or(&NULL), outcome).into_step(),
            None => Step::Invalid(Box::new(cannot_execute(
                &<Self as Operation<WithValueAndOutcome>>::name(self),
                2,
            ))),
        }
    }
}

impl<M, F> Operation<Maybe<M>> for Option<F>
where
    F: Operation<M>,
{
    #[inline]
    fn arity(&self) -> usize {
        self.as_ref().map_or(0, <F as Operation<M>>::arity)
    }

    fn invoke(&mut self, previous: Option<&Outcome>) -> Step {
        match self {
            Some(op) => op.invoke(previous),
            None => Step::Invalid(Box::new(invalid_function())),
        }
    }

    fn name(&self) -> Cow<'static, str> {
        self.as_ref().map_or(Cow::Borrowed("None"), <F as Operation<M>>::name)
    }

    fn policy(&self) -> Policy {
        self.as_ref().map_or_else(Policy::default, <F as Operation<M>>::policy)
    }
}
