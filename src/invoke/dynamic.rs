//! Runtime-described callables.
//!
//! Closures pick their calling convention at compile time. A [`DynFn`] is the
//! escape hatch for callables only known at runtime (plugin tables, scripted
//! steps, FFI shims): it declares how many positional parameters it takes and
//! which arguments were supplied up front, and dispatch follows the arity
//! rules below.
//!
//! | declared arity       | call                                   |
//! |----------------------|----------------------------------------|
//! | 0                    | no arguments                           |
//! | = supplied           | the supplied arguments                 |
//! | = supplied + 1       | the carried value, then the supplied   |
//! | anything else        | `ValidationError` naming the callable  |
//! | unknown              | "Function Parameter Detection" error   |

use std::borrow::Cow;

use serde_json::Value;
use smallvec::SmallVec;

use crate::invoke::operation::{cannot_execute, Dynamic, Operation};
use crate::invoke::step::{IntoStep, Step};
use crate::types::{CustomKind, Detail, Outcome, Polarity};

/// Declared parameter count of a [`DynFn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Known(usize),
    /// The parameter list cannot be introspected.
    Unknown,
}

type Body<'a> = Box<dyn FnMut(&[Value]) -> Step + 'a>;

/// A callable taking positional JSON arguments.
///
/// # Examples
///
/// ```
/// use outcome_rail::invoke::DynFn;
/// use outcome_rail::{Outcome, Railway};
/// use serde_json::{json, Value};
///
/// let add = DynFn::new("add", 2, |args: &[Value]| {
///     args[0].as_i64().unwrap_or(0) + args[1].as_i64().unwrap_or(0)
/// })
/// .with_args([json!(3)]);
///
/// // Two parameters, one supplied: the carried value goes first.
/// let outcome = Outcome::ok_value(4).on_success(add).finish();
/// assert_eq!(outcome, Outcome::ok_value(7));
/// ```
pub struct DynFn<'a> {
    name: Cow<'static, str>,
    arity: Arity,
    args: SmallVec<[Value; 2]>,
    body: Body<'a>,
}

impl<'a> DynFn<'a> {
    /// A callable declaring `params` positional parameters.
    pub fn new<N, F, R>(name: N, params: usize, mut body: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: FnMut(&[Value]) -> R + 'a,
        R: IntoStep,
    {
        Self {
            name: name.into(),
            arity: Arity::Known(params),
            args: SmallVec::new(),
            body: Box::new(move |args| body(args).into_step()),
        }
    }

    /// A callable whose parameter list is unknown. Invoking it always fails.
    pub fn opaque<N, F, R>(name: N, mut body: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: FnMut(&[Value]) -> R + 'a,
        R: IntoStep,
    {
        Self {
            name: name.into(),
            arity: Arity::Unknown,
            args: SmallVec::new(),
            body: Box::new(move |args| body(args).into_step()),
        }
    }

    /// Supplies positional arguments.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[inline]
    pub fn declared_arity(&self) -> Arity {
        self.arity
    }

    #[inline]
    pub fn supplied(&self) -> &[Value] {
        &self.args
    }

    fn too_many_parameters(&self, params: usize) -> Detail {
        Detail::validation().with_message(format!(
            "{}() takes {} positional arguments but {} were given",
            self.name,
            params,
            self.args.len()
        ))
    }

    fn undetectable(&self) -> Detail {
        Detail::custom(parameter_detection_kind())
            .with_message(format!("The parameters of {}() can not be detected.", self.name))
    }
}

/// Kind of the error reported for callables without an inspectable arity.
pub fn parameter_detection_kind() -> CustomKind {
    CustomKind::new(
        "FunctionParameterDetectionError",
        Polarity::Error,
        "Function Parameter Detection",
        Some(500),
    )
}

impl Operation<Dynamic> for DynFn<'_> {
    fn arity(&self) -> usize {
        match self.arity {
            Arity::Known(params) => params,
            Arity::Unknown => 0,
        }
    }

    fn invoke(&mut self, previous: Option<&Outcome>) -> Step {
        let params = match self.arity {
            Arity::Known(params) => params,
            Arity::Unknown => return Step::Invalid(Box::new(self.undetectable())),
        };
        let supplied = self.args.len();

        if params == 0 {
            (self.body)(&[])
        } else if params == supplied {
            (self.body)(&self.args)
        } else if params == supplied + 1 {
            let Some(outcome) = previous else {
                return Step::Invalid(Box::new(cannot_execute(&self.name, params)));
            };
            let mut args: SmallVec<[Value; 3]> = SmallVec::with_capacity(params);
            args.push(outcome.value().cloned().unwrap_or(Value::Null));
            args.extend(self.args.iter().cloned());
            (self.body)(&args)
        } else {
            Step::Invalid(Box::new(self.too_many_parameters(params)))
        }
    }

    fn name(&self) -> Cow<'static, str> {
        self.name.clone()
    }
}

impl core::fmt::Debug for DynFn<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynFn")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
