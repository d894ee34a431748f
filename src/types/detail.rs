//! Diagnostic and payload metadata attached to an [`Outcome`](crate::Outcome).
//!
//! A [`Detail`] is a single record type tagged with a [`DetailKind`]. The kind
//! decides which family the detail belongs to (success or error), the name
//! reported in type-mismatch diagnostics, and the default title and code.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{Detail, Polarity};
//!
//! let detail = Detail::not_found().with_message("user 42 does not exist");
//!
//! assert_eq!(detail.title(), "NotFound Error");
//! assert_eq!(detail.code(), Some(404));
//! assert_eq!(detail.polarity(), Polarity::Error);
//! assert_eq!(
//!     detail.to_string(),
//!     "Title: NotFound Error\nMessage: user 42 does not exist\nCode: 404\n"
//! );
//! ```

use core::fmt;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::exception::Exception;

/// The family a detail belongs to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Success-flavored details (`SuccessDetail` and friends).
    Success,
    /// Error-flavored details (`ErrorDetail` and friends).
    Error,
}

impl Polarity {
    /// Name of the base detail type of this family.
    #[inline]
    pub const fn base_name(self) -> &'static str {
        match self {
            Polarity::Success => "SuccessDetail",
            Polarity::Error => "ErrorDetail",
        }
    }
}

/// A consumer-defined detail kind.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomKind {
    name: Cow<'static, str>,
    polarity: Polarity,
    title: Cow<'static, str>,
    code: Option<u32>,
}

impl CustomKind {
    /// Declares a custom kind with its family, default title and default code.
    pub fn new<N, T>(name: N, polarity: Polarity, title: T, code: Option<u32>) -> Self
    where
        N: Into<Cow<'static, str>>,
        T: Into<Cow<'static, str>>,
    {
        Self { name: name.into(), polarity, title: title.into(), code }
    }
}

/// Tag identifying the concrete detail type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DetailKind {
    Success,
    Created,
    PartialContent,
    NotModified,
    Warning,
    Error,
    Exception,
    Validation,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Custom(CustomKind),
}

impl DetailKind {
    /// Returns the family this kind belongs to.
    pub fn polarity(&self) -> Polarity {
        match self {
            DetailKind::Success
            | DetailKind::Created
            | DetailKind::PartialContent
            | DetailKind::NotModified
            | DetailKind::Warning => Polarity::Success,
            DetailKind::Error
            | DetailKind::Exception
            | DetailKind::Validation
            | DetailKind::BadRequest
            | DetailKind::Unauthorized
            | DetailKind::Forbidden
            | DetailKind::NotFound
            | DetailKind::Conflict => Polarity::Error,
            DetailKind::Custom(custom) => custom.polarity,
        }
    }

    /// Type name used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            DetailKind::Success => "SuccessDetail",
            DetailKind::Created => "CreatedDetail",
            DetailKind::PartialContent => "PartialContentDetail",
            DetailKind::NotModified => "NotModifiedDetail",
            DetailKind::Warning => "WarningDetail",
            DetailKind::Error => "ErrorDetail",
            DetailKind::Exception => "ExceptionError",
            DetailKind::Validation => "ValidationError",
            DetailKind::BadRequest => "BadRequestError",
            DetailKind::Unauthorized => "UnauthorizedError",
            DetailKind::Forbidden => "ForbiddenError",
            DetailKind::NotFound => "NotFoundError",
            DetailKind::Conflict => "ConflictError",
            DetailKind::Custom(custom) => &custom.name,
        }
    }

    /// Title a fresh detail of this kind starts with.
    pub fn default_title(&self) -> &str {
        match self {
            DetailKind::Success => "Operation was successful",
            DetailKind::Created => "A new resource has been created",
            DetailKind::PartialContent => "Partial content",
            DetailKind::NotModified => "The resource has not been modified since the last request",
            DetailKind::Warning => {
                "The operation was completed successfully, but there is a warning."
            },
            DetailKind::Error => "An error occurred",
            DetailKind::Exception => "An exception occurred",
            DetailKind::Validation => "One or more validation errors occurred",
            DetailKind::BadRequest => "BadRequest Error",
            DetailKind::Unauthorized => "Unauthorized Error",
            DetailKind::Forbidden => "Forbidden Error",
            DetailKind::NotFound => "NotFound Error",
            DetailKind::Conflict => "Conflict Error",
            DetailKind::Custom(custom) => &custom.title,
        }
    }

    /// Code a fresh detail of this kind starts with.
    pub fn default_code(&self) -> Option<u32> {
        match self {
            DetailKind::Success | DetailKind::Warning => Some(200),
            DetailKind::Created => Some(201),
            DetailKind::PartialContent => Some(206),
            DetailKind::NotModified => Some(304),
            DetailKind::Error | DetailKind::Exception => Some(500),
            DetailKind::Validation | DetailKind::BadRequest => Some(400),
            DetailKind::Unauthorized => Some(401),
            DetailKind::Forbidden => Some(403),
            DetailKind::NotFound => Some(404),
            DetailKind::Conflict => Some(409),
            DetailKind::Custom(custom) => custom.code,
        }
    }
}

/// One element of a detail's `more_data` sequence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Arbitrary payload data.
    Data(Value),
    /// A failure detail, recorded by the retry executor.
    Detail(Box<Detail>),
    /// A raised exception, recorded by the retry executor.
    Exception(Exception),
    /// The `{"prev_detail": ..}` record appended by `fail_when`.
    PrevDetail(Option<Box<Detail>>),
}

impl Entry {
    /// Builds a data entry from anything convertible into a JSON value.
    #[inline]
    pub fn data<V: Into<Value>>(value: V) -> Self {
        Entry::Data(value.into())
    }

    /// Returns the exception held by this entry, if any.
    #[inline]
    pub fn as_exception(&self) -> Option<&Exception> {
        match self {
            Entry::Exception(exception) => Some(exception),
            _ => None,
        }
    }

    /// Returns the payload held by this entry, if any.
    #[inline]
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Entry::Data(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for Entry {
    #[inline]
    fn from(value: Value) -> Self {
        Entry::Data(value)
    }
}

impl From<Detail> for Entry {
    #[inline]
    fn from(detail: Detail) -> Self {
        Entry::Detail(Box::new(detail))
    }
}

impl From<Exception> for Entry {
    #[inline]
    fn from(exception: Exception) -> Self {
        Entry::Exception(exception)
    }
}

/// Structured diagnostic or payload metadata.
///
/// Error-family details additionally record `errors`, an optional
/// [`Exception`] and a stack trace captured when the detail is built,
/// whatever `RUST_BACKTRACE` says. Platforms without backtrace support leave
/// it empty. The stack trace does not take part in equality.
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Detail {
    kind: DetailKind,
    title: String,
    message: Option<String>,
    code: Option<u32>,
    more_data: Vec<Entry>,
    errors: Option<BTreeMap<String, String>>,
    exception: Option<Exception>,
    #[cfg_attr(feature = "serde", serde(skip))]
    stack_trace: Option<Arc<str>>,
}

fn capture_stack_trace() -> Option<Arc<str>> {
    let backtrace = Backtrace::force_capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(Arc::from(backtrace.to_string())),
        _ => None,
    }
}

impl Detail {
    /// Creates a detail of `kind` with the kind's default title and code.
    pub fn new(kind: DetailKind) -> Self {
        let stack_trace = match kind.polarity() {
            Polarity::Error => capture_stack_trace(),
            Polarity::Success => None,
        };
        Self {
            title: kind.default_title().to_owned(),
            code: kind.default_code(),
            kind,
            message: None,
            more_data: Vec::new(),
            errors: None,
            exception: None,
            stack_trace,
        }
    }

    /// `SuccessDetail`: "Operation was successful", 200.
    #[inline]
    pub fn success() -> Self {
        Self::new(DetailKind::Success)
    }

    /// `CreatedDetail`: 201.
    #[inline]
    pub fn created() -> Self {
        Self::new(DetailKind::Created)
    }

    /// `PartialContentDetail`: 206.
    #[inline]
    pub fn partial_content() -> Self {
        Self::new(DetailKind::PartialContent)
    }

    /// `NotModifiedDetail`: 304.
    #[inline]
    pub fn not_modified() -> Self {
        Self::new(DetailKind::NotModified)
    }

    /// `WarningDetail` with the given warning message.
    #[inline]
    pub fn warning<M: Into<String>>(message: M) -> Self {
        Self::new(DetailKind::Warning).with_message(message)
    }

    /// `ErrorDetail`: "An error occurred", 500.
    #[inline]
    pub fn error() -> Self {
        Self::new(DetailKind::Error)
    }

    /// `ExceptionError` wrapping `exception`; the message defaults to the
    /// exception's own message.
    pub fn from_exception<E: Into<Exception>>(exception: E) -> Self {
        let exception = exception.into();
        let message = exception.to_string();
        Self::new(DetailKind::Exception).with_message(message).with_exception(exception)
    }

    /// `ValidationError`: "One or more validation errors occurred", 400.
    #[inline]
    pub fn validation() -> Self {
        Self::new(DetailKind::Validation)
    }

    /// `BadRequestError`: 400.
    #[inline]
    pub fn bad_request() -> Self {
        Self::new(DetailKind::BadRequest)
    }

    /// `UnauthorizedError`: 401.
    #[inline]
    pub fn unauthorized() -> Self {
        Self::new(DetailKind::Unauthorized)
    }

    /// `ForbiddenError`: 403.
    #[inline]
    pub fn forbidden() -> Self {
        Self::new(DetailKind::Forbidden)
    }

    /// `NotFoundError`: 404.
    #[inline]
    pub fn not_found() -> Self {
        Self::new(DetailKind::NotFound)
    }

    /// `ConflictError`: 409.
    #[inline]
    pub fn conflict() -> Self {
        Self::new(DetailKind::Conflict)
    }

    /// A detail of a consumer-defined kind.
    #[inline]
    pub fn custom(kind: CustomKind) -> Self {
        Self::new(DetailKind::Custom(kind))
    }

    /// Overrides the title.
    #[inline]
    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the message.
    #[inline]
    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets (or overrides) the code.
    #[inline]
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    /// Clears the code so status lookups fall back to their defaults.
    #[inline]
    pub fn without_code(mut self) -> Self {
        self.code = None;
        self
    }

    /// Appends entries to `more_data`.
    #[inline]
    pub fn with_more_data<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        self.more_data.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Sets the field errors, replacing any previous ones.
    pub fn with_errors<I, K, V>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.errors = Some(errors.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Attaches the exception that caused this detail.
    #[inline]
    pub fn with_exception<E: Into<Exception>>(mut self, exception: E) -> Self {
        self.exception = Some(exception.into());
        self
    }

    /// Inserts or overwrites one entry of `errors`.
    pub fn add_or_update_error<K, V>(&mut self, key: K, message: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.errors.get_or_insert_with(BTreeMap::new).insert(key.into(), message.into());
    }

    /// Appends one entry to `more_data`.
    #[inline]
    pub fn push_more_data<E: Into<Entry>>(&mut self, entry: E) {
        self.more_data.push(entry.into());
    }

    #[inline]
    pub fn kind(&self) -> &DetailKind {
        &self.kind
    }

    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.kind.polarity()
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.polarity() == Polarity::Success
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    #[inline]
    pub fn more_data(&self) -> &[Entry] {
        &self.more_data
    }

    #[inline]
    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        self.errors.as_ref()
    }

    #[inline]
    pub fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    /// Stack trace captured at construction (error family only).
    #[inline]
    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }
}

impl PartialEq for Detail {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.title == other.title
            && self.message == other.message
            && self.code == other.code
            && self.more_data == other.more_data
            && self.errors == other.errors
            && self.exception == other.exception
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        if let Some(message) = &self.message {
            writeln!(f, "Message: {}", message)?;
        }
        if let Some(code) = self.code {
            writeln!(f, "Code: {}", code)?;
        }
        if let Some(errors) = &self.errors {
            writeln!(f, "Errors: {:?}", errors)?;
        }
        if let Some(exception) = &self.exception {
            writeln!(f, "Exception: {}", exception)?;
        }
        Ok(())
    }
}

impl StdError for Detail {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.exception.as_ref().map(|e| e.as_error() as &(dyn StdError + 'static))
    }
}
