//! Shared handle over a captured runtime error.
//!
//! [`Exception`] is what an operation "raises" when it returns `Err(e)`. It is
//! cheap to clone so the same failure can sit in `more_data` and in the
//! `exception` field of an aggregated detail at the same time.

use core::fmt;
use std::error::Error as StdError;
use std::sync::Arc;

/// A captured error raised by user code during invocation.
///
/// Any `std::error::Error + Send + Sync + 'static` converts into an
/// `Exception` through `From`, so `?` works inside operations that return
/// `Result<_, Exception>`.
///
/// Two exceptions compare equal when they share the same concrete error type
/// and render the same message.
///
/// # Examples
///
/// ```
/// use outcome_rail::Exception;
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// let exception = Exception::from(io);
///
/// assert_eq!(exception.to_string(), "disk full");
/// assert!(exception.downcast_ref::<std::io::Error>().is_some());
/// ```
#[derive(Clone)]
pub struct Exception {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
    type_name: &'static str,
}

impl Exception {
    /// Wraps a concrete error.
    #[inline]
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self { inner: Arc::new(error), type_name: core::any::type_name::<E>() }
    }

    /// Creates an exception from a plain message.
    #[inline]
    pub fn msg<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self::new(MessageError(message.into()))
    }

    /// Returns the fully qualified type name of the wrapped error.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Attempts to view the wrapped error as `E`.
    #[inline]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Returns `true` when the wrapped error is an `E`.
    #[inline]
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.is::<E>()
    }

    /// Returns `true` when both handles point at the very same error instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrows the wrapped error as a trait object.
    #[inline]
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }
}

impl<E> From<E> for Exception
where
    E: StdError + Send + Sync + 'static,
{
    #[inline]
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exception")
            .field("type", &self.type_name)
            .field("message", &self.inner.to_string())
            .finish()
    }
}

impl PartialEq for Exception {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.type_name == other.type_name
                && self.inner.to_string() == other.inner.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Exception {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Exception {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let message = <String as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::msg(message))
    }
}

/// Error carrying nothing but a message, backing [`Exception::msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageError(pub String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}
