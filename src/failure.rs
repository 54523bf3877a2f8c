//! The catch-all failure object
//!
//! [`Failure`] is the error half of the exception-flavoured [`Result<T>`](crate::Result)
//! and [`AsyncResult<T>`](crate::AsyncResult). It is the seam where unstructured
//! failures (panics, arbitrary `std::error::Error` values, faulted pending
//! computations) enter the structured world.
//!
//! # Examples
//!
//! ```
//! use puremonads::Failure;
//!
//! let failure = Failure::msg("connection refused");
//! assert_eq!(failure.message(), "connection refused");
//!
//! // Equality is identity, like comparing exception references
//! let same = failure.clone();
//! assert_eq!(failure, same);
//! assert_ne!(failure, Failure::msg("connection refused"));
//! ```
//!
//! ## Aggregates
//!
//! ```
//! use puremonads::Failure;
//!
//! let inner = Failure::msg("disk full");
//! let nested = Failure::aggregate([Failure::aggregate([inner.clone()])]);
//!
//! // A single underlying failure is surfaced on its own
//! assert!(Failure::ptr_eq(&nested.flatten(), &inner));
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Default message used when `value_or_failure` is called on a `None` option.
pub const OPTION_IS_NONE: &str = "Option is None.";

/// Default message used when `value_or_failure_async` is called on a `None` async option.
pub const ASYNC_OPTION_IS_NONE: &str = "AsyncOption is None.";

const NON_STRING_PANIC: &str = "panicked with a non-string payload";

/// A caught, opaque failure.
///
/// `Failure` is cheap to clone: clones share the same underlying failure and
/// compare equal to each other. Two independently created failures are never
/// equal, even when their messages match.
///
/// # Examples
///
/// ```
/// use puremonads::Failure;
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
/// let failure = Failure::new(io);
///
/// assert_eq!(failure.message(), "config.toml");
/// assert!(failure.downcast_ref::<std::io::Error>().is_some());
/// ```
#[derive(Clone)]
pub struct Failure {
    repr: Arc<Repr>,
}

enum Repr {
    Message(String),
    Panic(String),
    Error(Box<dyn StdError + Send + Sync>),
    Aggregate(Vec<Failure>),
}

impl Failure {
    /// Wrap an arbitrary error value.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_repr(Repr::Error(Box::new(error)))
    }

    /// Create a failure carrying only a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use puremonads::Failure;
    ///
    /// let failure = Failure::msg("Option is None.");
    /// assert_eq!(failure.to_string(), "Option is None.");
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Self::from_repr(Repr::Message(message.into()))
    }

    /// Bundle several failures into one composite failure.
    ///
    /// The composite is kept as given; call [`Failure::flatten`] to collapse
    /// nesting.
    pub fn aggregate<I>(failures: I) -> Self
    where
        I: IntoIterator<Item = Failure>,
    {
        Self::from_repr(Repr::Aggregate(failures.into_iter().collect()))
    }

    /// Convert a panic payload into a failure.
    ///
    /// A payload that already is a `Failure` (raised with
    /// [`std::panic::panic_any`]) is returned unchanged, keeping its identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use puremonads::Failure;
    ///
    /// let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
    /// let failure = Failure::from_panic(payload);
    ///
    /// assert!(failure.is_panic());
    /// assert_eq!(failure.message(), "boom");
    /// ```
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Failure>() {
            Ok(failure) => return *failure,
            Err(payload) => payload,
        };
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_string(),
                None => NON_STRING_PANIC.to_string(),
            },
        };
        Self::from_repr(Repr::Panic(message))
    }

    fn from_repr(repr: Repr) -> Self {
        Failure {
            repr: Arc::new(repr),
        }
    }

    /// Returns `true` if both handles point to the same failure.
    #[inline]
    pub fn ptr_eq(this: &Failure, other: &Failure) -> bool {
        Arc::ptr_eq(&this.repr, &other.repr)
    }

    /// Returns `true` if this failure was captured from a panic.
    pub fn is_panic(&self) -> bool {
        matches!(*self.repr, Repr::Panic(_))
    }

    /// Returns `true` if this failure bundles other failures.
    pub fn is_aggregate(&self) -> bool {
        matches!(*self.repr, Repr::Aggregate(_))
    }

    /// The failures bundled by an aggregate; empty for any other failure.
    pub fn failures(&self) -> &[Failure] {
        match &*self.repr {
            Repr::Aggregate(failures) => failures,
            _ => &[],
        }
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Collapse nested aggregates.
    ///
    /// Non-aggregate failures are returned unchanged. For an aggregate, the
    /// leaves of every nested aggregate are collected: a single leaf is
    /// surfaced on its own, any other count is re-bundled into a new, flat
    /// aggregate.
    ///
    /// # Examples
    ///
    /// ```
    /// use puremonads::Failure;
    ///
    /// let a = Failure::msg("a");
    /// let b = Failure::msg("b");
    /// let nested = Failure::aggregate([a.clone(), Failure::aggregate([b.clone()])]);
    ///
    /// let flat = nested.flatten();
    /// assert!(flat.is_aggregate());
    /// assert_eq!(flat.failures(), &[a, b]);
    /// ```
    pub fn flatten(self) -> Failure {
        if !self.is_aggregate() {
            return self;
        }

        let mut leaves = Vec::new();
        collect_leaves(&self, &mut leaves);

        #[cfg(feature = "tracing")]
        tracing::debug!(inner = leaves.len(), "flattened aggregate failure");

        if leaves.len() == 1 {
            leaves.remove(0)
        } else {
            Failure::aggregate(leaves)
        }
    }

    /// Attempt to view the wrapped error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        match &*self.repr {
            Repr::Error(error) => error.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// The wrapped `std::error::Error`, if this failure was built from one.
    pub fn as_std_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match &*self.repr {
            Repr::Error(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

fn collect_leaves(failure: &Failure, leaves: &mut Vec<Failure>) {
    match &*failure.repr {
        Repr::Aggregate(failures) => {
            for inner in failures {
                collect_leaves(inner, leaves);
            }
        }
        _ => leaves.push(failure.clone()),
    }
}

impl<E> From<E> for Failure
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Failure::new(error)
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        Failure::ptr_eq(self, other)
    }
}

impl Eq for Failure {}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.repr {
            Repr::Message(message) | Repr::Panic(message) => f.write_str(message),
            Repr::Error(error) => write!(f, "{}", error),
            Repr::Aggregate(failures) => {
                write!(f, "{} failures", failures.len())?;
                for (index, failure) in failures.iter().enumerate() {
                    let sep = if index == 0 { ": " } else { "; " };
                    write!(f, "{}{}", sep, failure)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.repr {
            Repr::Message(message) => f.debug_tuple("Failure").field(message).finish(),
            Repr::Panic(message) => f.debug_tuple("Panic").field(message).finish(),
            Repr::Error(error) => f.debug_tuple("Failure").field(error).finish(),
            Repr::Aggregate(failures) => f.debug_tuple("Aggregate").field(failures).finish(),
        }
    }
}
