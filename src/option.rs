//! Match-first extensions for [`Option`].
//!
//! `std::option::Option` already is the tagged union this crate wants, and it
//! already provides `map`, `and_then`, `unwrap_or`, `unwrap_or_else`, `or` and
//! `or_else` with exactly the right laziness. [`OptionExt`] adds total case
//! analysis through [`fold`](OptionExt::fold) and the bridges into
//! [`AsyncOption`], plus a few hooks and the "value or failure" extraction.
//!
//! # Example
//!
//! ```rust
//! use puremonads::OptionExt;
//!
//! let greeting = Some("world").fold(|name| format!("hello {}", name), || "nobody".to_string());
//! assert_eq!(greeting, "hello world");
//!
//! let missing: Option<&str> = None;
//! assert_eq!(missing.value_or_failure().unwrap_err().message(), "Option is None.");
//! ```

use std::future::{self, Future, Ready};

use futures::future::Either as EitherFuture;

use crate::failure::OPTION_IS_NONE;
use crate::{AsyncOption, Failure, Result};

/// Convert a nullable payload into an option.
///
/// An absent payload becomes `None` and a present one `Some`, never a nested
/// `Some(None)`.
///
/// # Example
///
/// ```rust
/// use puremonads::option::from_nullable;
///
/// let header: Option<&str> = None;
/// assert_eq!(from_nullable(Some(5)), Some(5));
/// assert_eq!(from_nullable(header), None);
/// ```
pub fn from_nullable<T>(value: Option<T>) -> Option<T> {
    value
}

/// Extension methods for [`Option`].
pub trait OptionExt<T>: Sized {
    /// Total case analysis: `on_some` for `Some`, `on_none` for `None`.
    ///
    /// Exactly one of the two handlers runs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::OptionExt;
    ///
    /// assert_eq!(Some(3).fold(|n| n * 2, || 0), 6);
    /// assert_eq!(None::<i32>.fold(|n| n * 2, || 0), 0);
    /// ```
    fn fold<R, S, N>(self, on_some: S, on_none: N) -> R
    where
        S: FnOnce(T) -> R,
        N: FnOnce() -> R;

    /// Run the handler matching the branch and return the option unchanged.
    fn on<S, N>(self, on_some: S, on_none: N) -> Self
    where
        S: FnOnce(&T),
        N: FnOnce();

    /// Run `f` on the value if present and return the option unchanged.
    fn on_some<F>(self, f: F) -> Self
    where
        F: FnOnce(&T);

    /// Run `f` if the option is `None` and return the option unchanged.
    fn on_none<F>(self, f: F) -> Self
    where
        F: FnOnce();

    /// The value, or a failure with the default message when `None`.
    fn value_or_failure(self) -> Result<T>;

    /// The value, or a failure carrying `message` when `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::OptionExt;
    ///
    /// let port: Option<u16> = None;
    /// let failure = port.value_or_failure_with("port is not configured").unwrap_err();
    /// assert_eq!(failure.message(), "port is not configured");
    /// ```
    fn value_or_failure_with(self, message: impl Into<String>) -> Result<T>;

    /// The value, or the failure built by `failure` when `None`.
    ///
    /// `failure` is only invoked on the `None` branch, and its result is
    /// surfaced unchanged.
    fn value_or_else_failure<F>(self, failure: F) -> Result<T>
    where
        F: FnOnce() -> Failure;

    /// Chain into a future producing an option.
    ///
    /// `f` is called right away on `Some`; `None` resolves to `None` without
    /// calling it.
    fn and_then_async<U, F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<Option<U>>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Option<U>>;

    /// Chain into an [`AsyncOption`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::{AsyncOption, OptionExt};
    ///
    /// # tokio_test::block_on(async {
    /// let lookup = Some(7).and_then_async_option(|id| AsyncOption::some(async move { id * 100 }));
    /// assert_eq!(lookup.await, Some(700));
    /// # });
    /// ```
    fn and_then_async_option<U, F>(self, f: F) -> AsyncOption<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOption<U>;

    /// Run the async handler matching the branch.
    fn on_async<S, N, SFut, NFut>(self, on_some: S, on_none: N) -> EitherFuture<SFut, NFut>
    where
        S: FnOnce(T) -> SFut,
        N: FnOnce() -> NFut,
        SFut: Future<Output = ()>,
        NFut: Future<Output = ()>;

    /// Run `f` on the value if present.
    fn on_some_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>;

    /// Run `f` if the option is `None`.
    fn on_none_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>;

    /// Lift into an already-resolved [`AsyncOption`].
    fn into_async(self) -> AsyncOption<T>
    where
        T: Clone + Send + Sync + 'static;
}

impl<T> OptionExt<T> for Option<T> {
    fn fold<R, S, N>(self, on_some: S, on_none: N) -> R
    where
        S: FnOnce(T) -> R,
        N: FnOnce() -> R,
    {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }

    fn on<S, N>(self, on_some: S, on_none: N) -> Self
    where
        S: FnOnce(&T),
        N: FnOnce(),
    {
        match &self {
            Some(value) => on_some(value),
            None => on_none(),
        }
        self
    }

    fn on_some<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Some(value) = &self {
            f(value);
        }
        self
    }

    fn on_none<F>(self, f: F) -> Self
    where
        F: FnOnce(),
    {
        if self.is_none() {
            f();
        }
        self
    }

    fn value_or_failure(self) -> Result<T> {
        self.value_or_failure_with(OPTION_IS_NONE)
    }

    fn value_or_failure_with(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| Failure::msg(message))
    }

    fn value_or_else_failure<F>(self, failure: F) -> Result<T>
    where
        F: FnOnce() -> Failure,
    {
        self.ok_or_else(failure)
    }

    fn and_then_async<U, F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<Option<U>>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Option<U>>,
    {
        match self {
            Some(value) => EitherFuture::Left(f(value)),
            None => EitherFuture::Right(future::ready(None)),
        }
    }

    fn and_then_async_option<U, F>(self, f: F) -> AsyncOption<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOption<U>,
    {
        self.map_or_else(AsyncOption::none, f)
    }

    fn on_async<S, N, SFut, NFut>(self, on_some: S, on_none: N) -> EitherFuture<SFut, NFut>
    where
        S: FnOnce(T) -> SFut,
        N: FnOnce() -> NFut,
        SFut: Future<Output = ()>,
        NFut: Future<Output = ()>,
    {
        match self {
            Some(value) => EitherFuture::Left(on_some(value)),
            None => EitherFuture::Right(on_none()),
        }
    }

    fn on_some_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.on_async(f, || future::ready(()))
    }

    fn on_none_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        match self {
            Some(_) => EitherFuture::Right(future::ready(())),
            None => EitherFuture::Left(f()),
        }
    }

    fn into_async(self) -> AsyncOption<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.map_or_else(AsyncOption::none, AsyncOption::ready)
    }
}
