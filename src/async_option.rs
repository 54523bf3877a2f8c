//! An optional pending computation.
//!
//! [`AsyncOption<T>`] either holds a [`Pending<T>`] (`AsyncSome`) or knows
//! right away that there is nothing to compute (`None`). Awaiting it yields an
//! [`Option<T>`]; the `None` branch resolves immediately and never schedules
//! any work.
//!
//! Mapping a pending value does not run the mapper eagerly. The mapper is
//! attached as a continuation of the pending computation, running after it
//! completes and at most once, however many times the result is awaited.
//!
//! # Example
//!
//! ```rust
//! use puremonads::AsyncOption;
//!
//! # tokio_test::block_on(async {
//! let user_id = AsyncOption::some(async { 7_u32 });
//! let profile = user_id.map(|id| format!("profile-{}", id));
//!
//! assert_eq!(profile.await, Some("profile-7".to_string()));
//! assert_eq!(AsyncOption::<u32>::none().await, None);
//! # });
//! ```

use std::fmt;
use std::future::{self, Future, IntoFuture, Ready};

use futures::future::{Either as EitherFuture, FutureExt, Map};

use crate::failure::ASYNC_OPTION_IS_NONE;
use crate::{Continuation, Failure, Pending, Result};

/// A pending computation of a `T`, or nothing at all.
///
/// Two `AsyncOption`s are equal when both are `None` or both hold the same
/// pending computation. Resolved values are never compared.
pub struct AsyncOption<T> {
    pending: Option<Pending<T>>,
}

impl<T> AsyncOption<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap a future producing the value.
    pub fn some<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_pending(Pending::new(future))
    }

    /// Wrap an existing pending computation, keeping its identity.
    pub fn from_pending(pending: Pending<T>) -> Self {
        AsyncOption {
            pending: Some(pending),
        }
    }

    /// An already-resolved `AsyncSome`.
    pub fn ready(value: T) -> Self {
        Self::from_pending(Pending::ready(value))
    }

    /// The empty option.
    pub fn none() -> Self {
        AsyncOption { pending: None }
    }

    /// Returns `true` if there is a pending value.
    pub fn is_some(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns `true` if there is nothing to compute.
    pub fn is_none(&self) -> bool {
        self.pending.is_none()
    }

    /// Total case analysis over the unresolved state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::AsyncOption;
    ///
    /// let described = AsyncOption::ready(1).fold(|_| "pending", || "nothing");
    /// assert_eq!(described, "pending");
    /// ```
    pub fn fold<R, S, N>(self, on_some: S, on_none: N) -> R
    where
        S: FnOnce(Pending<T>) -> R,
        N: FnOnce() -> R,
    {
        match self.pending {
            Some(pending) => on_some(pending),
            None => on_none(),
        }
    }

    /// Map the value once it is available.
    ///
    /// The continuation runs inline, on whichever task resolves the result.
    pub fn map<U, F>(self, f: F) -> AsyncOption<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.map_on(&Continuation::Inline, f)
    }

    /// Map the value once it is available, running `f` under `continuation`.
    pub fn map_on<U, F>(self, continuation: &Continuation, f: F) -> AsyncOption<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        AsyncOption {
            pending: self.pending.map(|source| continuation.map(source, f)),
        }
    }

    /// Map the value with an async function once it is available.
    pub fn map_async<U, F, Fut>(self, f: F) -> AsyncOption<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        self.map_async_on(&Continuation::Inline, f)
    }

    /// Map the value with an async function under `continuation`.
    pub fn map_async_on<U, F, Fut>(self, continuation: &Continuation, f: F) -> AsyncOption<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        AsyncOption {
            pending: self.pending.map(|source| continuation.then(source, f)),
        }
    }

    /// Await the value and chain into another `AsyncOption`.
    ///
    /// # Panics
    ///
    /// Re-raises the failure of a faulted pending computation, like awaiting
    /// it directly.
    pub async fn flat_map_async<U, F>(self, f: F) -> AsyncOption<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOption<U>,
    {
        match self.await {
            Some(value) => f(value),
            None => AsyncOption::none(),
        }
    }

    /// This option if it holds a value, else `alternative`.
    pub fn or(self, alternative: AsyncOption<T>) -> AsyncOption<T> {
        if self.is_some() {
            self
        } else {
            alternative
        }
    }

    /// This option if it holds a value, else the one built by `alternative`.
    ///
    /// `alternative` is not called when there is a value.
    pub fn or_else<F>(self, alternative: F) -> AsyncOption<T>
    where
        F: FnOnce() -> AsyncOption<T>,
    {
        if self.is_some() {
            self
        } else {
            alternative()
        }
    }

    /// The pending value, or an already-resolved `alternative`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::AsyncOption;
    ///
    /// # tokio_test::block_on(async {
    /// let retries = AsyncOption::<u8>::none().or_value_async(3);
    /// assert_eq!(retries.await, 3);
    /// # });
    /// ```
    pub fn or_value_async(self, alternative: T) -> Pending<T> {
        self.or_else_pending(|| Pending::ready(alternative))
    }

    /// The pending value, or one computed by `alternative` when `None`.
    pub fn or_else_value_async<F>(self, alternative: F) -> Pending<T>
    where
        F: FnOnce() -> T,
    {
        self.or_else_pending(|| Pending::ready(alternative()))
    }

    /// The pending value, or the `alternative` computation.
    pub fn or_pending(self, alternative: Pending<T>) -> Pending<T> {
        self.pending.unwrap_or(alternative)
    }

    /// The pending value, or the computation built by `alternative`.
    pub fn or_else_pending<F>(self, alternative: F) -> Pending<T>
    where
        F: FnOnce() -> Pending<T>,
    {
        self.pending.unwrap_or_else(alternative)
    }

    /// Await the value, failing with the default message when `None`.
    pub async fn value_or_failure_async(self) -> Result<T> {
        self.value_or_failure_async_with(ASYNC_OPTION_IS_NONE).await
    }

    /// Await the value, failing with `message` when `None`.
    ///
    /// A faulted pending computation yields its failure, flattened.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::AsyncOption;
    ///
    /// # tokio_test::block_on(async {
    /// let session = AsyncOption::<String>::none();
    /// let failure = session.value_or_failure_async_with("no session").await.unwrap_err();
    /// assert_eq!(failure.message(), "no session");
    /// # });
    /// ```
    pub async fn value_or_failure_async_with(self, message: impl Into<String>) -> Result<T> {
        match self.pending {
            Some(pending) => pending.as_result_async().await,
            None => Err(Failure::msg(message)),
        }
    }

    /// Await the value and run the handler matching the outcome.
    pub async fn on_async<S, N, SFut, NFut>(self, on_some: S, on_none: N)
    where
        S: FnOnce(T) -> SFut,
        N: FnOnce() -> NFut,
        SFut: Future<Output = ()>,
        NFut: Future<Output = ()>,
    {
        match self.await {
            Some(value) => on_some(value).await,
            None => on_none().await,
        }
    }

    /// Await the value and run `f` on it, if any.
    pub async fn on_some_async<F, Fut>(self, f: F)
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let Some(value) = self.await {
            f(value).await;
        }
    }

    /// Run `f` when there is nothing to compute.
    pub async fn on_none_async<F, Fut>(self, f: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        if self.await.is_none() {
            f().await;
        }
    }
}

type ResolveSome<T> = Map<<Pending<T> as IntoFuture>::IntoFuture, fn(T) -> Option<T>>;

/// Awaiting an `AsyncOption<T>` yields an `Option<T>`.
///
/// # Panics
///
/// Re-raises the failure of a faulted pending computation.
impl<T> IntoFuture for AsyncOption<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Option<T>;
    type IntoFuture = EitherFuture<ResolveSome<T>, Ready<Option<T>>>;

    fn into_future(self) -> Self::IntoFuture {
        match self.pending {
            Some(pending) => {
                EitherFuture::Left(pending.into_future().map(Some as fn(T) -> Option<T>))
            }
            None => EitherFuture::Right(future::ready(None)),
        }
    }
}

impl<T> Clone for AsyncOption<T> {
    fn clone(&self) -> Self {
        AsyncOption {
            pending: self.pending.clone(),
        }
    }
}

impl<T> Default for AsyncOption<T> {
    fn default() -> Self {
        AsyncOption { pending: None }
    }
}

impl<T> From<Pending<T>> for AsyncOption<T> {
    fn from(pending: Pending<T>) -> Self {
        AsyncOption {
            pending: Some(pending),
        }
    }
}

impl<T> From<Option<Pending<T>>> for AsyncOption<T> {
    fn from(pending: Option<Pending<T>>) -> Self {
        AsyncOption { pending }
    }
}

impl<T> PartialEq for AsyncOption<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        match (&self.pending, &other.pending) {
            (Some(first), Some(second)) => first.ptr_eq(second),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Eq for AsyncOption<T> where T: Clone + Send + Sync + 'static {}

impl<T> fmt::Display for AsyncOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pending {
            Some(_) => write!(f, "AsyncSome"),
            None => write!(f, "None"),
        }
    }
}

impl<T> fmt::Debug for AsyncOption<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pending {
            Some(pending) => f.debug_tuple("AsyncSome").field(pending).finish(),
            None => write!(f, "None"),
        }
    }
}
