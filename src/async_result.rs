//! A pending computation, or an error known up front.
//!
//! [`AsyncResult<T, E>`] holds either a [`Pending<T>`] or an `E`. The error
//! branch needs no awaiting: [`AsyncResult::is_error`] answers synchronously,
//! and awaiting an error resolves immediately to `Err`.
//!
//! With the default `E = Failure` this is the async counterpart of
//! [`crate::Result<T>`]. [`AsyncResult::as_result_async`] then folds a faulted
//! pending computation into the error branch instead of re-raising it.
//!
//! # Example
//!
//! ```rust
//! use puremonads::AsyncResult;
//!
//! # tokio_test::block_on(async {
//! let total: AsyncResult<u32, String> = AsyncResult::value(async { 40 });
//! let total = total.map(|n| n + 2);
//! assert_eq!(total.await, Ok(42));
//!
//! let rejected: AsyncResult<u32, String> = AsyncResult::error("quota exceeded".into());
//! assert!(rejected.is_error());
//! assert_eq!(rejected.await, Err("quota exceeded".to_string()));
//! # });
//! ```

use std::fmt;
use std::future::{self, Future, IntoFuture, Ready};

use futures::future::{Either as EitherFuture, FutureExt, Map};

use crate::{AsyncOption, Continuation, Failure, Pending};

/// A pending computation of a `T`, or an already-known error.
///
/// Equality compares the pending computation by identity and the error by
/// value.
pub struct AsyncResult<T, E = Failure> {
    inner: Result<Pending<T>, E>,
}

impl<T, E> AsyncResult<T, E>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap a future producing the value.
    pub fn value<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_pending(Pending::new(future))
    }

    /// Wrap an existing pending computation, keeping its identity.
    pub fn from_pending(pending: Pending<T>) -> Self {
        AsyncResult { inner: Ok(pending) }
    }

    /// An already-resolved value.
    pub fn ready(value: T) -> Self {
        Self::from_pending(Pending::ready(value))
    }

    /// A known error.
    pub fn error(error: E) -> Self {
        AsyncResult { inner: Err(error) }
    }

    /// Returns `true` if there is a pending value.
    pub fn is_value(&self) -> bool {
        self.inner.is_ok()
    }

    /// Returns `true` if the error is already known.
    pub fn is_error(&self) -> bool {
        self.inner.is_err()
    }

    /// Total case analysis over the unresolved state.
    pub fn fold<R, V, X>(self, on_value: V, on_error: X) -> R
    where
        V: FnOnce(Pending<T>) -> R,
        X: FnOnce(E) -> R,
    {
        match self.inner {
            Ok(pending) => on_value(pending),
            Err(error) => on_error(error),
        }
    }

    /// Map the value once it is available.
    ///
    /// The error branch passes through untouched and `f` is never called for
    /// it.
    pub fn map<U, F>(self, f: F) -> AsyncResult<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.map_on(&Continuation::Inline, f)
    }

    /// Map the value once it is available, running `f` under `continuation`.
    pub fn map_on<U, F>(self, continuation: &Continuation, f: F) -> AsyncResult<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        AsyncResult {
            inner: self.inner.map(|source| continuation.map(source, f)),
        }
    }

    /// Map the value with an async function once it is available.
    pub fn map_async<U, F, Fut>(self, f: F) -> AsyncResult<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        self.map_async_on(&Continuation::Inline, f)
    }

    /// Map the value with an async function under `continuation`.
    pub fn map_async_on<U, F, Fut>(self, continuation: &Continuation, f: F) -> AsyncResult<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        AsyncResult {
            inner: self.inner.map(|source| continuation.then(source, f)),
        }
    }

    /// Map the known error.
    pub fn map_error<E2, F>(self, f: F) -> AsyncResult<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        AsyncResult {
            inner: self.inner.map_err(f),
        }
    }

    /// Await the value and chain into another `AsyncResult`.
    ///
    /// # Panics
    ///
    /// Re-raises the failure of a faulted pending computation, like awaiting
    /// it directly.
    pub async fn flat_map_async<U, F>(self, f: F) -> AsyncResult<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncResult<U, E>,
    {
        match self.inner {
            Ok(pending) => f(pending.await),
            Err(error) => AsyncResult::error(error),
        }
    }

    /// The pending value as an [`AsyncOption`]; `None` for the error branch.
    ///
    /// The pending computation keeps its identity.
    pub fn value_async(self) -> AsyncOption<T> {
        self.inner.ok().into()
    }

    /// The known error as an [`AsyncOption`]; `None` for the value branch.
    pub fn error_async(self) -> AsyncOption<E>
    where
        E: Clone + Send + Sync + 'static,
    {
        match self.inner {
            Ok(_) => AsyncOption::none(),
            Err(error) => AsyncOption::ready(error),
        }
    }

    /// Run `f` on the known error, if any, and return `self` unchanged.
    pub fn on_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Err(error) = &self.inner {
            f(error);
        }
        self
    }

    /// Await the value and run the handler matching the outcome.
    pub async fn on_async<V, X, VFut, XFut>(self, on_value: V, on_error: X)
    where
        V: FnOnce(T) -> VFut,
        X: FnOnce(E) -> XFut,
        VFut: Future<Output = ()>,
        XFut: Future<Output = ()>,
    {
        match self.inner {
            Ok(pending) => on_value(pending.await).await,
            Err(error) => on_error(error).await,
        }
    }

    /// Await the value and run `f` on it; nothing happens for an error.
    pub async fn on_value_async<F, Fut>(self, f: F)
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let Ok(pending) = self.inner {
            f(pending.await).await;
        }
    }

    /// Run `f` on the known error; a pending value is not awaited.
    pub async fn on_error_async<F, Fut>(self, f: F)
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let Err(error) = self.inner {
            f(error).await;
        }
    }

    /// Await without raising.
    ///
    /// A faulted pending computation ends up in the error branch, with
    /// aggregate failures flattened.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::{AsyncResult, Failure, Pending};
    ///
    /// # tokio_test::block_on(async {
    /// let cause = Failure::msg("disk full");
    /// let write = AsyncResult::<u64>::from_pending(Pending::fail(Failure::aggregate([cause.clone()])));
    ///
    /// assert_eq!(write.as_result_async().await, Err(cause));
    /// # });
    /// ```
    pub async fn as_result_async(self) -> Result<T, E>
    where
        E: From<Failure>,
    {
        match self.inner {
            Ok(pending) => pending.as_result_async().await.map_err(E::from),
            Err(error) => Err(error),
        }
    }
}

type ResolveValue<T, E> = Map<<Pending<T> as IntoFuture>::IntoFuture, fn(T) -> Result<T, E>>;

/// Awaiting an `AsyncResult<T, E>` yields a `Result<T, E>`.
///
/// # Panics
///
/// Re-raises the failure of a faulted pending computation. Use
/// [`AsyncResult::as_result_async`] to receive it as an error instead.
impl<T, E> IntoFuture for AsyncResult<T, E>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Result<T, E>;
    type IntoFuture = EitherFuture<ResolveValue<T, E>, Ready<Result<T, E>>>;

    fn into_future(self) -> Self::IntoFuture {
        match self.inner {
            Ok(pending) => {
                EitherFuture::Left(pending.into_future().map(Ok as fn(T) -> Result<T, E>))
            }
            Err(error) => EitherFuture::Right(future::ready(Err(error))),
        }
    }
}

impl<T, E: Clone> Clone for AsyncResult<T, E> {
    fn clone(&self) -> Self {
        AsyncResult {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> From<Pending<T>> for AsyncResult<T, E> {
    fn from(pending: Pending<T>) -> Self {
        AsyncResult { inner: Ok(pending) }
    }
}

impl<T> From<Failure> for AsyncResult<T, Failure> {
    fn from(failure: Failure) -> Self {
        AsyncResult { inner: Err(failure) }
    }
}

impl<T, E> PartialEq for AsyncResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Ok(first), Ok(second)) => first.ptr_eq(second),
            (Err(first), Err(second)) => first == second,
            _ => false,
        }
    }
}

impl<T, E> Eq for AsyncResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Eq,
{
}

impl<T, E: fmt::Display> fmt::Display for AsyncResult<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(_) => write!(f, "AsyncValue"),
            Err(error) => write!(f, "Error({})", error),
        }
    }
}

impl<T, E> fmt::Debug for AsyncResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(pending) => f.debug_tuple("AsyncValue").field(pending).finish(),
            Err(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;
    use crate::{assert_error, assert_none, assert_some, assert_value};

    #[derive(Debug, Clone, PartialEq)]
    enum FetchError {
        NotFound,
        Timeout(u32),
    }

    impl From<Failure> for FetchError {
        fn from(_: Failure) -> Self {
            FetchError::Timeout(0)
        }
    }

    impl fmt::Display for FetchError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                FetchError::NotFound => write!(f, "not found"),
                FetchError::Timeout(ms) => write!(f, "timed out after {}ms", ms),
            }
        }
    }

    #[tokio::test]
    async fn test_value_resolves() {
        let result: AsyncResult<i32, FetchError> = AsyncResult::value(async { 5 });
        assert_value!(result.await, 5);
    }

    #[test]
    fn test_error_resolves_without_runtime() {
        let result: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::NotFound);
        assert!(result.is_error());

        let resolved = futures::executor::block_on(result.into_future());
        assert_error!(resolved, FetchError::NotFound);
    }

    #[tokio::test]
    async fn test_map_skips_error() {
        let calls = CallCounter::new();
        let counted = calls.clone();

        let result: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::NotFound);
        let mapped = result.map(move |n| {
            counted.hit();
            n + 1
        });

        assert_error!(mapped.await, FetchError::NotFound);
        assert_eq!(calls.count(), 0);
    }

    #[tokio::test]
    async fn test_map_is_deferred_and_runs_once() {
        let calls = CallCounter::new();
        let counted = calls.clone();

        let mapped: AsyncResult<String, FetchError> =
            AsyncResult::ready(3).map(move |n: i32| {
                counted.hit();
                n.to_string()
            });

        assert_eq!(calls.count(), 0);
        assert_value!(mapped.clone().await, "3".to_string());
        assert_value!(mapped.await, "3".to_string());
        assert_eq!(calls.count(), 1);
    }

    #[tokio::test]
    async fn test_map_async_and_map_error() {
        let result: AsyncResult<i32, FetchError> = AsyncResult::ready(2);
        assert_value!(result.map_async(|n| async move { n * 4 }).await, 8);

        let failed: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::Timeout(30));
        let described = failed.map_error(|e| e.to_string());
        assert_error!(described.await, "timed out after 30ms".to_string());
    }

    #[tokio::test]
    async fn test_flat_map_async() {
        let result: AsyncResult<i32, FetchError> = AsyncResult::ready(10);
        let chained = result
            .flat_map_async(|n| AsyncResult::value(async move { n + 1 }))
            .await;
        assert_value!(chained.await, 11);

        let failed: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::NotFound);
        let chained = failed
            .flat_map_async(|_| -> AsyncResult<i32, FetchError> { panic!("not called") })
            .await;
        assert_eq!(chained, AsyncResult::error(FetchError::NotFound));
    }

    #[tokio::test]
    async fn test_projections() {
        let pending = Pending::ready(1);
        let result: AsyncResult<i32, FetchError> = AsyncResult::from_pending(pending.clone());

        assert_eq!(result.clone().value_async(), AsyncOption::from_pending(pending));
        assert!(result.error_async().is_none());

        let failed: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::NotFound);
        assert!(failed.clone().value_async().is_none());
        assert_some!(failed.error_async().await, FetchError::NotFound);
    }

    #[tokio::test]
    async fn test_as_result_async_catches_fault() {
        let a = Failure::msg("a");
        let b = Failure::msg("b");
        let result = AsyncResult::<i32>::from_pending(Pending::fail(Failure::aggregate([
            a.clone(),
            Failure::aggregate([b.clone()]),
        ])));

        let failure = result.as_result_async().await.unwrap_err();
        assert!(failure.is_aggregate());
        assert_eq!(failure.failures(), &[a, b]);
    }

    #[tokio::test]
    async fn test_as_result_async_typed_error() {
        let result: AsyncResult<i32, FetchError> =
            AsyncResult::from_pending(Pending::new(async { panic!("socket reset") }));
        assert_error!(result.as_result_async().await, FetchError::Timeout(0));

        let failed: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::NotFound);
        assert_error!(failed.as_result_async().await, FetchError::NotFound);
    }

    #[tokio::test]
    async fn test_handlers() {
        let calls = CallCounter::new();

        let failed: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::NotFound);
        let failed = failed.on_error(|e| {
            assert_eq!(e, &FetchError::NotFound);
            calls.hit();
        });
        failed.clone().on_error_async(|_| async { calls.hit() }).await;
        failed.clone().on_value_async(|_| async { panic!("not a value") }).await;
        failed
            .on_async(|_| async { panic!("not a value") }, |_| async { calls.hit() })
            .await;

        let ok: AsyncResult<i32, FetchError> = AsyncResult::ready(1);
        ok.clone().on_value_async(|_| async { calls.hit() }).await;
        ok.on_error_async(|_| async { panic!("not an error") }).await;

        assert_eq!(calls.count(), 4);
    }

    #[test]
    fn test_identity_equality() {
        let first: AsyncResult<i32, FetchError> = AsyncResult::ready(1);
        let second: AsyncResult<i32, FetchError> = AsyncResult::ready(1);

        assert_ne!(first, second);
        assert_eq!(first, first.clone());
        assert_eq!(
            AsyncResult::<i32, FetchError>::error(FetchError::NotFound),
            AsyncResult::error(FetchError::NotFound)
        );
        assert_ne!(first, AsyncResult::error(FetchError::NotFound));
    }

    #[test]
    fn test_conversions() {
        let failure = Failure::msg("refused");
        let result: AsyncResult<i32> = failure.clone().into();
        assert_eq!(result, AsyncResult::error(failure));

        let pending = Pending::ready(1);
        let result: AsyncResult<i32> = pending.clone().into();
        assert_eq!(result.value_async(), AsyncOption::from_pending(pending));
        assert_none!(futures::executor::block_on(
            AsyncResult::<i32>::error(Failure::msg("x")).value_async().into_future()
        ));
    }

    #[test]
    fn test_display() {
        let ok: AsyncResult<i32, FetchError> = AsyncResult::ready(1);
        let failed: AsyncResult<i32, FetchError> = AsyncResult::error(FetchError::Timeout(5));

        assert_eq!(ok.to_string(), "AsyncValue");
        assert_eq!(failed.to_string(), "Error(timed out after 5ms)");
        assert_eq!(format!("{:?}", failed), "Error(Timeout(5))");
    }
}
