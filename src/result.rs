//! Match-first extensions for [`Result`](std::result::Result) and the
//! failure-catching factories.
//!
//! Two flavours of result are in use throughout the crate:
//!
//! - `std::result::Result<T, E>` with an error type chosen by the caller. Its
//!   error is a plain value and is never raised.
//! - [`crate::Result<T>`], the same type with `E` fixed to [`Failure`]. This
//!   is where failures caught from arbitrary code end up.
//!
//! The factories in this module ([`from_fn`], [`try_from_fn`],
//! [`from_async`], [`try_from_async`]) are the only places the crate catches
//! panics raised by caller code. Closures passed to `map`, `and_then` and
//! friends are never guarded: a panic there propagates unchanged.
//!
//! # Example
//!
//! ```rust
//! use puremonads::{result, ResultExt};
//!
//! let parsed = result::try_from_fn(|| "42".parse::<i32>());
//! assert_eq!(parsed.fold(|n| n, |_| -1), 42);
//!
//! let crashed = result::from_fn(|| -> i32 { panic!("division by zero") });
//! assert_eq!(crashed.unwrap_err().message(), "division by zero");
//! ```

use std::future::{self, Future, Ready};
use std::panic::{self, AssertUnwindSafe};

use futures::future::{Either as EitherFuture, FutureExt};

use crate::{AsyncResult, Failure, Result};

/// Run `f` now, capturing a panic as the error.
pub fn from_fn<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    try_from_fn(|| Ok::<T, Failure>(f()))
}

/// Run a fallible `f` now.
///
/// Both an `Err` return and a panic end up in the error branch.
///
/// # Example
///
/// ```rust
/// use puremonads::result;
///
/// let outcome = result::try_from_fn(|| std::fs::read_to_string("/definitely/not/here"));
/// assert!(outcome.unwrap_err().downcast_ref::<std::io::Error>().is_some());
/// ```
pub fn try_from_fn<T, E, F>(f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: Into<Failure>,
{
    let outcome: Result<T> = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(returned) => returned.map_err(Into::into),
        Err(payload) => Err(Failure::from_panic(payload)),
    };
    log_captured(outcome)
}

/// Run an async producer, capturing a panic as the error.
///
/// A panic raised by `f` itself, before it hands back its future, is captured
/// exactly like one raised while the future is polled.
///
/// # Example
///
/// ```rust
/// use puremonads::result;
///
/// # tokio_test::block_on(async {
/// let outcome = result::from_async(|| async { 6 * 7 }).await;
/// assert_eq!(outcome, Ok(42));
/// # });
/// ```
pub async fn from_async<T, F, Fut>(f: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    try_from_async(|| f().map(Ok::<T, Failure>)).await
}

/// Run a fallible async producer.
///
/// An `Err` output, a panic while creating the future and a panic while
/// polling it all end up in the error branch.
pub async fn try_from_async<T, E, F, Fut>(f: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Into<Failure>,
{
    let future = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(future) => future,
        Err(payload) => return log_captured(Err(Failure::from_panic(payload))),
    };

    let outcome: Result<T> = match AssertUnwindSafe(future).catch_unwind().await {
        Ok(returned) => returned.map_err(Into::into),
        Err(payload) => Err(Failure::from_panic(payload)),
    };
    log_captured(outcome)
}

fn log_captured<T>(outcome: Result<T>) -> Result<T> {
    #[cfg(feature = "tracing")]
    if let Err(failure) = &outcome {
        tracing::debug!(failure = %failure, "captured failure");
    }
    outcome
}

/// Converts a raising future into one that reports failures as `Err`.
pub trait FutureFailureExt: Future + Sized {
    /// Await the future, turning a panic into a flattened [`Failure`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::FutureFailureExt;
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = async { panic!("lost connection") }.as_result_async().await;
    /// let outcome: puremonads::Result<()> = outcome;
    /// assert_eq!(outcome.unwrap_err().message(), "lost connection");
    /// # });
    /// ```
    fn as_result_async(self) -> futures::future::Map<
        futures::future::CatchUnwind<AssertUnwindSafe<Self>>,
        fn(std::thread::Result<Self::Output>) -> Result<Self::Output>,
    > {
        AssertUnwindSafe(self)
            .catch_unwind()
            .map(normalize::<Self::Output> as fn(_) -> _)
    }
}

impl<F: Future> FutureFailureExt for F {}

fn normalize<T>(caught: std::thread::Result<T>) -> Result<T> {
    caught.map_err(|payload| Failure::from_panic(payload).flatten())
}

/// Extension methods for [`Result`](std::result::Result).
pub trait ResultExt<T, E>: Sized {
    /// Total case analysis: `on_value` for `Ok`, `on_error` for `Err`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::ResultExt;
    ///
    /// let ok: Result<i32, String> = Ok(2);
    /// assert_eq!(ok.fold(|n| n.to_string(), |e| e), "2");
    /// ```
    fn fold<R, V, X>(self, on_value: V, on_error: X) -> R
    where
        V: FnOnce(T) -> R,
        X: FnOnce(E) -> R;

    /// Run the handler matching the branch and return the result unchanged.
    fn on<V, X>(self, on_value: V, on_error: X) -> Self
    where
        V: FnOnce(&T),
        X: FnOnce(&E);

    /// Run `f` on the value, if any, and return the result unchanged.
    fn on_value<F>(self, f: F) -> Self
    where
        F: FnOnce(&T);

    /// Run `f` on the error, if any, and return the result unchanged.
    fn on_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E);

    /// Chain into a future producing a result.
    ///
    /// `f` is called right away on `Ok`; an `Err` resolves to itself without
    /// calling it.
    fn and_then_async<U, F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<std::result::Result<U, E>>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>;

    /// Chain into an [`AsyncResult`].
    fn and_then_async_result<U, F>(self, f: F) -> AsyncResult<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncResult<U, E>;

    /// Run the async handler matching the branch.
    fn on_async<V, X, VFut, XFut>(self, on_value: V, on_error: X) -> EitherFuture<VFut, XFut>
    where
        V: FnOnce(T) -> VFut,
        X: FnOnce(E) -> XFut,
        VFut: Future<Output = ()>,
        XFut: Future<Output = ()>;

    /// Run `f` on the value, if any.
    fn on_value_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>;

    /// Run `f` on the error, if any.
    fn on_error_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = ()>;

    /// Lift into an already-resolved [`AsyncResult`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::ResultExt;
    ///
    /// # tokio_test::block_on(async {
    /// let lifted = Ok::<_, String>(5).into_async();
    /// assert_eq!(lifted.await, Ok(5));
    /// # });
    /// ```
    fn into_async(self) -> AsyncResult<T, E>
    where
        T: Clone + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E> {
    fn fold<R, V, X>(self, on_value: V, on_error: X) -> R
    where
        V: FnOnce(T) -> R,
        X: FnOnce(E) -> R,
    {
        match self {
            Ok(value) => on_value(value),
            Err(error) => on_error(error),
        }
    }

    fn on<V, X>(self, on_value: V, on_error: X) -> Self
    where
        V: FnOnce(&T),
        X: FnOnce(&E),
    {
        match &self {
            Ok(value) => on_value(value),
            Err(error) => on_error(error),
        }
        self
    }

    fn on_value<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Ok(value) = &self {
            f(value);
        }
        self
    }

    fn on_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Err(error) = &self {
            f(error);
        }
        self
    }

    fn and_then_async<U, F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<std::result::Result<U, E>>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
    {
        match self {
            Ok(value) => EitherFuture::Left(f(value)),
            Err(error) => EitherFuture::Right(future::ready(Err(error))),
        }
    }

    fn and_then_async_result<U, F>(self, f: F) -> AsyncResult<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncResult<U, E>,
    {
        match self {
            Ok(value) => f(value),
            Err(error) => AsyncResult::error(error),
        }
    }

    fn on_async<V, X, VFut, XFut>(self, on_value: V, on_error: X) -> EitherFuture<VFut, XFut>
    where
        V: FnOnce(T) -> VFut,
        X: FnOnce(E) -> XFut,
        VFut: Future<Output = ()>,
        XFut: Future<Output = ()>,
    {
        match self {
            Ok(value) => EitherFuture::Left(on_value(value)),
            Err(error) => EitherFuture::Right(on_error(error)),
        }
    }

    fn on_value_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.on_async(f, |_| future::ready(()))
    }

    fn on_error_async<F, Fut>(self, f: F) -> EitherFuture<Fut, Ready<()>>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = ()>,
    {
        match self {
            Ok(_) => EitherFuture::Right(future::ready(())),
            Err(error) => EitherFuture::Left(f(error)),
        }
    }

    fn into_async(self) -> AsyncResult<T, E>
    where
        T: Clone + Send + Sync + 'static,
    {
        match self {
            Ok(value) => AsyncResult::ready(value),
            Err(error) => AsyncResult::error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;
    use crate::{assert_error, assert_value};

    #[derive(Debug, Clone, PartialEq)]
    enum LoginError {
        Locked,
    }

    #[test]
    fn test_from_fn_value() {
        assert_value!(from_fn(|| 1), 1);
    }

    #[test]
    fn test_from_fn_captures_panic_identity() {
        let raised = Failure::msg("raised by caller");
        let payload = raised.clone();

        let outcome = from_fn(move || -> i32 { std::panic::panic_any(payload) });
        assert_error!(outcome, raised);
    }

    #[test]
    fn test_try_from_fn_error_return() {
        let outcome = try_from_fn(|| "nope".parse::<u8>());
        let failure = outcome.unwrap_err();
        assert!(failure.downcast_ref::<std::num::ParseIntError>().is_some());
    }

    #[tokio::test]
    async fn test_from_async_captures_panic_before_suspension() {
        let outcome = from_async(|| -> std::future::Ready<i32> { panic!("before the future exists") }).await;
        assert_eq!(outcome.unwrap_err().message(), "before the future exists");
    }

    #[tokio::test]
    async fn test_from_async_captures_panic_after_resumption() {
        let outcome = from_async(|| async {
            tokio::task::yield_now().await;
            panic!("after resuming");
        })
        .await;
        let outcome: Result<()> = outcome;
        assert_eq!(outcome.unwrap_err().message(), "after resuming");
    }

    #[tokio::test]
    async fn test_try_from_async_error_output() {
        let outcome = try_from_async(|| async { Err::<i32, _>(Failure::msg("declined")) }).await;
        assert_eq!(outcome.unwrap_err().message(), "declined");
    }

    #[tokio::test]
    async fn test_as_result_async_flattens_panic_payload() {
        let inner = Failure::msg("only cause");
        let raised = Failure::aggregate([Failure::aggregate([inner.clone()])]);

        let outcome = async move { std::panic::panic_any::<Failure>(raised) }
            .as_result_async()
            .await;
        let outcome: Result<()> = outcome;
        assert_error!(outcome, inner);
    }

    #[test]
    fn test_projections() {
        let value: std::result::Result<i32, LoginError> = Ok(4);
        assert_eq!(value.clone().ok(), Some(4));
        assert_eq!(value.err(), None);

        let error: std::result::Result<i32, LoginError> = Err(LoginError::Locked);
        assert_eq!(error.clone().ok(), None);
        assert_eq!(error.err(), Some(LoginError::Locked));
    }

    #[test]
    fn test_map_skips_error() {
        let calls = CallCounter::new();
        let error: std::result::Result<i32, LoginError> = Err(LoginError::Locked);

        let mapped = error.map(|n| {
            calls.hit();
            n + 1
        });
        assert_error!(mapped, LoginError::Locked);
        assert_eq!(calls.count(), 0);
    }

    #[test]
    fn test_on_hooks() {
        let calls = CallCounter::new();
        let value: std::result::Result<i32, LoginError> = Ok(1);

        let value = value
            .on_value(|_| calls.hit())
            .on_error(|_| panic!("not an error"))
            .on(|_| calls.hit(), |_| panic!("not an error"));

        assert_value!(value, 1);
        assert_eq!(calls.count(), 2);
    }

    #[tokio::test]
    async fn test_and_then_async_skips_error() {
        let ok: std::result::Result<i32, LoginError> = Ok(3);
        let chained = ok.and_then_async(|n| async move { Ok(n * 3) }).await;
        assert_value!(chained, 9);

        let calls = CallCounter::new();
        let err: std::result::Result<i32, LoginError> = Err(LoginError::Locked);
        let chained = err
            .and_then_async(|n| {
                calls.hit();
                async move { Ok(n * 3) }
            })
            .await;
        assert_error!(chained, LoginError::Locked);
        assert_eq!(calls.count(), 0);
    }

    #[tokio::test]
    async fn test_async_hooks() {
        let calls = CallCounter::new();
        let err: std::result::Result<i32, LoginError> = Err(LoginError::Locked);

        err.clone().on_error_async(|_| async { calls.hit() }).await;
        err.clone().on_value_async(|_| async { panic!("not a value") }).await;
        err.on_async(|_| async { panic!("not a value") }, |_| async { calls.hit() })
            .await;

        assert_eq!(calls.count(), 2);
    }

    #[tokio::test]
    async fn test_into_async_error_is_known() {
        let lifted = Err::<i32, _>(LoginError::Locked).into_async();
        assert!(lifted.is_error());
        assert_eq!(lifted.await, Err(LoginError::Locked));
    }

    #[cfg(feature = "tracing")]
    #[test]
    #[tracing_test::traced_test]
    fn test_captured_failure_is_logged() {
        let _ = from_fn(|| -> i32 { panic!("logged capture") });
        assert!(logs_contain("captured failure"));
    }
}
