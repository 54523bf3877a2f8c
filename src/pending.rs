//! Shared handles to pending computations.
//!
//! A [`Pending<T>`] is what the async wrappers hold in place of a value: an
//! already-created, deferred production of a `T`. It is shared, not owned:
//! clones refer to the same computation, the computation resolves once, and
//! every observer sees the same outcome.
//!
//! The outcome of a pending computation is either its value or a
//! [`Failure`]. A computation that panics, or that was built with
//! [`Pending::try_new`] and produced an error, is *faulted*: awaiting it
//! re-raises the failure, while [`Pending::as_result_async`] turns it into an
//! `Err` instead.
//!
//! # Example
//!
//! ```rust
//! use puremonads::Pending;
//!
//! # tokio_test::block_on(async {
//! let pending = Pending::new(async { 21 * 2 });
//! let observer = pending.clone();
//!
//! assert_eq!(pending.await, 42);
//! assert_eq!(observer.await, 42);
//! # });
//! ```

use std::fmt;
use std::future::{Future, IntoFuture};
use std::panic::AssertUnwindSafe;

use futures::future::{self, BoxFuture, FutureExt, Shared};

use crate::{Failure, Result};

type SharedOutcome<T> = Shared<BoxFuture<'static, Result<T>>>;

/// A cloneable handle to a computation that resolves once.
///
/// Equality compares the handle, not the eventual value: two independently
/// created computations are never equal, while clones of one handle always
/// are.
///
/// # Example
///
/// ```rust
/// use puremonads::Pending;
///
/// let first = Pending::ready(1);
/// let second = Pending::ready(1);
///
/// assert_eq!(first, first.clone());
/// assert_ne!(first, second);
/// ```
pub struct Pending<T> {
    shared: SharedOutcome<T>,
}

impl<T> Pending<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap a future producing a value.
    ///
    /// A panic raised while the future is polled faults the computation.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_outcome(future.map(Ok))
    }

    /// Wrap a future that can fail with a typed error.
    ///
    /// An `Err` output faults the computation with the error converted into
    /// a [`Failure`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::{Failure, Pending};
    ///
    /// # tokio_test::block_on(async {
    /// let pending = Pending::<i32>::try_new(async { Err(Failure::msg("refused")) });
    ///
    /// let outcome = pending.as_result_async().await;
    /// assert_eq!(outcome.unwrap_err().message(), "refused");
    /// # });
    /// ```
    pub fn try_new<F, E>(future: F) -> Self
    where
        F: Future<Output = std::result::Result<T, E>> + Send + 'static,
        E: Into<Failure>,
    {
        Self::from_outcome(future.map(|outcome| {
            outcome.map_err(|error| {
                let failure: Failure = error.into();
                failure
            })
        }))
    }

    /// An already-resolved computation.
    pub fn ready(value: T) -> Self {
        Pending {
            shared: future::ready(Ok(value)).boxed().shared(),
        }
    }

    /// An already-faulted computation.
    pub fn fail(failure: Failure) -> Self {
        Pending {
            shared: future::ready(Err(failure)).boxed().shared(),
        }
    }

    /// Start `future` on the current tokio runtime and wrap its handle.
    ///
    /// Unlike [`Pending::new`], the work makes progress whether or not
    /// anybody awaits it. A panic in the task faults the computation; so does
    /// cancellation of the task, surfaced as a failure wrapping the
    /// `JoinError`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    #[cfg(feature = "async")]
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        Self::from_outcome(async move {
            match handle.await {
                Ok(value) => Ok(value),
                Err(error) if error.is_panic() => Err(Failure::from_panic(error.into_panic())),
                Err(error) => Err(Failure::new(error)),
            }
        })
    }

    pub(crate) fn from_outcome<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let guarded = AssertUnwindSafe(future)
            .catch_unwind()
            .map(|caught| caught.unwrap_or_else(|payload| Err(Failure::from_panic(payload))));

        Pending {
            shared: guarded.boxed().shared(),
        }
    }

    /// The raw outcome, shared with every other observer.
    pub(crate) fn outcome(&self) -> SharedOutcome<T> {
        self.shared.clone()
    }

    /// Await the computation without raising.
    ///
    /// A faulted computation yields its failure, flattened: an aggregate with
    /// exactly one underlying failure surfaces that failure, a larger one
    /// surfaces as a flat aggregate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::{Failure, Pending};
    ///
    /// # tokio_test::block_on(async {
    /// let inner = Failure::msg("socket closed");
    /// let pending = Pending::<i32>::fail(Failure::aggregate([inner.clone()]));
    ///
    /// assert_eq!(pending.as_result_async().await, Err(inner));
    /// # });
    /// ```
    pub fn as_result_async(&self) -> impl Future<Output = Result<T>> + Send + 'static {
        self.outcome()
            .map(|outcome| outcome.map_err(Failure::flatten))
    }

    /// The outcome, if the computation has already resolved.
    pub fn peek(&self) -> Option<&Result<T>> {
        self.shared.peek()
    }

    /// Returns `true` once the computation has resolved.
    pub fn is_resolved(&self) -> bool {
        self.peek().is_some()
    }

    /// Returns `true` if both handles refer to the same computation.
    pub fn ptr_eq(&self, other: &Pending<T>) -> bool {
        self.shared.ptr_eq(&other.shared)
    }
}

fn raise_failure<T>(outcome: Result<T>) -> T {
    match outcome {
        Ok(value) => value,
        Err(failure) => std::panic::panic_any(failure),
    }
}

/// Awaiting a `Pending<T>` yields the value.
///
/// # Panics
///
/// Awaiting a faulted computation re-raises its [`Failure`] as the panic
/// payload (recoverable with [`Failure::from_panic`]).
impl<T> IntoFuture for Pending<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = T;
    type IntoFuture = future::Map<SharedOutcome<T>, fn(Result<T>) -> T>;

    fn into_future(self) -> Self::IntoFuture {
        self.shared.map(raise_failure::<T> as fn(Result<T>) -> T)
    }
}

impl<T> Clone for Pending<T> {
    fn clone(&self) -> Self {
        Pending {
            shared: self.shared.clone(),
        }
    }
}

impl<T> PartialEq for Pending<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for Pending<T> where T: Clone + Send + Sync + 'static {}

impl<T> fmt::Debug for Pending<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;

    #[tokio::test]
    async fn test_ready_resolves() {
        assert_eq!(Pending::ready(7).await, 7);
    }

    #[tokio::test]
    async fn test_new_is_lazy_and_resolves_once() {
        let counter = CallCounter::new();
        let calls = counter.clone();
        let pending = Pending::new(async move {
            calls.hit();
            10
        });

        assert_eq!(counter.count(), 0);
        assert!(!pending.is_resolved());

        assert_eq!(pending.clone().await, 10);
        assert_eq!(pending.clone().await, 10);
        assert_eq!(counter.count(), 1);
        assert!(pending.is_resolved());
    }

    #[tokio::test]
    async fn test_try_new_error_faults() {
        let pending = Pending::<i32>::try_new(async {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "io down"))
        });

        let failure = pending.as_result_async().await.unwrap_err();
        assert_eq!(failure.message(), "io down");
        assert!(failure.downcast_ref::<std::io::Error>().is_some());
    }

    #[tokio::test]
    async fn test_panic_is_captured() {
        let pending = Pending::<i32>::new(async { panic!("worker crashed") });

        let failure = pending.as_result_async().await.unwrap_err();
        assert!(failure.is_panic());
        assert_eq!(failure.message(), "worker crashed");
    }

    #[tokio::test]
    async fn test_every_observer_sees_same_failure() {
        let pending = Pending::<i32>::new(async { panic!("once") });

        let first = pending.as_result_async().await.unwrap_err();
        let second = pending.as_result_async().await.unwrap_err();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_await_reraises_failure() {
        let failure = Failure::msg("faulted");
        let pending = Pending::<i32>::fail(failure.clone());

        let payload = AssertUnwindSafe(pending.into_future())
            .catch_unwind()
            .await
            .unwrap_err();
        assert_eq!(Failure::from_panic(payload), failure);
    }

    #[tokio::test]
    async fn test_as_result_flattens_single() {
        let inner = Failure::msg("inner");
        let pending = Pending::<i32>::fail(Failure::aggregate([inner.clone()]));

        assert_eq!(pending.as_result_async().await, Err(inner));
    }

    #[tokio::test]
    async fn test_as_result_keeps_many() {
        let a = Failure::msg("a");
        let b = Failure::msg("b");
        let pending = Pending::<i32>::fail(Failure::aggregate([a.clone(), b.clone()]));

        let failure = pending.as_result_async().await.unwrap_err();
        assert!(failure.is_aggregate());
        assert_eq!(failure.failures(), &[a, b]);
    }

    #[test]
    fn test_identity_equality() {
        let first = Pending::ready(1);
        let second = Pending::ready(1);

        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn test_debug_format() {
        let pending = Pending::ready("done");
        assert_eq!(format!("{:?}", pending), "Pending { resolved: false }");
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_spawn_runs_without_observer() {
        let (sender, receiver) = tokio::sync::oneshot::channel();
        let pending = Pending::spawn(async move {
            let _ = sender.send(());
            5
        });

        receiver.await.unwrap();
        assert_eq!(pending.await, 5);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_spawn_panic_faults() {
        let pending = Pending::<i32>::spawn(async { panic!("task panicked") });

        let failure = pending.as_result_async().await.unwrap_err();
        assert_eq!(failure.message(), "task panicked");
    }
}
