//! Where continuations of pending computations run.
//!
//! Mapping an async wrapper attaches a continuation to its pending
//! computation. [`Continuation`] decides how that continuation is executed:
//!
//! - [`Continuation::Inline`] (the default) runs it lazily, as part of
//!   resolving the mapped computation. Nothing happens until somebody awaits
//!   the result.
//! - [`Continuation::Dispatched`] hands it to a [`Dispatcher`] at the moment it
//!   is attached. The continuation runs once the source completes, whether or
//!   not the mapped computation is ever awaited.
//!
//! Either way the continuation runs at most once, only after the source has
//! completed, and never when the source is faulted.
//!
//! # Example
//!
//! ```rust
//! use futures::executor::ThreadPool;
//! use puremonads::{AsyncOption, Continuation};
//!
//! # tokio_test::block_on(async {
//! let pool = ThreadPool::new().unwrap();
//! let on_pool = Continuation::on(pool);
//!
//! let doubled = AsyncOption::some(async { 4 }).map_on(&on_pool, |n| n * 2);
//! assert_eq!(doubled.await, Some(8));
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};

use crate::{Failure, Pending, Result};

/// Message of the failure reported when a dispatcher drops a continuation
/// without running it to completion.
pub const CONTINUATION_DROPPED: &str = "continuation was dropped by its dispatcher";

/// Something that can run detached jobs.
///
/// Implementations must eventually poll every job they accept to completion.
/// A job that is dropped instead faults the computation waiting on it.
pub trait Dispatcher: fmt::Debug + Send + Sync {
    /// Schedule `job` to run.
    fn dispatch(&self, job: BoxFuture<'static, ()>);
}

impl Dispatcher for futures::executor::ThreadPool {
    fn dispatch(&self, job: BoxFuture<'static, ()>) {
        self.spawn_ok(job);
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    fn dispatch(&self, job: BoxFuture<'static, ()>) {
        (**self).dispatch(job);
    }
}

/// Dispatches jobs onto a tokio runtime.
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "async")]
impl TokioDispatcher {
    /// Dispatch onto the runtime behind `handle`.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        TokioDispatcher { handle }
    }

    /// Dispatch onto the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }

    /// Like [`TokioDispatcher::current`], but `None` outside of a runtime.
    pub fn try_current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

#[cfg(feature = "async")]
impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, job: BoxFuture<'static, ()>) {
        drop(self.handle.spawn(job));
    }
}

/// Execution policy for continuations.
#[derive(Clone, Debug, Default)]
pub enum Continuation {
    /// Run lazily while the mapped computation is being resolved.
    #[default]
    Inline,
    /// Run on a dispatcher as soon as the source completes.
    Dispatched(Arc<dyn Dispatcher>),
}

impl Continuation {
    /// The inline policy.
    pub fn inline() -> Self {
        Continuation::Inline
    }

    /// Run continuations on `dispatcher`.
    pub fn on<D>(dispatcher: D) -> Self
    where
        D: Dispatcher + 'static,
    {
        Continuation::Dispatched(Arc::new(dispatcher))
    }

    /// Capture the ambient tokio runtime, if there is one.
    ///
    /// Outside of a runtime there is no context to capture and the policy
    /// falls back to [`Continuation::Inline`].
    #[cfg(feature = "async")]
    pub fn current_runtime() -> Self {
        match TokioDispatcher::try_current() {
            Some(dispatcher) => Self::on(dispatcher),
            None => Continuation::Inline,
        }
    }

    /// Returns `true` for the inline policy.
    pub fn is_inline(&self) -> bool {
        matches!(self, Continuation::Inline)
    }

    /// Attach an async continuation to `source`.
    pub(crate) fn then<T, U, F, Fut>(&self, source: Pending<T>, f: F) -> Pending<U>
    where
        T: Clone + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        let continuation = async move {
            let value = source.outcome().await?;
            Ok::<U, Failure>(f(value).await)
        };

        match self {
            Continuation::Inline => Pending::from_outcome(continuation),
            Continuation::Dispatched(dispatcher) => dispatch(&**dispatcher, continuation),
        }
    }

    /// Attach a synchronous continuation to `source`.
    pub(crate) fn map<T, U, F>(&self, source: Pending<T>, f: F) -> Pending<U>
    where
        T: Clone + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.then(source, move |value| future::ready(f(value)))
    }
}

fn dispatch<U, Fut>(dispatcher: &dyn Dispatcher, continuation: Fut) -> Pending<U>
where
    U: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<U>> + Send + 'static,
{
    let (sender, receiver) = oneshot::channel();

    let job = AssertUnwindSafe(continuation)
        .catch_unwind()
        .map(move |caught| {
            let outcome = caught.unwrap_or_else(|payload| Err(Failure::from_panic(payload)));
            // nobody is listening once every observer is gone
            let _ = sender.send(outcome);
        });
    dispatcher.dispatch(job.boxed());

    Pending::from_outcome(receiver.map(|received| match received {
        Ok(outcome) => outcome,
        Err(oneshot::Canceled) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", CONTINUATION_DROPPED);

            Err(Failure::msg(CONTINUATION_DROPPED))
        }
    }))
}
