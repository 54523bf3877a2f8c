//! Left-to-right function application.
//!
//! [`Pipe`] lets a value flow into a function with method syntax.
//! [`Pipe::pipe_map`] keeps the original value next to the computed one in a
//! [`PipeMap`], so later steps can transform the result while still seeing
//! where it came from.
//!
//! # Example
//!
//! ```rust
//! use puremonads::Pipe;
//!
//! let summary = "  invoice  "
//!     .pipe(str::trim)
//!     .pipe_map(|word| word.len())
//!     .pipe_map(|len| len * 2)
//!     .reduce(|word, doubled| format!("{}:{}", word, doubled));
//!
//! assert_eq!(summary, "invoice:14");
//! ```

use std::future::Future;

/// Method-syntax function application, available on every sized value.
pub trait Pipe: Sized {
    /// Apply `f` to `self`.
    #[inline]
    fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }

    /// Apply an async `f` to `self` and await it.
    fn pipe_async<R, F, Fut>(self, f: F) -> impl Future<Output = R>
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = R>,
    {
        f(self)
    }

    /// Compute a result from `self`, keeping `self` alongside it.
    #[inline]
    fn pipe_map<R, F>(self, f: F) -> PipeMap<Self, R>
    where
        F: FnOnce(&Self) -> R,
    {
        let result = f(&self);
        PipeMap {
            source: self,
            result,
        }
    }

    /// Compute a result from `self` asynchronously, keeping `self` alongside
    /// it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Pipe;
    ///
    /// # tokio_test::block_on(async {
    /// let mapped = 21_u32
    ///     .pipe_map_async(|n| {
    ///         let n = *n;
    ///         async move { n * 2 }
    ///     })
    ///     .await;
    ///
    /// assert_eq!(mapped.into_parts(), (21, 42));
    /// # });
    /// ```
    fn pipe_map_async<R, F, Fut>(self, f: F) -> impl Future<Output = PipeMap<Self, R>>
    where
        F: FnOnce(&Self) -> Fut,
        Fut: Future<Output = R>,
    {
        let pending = f(&self);
        async move {
            PipeMap {
                source: self,
                result: pending.await,
            }
        }
    }
}

impl<T> Pipe for T {}

/// A source value paired with a result computed from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipeMap<S, R> {
    /// The value the pipeline started from.
    pub source: S,
    /// The latest computed result.
    pub result: R,
}

impl<S, R> PipeMap<S, R> {
    /// Transform the result, keeping the source.
    #[inline]
    pub fn pipe_map<R2, F>(self, f: F) -> PipeMap<S, R2>
    where
        F: FnOnce(R) -> R2,
    {
        PipeMap {
            source: self.source,
            result: f(self.result),
        }
    }

    /// Transform the result asynchronously, keeping the source.
    pub async fn pipe_map_async<R2, F, Fut>(self, f: F) -> PipeMap<S, R2>
    where
        F: FnOnce(R) -> Fut,
        Fut: Future<Output = R2>,
    {
        PipeMap {
            source: self.source,
            result: f(self.result).await,
        }
    }

    /// Combine the source and the result into a final value.
    #[inline]
    pub fn reduce<T, F>(self, f: F) -> T
    where
        F: FnOnce(S, R) -> T,
    {
        f(self.source, self.result)
    }

    /// Combine the source and the result asynchronously.
    pub async fn reduce_async<T, F, Fut>(self, f: F) -> T
    where
        F: FnOnce(S, R) -> Fut,
        Fut: Future<Output = T>,
    {
        f(self.source, self.result).await
    }

    /// Split into `(source, result)`.
    #[inline]
    pub fn into_parts(self) -> (S, R) {
        (self.source, self.result)
    }
}
