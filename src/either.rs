//! A neutral sum type for representing one of two possible values.
//!
//! # Either vs Result
//!
//! `Either<L, R>` has no success/failure semantics: both branches are normal
//! values. Every operation touches exactly one branch and passes the other
//! through untouched, so `map_left` never looks at a `Right` and `map_right`
//! never looks at a `Left`.
//!
//! Use `Either` instead of `Result` when:
//! - Neither variant represents an error (e.g., cached vs fresh data)
//! - Both sides need to survive a computation
//!
//! # Examples
//!
//! ```rust
//! use puremonads::Either;
//!
//! fn lookup(from_cache: bool) -> Either<String, i32> {
//!     if from_cache {
//!         Either::left("cached".to_string())
//!     } else {
//!         Either::right(42)
//!     }
//! }
//!
//! let description = lookup(true).fold(
//!     |cached| format!("From cache: {}", cached),
//!     |fresh| format!("Fresh value: {}", fresh),
//! );
//! assert_eq!(description, "From cache: cached");
//! ```

use std::fmt;
use std::future::Future;

/// A value that is either `Left(L)` or `Right(R)`.
///
/// # Example
///
/// ```rust
/// use puremonads::Either;
///
/// let left: Either<i32, &str> = Either::left(42);
/// let right: Either<i32, &str> = Either::right("hello");
///
/// match left {
///     Either::Left(n) => println!("Got left: {}", n),
///     Either::Right(s) => println!("Got right: {}", s),
/// }
///
/// let result = right.fold(
///     |n| format!("number: {}", n),
///     |s| format!("string: {}", s),
/// );
/// assert_eq!(result, "string: hello");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant
    Left(L),
    /// The right variant
    Right(R),
}

impl<L, R> Either<L, R> {
    // ========== Constructors ==========

    /// Create a Left value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Either;
    ///
    /// let e: Either<i32, &str> = Either::left(42);
    /// assert!(e.is_left());
    /// ```
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a Right value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    // ========== Projections ==========

    /// The left value as an option.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Either;
    ///
    /// let left: Either<i32, &str> = Either::left(42);
    /// assert_eq!(left.into_left(), Some(42));
    ///
    /// let right: Either<i32, &str> = Either::right("x");
    /// assert_eq!(right.into_left(), None);
    /// ```
    #[inline]
    pub fn into_left(self) -> Option<L> {
        self.fold(Some, |_| None)
    }

    /// The right value as an option.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        self.fold(|_| None, Some)
    }

    /// Convert from `&Either<L, R>` to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    // ========== Case Analysis ==========

    /// Fold both variants into a single value.
    ///
    /// Exactly one of the two functions runs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Either;
    ///
    /// let left: Either<i32, &str> = Either::left(42);
    /// let right: Either<i32, &str> = Either::right("hello");
    ///
    /// assert_eq!(left.fold(|x| x.to_string(), |s| s.to_string()), "42");
    /// assert_eq!(right.fold(|x| x.to_string(), |s| s.to_string()), "hello");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, left_fn: F, right_fn: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }

    // ========== Transformations ==========

    /// Map the left value; a `Right` passes through untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Either;
    ///
    /// let left: Either<i32, &str> = Either::left(1);
    /// assert_eq!(left.map_left(|x| x * 2), Either::left(2));
    ///
    /// let right: Either<i32, &str> = Either::right("untouched");
    /// assert_eq!(right.map_left(|x| x * 2), Either::right("untouched"));
    /// ```
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        self.fold(|l| Either::Left(f(l)), Either::Right)
    }

    /// Map the right value; a `Left` passes through untouched.
    #[inline]
    pub fn map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        self.fold(Either::Left, |r| Either::Right(f(r)))
    }

    /// Map both sides, one function per variant.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, f: F, g: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        self.fold(|l| Either::Left(f(l)), |r| Either::Right(g(r)))
    }

    /// Chain a computation on the left value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Either;
    ///
    /// let left: Either<i32, &str> = Either::left(3);
    /// let chained = left.flat_map_left(|n| {
    ///     if n > 2 { Either::right("big") } else { Either::left(n) }
    /// });
    /// assert_eq!(chained, Either::right("big"));
    /// ```
    #[inline]
    pub fn flat_map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Either<L2, R>,
    {
        self.fold(f, Either::Right)
    }

    /// Chain a computation on the right value.
    #[inline]
    pub fn flat_map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        self.fold(Either::Left, f)
    }

    /// Swap Left and Right.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        self.fold(Either::Right, Either::Left)
    }

    // ========== Side Effects ==========

    /// Run the function matching the variant and return `self` unchanged.
    pub fn on<F, G>(self, left_fn: F, right_fn: G) -> Self
    where
        F: FnOnce(&L),
        G: FnOnce(&R),
    {
        match &self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
        self
    }

    /// Run `f` on a left value and return `self` unchanged.
    pub fn on_left<F>(self, f: F) -> Self
    where
        F: FnOnce(&L),
    {
        self.on(f, |_| {})
    }

    /// Run `f` on a right value and return `self` unchanged.
    pub fn on_right<F>(self, f: F) -> Self
    where
        F: FnOnce(&R),
    {
        self.on(|_| {}, f)
    }

    // ========== Async Counterparts ==========

    /// Map the left value with an async function.
    pub async fn map_left_async<L2, F, Fut>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Fut,
        Fut: Future<Output = L2>,
    {
        match self {
            Either::Left(l) => Either::Left(f(l).await),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Map the right value with an async function.
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Either;
    ///
    /// # tokio_test::block_on(async {
    /// let right: Either<&str, u32> = Either::right(20);
    /// let doubled = right.map_right_async(|n| async move { n * 2 }).await;
    /// assert_eq!(doubled, Either::right(40));
    /// # });
    /// ```
    pub async fn map_right_async<R2, F, Fut>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Fut,
        Fut: Future<Output = R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r).await),
        }
    }

    /// Chain an async computation on the left value.
    pub async fn flat_map_left_async<L2, F, Fut>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Fut,
        Fut: Future<Output = Either<L2, R>>,
    {
        match self {
            Either::Left(l) => f(l).await,
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Chain an async computation on the right value.
    pub async fn flat_map_right_async<R2, F, Fut>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Fut,
        Fut: Future<Output = Either<L, R2>>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r).await,
        }
    }

    /// Run the async function matching the variant.
    pub async fn on_async<F, G, FFut, GFut>(self, left_fn: F, right_fn: G)
    where
        F: FnOnce(L) -> FFut,
        G: FnOnce(R) -> GFut,
        FFut: Future<Output = ()>,
        GFut: Future<Output = ()>,
    {
        match self {
            Either::Left(l) => left_fn(l).await,
            Either::Right(r) => right_fn(r).await,
        }
    }

    /// Run `f` on a left value.
    pub async fn on_left_async<F, Fut>(self, f: F)
    where
        F: FnOnce(L) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let Either::Left(l) = self {
            f(l).await;
        }
    }

    /// Run `f` on a right value.
    pub async fn on_right_async<F, Fut>(self, f: F)
    where
        F: FnOnce(R) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let Either::Right(r) = self {
            f(r).await;
        }
    }

    // ========== Conversions ==========

    /// Convert to Result (Right becomes Ok, Left becomes Err).
    ///
    /// # Example
    ///
    /// ```rust
    /// use puremonads::Either;
    ///
    /// let right: Either<&str, i32> = Either::right(42);
    /// let left: Either<&str, i32> = Either::left("error");
    ///
    /// assert_eq!(right.into_result(), Ok(42));
    /// assert_eq!(left.into_result(), Err("error"));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        self.fold(Err, Ok)
    }

    /// Create from Result (Ok becomes Right, Err becomes Left).
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

// ========== Trait Implementations ==========

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        Either::from_result(result)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Either::Left(l) => write!(f, "Left({})", l),
            Either::Right(r) => write!(f, "Right({})", r),
        }
    }
}

// ========== Collection Utilities ==========

/// Partition an iterator of Either into two vectors.
///
/// # Example
///
/// ```rust
/// use puremonads::either::{partition, Either};
///
/// let items = vec![
///     Either::left(1),
///     Either::right("a"),
///     Either::left(2),
///     Either::right("b"),
/// ];
///
/// let (lefts, rights) = partition(items);
/// assert_eq!(lefts, vec![1, 2]);
/// assert_eq!(rights, vec!["a", "b"]);
/// ```
pub fn partition<L, R, I>(iter: I) -> (Vec<L>, Vec<R>)
where
    I: IntoIterator<Item = Either<L, R>>,
{
    let mut lefts = Vec::new();
    let mut rights = Vec::new();

    for item in iter {
        match item {
            Either::Left(l) => lefts.push(l),
            Either::Right(r) => rights.push(r),
        }
    }

    (lefts, rights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;
    use crate::{assert_left, assert_none, assert_right, assert_some};

    #[test]
    fn test_constructors() {
        assert!(Either::<i32, &str>::left(42).is_left());
        assert!(Either::<i32, &str>::right("hello").is_right());
    }

    #[test]
    fn test_projections() {
        let left: Either<i32, &str> = Either::left(42);
        assert_some!(left.into_left(), 42);
        assert_none!(left.into_right());

        let right: Either<i32, &str> = Either::right("hi");
        assert_none!(right.into_left());
        assert_some!(right.into_right(), "hi");
    }

    #[test]
    fn test_map_right_leaves_left_untouched() {
        let calls = CallCounter::new();
        let left: Either<i32, i32> = Either::left(1);

        let mapped = left.map_right(|r| {
            calls.hit();
            r + 3
        });

        assert_left!(mapped, 1);
        assert_eq!(calls.count(), 0);
    }

    #[test]
    fn test_map_left_leaves_right_untouched() {
        let calls = CallCounter::new();
        let right: Either<i32, &str> = Either::right("x");

        let mapped = right.map_left(|l| {
            calls.hit();
            l + 1
        });

        assert_right!(mapped, "x");
        assert_eq!(calls.count(), 0);
    }

    #[test]
    fn test_map_right_on_right() {
        let right: Either<&str, i32> = Either::right(2);
        assert_right!(right.map_right(|r| format!("Right: {}", r + 2)), "Right: 4");
    }

    #[test]
    fn test_flat_map() {
        let right: Either<&str, i32> = Either::right(4);
        assert_eq!(right.flat_map_right(|r| Either::right(r * 2)), Either::right(8));
        assert_eq!(
            right.flat_map_right(|_| Either::<&str, i32>::left("switched")),
            Either::left("switched")
        );

        let left: Either<&str, i32> = Either::left("kept");
        assert_eq!(
            left.flat_map_right(|_| -> Either<&str, i32> { panic!("not called") }),
            Either::left("kept")
        );
        assert_eq!(left.flat_map_left(|l| Either::left(l.len())), Either::left(4));
    }

    #[test]
    fn test_bimap() {
        let left: Either<i32, &str> = Either::left(1);
        assert_eq!(left.bimap(|x| x + 1, |s| s.len()), Either::left(2));

        let right: Either<i32, &str> = Either::right("abc");
        assert_eq!(right.bimap(|x| x + 1, |s| s.len()), Either::right(3));
    }

    #[test]
    fn test_swap() {
        let left: Either<i32, &str> = Either::left(1);
        assert_eq!(left.swap(), Either::right(1));
    }

    #[test]
    fn test_on_hooks() {
        let calls = CallCounter::new();
        let left: Either<i32, &str> = Either::left(5);

        let same = left
            .on_left(|l| {
                assert_eq!(*l, 5);
                calls.hit();
            })
            .on_right(|_| panic!("not right"))
            .on(|_| calls.hit(), |_| panic!("not right"));

        assert_eq!(same, left);
        assert_eq!(calls.count(), 2);
    }

    #[tokio::test]
    async fn test_async_counterparts() {
        let right: Either<&str, i32> = Either::right(3);
        assert_eq!(right.map_right_async(|r| async move { r + 1 }).await, Either::right(4));
        assert_eq!(
            right.map_left_async(|l: &str| async move { l.len() }).await,
            Either::right(3)
        );
        assert_eq!(
            right
                .flat_map_right_async(|r| async move { Either::<&str, i32>::left(if r > 2 { "big" } else { "small" }) })
                .await,
            Either::left("big")
        );

        let left: Either<&str, i32> = Either::left("abc");
        assert_eq!(
            left.flat_map_left_async(|l| async move { Either::<usize, i32>::left(l.len()) })
                .await,
            Either::left(3)
        );
    }

    #[tokio::test]
    async fn test_async_hooks() {
        let calls = CallCounter::new();
        let left: Either<i32, &str> = Either::left(1);

        left.on_left_async(|_| async { calls.hit() }).await;
        left.on_right_async(|_| async { panic!("not right") }).await;
        left.on_async(|_| async { calls.hit() }, |_| async { panic!("not right") })
            .await;

        assert_eq!(calls.count(), 2);
    }

    #[test]
    fn test_result_conversion() {
        let ok: Result<i32, &str> = Ok(42);
        let either: Either<&str, i32> = ok.into();
        assert_eq!(either, Either::right(42));

        let result: Result<i32, &str> = Either::<&str, i32>::left("err").into();
        assert_eq!(result, Err("err"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Either::<i32, &str>::left(1).to_string(), "Left(1)");
        assert_eq!(Either::<i32, &str>::right("x").to_string(), "Right(x)");
    }

    #[test]
    fn test_partition() {
        let items = vec![Either::left(1), Either::right("a"), Either::left(2)];
        let (lefts, rights) = partition(items);
        assert_eq!(lefts, vec![1, 2]);
        assert_eq!(rights, vec!["a"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let either: Either<String, u32> = Either::right(7);
        let json = serde_json::to_string(&either).unwrap();
        assert_eq!(json, r#"{"Right":7}"#);

        let back: Either<String, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, either);
    }
}
