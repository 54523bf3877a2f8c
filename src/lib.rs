//! # PureMonads
//!
//! Option, Result and Either helpers with async counterparts that compose
//! without surprises.
//!
//! ## Philosophy
//!
//! The synchronous types are the ones Rust already has. [`OptionExt`] and
//! [`ResultExt`] add `fold`, side-effect callbacks and async bridges to
//! [`Option`] and [`Result`], and [`Either`] fills the gap for two-sided
//! values that are not errors.
//!
//! The async types, [`AsyncOption`] and [`AsyncResult`], wrap a [`Pending`]
//! computation: a shared future that runs at most once no matter how many
//! observers await it. Where a mapping function runs is decided by a
//! [`Continuation`], inline on the resolving task by default or on a
//! [`Dispatcher`] when asked.
//!
//! Errors and panics raised inside a computation are normalized into a single
//! [`Failure`]. When several happen at once they are kept in an aggregate.
//!
//! ## Quick Example
//!
//! ```rust
//! use puremonads::OptionExt;
//!
//! fn find_user(id: u32) -> Option<String> {
//!     (id == 7).then(|| "ada".to_string())
//! }
//!
//! let greeting = find_user(7).fold(|name| format!("hello {}", name), || "who?".into());
//! assert_eq!(greeting, "hello ada");
//!
//! # tokio_test::block_on(async {
//! let shouted = find_user(7)
//!     .into_async()
//!     .map(|name| name.to_uppercase())
//!     .await;
//! assert_eq!(shouted, Some("ADA".to_string()));
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod async_option;
pub mod async_result;
pub mod collection;
pub mod continuation;
pub mod either;
pub mod failure;
pub mod option;
pub mod pending;
pub mod pipe;
pub mod result;
pub mod testing;

/// `Result` defaulting its error to [`Failure`].
///
/// This is the exception-flavoured result: anything that can go wrong is
/// carried as a `Failure`.
pub type Result<T, E = Failure> = std::result::Result<T, E>;

// Re-exports
pub use async_option::AsyncOption;
pub use async_result::AsyncResult;
pub use collection::GetOrNone;
#[cfg(feature = "async")]
pub use continuation::TokioDispatcher;
pub use continuation::{Continuation, Dispatcher};
pub use either::Either;
pub use failure::Failure;
pub use option::OptionExt;
pub use pending::Pending;
pub use pipe::{Pipe, PipeMap};
pub use result::{FutureFailureExt, ResultExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::async_option::AsyncOption;
    pub use crate::async_result::AsyncResult;
    pub use crate::collection::GetOrNone;
    pub use crate::continuation::{Continuation, Dispatcher};
    pub use crate::either::Either;
    pub use crate::failure::Failure;
    pub use crate::option::OptionExt;
    pub use crate::pending::Pending;
    pub use crate::pipe::{Pipe, PipeMap};
    pub use crate::result::{FutureFailureExt, ResultExt};
}
