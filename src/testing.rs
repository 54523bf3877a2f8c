//! Testing utilities for code built on puremonads
//!
//! This module provides assertion macros for the wrapper types, a call
//! counter for checking laziness and exactly-once execution, and
//! property-based testing support for [`Either`](crate::Either).
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use puremonads::{assert_none, assert_some, assert_value};
//!
//! assert_some!(Some(3), 3);
//! assert_none!(None::<i32>);
//! assert_value!(Ok::<_, String>(1));
//! ```
//!
//! ## CallCounter
//!
//! ```rust
//! use puremonads::testing::CallCounter;
//!
//! let counter = CallCounter::new();
//! let calls = counter.clone();
//!
//! let mapped = None::<i32>.map(move |n| {
//!     calls.hit();
//!     n + 1
//! });
//!
//! assert_eq!(mapped, None);
//! assert_eq!(counter.count(), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of how often a callback ran.
///
/// Clones share the same count, so one clone can move into a closure while
/// the test keeps another.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    /// A counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// The number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Assert that an option is `Some`, optionally holding `expected`.
///
/// # Example
///
/// ```rust
/// use puremonads::assert_some;
///
/// assert_some!(Some("ready"));
/// assert_some!(Some(2 + 2), 4);
/// ```
#[macro_export]
macro_rules! assert_some {
    ($option:expr) => {
        match $option {
            ::core::option::Option::Some(_) => {}
            ::core::option::Option::None => {
                panic!("Expected Some, got None");
            }
        }
    };
    ($option:expr, $expected:expr) => {
        match $option {
            ::core::option::Option::Some(value) => {
                assert_eq!(value, $expected);
            }
            ::core::option::Option::None => {
                panic!("Expected Some({:?}), got None", $expected);
            }
        }
    };
}

/// Assert that an option is `None`.
#[macro_export]
macro_rules! assert_none {
    ($option:expr) => {
        match $option {
            ::core::option::Option::None => {}
            ::core::option::Option::Some(value) => {
                panic!("Expected None, got Some({:?})", value);
            }
        }
    };
}

/// Assert that a result holds a value, optionally equal to `expected`.
///
/// # Example
///
/// ```rust
/// use puremonads::{assert_value, result};
///
/// assert_value!(result::from_fn(|| 21 * 2), 42);
/// ```
#[macro_export]
macro_rules! assert_value {
    ($result:expr) => {
        match $result {
            ::core::result::Result::Ok(_) => {}
            ::core::result::Result::Err(error) => {
                panic!("Expected Value, got Error: {:?}", error);
            }
        }
    };
    ($result:expr, $expected:expr) => {
        match $result {
            ::core::result::Result::Ok(value) => {
                assert_eq!(value, $expected);
            }
            ::core::result::Result::Err(error) => {
                panic!("Expected Value({:?}), got Error: {:?}", $expected, error);
            }
        }
    };
}

/// Assert that a result holds an error, optionally equal to `expected`.
///
/// # Example
///
/// ```rust
/// use puremonads::{assert_error, Failure};
///
/// let failure = Failure::msg("rejected");
/// let outcome: puremonads::Result<i32> = Err(failure.clone());
///
/// assert_error!(outcome, failure);
/// ```
#[macro_export]
macro_rules! assert_error {
    ($result:expr) => {
        match $result {
            ::core::result::Result::Err(_) => {}
            ::core::result::Result::Ok(value) => {
                panic!("Expected Error, got Value: {:?}", value);
            }
        }
    };
    ($result:expr, $expected:expr) => {
        match $result {
            ::core::result::Result::Err(error) => {
                assert_eq!(error, $expected);
            }
            ::core::result::Result::Ok(value) => {
                panic!("Expected Error({:?}), got Value: {:?}", $expected, value);
            }
        }
    };
}

/// Assert that an either is `Left`, optionally holding `expected`.
#[macro_export]
macro_rules! assert_left {
    ($either:expr) => {
        match $either {
            $crate::Either::Left(_) => {}
            $crate::Either::Right(value) => {
                panic!("Expected Left, got Right({:?})", value);
            }
        }
    };
    ($either:expr, $expected:expr) => {
        match $either {
            $crate::Either::Left(value) => {
                assert_eq!(value, $expected);
            }
            $crate::Either::Right(value) => {
                panic!("Expected Left({:?}), got Right({:?})", $expected, value);
            }
        }
    };
}

/// Assert that an either is `Right`, optionally holding `expected`.
#[macro_export]
macro_rules! assert_right {
    ($either:expr) => {
        match $either {
            $crate::Either::Right(_) => {}
            $crate::Either::Left(value) => {
                panic!("Expected Right, got Left({:?})", value);
            }
        }
    };
    ($either:expr, $expected:expr) => {
        match $either {
            $crate::Either::Right(value) => {
                assert_eq!(value, $expected);
            }
            $crate::Either::Left(value) => {
                panic!("Expected Right({:?}), got Left({:?})", $expected, value);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for crate::Either<L, R>
where
    L: Arbitrary + 'static,
    R: Arbitrary + 'static,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (l_params, r_params) = args;
        prop_oneof![
            any_with::<L>(l_params).prop_map(crate::Either::left),
            any_with::<R>(r_params).prop_map(crate::Either::right),
        ]
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Either;

    #[test]
    fn call_counter_shared_between_clones() {
        let counter = CallCounter::new();
        let clone = counter.clone();

        clone.hit();
        clone.hit();
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn call_counter_across_threads() {
        let counter = CallCounter::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || counter.hit())
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.count(), 4);
    }

    #[test]
    fn assert_some_macro() {
        assert_some!(Some(1));
        assert_some!(Some("x"), "x");
    }

    #[test]
    fn assert_none_macro() {
        assert_none!(None::<i32>);
    }

    #[test]
    fn assert_value_and_error_macros() {
        assert_value!(Ok::<_, String>(3), 3);
        assert_error!(Err::<i32, _>("bad"), "bad");
    }

    #[test]
    fn assert_either_macros() {
        assert_left!(Either::<_, String>::Left(1), 1);
        assert_right!(Either::<i32, _>::Right("r"), "r");
    }

    #[test]
    #[should_panic(expected = "Expected Some, got None")]
    fn assert_some_panics_on_none() {
        assert_some!(None::<i32>);
    }

    #[test]
    #[should_panic(expected = "Expected None, got Some")]
    fn assert_none_panics_on_some() {
        assert_none!(Some(1));
    }

    #[test]
    #[should_panic(expected = "Expected Value(1), got Error")]
    fn assert_value_panics_on_error() {
        assert_value!(Err::<i32, _>("boom"), 1);
    }

    #[test]
    #[should_panic(expected = "Expected Right, got Left")]
    fn assert_right_panics_on_left() {
        assert_right!(Either::<_, i32>::Left("l"));
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn either_arbitrary_generates_valid_instances(
                either in any::<Either<i32, String>>()
            ) {
                match &either {
                    Either::Left(_) => prop_assert!(either.is_left()),
                    Either::Right(_) => prop_assert!(either.is_right()),
                }
            }
        }
    }
}
