//! Map lookups that answer with an [`Option`].

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Look up a key and get an owned `Option` back.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use puremonads::{GetOrNone, OptionExt};
///
/// let ports = HashMap::from([("http", 80), ("https", 443)]);
///
/// assert_eq!(ports.get_or_none(&"https"), Some(443));
/// assert!(ports.get_or_none(&"gopher").value_or_failure().is_err());
/// ```
pub trait GetOrNone<K, V> {
    /// `Some` with a copy of the value stored under `key`, else `None`.
    fn get_or_none(&self, key: &K) -> Option<V>;
}

impl<K, V, S> GetOrNone<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher,
{
    fn get_or_none(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }
}

impl<K, V> GetOrNone<K, V> for BTreeMap<K, V>
where
    K: Ord,
    V: Clone,
{
    fn get_or_none(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }
}
