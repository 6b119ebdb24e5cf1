//! The map capability contract.
//!
//! [`SimpleMap`] is the small set of operations callers may rely on from any
//! map, ordered or not. [`OrderedTreeMap`] implements it, and so does
//! [`std::collections::BTreeMap`], which makes the standard map a handy
//! reference model when checking the tree against the contract.
//!
//! # Examples
//!
//! ```rust
//! use bstmap::{MapError, OrderedTreeMap, SimpleMap};
//!
//! fn tally<M: SimpleMap<&'static str, u32>>(map: &mut M, words: &[&'static str]) {
//!     for &word in words {
//!         let count = map.try_get(&word).copied().unwrap_or(0);
//!         map.set(word, count + 1).unwrap();
//!     }
//! }
//!
//! let mut map = OrderedTreeMap::new();
//! tally(&mut map, &["b", "a", "b"]);
//! assert_eq!(SimpleMap::get(&map, &"b"), Ok(&2));
//! assert_eq!(SimpleMap::get(&map, &"c"), Err(MapError::KeyNotFound));
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::MapError;
use crate::tree::{self, Comparator, OrderedTreeMap};

/// Operations every map offers to its callers.
pub trait SimpleMap<K, V> {
    /// Iterator returned by [`keys`](Self::keys).
    type Keys<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Iterator returned by [`values`](Self::values).
    type Values<'a>: Iterator<Item = &'a V>
    where
        Self: 'a,
        V: 'a;

    /// Associates `value` with `key`, returning the value it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidKey`] if the map cannot hold `key`.
    fn set(&mut self, key: K, value: V) -> Result<Option<V>, MapError>;

    /// Returns the value stored under `key`, or `None`.
    fn try_get(&self, key: &K) -> Option<&V>;

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] when [`try_get`](Self::try_get)
    /// finds nothing.
    fn get(&self, key: &K) -> Result<&V, MapError> {
        self.try_get(key).ok_or(MapError::KeyNotFound)
    }

    /// Returns the number of entries.
    fn size(&self) -> usize;

    /// Returns `true` if [`try_get`](Self::try_get) would find `key`.
    fn contains_key(&self, key: &K) -> bool {
        self.try_get(key).is_some()
    }

    /// Removes the entry stored under `key`, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidKey`] if the map cannot hold `key`.
    fn remove(&mut self, key: &K) -> Result<Option<V>, MapError>;

    /// Returns the keys of the map.
    fn keys(&self) -> Self::Keys<'_>;

    /// Returns the values of the map.
    fn values(&self) -> Self::Values<'_>;

    /// Calls `action` on every entry.
    fn for_each<F>(&self, action: F)
    where
        F: FnMut(&K, &V);
}

impl<K, V, C: Comparator<K>> SimpleMap<K, V> for OrderedTreeMap<K, V, C> {
    type Keys<'a>
        = tree::Keys<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    type Values<'a>
        = tree::Values<'a, K, V>
    where
        Self: 'a,
        V: 'a;

    fn set(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        Self::set(self, key, value)
    }

    fn try_get(&self, key: &K) -> Option<&V> {
        Self::try_get(self, key)
    }

    fn get(&self, key: &K) -> Result<&V, MapError> {
        Self::get(self, key)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, MapError> {
        Self::remove(self, key)
    }

    fn keys(&self) -> Self::Keys<'_> {
        Self::keys(self)
    }

    fn values(&self) -> Self::Values<'_> {
        Self::values(self)
    }

    fn for_each<F>(&self, action: F)
    where
        F: FnMut(&K, &V),
    {
        Self::for_each(self, action);
    }
}

impl<K: Ord, V> SimpleMap<K, V> for BTreeMap<K, V> {
    type Keys<'a>
        = btree_map::Keys<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    type Values<'a>
        = btree_map::Values<'a, K, V>
    where
        Self: 'a,
        V: 'a;

    fn set(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        Ok(self.insert(key, value))
    }

    fn try_get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, MapError> {
        Ok(Self::remove(self, key))
    }

    fn keys(&self) -> Self::Keys<'_> {
        Self::keys(self)
    }

    fn values(&self) -> Self::Values<'_> {
        Self::values(self)
    }

    fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self {
            action(key, value);
        }
    }
}
