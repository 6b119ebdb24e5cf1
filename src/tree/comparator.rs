//! Comparison rules that decide the shape of an [`OrderedTreeMap`].
//!
//! A comparison rule is fixed when the map is constructed and drives every
//! search decision afterwards. Any closure `Fn(&K, &K) -> Ordering` is a
//! comparison rule; the named rules below cover the common cases.
//!
//! [`OrderedTreeMap`]: super::OrderedTreeMap

use std::cmp::Ordering;
use std::fmt;

/// A strict ordering over keys.
///
/// `compare` must be a total order over every key for which `admits`
/// returns `true`. Keys that are not admitted never enter the map.
///
/// # Examples
///
/// ```rust
/// use bstmap::{Comparator, OrderedTreeMap};
/// use std::cmp::Ordering;
///
/// struct ByLength;
///
/// impl Comparator<String> for ByLength {
///     fn compare(&self, left: &String, right: &String) -> Ordering {
///         left.len().cmp(&right.len())
///     }
/// }
///
/// let mut map = OrderedTreeMap::with_comparator(ByLength);
/// map.set("three".to_string(), 3).unwrap();
/// map.set("one".to_string(), 1).unwrap();
/// // Same length as "one", so it replaces its value.
/// assert_eq!(map.set("two".to_string(), 2), Ok(Some(1)));
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, left: &K, right: &K) -> Ordering;

    /// Returns `true` if the key can take part in the ordering.
    ///
    /// The default admits every key.
    #[inline]
    fn admits(&self, key: &K) -> bool {
        let _ = key;
        true
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self(left, right)
    }
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// Orders keys lexicographically by their [`Display`](fmt::Display) rendering.
///
/// This is a weak fallback for key types with no meaningful ordering of
/// their own: `10` sorts before `9`, and two distinct keys with the same
/// rendering are treated as the same key.
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedTreeMap;
///
/// let mut map = OrderedTreeMap::with_textual_order();
/// for key in [9, 10, 1] {
///     map.set(key, ()).unwrap();
/// }
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &10, &9]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextualOrder;

impl<K: fmt::Display + ?Sized> Comparator<K> for TextualOrder {
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.to_string().cmp(&right.to_string())
    }
}

/// Orders keys by their [`PartialOrd`] implementation.
///
/// Keys that are not comparable with themselves (such as `f64::NAN`) are
/// rejected. The rule is only a strict ordering when the [`PartialOrd`]
/// implementation is total apart from such keys, as it is for the float
/// types. Two admitted keys that are incomparable with each other compare
/// as [`Ordering::Equal`], so they are treated as the same key and the
/// later `set` replaces the earlier value.
///
/// # Examples
///
/// ```rust
/// use bstmap::{MapError, OrderedTreeMap, PartialOrder};
///
/// let mut map = OrderedTreeMap::with_comparator(PartialOrder);
/// assert_eq!(map.set(1.5, "a"), Ok(None));
/// assert_eq!(map.set(f64::NAN, "b"), Err(MapError::InvalidKey));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PartialOrder;

impl<K: PartialOrd + ?Sized> Comparator<K> for PartialOrder {
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.partial_cmp(right).unwrap_or(Ordering::Equal)
    }

    fn admits(&self, key: &K) -> bool {
        key.partial_cmp(key).is_some()
    }
}

/// Reverses another comparison rule.
///
/// # Examples
///
/// ```rust
/// use bstmap::{NaturalOrder, OrderedTreeMap, Reversed};
///
/// let mut map = OrderedTreeMap::with_comparator(Reversed(NaturalOrder));
/// for key in [1, 3, 2] {
///     map.set(key, ()).unwrap();
/// }
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&3, &2, &1]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reversed<C> {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self.0.compare(right, left)
    }

    #[inline]
    fn admits(&self, key: &K) -> bool {
        self.0.admits(key)
    }
}
