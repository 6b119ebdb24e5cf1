use std::fmt;
use std::mem;

use super::comparator::{Comparator, NaturalOrder, TextualOrder};
use super::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use super::node::{Link, Node, duplicate, find, locate, release, splice};
use crate::error::MapError;

// =============================================================================
// OrderedTreeMap Definition
// =============================================================================

/// An ordered map backed by an unbalanced binary search tree.
///
/// Keys are kept in the order given by the comparison rule `C`, which is
/// fixed when the map is constructed. Entries are stored in exclusively
/// owned nodes; no node is ever shared between two parents.
///
/// There is no rebalancing: inserting keys in sorted order produces a tree
/// shaped like a list, and every operation then takes time linear in the
/// number of entries. All operations walk the tree iteratively, so such a
/// tree is slow but never exhausts the call stack.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `set`          | O(h)       |
/// | `get`          | O(h)       |
/// | `remove`       | O(h)       |
/// | `contains_key` | O(h)       |
/// | `len`          | O(1)       |
/// | `keys`/`values`| O(N) total |
///
/// where `h` is the height of the tree (between `log N` and `N`).
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedTreeMap;
///
/// let mut map = OrderedTreeMap::new();
/// assert_eq!(map.set(3, "three"), Ok(None));
/// assert_eq!(map.set(1, "one"), Ok(None));
/// assert_eq!(map.set(3, "THREE"), Ok(Some("three")));
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &3]);
/// assert_eq!(map.get(&3), Ok(&"THREE"));
/// ```
pub struct OrderedTreeMap<K, V, C = NaturalOrder> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
    /// Comparison rule, fixed at construction
    comparator: C,
}

impl<K, V> OrderedTreeMap<K, V, NaturalOrder> {
    /// Creates a new empty map ordered by `K`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let map: OrderedTreeMap<i32, String> = OrderedTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V> OrderedTreeMap<K, V, TextualOrder> {
    /// Creates a new empty map ordered by the text rendering of its keys.
    ///
    /// See [`TextualOrder`] for the caveats of this ordering.
    #[inline]
    #[must_use]
    pub const fn with_textual_order() -> Self {
        Self::with_comparator(TextualOrder)
    }
}

impl<K, V, C> OrderedTreeMap<K, V, C> {
    /// Creates a new empty map ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let mut map = OrderedTreeMap::with_comparator(|left: &i32, right: &i32| right.cmp(left));
    /// map.set(1, "one").unwrap();
    /// map.set(2, "two").unwrap();
    /// assert_eq!(map.first_key_value(), Some((&2, &"two")));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Returns the comparison rule of this map.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns the number of entries in the map; the same as [`len`](Self::len).
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every entry, keeping the comparison rule.
    pub fn clear(&mut self) {
        release(self.root.take());
        self.length = 0;
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let map: OrderedTreeMap<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// let entries: Vec<(&i32, &char)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.length)
    }

    /// Returns an iterator over entries in ascending key order, with
    /// mutable access to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.root, self.length)
    }

    /// Returns an iterator over keys in ascending order.
    ///
    /// The iterator is single-pass; call `keys` again for a fresh one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let map: OrderedTreeMap<i32, i32> =
    ///     [5, 3, 8, 1, 4, 7, 9].into_iter().map(|key| (key, key)).collect();
    /// let keys: Vec<i32> = map.keys().copied().collect();
    /// assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
    /// ```
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let map: OrderedTreeMap<i32, i32> = [(3, 30), (1, 10), (2, 20)].into_iter().collect();
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let mut map: OrderedTreeMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
    /// for value in map.values_mut() {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(&2), Ok(&21));
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Calls `action` on every entry in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let map: OrderedTreeMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    /// let mut seen = Vec::new();
    /// map.for_each(|key, value| seen.push(format!("{key}={value}")));
    /// assert_eq!(seen, vec!["1=a", "2=b"]);
    /// ```
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self {
            action(key, value);
        }
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// The empty map has height 0. Nothing keeps the tree balanced, so this
    /// ranges from `log2(len + 1)` up to `len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let sorted: OrderedTreeMap<i32, ()> = (0..10).map(|key| (key, ())).collect();
    /// assert_eq!(sorted.height(), 10);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            pending.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        tallest
    }

    pub(crate) const fn root(&self) -> &Link<K, V> {
        &self.root
    }
}

impl<K, V, C: Comparator<K>> OrderedTreeMap<K, V, C> {
    /// Associates `value` with `key`.
    ///
    /// Returns the value previously stored under an equal key, or `None`
    /// if the key was not present. An equal key keeps its node and only
    /// the value is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidKey`] if the comparison rule does not
    /// admit `key`. The map is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let mut map = OrderedTreeMap::new();
    /// assert_eq!(map.set("k", 1), Ok(None));
    /// assert_eq!(map.set("k", 2), Ok(Some(1)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        self.admit(&key)?;
        Ok(self.insert_admitted(key, value))
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if no entry has an equal key, and
    /// [`MapError::InvalidKey`] if the comparison rule does not admit `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::{MapError, OrderedTreeMap};
    ///
    /// let mut map = OrderedTreeMap::new();
    /// map.set(1, "one").unwrap();
    /// assert_eq!(map.get(&1), Ok(&"one"));
    /// assert_eq!(map.get(&2), Err(MapError::KeyNotFound));
    /// ```
    pub fn get(&self, key: &K) -> Result<&V, MapError> {
        self.admit(key)?;
        self.try_get(key).ok_or(MapError::KeyNotFound)
    }

    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// Keys the comparison rule does not admit are never present.
    #[must_use]
    pub fn try_get(&self, key: &K) -> Option<&V> {
        if !self.comparator.admits(key) {
            return None;
        }
        find(&self.root, &self.comparator, key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if !self.comparator.admits(key) {
            return None;
        }
        locate(&mut self.root, &self.comparator, key)
            .as_deref_mut()
            .map(|node| &mut node.value)
    }

    /// Returns `true` if the map holds an entry whose key equals `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.try_get(key).is_some()
    }

    /// Removes the entry stored under `key` and returns its value.
    ///
    /// Removing a key that is not present returns `None` and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidKey`] if the comparison rule does not
    /// admit `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let mut map: OrderedTreeMap<i32, i32> =
    ///     [5, 3, 8, 1, 4].into_iter().map(|key| (key, key)).collect();
    /// assert_eq!(map.remove(&5), Ok(Some(5)));
    /// assert_eq!(map.remove(&5), Ok(None));
    ///
    /// let keys: Vec<i32> = map.keys().copied().collect();
    /// assert_eq!(keys, vec![1, 3, 4, 8]);
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<Option<V>, MapError> {
        Ok(self.remove_entry(key)?.map(|(_, value)| value))
    }

    /// Removes the entry stored under `key` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidKey`] if the comparison rule does not
    /// admit `key`.
    pub fn remove_entry(&mut self, key: &K) -> Result<Option<(K, V)>, MapError> {
        self.admit(key)?;
        let slot = locate(&mut self.root, &self.comparator, key);
        let Some(removed) = slot.take() else {
            return Ok(None);
        };
        let Node {
            key: removed_key,
            value,
            left,
            right,
        } = *removed;
        let (replacement, removal) = splice(left, right);
        *slot = replacement;
        self.length -= 1;
        log::trace!("unlinked node ({removal:?}), {} entries remain", self.length);
        Ok(Some((removed_key, value)))
    }

    fn admit(&self, key: &K) -> Result<(), MapError> {
        if self.comparator.admits(key) {
            Ok(())
        } else {
            log::debug!("key rejected by the comparison rule");
            Err(MapError::InvalidKey)
        }
    }

    /// Inserts a key that has already passed [`admit`](Self::admit).
    fn insert_admitted(&mut self, key: K, value: V) -> Option<V> {
        let slot = locate(&mut self.root, &self.comparator, &key);
        match slot {
            Some(node) => {
                log::trace!("replaced value of an existing node");
                Some(mem::replace(&mut node.value, value))
            }
            None => {
                *slot = Some(Box::new(Node::leaf(key, value)));
                self.length += 1;
                log::trace!("attached new node, {} entries", self.length);
                None
            }
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C> Drop for OrderedTreeMap<K, V, C> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<K, V, C: Default> Default for OrderedTreeMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

/// Clones the map node by node, preserving its exact shape.
///
/// The comparison rule is not consulted, so cloning is linear in the size
/// of the map whatever its shape.
impl<K: Clone, V: Clone, C: Clone> Clone for OrderedTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            root: duplicate(&self.root),
            length: self.length,
            comparator: self.comparator.clone(),
        }
    }
}

/// Keys rejected by the comparison rule are skipped.
impl<K, V, C: Comparator<K>> Extend<(K, V)> for OrderedTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if self.admit(&key).is_ok() {
                self.insert_admitted(key, value);
            }
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for OrderedTreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C> IntoIterator for OrderedTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), mem::take(&mut self.length))
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut OrderedTreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Two maps are equal when they hold equal entries in the same order.
impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedTreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for OrderedTreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for OrderedTreeMap<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedTreeMapVisitor<K, V, C> {
    marker: std::marker::PhantomData<fn() -> OrderedTreeMap<K, V, C>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for OrderedTreeMapVisitor<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = OrderedTreeMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map: OrderedTreeMap<K, V, C> = OrderedTreeMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.set(key, value)
                .map_err(<A::Error as serde::de::Error>::custom)?;
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for OrderedTreeMap<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedTreeMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
