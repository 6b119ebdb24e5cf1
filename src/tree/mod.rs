//! Ordered map backed by an unbalanced binary search tree.
//!
//! This module provides [`OrderedTreeMap`], a mutable map whose keys are
//! kept in the order given by a [`Comparator`] chosen at construction.
//!
//! # Overview
//!
//! - Insertion replaces the value of an equal key in place.
//! - Removal of a node with two children splices the right subtree under
//!   the in-order predecessor instead of copying entries around.
//! - Every walk (lookup, insertion, removal, traversal, drop) is iterative.
//!
//! # Examples
//!
//! ```rust
//! use bstmap::OrderedTreeMap;
//!
//! let mut map = OrderedTreeMap::new();
//! for key in [5, 3, 8, 1, 4] {
//!     map.set(key, key * 10).unwrap();
//! }
//!
//! assert_eq!(map.remove(&5), Ok(Some(50)));
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4, &8]);
//! assert_eq!(map.get(&4), Ok(&40));
//! ```

mod comparator;
mod dump;
mod iter;
mod map;
mod node;

pub use comparator::{Comparator, NaturalOrder, PartialOrder, Reversed, TextualOrder};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use map::OrderedTreeMap;
