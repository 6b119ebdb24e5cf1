//! # bstmap
//!
//! An ordered map backed by an unbalanced binary search tree, keyed by a
//! comparison rule chosen at construction.
//!
//! ## Overview
//!
//! - **[`OrderedTreeMap`]**: the tree itself. Insertion with in-place update,
//!   strict and non-strict lookup, splice deletion, in-order iteration and a
//!   diagnostic dump of the tree's shape.
//! - **[`Comparator`]**: the comparison rule. [`NaturalOrder`] is the
//!   default; [`TextualOrder`], [`PartialOrder`], [`Reversed`] and plain
//!   closures are also available.
//! - **[`SimpleMap`]**: the map capability contract shared with
//!   [`std::collections::BTreeMap`].
//! - **[`MapError`]**: the two ways a map operation can fail.
//!
//! The tree does not rebalance itself. Keys inserted in sorted order make
//! every operation linear in the number of entries.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`OrderedTreeMap`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use bstmap::prelude::*;
//!
//! let mut map = OrderedTreeMap::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     map.set(key, key).unwrap();
//! }
//!
//! let keys: Vec<i32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(map.get(&6), Err(MapError::KeyNotFound));
//! assert_eq!(map.try_get(&6), None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use bstmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::contract::SimpleMap;
    pub use crate::error::MapError;
    pub use crate::tree::{Comparator, NaturalOrder, OrderedTreeMap, TextualOrder};
}

pub mod contract;
pub mod error;
pub mod tree;

pub use contract::SimpleMap;
pub use error::MapError;
pub use tree::{Comparator, NaturalOrder, OrderedTreeMap, PartialOrder, Reversed, TextualOrder};
