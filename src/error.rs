//! Error types for map operations.
//!
//! Only two things can go wrong when talking to a map: the key is one the
//! comparison rule refuses to order, or a strict lookup found nothing.
//! Every other "missing key" situation is reported through `Option`.

/// Represents errors that can occur when operating on a map.
///
/// # Examples
///
/// ```rust
/// use bstmap::{MapError, OrderedTreeMap};
///
/// let mut map = OrderedTreeMap::new();
/// map.set(1, "one").unwrap();
///
/// assert_eq!(map.get(&2), Err(MapError::KeyNotFound));
/// assert_eq!(format!("{}", MapError::KeyNotFound), "key not found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapError {
    /// The key is rejected by the map's comparison rule.
    ///
    /// This is raised before any structural change is made, so the map
    /// is left untouched.
    InvalidKey,
    /// A strict lookup reached an empty position without finding the key.
    KeyNotFound,
}

impl std::fmt::Display for MapError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey => write!(formatter, "invalid key: rejected by the comparison rule"),
            Self::KeyNotFound => write!(formatter, "key not found"),
        }
    }
}

impl std::error::Error for MapError {}
