//! Nodes and the link-walking primitives the map is built on.
//!
//! Every node is owned by exactly one link: either the map's root or one of
//! its parent's child links. All walks here are loops over `&mut Link`
//! rather than recursive calls, so an unbalanced tree shaped like a list
//! cannot overflow the call stack.

use std::cmp::Ordering;

use smallvec::SmallVec;

use super::comparator::Comparator;

/// An owning, possibly empty, reference to a subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Inline capacity of a traversal stack before it spills to the heap.
const SPINE_INLINE: usize = 16;

/// The stack of nodes still waiting to be visited by an in-order walk.
pub(crate) type Spine<'a, K, V> = SmallVec<[&'a Node<K, V>; SPINE_INLINE]>;

/// Internal node structure for the binary search tree.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a new leaf.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Returns `true` if this node has neither child.
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Walks down from `link` to the link that holds `key`, or to the empty
/// link where `key` would be attached.
pub(crate) fn locate<'a, K, V, C>(
    mut link: &'a mut Link<K, V>,
    comparator: &C,
    key: &K,
) -> &'a mut Link<K, V>
where
    C: Comparator<K> + ?Sized,
{
    loop {
        let ordering = link
            .as_deref()
            .map(|node| comparator.compare(key, &node.key));
        link = match (ordering, link) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, slot) => return slot,
        };
    }
}

/// Shared-reference counterpart of [`locate`]; returns the matching node.
pub(crate) fn find<'a, K, V, C>(
    mut link: &'a Link<K, V>,
    comparator: &C,
    key: &K,
) -> Option<&'a Node<K, V>>
where
    C: Comparator<K> + ?Sized,
{
    while let Some(node) = link.as_deref() {
        match comparator.compare(key, &node.key) {
            Ordering::Less => link = &node.left,
            Ordering::Greater => link = &node.right,
            Ordering::Equal => return Some(node),
        }
    }
    None
}

/// The shape of a node at the moment it was unlinked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Removal {
    Leaf,
    SingleChild,
    Splice,
}

/// Joins the two subtrees of a removed node into one.
///
/// With both subtrees present, the right subtree is hung off the rightmost
/// node of the left subtree (the in-order predecessor), and the left
/// subtree takes the removed node's place. Only ownership moves.
pub(crate) fn splice<K, V>(left: Link<K, V>, right: Link<K, V>) -> (Link<K, V>, Removal) {
    match (left, right) {
        (None, None) => (None, Removal::Leaf),
        (Some(child), None) | (None, Some(child)) => (Some(child), Removal::SingleChild),
        (Some(mut left), Some(right)) => {
            let mut predecessor: &mut Node<K, V> = &mut left;
            loop {
                match predecessor.right {
                    Some(ref mut next) => predecessor = &mut **next,
                    None => {
                        predecessor.right = Some(right);
                        break;
                    }
                }
            }
            (Some(left), Removal::Splice)
        }
    }
}

/// Pushes `link` and every left descendant below it onto `stack`.
pub(crate) fn push_left_spine<'a, K, V>(mut link: &'a Link<K, V>, stack: &mut Spine<'a, K, V>) {
    while let Some(node) = link.as_deref() {
        stack.push(node);
        link = &node.left;
    }
}

/// Copies a subtree node for node, without recursing or comparing keys.
pub(crate) fn duplicate<K: Clone, V: Clone>(link: &Link<K, V>) -> Link<K, V> {
    // Parent-first listing; every child sits after its parent.
    let mut listing: Vec<(&Node<K, V>, Option<usize>, Option<usize>)> = Vec::new();
    let mut pending: Vec<(&Node<K, V>, Option<(usize, bool)>)> =
        link.as_deref().map(|node| (node, None)).into_iter().collect();
    while let Some((node, parent)) = pending.pop() {
        let index = listing.len();
        listing.push((node, None, None));
        if let Some((parent, is_left)) = parent {
            let entry = &mut listing[parent];
            if is_left {
                entry.1 = Some(index);
            } else {
                entry.2 = Some(index);
            }
        }
        pending.extend(node.right.as_deref().map(|child| (child, Some((index, false)))));
        pending.extend(node.left.as_deref().map(|child| (child, Some((index, true)))));
    }

    let mut built: Vec<Link<K, V>> = std::iter::repeat_with(|| None).take(listing.len()).collect();
    for (index, &(node, left, right)) in listing.iter().enumerate().rev() {
        let left = left.and_then(|child| built[child].take());
        let right = right.and_then(|child| built[child].take());
        built[index] = Some(Box::new(Node {
            key: node.key.clone(),
            value: node.value.clone(),
            left,
            right,
        }));
    }
    built.into_iter().next().flatten()
}

/// Releases a subtree without recursing once per level.
pub(crate) fn release<K, V>(link: Link<K, V>) {
    let mut pending: Vec<Box<Node<K, V>>> = link.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::comparator::NaturalOrder;
    use rstest::rstest;

    fn build(keys: &[i32]) -> Link<i32, i32> {
        let mut root = None;
        for &key in keys {
            let slot = locate(&mut root, &NaturalOrder, &key);
            if slot.is_none() {
                *slot = Some(Box::new(Node::leaf(key, key)));
            }
        }
        root
    }

    fn in_order(link: &Link<i32, i32>) -> Vec<i32> {
        let mut stack = Spine::new();
        let mut keys = Vec::new();
        push_left_spine(link, &mut stack);
        while let Some(node) = stack.pop() {
            keys.push(node.key);
            push_left_spine(&node.right, &mut stack);
        }
        keys
    }

    #[rstest]
    fn test_locate_returns_matching_link() {
        let mut root = build(&[5, 3, 8]);
        let slot = locate(&mut root, &NaturalOrder, &8);
        assert_eq!(slot.as_ref().map(|node| node.key), Some(8));
    }

    #[rstest]
    fn test_locate_returns_empty_link_for_missing_key() {
        let mut root = build(&[5, 3, 8]);
        let slot = locate(&mut root, &NaturalOrder, &4);
        assert!(slot.is_none());
    }

    #[rstest]
    fn test_find_walks_both_directions() {
        let root = build(&[5, 3, 8, 1, 4, 7, 9]);
        for key in [1, 3, 4, 5, 7, 8, 9] {
            assert_eq!(find(&root, &NaturalOrder, &key).map(|node| node.value), Some(key));
        }
        assert!(find(&root, &NaturalOrder, &6).is_none());
    }

    #[rstest]
    fn test_splice_hangs_right_subtree_under_predecessor() {
        let Some(removed) = build(&[5, 3, 8, 1, 4]) else {
            panic!("tree should not be empty");
        };
        let Node { left, right, .. } = *removed;
        let (joined, removal) = splice(left, right);

        assert_eq!(removal, Removal::Splice);
        assert_eq!(in_order(&joined), vec![1, 3, 4, 8]);
        let predecessor = find(&joined, &NaturalOrder, &4).map(|node| node.right.is_some());
        assert_eq!(predecessor, Some(true));
    }

    #[rstest]
    #[case(&[5], Removal::Leaf)]
    #[case(&[5, 3], Removal::SingleChild)]
    #[case(&[5, 8], Removal::SingleChild)]
    fn test_splice_shapes(#[case] keys: &[i32], #[case] expected: Removal) {
        let Some(removed) = build(keys) else {
            panic!("tree should not be empty");
        };
        let Node { left, right, .. } = *removed;
        let (joined, removal) = splice(left, right);
        assert_eq!(removal, expected);
        assert_eq!(in_order(&joined).len(), keys.len() - 1);
    }

    /// Parent-first keys, with `None` for every empty child position.
    fn shape(link: &Link<i32, i32>) -> Vec<Option<i32>> {
        let mut pending = vec![link];
        let mut positions = Vec::new();
        while let Some(link) = pending.pop() {
            positions.push(link.as_ref().map(|node| node.key));
            if let Some(node) = link {
                pending.push(&node.right);
                pending.push(&node.left);
            }
        }
        positions
    }

    #[rstest]
    #[case(&[])]
    #[case(&[5])]
    #[case(&[5, 3, 8, 1, 4, 7, 9])]
    #[case(&[1, 2, 3, 4])]
    #[case(&[4, 3, 2, 1, 6, 5])]
    fn test_duplicate_keeps_shape(#[case] keys: &[i32]) {
        let original = build(keys);
        let copy = duplicate(&original);
        assert_eq!(shape(&copy), shape(&original));
        assert_eq!(in_order(&copy).len(), keys.len());
    }

    #[rstest]
    fn test_duplicate_handles_degenerate_tree() {
        let mut root: Link<i32, i32> = None;
        for key in (0..100_000).rev() {
            let mut node = Box::new(Node::leaf(key, key));
            node.right = root.take();
            root = Some(node);
        }
        let copy = duplicate(&root);
        assert_eq!(in_order(&copy), in_order(&root));
        release(copy);
        release(root);
    }

    #[rstest]
    fn test_release_handles_degenerate_tree() {
        let mut root: Link<i32, i32> = None;
        for key in (0..1_000_000).rev() {
            let mut node = Box::new(Node::leaf(key, key));
            node.right = root.take();
            root = Some(node);
        }
        release(root);
    }
}
