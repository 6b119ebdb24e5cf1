//! Diagnostic rendering of a tree's shape.
//!
//! The output lists nodes parent-first, one per line, as `key: value`,
//! indented two spaces per level. Empty child positions are written as
//! `<>`, but below the root only under nodes that have at least one child,
//! so inner leaves get no child lines. The root always lists both of its
//! child positions, and the empty tree is a single `<>` line.
//!
//! ```text
//! 5: five
//!   3: three
//!   8: eight
//!     <>
//!     9: nine
//! ```

use std::fmt::{self, Write};

use super::OrderedTreeMap;
use super::node::Node;

const INDENT: &str = "  ";
const EMPTY: &str = "<>";

impl<K: fmt::Display, V: fmt::Display, C> OrderedTreeMap<K, V, C> {
    /// Writes the shape of the tree to `output`, one line per position.
    ///
    /// The root always lists both of its child positions, even when it is a
    /// leaf. Any other leaf gets no child lines.
    ///
    /// # Errors
    ///
    /// Returns any error reported by `output`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedTreeMap;
    ///
    /// let mut map = OrderedTreeMap::new();
    /// map.set(2, "two").unwrap();
    /// map.set(3, "three").unwrap();
    /// map.set(4, "four").unwrap();
    ///
    /// let mut output = String::new();
    /// map.dump(&mut output).unwrap();
    /// assert_eq!(output, "2: two\n  <>\n  3: three\n    <>\n    4: four\n");
    /// ```
    pub fn dump<W: Write + ?Sized>(&self, output: &mut W) -> fmt::Result {
        let mut pending: Vec<(Option<&Node<K, V>>, usize)> = vec![(self.root().as_deref(), 0)];
        while let Some((position, depth)) = pending.pop() {
            for _ in 0..depth {
                output.write_str(INDENT)?;
            }
            let Some(node) = position else {
                writeln!(output, "{EMPTY}")?;
                continue;
            };
            writeln!(output, "{}: {}", node.key, node.value)?;
            if depth == 0 || !node.is_leaf() {
                pending.push((node.right.as_deref(), depth + 1));
                pending.push((node.left.as_deref(), depth + 1));
            }
        }
        Ok(())
    }

    /// Renders [`dump`](Self::dump) into a new `String`.
    #[must_use]
    pub fn dump_to_string(&self) -> String {
        let mut output = String::new();
        // Writing to a String cannot fail.
        let _ = self.dump(&mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_dump_empty_tree() {
        let map: OrderedTreeMap<i32, i32> = OrderedTreeMap::new();
        assert_eq!(map.dump_to_string(), "<>\n");
    }

    #[rstest]
    fn test_dump_single_node_lists_empty_children() {
        let mut map = OrderedTreeMap::new();
        map.set(1, "one").unwrap();
        assert_eq!(map.dump_to_string(), "1: one\n  <>\n  <>\n");
    }

    #[rstest]
    fn test_dump_inner_leaves_have_no_child_lines() {
        let map: OrderedTreeMap<i32, i32> = [(2, 20), (1, 10), (3, 30)].into_iter().collect();
        assert_eq!(map.dump_to_string(), "2: 20\n  1: 10\n  3: 30\n");
    }

    #[rstest]
    fn test_dump_marks_missing_sibling() {
        let map: OrderedTreeMap<i32, i32> = [(5, 50), (3, 30), (8, 80), (9, 90)].into_iter().collect();
        let expected = "\
5: 50
  3: 30
  8: 80
    <>
    9: 90
";
        assert_eq!(map.dump_to_string(), expected);
    }

    #[rstest]
    fn test_dump_reaches_formatter() {
        let map: OrderedTreeMap<i32, i32> = [(1, 1)].into_iter().collect();
        let mut output = String::new();
        let writer: &mut dyn Write = &mut output;
        map.dump(writer).unwrap();
        assert_eq!(output, "1: 1\n  <>\n  <>\n");
    }
}
