//! Unit tests for OrderedTreeMap.

use bstmap::{MapError, NaturalOrder, OrderedTreeMap, PartialOrder, Reversed, TextualOrder};
use rstest::{fixture, rstest};

#[fixture]
fn balanced() -> OrderedTreeMap<i32, i32> {
    let _ = env_logger::try_init();
    let mut map = OrderedTreeMap::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        map.set(key, key).unwrap();
    }
    map
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_map() {
    let map: OrderedTreeMap<i32, String> = OrderedTreeMap::new();
    assert!(map.is_empty());
    assert_eq!(map.size(), 0);
    assert_eq!(map.keys().count(), 0);
}

#[rstest]
fn test_default_creates_empty_map() {
    let map: OrderedTreeMap<i32, String, NaturalOrder> = OrderedTreeMap::default();
    assert!(map.is_empty());
}

// =============================================================================
// Set and Get Tests
// =============================================================================

#[rstest]
fn test_set_fresh_key_returns_none() {
    let mut map = OrderedTreeMap::new();
    assert_eq!(map.set("a", 1), Ok(None));
    assert_eq!(map.size(), 1);
}

#[rstest]
fn test_set_existing_key_returns_previous_value() {
    let mut map = OrderedTreeMap::new();
    map.set("a", 1).unwrap();
    assert_eq!(map.set("a", 2), Ok(Some(1)));
    assert_eq!(map.get(&"a"), Ok(&2));
    assert_eq!(map.size(), 1);
}

#[rstest]
fn test_get_returns_last_value_set() {
    let mut map = OrderedTreeMap::new();
    for (key, value) in [(1, 'a'), (2, 'b'), (1, 'c'), (3, 'd'), (2, 'e')] {
        map.set(key, value).unwrap();
    }
    assert_eq!(map.get(&1), Ok(&'c'));
    assert_eq!(map.get(&2), Ok(&'e'));
    assert_eq!(map.get(&3), Ok(&'d'));
    assert_eq!(map.size(), 3);
}

#[rstest]
fn test_get_unknown_key_fails(balanced: OrderedTreeMap<i32, i32>) {
    assert_eq!(balanced.get(&6), Err(MapError::KeyNotFound));
    assert_eq!(balanced.try_get(&6), None);
    assert!(!balanced.contains_key(&6));
}

#[rstest]
fn test_get_on_empty_map_fails() {
    let map: OrderedTreeMap<i32, i32> = OrderedTreeMap::new();
    assert_eq!(map.get(&1), Err(MapError::KeyNotFound));
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(9)]
fn test_contains_key_existing(balanced: OrderedTreeMap<i32, i32>, #[case] key: i32) {
    assert!(balanced.contains_key(&key));
    assert_eq!(balanced.try_get(&key), Some(&key));
}

// =============================================================================
// Traversal Tests
// =============================================================================

#[rstest]
fn test_keys_round_trip(balanced: OrderedTreeMap<i32, i32>) {
    let keys: Vec<i32> = balanced.keys().copied().collect();
    assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
}

#[rstest]
fn test_values_follow_key_order() {
    let mut map = OrderedTreeMap::new();
    for (key, value) in [(2, "two"), (3, "three"), (1, "one")] {
        map.set(key, value).unwrap();
    }
    let values: Vec<&str> = map.values().copied().collect();
    assert_eq!(values, vec!["one", "two", "three"]);
}

#[rstest]
fn test_keys_yield_exactly_size_elements(balanced: OrderedTreeMap<i32, i32>) {
    assert_eq!(balanced.keys().len(), balanced.size());
    assert_eq!(balanced.keys().count(), balanced.size());
}

#[rstest]
fn test_fresh_traversal_restarts(balanced: OrderedTreeMap<i32, i32>) {
    let mut first = balanced.keys();
    first.next();
    first.next();
    assert_eq!(balanced.keys().next(), Some(&1));
    assert_eq!(first.next(), Some(&4));
}

#[rstest]
fn test_for_each_is_in_order(balanced: OrderedTreeMap<i32, i32>) {
    let mut visited = Vec::new();
    balanced.for_each(|key, value| visited.push((*key, *value)));
    let expected: Vec<(i32, i32)> = balanced.iter().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(visited, expected);
}

// =============================================================================
// Remove Tests
// =============================================================================

#[rstest]
fn test_remove_two_child_node_splices() {
    let mut map = OrderedTreeMap::new();
    for key in [5, 3, 8, 1, 4] {
        map.set(key, key).unwrap();
    }
    assert_eq!(map.remove(&5), Ok(Some(5)));
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 3, 4, 8]);
    assert_eq!(map.get(&4), Ok(&4));
    assert_eq!(map.get(&8), Ok(&8));
    assert_eq!(map.get(&5), Err(MapError::KeyNotFound));
}

#[rstest]
fn test_remove_absent_key_changes_nothing(balanced: OrderedTreeMap<i32, i32>) {
    let mut map = balanced;
    let before: Vec<(i32, i32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(map.remove(&6), Ok(None));
    assert_eq!(map.size(), 7);
    let after: Vec<(i32, i32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(before, after);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
#[case(8)]
#[case(9)]
fn test_remove_present_key_shrinks_by_one(balanced: OrderedTreeMap<i32, i32>, #[case] key: i32) {
    let mut map = balanced;
    assert_eq!(map.remove(&key), Ok(Some(key)));
    assert_eq!(map.size(), 6);
    assert_eq!(map.get(&key), Err(MapError::KeyNotFound));
    assert_eq!(map.try_get(&key), None);
}

#[rstest]
fn test_remove_everything_empties_map(balanced: OrderedTreeMap<i32, i32>) {
    let mut map = balanced;
    for key in [5, 3, 8, 1, 4, 7, 9] {
        assert_eq!(map.remove(&key), Ok(Some(key)));
    }
    assert!(map.is_empty());
    assert_eq!(map.dump_to_string(), "<>\n");
}

#[rstest]
fn test_remove_from_empty_map() {
    let mut map: OrderedTreeMap<i32, i32> = OrderedTreeMap::new();
    assert_eq!(map.remove(&1), Ok(None));
    assert_eq!(map.size(), 0);
}

// =============================================================================
// Comparison Rule Tests
// =============================================================================

#[rstest]
fn test_textual_order_sorts_by_rendering() {
    let mut map = OrderedTreeMap::with_textual_order();
    for key in [9, 10, 100, 2] {
        map.set(key, ()).unwrap();
    }
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![10, 100, 2, 9]);
    assert_eq!(map.comparator(), &TextualOrder);
}

#[rstest]
fn test_reversed_order_descends() {
    let mut map = OrderedTreeMap::with_comparator(Reversed(NaturalOrder));
    for key in [2, 3, 1] {
        map.set(key, key).unwrap();
    }
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![3, 2, 1]);
}

#[rstest]
fn test_closure_comparator_merges_equal_keys() {
    let mut map = OrderedTreeMap::with_comparator(|left: &String, right: &String| {
        left.to_lowercase().cmp(&right.to_lowercase())
    });
    map.set("Apple".to_string(), 1).unwrap();
    assert_eq!(map.set("APPLE".to_string(), 2), Ok(Some(1)));
    assert_eq!(map.size(), 1);
    assert_eq!(map.keys().next().map(String::as_str), Some("Apple"));
}

#[rstest]
fn test_partial_order_rejects_nan_without_mutation() {
    let mut map = OrderedTreeMap::with_comparator(PartialOrder);
    map.set(0.5, "half").unwrap();
    assert_eq!(map.set(f64::NAN, "nan"), Err(MapError::InvalidKey));
    assert_eq!(map.remove(&f64::NAN), Err(MapError::InvalidKey));
    assert_eq!(map.get(&f64::NAN), Err(MapError::InvalidKey));
    assert_eq!(map.size(), 1);
    assert_eq!(map.get(&0.5), Ok(&"half"));
}

// =============================================================================
// Degenerate Shape Tests
// =============================================================================

#[rstest]
fn test_sorted_inserts_build_a_list() {
    let map: OrderedTreeMap<u32, u32> = (0..2_000).map(|key| (key, key)).collect();
    assert_eq!(map.height(), 2_000);
    assert_eq!(map.keys().count(), 2_000);
    assert_eq!(map.get(&1_999), Ok(&1_999));
}

#[rstest]
fn test_degenerate_remove_and_clone() {
    let mut map: OrderedTreeMap<u32, u32> = (0..2_000).rev().map(|key| (key, key)).collect();
    let copy = map.clone();
    assert_eq!(map.remove(&0), Ok(Some(0)));
    assert_eq!(map.size(), 1_999);
    assert_eq!(copy.size(), 2_000);
    assert_eq!(copy.height(), 2_000);
}
