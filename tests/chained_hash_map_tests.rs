//! Scenario tests for ChainedHashMap.

use rstest::{fixture, rstest};
use twin_maps::{BuildIdentityHasher, ChainedHashMap, MapError, DEFAULT_BUCKET_COUNT};

type IdentityMap = ChainedHashMap<u64, u64, BuildIdentityHasher>;

fn identity_map(bucket_count: usize) -> IdentityMap {
    ChainedHashMap::with_buckets_and_hasher(bucket_count, BuildIdentityHasher).unwrap()
}

fn entries(map: &IdentityMap) -> Vec<(u64, u64)> {
    map.iter().map(|(key, value)| (*key, *value)).collect()
}

/// Two buckets holding 1, 2 and 3 with identity hashing: bucket 0 has 2,
/// bucket 1 chains 1 then 3.
#[fixture]
fn two_buckets() -> IdentityMap {
    let mut map = identity_map(2);
    for key in [1, 2, 3] {
        *map.get_or_insert(key) = key * 100;
    }
    map
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_default_map() {
    let map: ChainedHashMap<String, i32> = ChainedHashMap::new();
    assert!(map.is_empty());
    assert_eq!(DEFAULT_BUCKET_COUNT, map.bucket_count());
    assert!(map.begin() == map.end());
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(50_001)]
fn test_bucket_count_is_fixed(#[case] bucket_count: usize) {
    let mut map: ChainedHashMap<u32, u32> = ChainedHashMap::with_buckets(bucket_count).unwrap();
    for key in 0..1_000 {
        *map.get_or_insert(key) = key;
    }
    assert_eq!(bucket_count, map.bucket_count());
    assert_eq!(1_000, map.len());

    let total: usize = (0..bucket_count).map(|bucket| map.bucket_len(bucket).unwrap()).sum();
    assert_eq!(1_000, total);
}

#[rstest]
fn test_zero_buckets_is_an_error() {
    let result: Result<ChainedHashMap<u32, u32>, MapError> = ChainedHashMap::with_buckets(0);
    assert_eq!(Some(MapError::ZeroBucketCount), result.err());
}

// =============================================================================
// Layout, lookup and removal
// =============================================================================

#[rstest]
fn test_two_bucket_scenario(mut two_buckets: IdentityMap) {
    assert_eq!(vec![(2, 200), (1, 100), (3, 300)], entries(&two_buckets));
    assert_eq!(Some(1), two_buckets.bucket_len(0));
    assert_eq!(Some(2), two_buckets.bucket_len(1));

    let found = two_buckets.find(&3);
    assert!(!found.is_end());
    assert_eq!(Some(&300), found.value());

    assert_eq!(Ok(100), two_buckets.remove(&1));
    assert_eq!(2, two_buckets.len());
    assert_eq!(Some(1), two_buckets.bucket_len(1));
    assert_eq!(vec![(2, 200), (3, 300)], entries(&two_buckets));
}

#[rstest]
#[case::head(1, vec![(2, 200), (3, 300), (5, 500)])]
#[case::middle(3, vec![(2, 200), (1, 100), (5, 500)])]
#[case::tail(5, vec![(2, 200), (1, 100), (3, 300)])]
fn test_remove_from_any_point_in_chain(
    mut two_buckets: IdentityMap,
    #[case] key: u64,
    #[case] expected: Vec<(u64, u64)>,
) {
    two_buckets.insert(5, 500);

    assert_eq!(Ok(key * 100), two_buckets.remove(&key));
    assert_eq!(expected, entries(&two_buckets));

    // the chain must still walk cleanly backwards too
    let mut backward: Vec<(u64, u64)> = two_buckets.iter().rev().map(|(k, v)| (*k, *v)).collect();
    backward.reverse();
    assert_eq!(expected, backward);
}

#[rstest]
fn test_remove_missing_key_leaves_map_alone(mut two_buckets: IdentityMap) {
    let before = entries(&two_buckets);

    assert_eq!(Err(MapError::KeyNotFound), two_buckets.remove(&7));
    assert_eq!(Err(MapError::KeyNotFound), two_buckets.lookup(&7));
    assert_eq!(3, two_buckets.len());
    assert_eq!(before, entries(&two_buckets));
}

#[rstest]
fn test_remove_then_reinsert_yields_default(mut two_buckets: IdentityMap) {
    two_buckets.remove(&3).unwrap();
    assert_eq!(0, *two_buckets.get_or_insert(3));

    // and it goes back on the tail of its chain
    assert_eq!(vec![(2, 200), (1, 100), (3, 0)], entries(&two_buckets));
}

#[rstest]
fn test_remove_at_positions(mut two_buckets: IdentityMap) {
    let position = two_buckets.find(&1).position();
    assert_eq!(1, position.bucket());
    assert_eq!(Ok((1, 100)), two_buckets.remove_at(position));

    let end = two_buckets.end().position();
    assert_eq!(Err(MapError::InvalidIterator), two_buckets.remove_at(end));
    assert_eq!(2, two_buckets.len());
}

#[rstest]
fn test_lookup_mut_changes_value(mut two_buckets: IdentityMap) {
    *two_buckets.lookup_mut(&2).unwrap() += 1;
    assert_eq!(Ok(&201), two_buckets.lookup(&2));
    assert_eq!(Err(MapError::KeyNotFound), two_buckets.lookup_mut(&4));
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_cursor_crosses_empty_buckets_both_ways() {
    let mut map = identity_map(10);
    for key in [9, 0, 4, 14] {
        map.insert(key, key);
    }

    let mut forward = Vec::new();
    let mut cursor = map.begin();
    while !cursor.is_end() {
        forward.push(*cursor.key().unwrap());
        cursor.move_next().unwrap();
    }
    assert_eq!(vec![0, 4, 14, 9], forward);
    assert_eq!(Err(MapError::InvalidIterator), cursor.move_next());

    let mut backward = Vec::new();
    while cursor.move_prev().is_ok() {
        backward.push(*cursor.key().unwrap());
    }
    assert_eq!(vec![9, 14, 4, 0], backward);
    assert!(cursor == map.begin());
}

// =============================================================================
// Equality, copies and moves
// =============================================================================

#[rstest]
fn test_equality_ignores_layout() {
    let small: IdentityMap = {
        let mut map = identity_map(2);
        map.extend(vec![(1, 1), (2, 2), (3, 3)]);
        map
    };
    let large: IdentityMap = {
        let mut map = identity_map(7);
        map.extend(vec![(3, 3), (1, 1), (2, 2)]);
        map
    };

    assert_eq!(small, large);
    assert_eq!(large, small);
    assert_eq!(small, small.clone());
}

#[rstest]
fn test_equality_sees_values_and_sizes(two_buckets: IdentityMap) {
    let mut changed = two_buckets.clone();
    *changed.get_or_insert(2) = 0;
    assert_ne!(two_buckets, changed);

    let mut bigger = two_buckets.clone();
    bigger.get_or_insert(4);
    assert_ne!(two_buckets, bigger);
}

#[rstest]
fn test_clone_is_independent(two_buckets: IdentityMap) {
    let mut copy = two_buckets.clone();
    copy.remove(&1).unwrap();
    *copy.get_or_insert(2) = 7;

    assert_eq!(3, two_buckets.len());
    assert_eq!(Ok(&200), two_buckets.lookup(&2));
}

#[rstest]
fn test_take_leaves_valid_empty_map(mut two_buckets: IdentityMap) {
    let moved = two_buckets.take();

    assert_eq!(3, moved.len());
    assert!(two_buckets.is_empty());
    assert_eq!(2, two_buckets.bucket_count());
    assert_eq!(0, two_buckets.iter().count());
    assert_eq!(Err(MapError::KeyNotFound), two_buckets.remove(&1));
}

#[rstest]
fn test_debug_lists_entries(two_buckets: IdentityMap) {
    assert_eq!("{2: 200, 1: 100, 3: 300}", format!("{:?}", two_buckets));
}
