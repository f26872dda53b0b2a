//! Tests for the value-indexed heap

use dheap::{DHeapMap, HeapError, IndexedHeap};

#[test]
fn test_two_values_scenario() {
    let mut map: DHeapMap<&str, i32> = DHeapMap::new();
    map.push("a", 123).unwrap();
    map.push("b", 5).unwrap();

    assert_eq!(map.get("a"), Some(&123));
    assert_eq!(map.pop().unwrap(), Some("b"));
    assert_eq!(map.get("b"), None);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_set_moves_value_up_and_down() {
    let mut map: DHeapMap<u32, i64> = DHeapMap::with_branching_factor(2).unwrap();
    for v in 0..31 {
        map.set(v, i64::from(v) * 10).unwrap();
    }

    // decrease-key on a leaf
    let slot = map.set(30, -1).unwrap();
    assert_eq!(slot, 0);
    assert_eq!(map.peek(), Some(&30));
    assert!(map.is_heap());

    // increase-key on the root
    map.set(30, 1_000).unwrap();
    assert_eq!(map.peek(), Some(&0));
    assert_eq!(map.get(&30), Some(&1_000));
    assert!(map.is_heap());

    // same score: nothing moves
    let before = map.slot_of(&17);
    map.set(17, 170).unwrap();
    assert_eq!(map.slot_of(&17), before);

    let drained: Vec<i64> = map.each_pop_with_score().unwrap().map(|(_, s)| s).collect();
    let mut sorted = drained.clone();
    sorted.sort_unstable();
    assert_eq!(drained, sorted);
    assert_eq!(drained.len(), 31);
}

#[test]
fn test_repeated_values_are_unique() {
    // the same values pushed many times end up queued once, at their last score
    let mut map: DHeapMap<char, u32> = DHeapMap::new();
    for round in 0..5u32 {
        for (i, c) in ['e', 'a', 'd', 'b', 'c'].into_iter().enumerate() {
            map.push(c, round * 100 + i as u32).unwrap();
        }
    }
    assert_eq!(map.len(), 5);
    let order: String = map.each_pop().unwrap().collect();
    assert_eq!(order, "eadbc");
}

#[test]
fn test_delete_from_every_position() {
    for d in [2, 3, 4, 9] {
        for victim in 0..40u32 {
            let mut map: DHeapMap<u32, u32> = DHeapMap::with_branching_factor(d).unwrap();
            for v in 0..40u32 {
                map.set(v, (v * 37) % 41).unwrap();
            }
            assert_eq!(map.delete(&victim).unwrap(), Some((victim * 37) % 41));
            assert!(map.is_heap(), "d={d} victim={victim}");
            assert!(!map.contains(&victim));
            assert_eq!(map.len(), 39);

            let drained: Vec<u32> = map.each_pop_with_score().unwrap().map(|(_, s)| s).collect();
            assert!(drained.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

#[test]
fn test_delete_missing_is_none() {
    let mut map: DHeapMap<String, f64> = DHeapMap::new();
    assert_eq!(map.delete("ghost").unwrap(), None);
    map.set("real".to_owned(), 1.0).unwrap();
    assert_eq!(map.remove("ghost").unwrap(), None);
    assert_eq!(map.remove("real").unwrap(), Some(("real".to_owned(), 1.0)));
    assert!(map.is_empty());
}

#[test]
fn test_frozen_map_rejects_updates() {
    let mut map: DHeapMap<&str, u8> = DHeapMap::new();
    map.set("x", 1).unwrap();
    map.freeze();

    assert_eq!(map.set("x", 0), Err(HeapError::Frozen));
    assert_eq!(map.delete("x"), Err(HeapError::Frozen));
    assert_eq!(map.get("x"), Some(&1));
    assert!(map.contains("x"));

    let mut thawed = map.clone();
    thawed.set("y", 0).unwrap();
    assert_eq!(thawed.peek(), Some(&"y"));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_bad_score_does_not_touch_index() {
    let mut map: DHeapMap<u8> = DHeapMap::new();
    map.set(1, 1.0).unwrap();
    assert!(map.set(1, f64::NAN).is_err());
    assert!(map.set(2, f64::NAN).is_err());
    assert_eq!(map.get(&1), Some(&1.0));
    assert!(!map.contains(&2));
    assert!(map.is_heap());
}

#[test]
fn test_trait_interface() {
    fn bump<H: IndexedHeap<u32, i32>>(heap: &mut H, value: u32, by: i32) {
        let current = heap.get(&value).copied().unwrap_or(0);
        heap.set(value, current + by).unwrap();
    }

    let mut map: DHeapMap<u32, i32> = DHeapMap::new();
    bump(&mut map, 1, 5);
    bump(&mut map, 2, 3);
    bump(&mut map, 2, 3);
    assert_eq!(map.peek_with_score(), Some((&1, &5)));
    assert_eq!(IndexedHeap::delete(&mut map, &1).unwrap(), Some(5));
    assert_eq!(map.peek_with_score(), Some((&2, &6)));
}
