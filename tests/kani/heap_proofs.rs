//! Bounded proofs over small d-ary heaps

use dheap::{Backend, DHeap, HeapConfig};

fn scalar_heap(d: usize) -> DHeap<u8, i32> {
    let config = HeapConfig::default()
        .with_branching_factor(d)
        .with_capacity(4)
        .with_backend(Backend::Scalar);
    match DHeap::with_config(config) {
        Ok(heap) => heap,
        Err(_) => unreachable!(),
    }
}

/// Proof: an empty heap has nothing to peek or pop
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(5)]
fn verify_empty_heap_operations() {
    let mut heap = scalar_heap(2);

    assert!(heap.is_empty());
    assert!(heap.len() == 0);
    assert!(heap.peek().is_none());
    assert!(heap.pop() == Ok(None));
    assert!(heap.pop_lte(i32::MAX) == Ok(None));
}

/// Proof: a single pushed value comes straight back
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(5)]
fn verify_single_element_heap() {
    let mut heap = scalar_heap(4);

    let value: u8 = kani::any();
    let score: i32 = kani::any();
    assert!(heap.push(value, score) == Ok(0));
    assert!(heap.len() == 1);
    assert!(heap.peek_with_score() == Some((&value, &score)));

    assert!(heap.pop_lt(score) == Ok(None));
    assert!(heap.pop_with_score() == Ok(Some((value, score))));
    assert!(heap.is_empty());
}

/// Proof: three arbitrary scores pop in ascending order
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_three_pops_are_sorted() {
    let d: usize = kani::any();
    kani::assume(d >= 2 && d <= 3);
    let mut heap = scalar_heap(d);

    let a: i32 = kani::any();
    let b: i32 = kani::any();
    let c: i32 = kani::any();
    assert!(heap.push(0, a).is_ok());
    assert!(heap.push(1, b).is_ok());
    assert!(heap.push(2, c).is_ok());
    assert!(heap.is_heap());

    let mut last = i32::MIN;
    for _ in 0..3 {
        match heap.pop_with_score() {
            Ok(Some((_, score))) => {
                assert!(score >= last);
                last = score;
            }
            _ => unreachable!(),
        }
    }
    assert!(heap.is_empty());
}

/// Proof: a conditional pop never takes a value at or above its bound
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(5)]
fn verify_pop_lt_respects_bound() {
    let mut heap = scalar_heap(2);
    let a: i32 = kani::any();
    let b: i32 = kani::any();
    let bound: i32 = kani::any();
    assert!(heap.push(0, a).is_ok());
    assert!(heap.push(1, b).is_ok());

    let min = if a <= b { a } else { b };
    match heap.pop_lt(bound) {
        Ok(Some(_)) => assert!(min < bound && heap.len() == 1),
        Ok(None) => assert!(min >= bound && heap.len() == 2),
        Err(_) => unreachable!(),
    }
}
