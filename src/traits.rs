//! Common traits for score-ordered heaps
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: push, peek and pop by score, including conditional pops
//! - [`IndexedHeap`]: adds in-place score updates and removal by value
//!
//! Both are implemented by [`DHeap`] (for any branching factor), so code
//! written against them can be exercised with several heap shapes.

use std::hash::Hash;

use crate::dheap::DHeap;
use crate::error::Result;
use crate::index::{SlotIndex, ValueIndex};
use crate::score::Score;

/// Base trait for min-heaps keyed by a numeric [`Score`]
///
/// Unlike `BinaryHeap`, which orders values directly with `Ord`, these heaps
/// store `(value, score)` pairs and order by the encoded score.
///
/// # Example
///
/// ```rust
/// use dheap::{DHeap, Heap};
///
/// fn drain<H: Heap<&'static str, u32>>(mut heap: H) -> Vec<&'static str> {
///     let mut out = Vec::new();
///     while let Some(value) = heap.pop().unwrap() {
///         out.push(value);
///     }
///     out
/// }
///
/// let mut heap = <DHeap<&str, u32> as Heap<_, _>>::new();
/// heap.push("three", 3).unwrap();
/// heap.push("one", 1).unwrap();
/// assert_eq!(heap.peek_with_score(), Some((&"one", &1)));
/// assert_eq!(drain(heap), ["one", "three"]);
/// ```
pub trait Heap<T, S: Score> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of values in the heap
    fn len(&self) -> usize;

    /// Inserts a value with the given score, returning the slot it settled in
    ///
    /// # Errors
    /// Fails if the heap is frozen or the score cannot be encoded.
    fn push(&mut self, value: T, score: S) -> Result<usize>;

    /// Returns the minimum value without removing it
    fn peek(&self) -> Option<&T>;

    /// Returns the score of the minimum value
    fn peek_score(&self) -> Option<&S>;

    /// Returns the minimum value and its score
    fn peek_with_score(&self) -> Option<(&T, &S)>;

    /// Removes and returns the minimum value
    fn pop(&mut self) -> Result<Option<T>>;

    /// Removes and returns the minimum value with its score
    fn pop_with_score(&mut self) -> Result<Option<(T, S)>>;

    /// Pops the minimum only if its score is strictly below `bound`
    fn pop_lt<B: Score>(&mut self, bound: B) -> Result<Option<T>>;

    /// Pops the minimum only if its score is at most `bound`
    fn pop_lte<B: Score>(&mut self, bound: B) -> Result<Option<T>>;

    /// Removes every value
    fn clear(&mut self) -> Result<()>;
}

/// Heap that can find a queued value again
///
/// Values are unique; `set` on a queued value moves it to the new score in
/// `O(d log_d n)`.
///
/// # Example
///
/// ```rust
/// use dheap::{DHeapMap, Heap, IndexedHeap};
///
/// let mut map = <DHeapMap<u32, i64> as Heap<_, _>>::new();
/// map.set(1, 100).unwrap();
/// map.set(2, 200).unwrap();
/// map.set(2, 50).unwrap();
/// assert_eq!(IndexedHeap::get(&map, &2), Some(&50));
/// assert_eq!(IndexedHeap::delete(&mut map, &1).unwrap(), Some(100));
/// assert_eq!(Heap::len(&map), 1);
/// ```
pub trait IndexedHeap<T, S: Score>: Heap<T, S> {
    /// Inserts `value`, or moves it to `score` if already queued
    fn set(&mut self, value: T, score: S) -> Result<usize>;

    /// Score of a queued value
    fn get(&self, value: &T) -> Option<&S>;

    /// Removes a queued value, returning its score
    fn delete(&mut self, value: &T) -> Result<Option<S>>;
}

impl<T, S: Score, I: SlotIndex<T>> Heap<T, S> for DHeap<T, S, I> {
    fn new() -> Self {
        DHeap::new()
    }

    fn is_empty(&self) -> bool {
        DHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        DHeap::len(self)
    }

    fn push(&mut self, value: T, score: S) -> Result<usize> {
        DHeap::push(self, value, score)
    }

    fn peek(&self) -> Option<&T> {
        DHeap::peek(self)
    }

    fn peek_score(&self) -> Option<&S> {
        DHeap::peek_score(self)
    }

    fn peek_with_score(&self) -> Option<(&T, &S)> {
        DHeap::peek_with_score(self)
    }

    fn pop(&mut self) -> Result<Option<T>> {
        DHeap::pop(self)
    }

    fn pop_with_score(&mut self) -> Result<Option<(T, S)>> {
        DHeap::pop_with_score(self)
    }

    fn pop_lt<B: Score>(&mut self, bound: B) -> Result<Option<T>> {
        DHeap::pop_lt(self, bound)
    }

    fn pop_lte<B: Score>(&mut self, bound: B) -> Result<Option<T>> {
        DHeap::pop_lte(self, bound)
    }

    fn clear(&mut self) -> Result<()> {
        DHeap::clear(self).map(|_| ())
    }
}

impl<T: Hash + Eq + Clone, S: Score> IndexedHeap<T, S> for DHeap<T, S, ValueIndex<T>> {
    fn set(&mut self, value: T, score: S) -> Result<usize> {
        DHeap::set(self, value, score)
    }

    fn get(&self, value: &T) -> Option<&S> {
        DHeap::get(self, value)
    }

    fn delete(&mut self, value: &T) -> Result<Option<S>> {
        DHeap::delete(self, value)
    }
}
