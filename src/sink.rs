//! Drain targets for [`DHeap::pop_all_below`](crate::DHeap::pop_all_below)
//!
//! A [`Sink`] is anything that accepts values one at a time. Sinks with a
//! fixed amount of room report it through
//! [`remaining_capacity`](Sink::remaining_capacity); the heap checks that
//! figure before popping anything, so a sink that is too small is reported
//! as [`HeapError::SinkFull`](crate::HeapError::SinkFull) and the heap is
//! left untouched.

use std::collections::VecDeque;

use smallvec::{Array, SmallVec};

/// Receives popped values in ascending score order.
pub trait Sink<T> {
    /// Appends one value.
    fn append(&mut self, value: T);

    /// How many more values this sink accepts; `None` means unbounded.
    fn remaining_capacity(&self) -> Option<usize> {
        None
    }
}

impl<T> Sink<T> for Vec<T> {
    #[inline]
    fn append(&mut self, value: T) {
        self.push(value);
    }
}

impl<T> Sink<T> for VecDeque<T> {
    #[inline]
    fn append(&mut self, value: T) {
        self.push_back(value);
    }
}

impl<A: Array> Sink<A::Item> for SmallVec<A> {
    #[inline]
    fn append(&mut self, value: A::Item) {
        self.push(value);
    }
}

impl<T, K: Sink<T> + ?Sized> Sink<T> for &mut K {
    #[inline]
    fn append(&mut self, value: T) {
        (**self).append(value);
    }

    fn remaining_capacity(&self) -> Option<usize> {
        (**self).remaining_capacity()
    }
}

/// Adapts any [`Extend`] collection into a sink.
///
/// ```rust
/// use std::collections::BTreeSet;
/// use dheap::{DHeap, sink::Extender};
///
/// let mut heap: DHeap<u32> = DHeap::new();
/// for v in [5, 1, 3] {
///     heap.push(v, f64::from(v)).unwrap();
/// }
/// let Extender(found) = heap.pop_all_below(4.0, Extender(BTreeSet::new())).unwrap();
/// assert_eq!(found.into_iter().collect::<Vec<_>>(), [1, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extender<E>(pub E);

impl<T, E: Extend<T>> Sink<T> for Extender<E> {
    #[inline]
    fn append(&mut self, value: T) {
        self.0.extend(std::iter::once(value));
    }
}

/// A vector that refuses to grow past a fixed limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounded<T> {
    items: Vec<T>,
    limit: usize,
}

impl<T> Bounded<T> {
    /// An empty sink accepting at most `limit` values.
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::with_capacity(limit.min(1024)),
            limit,
        }
    }

    /// Values received so far.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Gives back the received values.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Number of values received.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Sink<T> for Bounded<T> {
    fn append(&mut self, value: T) {
        // pop_all_below checks the room up front, so this only drops values
        // appended directly past the limit
        if self.items.len() < self.limit {
            self.items.push(value);
        }
    }

    fn remaining_capacity(&self) -> Option<usize> {
        Some(self.limit.saturating_sub(self.items.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<K: Sink<u8>>(mut sink: K) -> K {
        for v in 0..3 {
            sink.append(v);
        }
        sink
    }

    #[test]
    fn test_unbounded_sinks() {
        assert_eq!(fill(Vec::new()), [0, 1, 2]);
        assert_eq!(fill(VecDeque::new()), [0, 1, 2]);
        assert_eq!(fill(SmallVec::<[u8; 2]>::new()).as_slice(), [0, 1, 2]);
        assert_eq!(fill(Extender(Vec::new())).0, [0, 1, 2]);
        assert_eq!(Vec::<u8>::new().remaining_capacity(), None);
    }

    #[test]
    fn test_borrowed_sink() {
        let mut target = Vec::new();
        fill(&mut target);
        assert_eq!(target, [0, 1, 2]);
    }

    #[test]
    fn test_bounded() {
        let mut sink = Bounded::<u8>::new(2);
        assert_eq!(sink.remaining_capacity(), Some(2));
        sink.append(9u8);
        assert_eq!(sink.remaining_capacity(), Some(1));
        let sink = fill(sink);
        assert_eq!(sink.as_slice(), [9, 0]);
        assert_eq!(sink.remaining_capacity(), Some(0));
        assert_eq!(sink.len(), 2);
        assert!(!sink.is_empty());
        assert_eq!(sink.into_inner(), vec![9, 0]);
    }
}
