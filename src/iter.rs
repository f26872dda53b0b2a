//! Iterators over a [`DHeap`](crate::DHeap)

use std::iter::FusedIterator;
use std::slice;

use crate::dheap::{DHeap, Entry};
use crate::index::SlotIndex;
use crate::score::Score;

/// Borrowing iterator over `(value, score)` in array order.
///
/// Array order is heap order: the first item is the minimum, the rest are
/// only partially ordered.
#[derive(Debug, Clone)]
pub struct Iter<'a, T, S> {
    inner: slice::Iter<'a, Entry<T, S>>,
}

impl<'a, T, S> Iter<'a, T, S> {
    pub(crate) fn new(entries: &'a [Entry<T, S>]) -> Self {
        Self {
            inner: entries.iter(),
        }
    }
}

impl<'a, T, S> Iterator for Iter<'a, T, S> {
    type Item = (&'a T, &'a S);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.value, &entry.score))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, S> DoubleEndedIterator for Iter<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|entry| (&entry.value, &entry.score))
    }
}

impl<T, S> ExactSizeIterator for Iter<'_, T, S> {}
impl<T, S> FusedIterator for Iter<'_, T, S> {}

/// Pops values in ascending order. Created by
/// [`DHeap::each_pop`](crate::DHeap::each_pop).
///
/// Values not yet yielded when the iterator is dropped stay in the heap.
#[derive(Debug)]
pub struct EachPop<'a, T, S, I> {
    heap: &'a mut DHeap<T, S, I>,
}

impl<'a, T, S, I> EachPop<'a, T, S, I> {
    pub(crate) fn new(heap: &'a mut DHeap<T, S, I>) -> Self {
        Self { heap }
    }
}

impl<T, S: Score, I: SlotIndex<T>> Iterator for EachPop<'_, T, S, I> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.heap.take_root().map(|entry| entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, S: Score, I: SlotIndex<T>> ExactSizeIterator for EachPop<'_, T, S, I> {}
impl<T, S: Score, I: SlotIndex<T>> FusedIterator for EachPop<'_, T, S, I> {}

/// Pops `(value, score)` pairs in ascending order. Created by
/// [`DHeap::each_pop_with_score`](crate::DHeap::each_pop_with_score).
#[derive(Debug)]
pub struct EachPopWithScore<'a, T, S, I> {
    heap: &'a mut DHeap<T, S, I>,
}

impl<'a, T, S, I> EachPopWithScore<'a, T, S, I> {
    pub(crate) fn new(heap: &'a mut DHeap<T, S, I>) -> Self {
        Self { heap }
    }
}

impl<T, S: Score, I: SlotIndex<T>> Iterator for EachPopWithScore<'_, T, S, I> {
    type Item = (T, S);

    #[inline]
    fn next(&mut self) -> Option<(T, S)> {
        self.heap
            .take_root()
            .map(|entry| (entry.value, entry.score))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, S: Score, I: SlotIndex<T>> ExactSizeIterator for EachPopWithScore<'_, T, S, I> {}
impl<T, S: Score, I: SlotIndex<T>> FusedIterator for EachPopWithScore<'_, T, S, I> {}

#[cfg(test)]
mod tests {
    use crate::{DHeap, DHeapMap};

    #[test]
    fn test_iter_is_heap_order() {
        let mut heap: DHeap<u8, u8> = DHeap::with_branching_factor(2).unwrap();
        for v in [4, 2, 6, 1] {
            heap.push(v, v).unwrap();
        }
        let snapshot: Vec<_> = heap.iter().map(|(v, _)| *v).collect();
        assert_eq!(snapshot, [1, 2, 6, 4]);
        assert_eq!(heap.iter().len(), 4);
        assert_eq!(heap.iter().next_back(), Some((&4, &4)));
        assert_eq!((&heap).into_iter().count(), 4);
        assert_eq!(heap.to_vec(), [(1, 1), (2, 2), (6, 6), (4, 4)]);
    }

    #[test]
    fn test_each_pop_stops_early() {
        let mut heap: DHeap<u8, u8> = DHeap::new();
        for v in [5, 3, 8, 1] {
            heap.push(v, v).unwrap();
        }
        let mut popper = heap.each_pop().unwrap();
        assert_eq!(popper.len(), 4);
        assert_eq!(popper.next(), Some(1));
        assert_eq!(popper.next(), Some(3));
        drop(popper);
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.peek(), Some(&5));
    }

    #[test]
    fn test_each_pop_with_score_drains_map() {
        let mut map: DHeapMap<&str, f64> = DHeapMap::new();
        map.set("late", 2.5).unwrap();
        map.set("early", -1.0).unwrap();
        let drained: Vec<_> = map.each_pop_with_score().unwrap().collect();
        assert_eq!(drained, [("early", -1.0), ("late", 2.5)]);
        assert!(map.is_empty());
        assert!(map.is_heap());
        assert!(map.each_pop().unwrap().next().is_none());
    }
}
