//! Value-to-slot bookkeeping for indexed heaps
//!
//! The heap core reports every slot change to its [`SlotIndex`]. The plain
//! heap uses [`NoIndex`], whose hooks compile away. [`ValueIndex`] keeps an
//! `FxHashMap` from value to slot, which is what lets
//! [`DHeapMap`](crate::DHeapMap) update or delete a value in `O(log n)`
//! instead of searching the array.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Tracks where each value sits in the heap array.
///
/// After every public heap operation, each entry at slot `i` satisfies
/// `position(value) == Some(i)`.
pub trait SlotIndex<T>: Default {
    /// Slot currently holding `value`, if the index tracks it.
    fn position(&self, value: &T) -> Option<usize>;

    /// `value` now lives at `slot`.
    fn placed(&mut self, value: &T, slot: usize);

    /// `value` left the heap.
    fn removed(&mut self, value: &T);

    /// Every value left the heap.
    fn cleared(&mut self);

    /// Number of tracked values, or `None` for an index that tracks nothing.
    fn tracked(&self) -> Option<usize>;
}

/// The index of a plain heap: tracks nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoIndex;

impl<T> SlotIndex<T> for NoIndex {
    #[inline(always)]
    fn position(&self, _value: &T) -> Option<usize> {
        None
    }

    #[inline(always)]
    fn placed(&mut self, _value: &T, _slot: usize) {}

    #[inline(always)]
    fn removed(&mut self, _value: &T) {}

    #[inline(always)]
    fn cleared(&mut self) {}

    #[inline(always)]
    fn tracked(&self) -> Option<usize> {
        None
    }
}

/// Hash index from value to slot.
#[derive(Debug, Clone)]
pub struct ValueIndex<T> {
    slots: FxHashMap<T, usize>,
}

impl<T> Default for ValueIndex<T> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
        }
    }
}

impl<T: Hash + Eq> ValueIndex<T> {
    /// Slot of any value that borrows as `Q`.
    #[inline]
    pub fn slot_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(value).copied()
    }

    /// Number of tracked values.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: Hash + Eq + Clone> SlotIndex<T> for ValueIndex<T> {
    #[inline]
    fn position(&self, value: &T) -> Option<usize> {
        self.slots.get(value).copied()
    }

    #[inline]
    fn placed(&mut self, value: &T, slot: usize) {
        if let Some(current) = self.slots.get_mut(value) {
            *current = slot;
        } else {
            self.slots.insert(value.clone(), slot);
        }
    }

    #[inline]
    fn removed(&mut self, value: &T) {
        self.slots.remove(value);
    }

    fn cleared(&mut self) {
        self.slots.clear();
    }

    fn tracked(&self) -> Option<usize> {
        Some(self.slots.len())
    }
}
