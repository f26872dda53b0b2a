//! d-ary min-heap
//!
//! An array-backed heap where every node has up to `d` children. A larger `d`
//! makes the tree shallower, so pushes touch fewer levels while each pop
//! compares more children per level; the children of a node are contiguous,
//! and the smallest of them is found with [`min_index`] in one vectorized
//! pass.
//!
//! Scores are encoded into [`ComparableKey`]s once, on the way in, and the
//! original score is kept alongside so it can be handed back unchanged.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity         |
//! |-------------------|--------------------|
//! | `push`            | O(log_d n)         |
//! | `pop`             | O(d log_d n)       |
//! | `peek`            | O(1)               |
//! | `pop_lt/pop_lte`  | O(d log_d n)       |
//! | `pop_all_below`   | O(k d log_d n)     |
//! | `set` / `delete`  | O(d log_d n) (map) |
//!
//! # Example
//!
//! ```rust
//! use dheap::DHeap;
//!
//! let mut heap: DHeap<&str, i32> = DHeap::with_branching_factor(3).unwrap();
//! heap.push("three", 3).unwrap();
//! heap.push("one", 1).unwrap();
//! heap.push("two", 2).unwrap();
//!
//! assert_eq!(heap.peek_with_score(), Some((&"one", &1)));
//! assert_eq!(heap.pop_lt(1).unwrap(), None);
//! assert_eq!(heap.pop_lte(1).unwrap(), Some("one"));
//! assert_eq!(heap.pop().unwrap(), Some("two"));
//! assert_eq!(heap.pop_with_score().unwrap(), Some(("three", 3)));
//! assert_eq!(heap.pop().unwrap(), None);
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

use min_index::{Backend, OrderedKey};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::{HeapConfig, DEFAULT_CAPACITY, DEFAULT_D};
use crate::error::{HeapError, Result};
use crate::index::{NoIndex, SlotIndex, ValueIndex};
use crate::iter::{EachPop, EachPopWithScore, Iter};
use crate::key::ComparableKey;
use crate::score::Score;
use crate::sink::Sink;

/// One slot of the heap array. Ordered by `key` alone.
#[derive(Debug, Clone)]
pub(crate) struct Entry<T, S> {
    pub(crate) key: ComparableKey,
    pub(crate) score: S,
    pub(crate) value: T,
}

impl<T, S> OrderedKey for Entry<T, S> {
    #[inline(always)]
    fn ordered_bits(&self) -> u128 {
        self.key.to_bits()
    }
}

/// A d-ary min-heap of values ordered by numeric score.
///
/// `S` is the score type (anything implementing [`Score`]) and `I` decides
/// whether values are indexed; see [`DHeapMap`] for the indexed flavour.
///
/// A heap can be frozen with [`freeze`](Self::freeze), after which every
/// mutating method fails with [`HeapError::Frozen`]. Clones are never frozen.
#[derive(Debug)]
pub struct DHeap<T, S = f64, I = NoIndex> {
    pub(crate) entries: Vec<Entry<T, S>>,
    d: usize,
    backend: Backend,
    frozen: bool,
    pub(crate) index: I,
}

/// A [`DHeap`] that also maps each value to its slot.
///
/// Values are unique: pushing a value that is already queued replaces its
/// score (last write wins) and re-sifts it, exactly like
/// [`set`](DHeap::set).
///
/// ```rust
/// use dheap::DHeapMap;
///
/// let mut map: DHeapMap<&str, i64> = DHeapMap::new();
/// map.set("a", 123).unwrap();
/// map.set("b", 5).unwrap();
/// assert_eq!(map.peek_with_score(), Some((&"b", &5)));
///
/// map.set("a", 1).unwrap();
/// assert_eq!(map.peek(), Some(&"a"));
/// assert_eq!(map.get("b"), Some(&5));
/// assert_eq!(map.delete("b").unwrap(), Some(5));
/// assert_eq!(map.len(), 1);
/// ```
pub type DHeapMap<T, S = f64> = DHeap<T, S, ValueIndex<T>>;

impl<T, S: Score, I: SlotIndex<T>> DHeap<T, S, I> {
    /// Creates an empty heap with the default branching factor.
    pub fn new() -> Self {
        Self::build(DEFAULT_D, DEFAULT_CAPACITY, min_index::detect())
    }

    /// Creates an empty heap with `d` children per node.
    ///
    /// # Errors
    /// [`HeapError::InvalidBranchingFactor`] unless `2 <= d <= MAX_D`.
    pub fn with_branching_factor(d: usize) -> Result<Self> {
        Self::with_config(HeapConfig::default().with_branching_factor(d))
    }

    /// Creates an empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(DEFAULT_D, capacity, min_index::detect())
    }

    /// Creates an empty heap from a full configuration.
    ///
    /// # Errors
    /// [`HeapError::InvalidBranchingFactor`] unless `2 <= d <= MAX_D`.
    pub fn with_config(config: HeapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            config.branching_factor,
            config.capacity,
            config.resolved_backend(),
        ))
    }

    fn build(d: usize, capacity: usize, backend: Backend) -> Self {
        debug!(d, capacity, %backend, "created d-ary heap");
        Self {
            entries: Vec::with_capacity(capacity),
            d,
            backend,
            frozen: false,
            index: I::default(),
        }
    }

    /// Number of queued values.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Children per node.
    #[inline]
    pub fn branching_factor(&self) -> usize {
        self.d
    }

    /// The min-finder backend used by sift-down.
    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Entries the heap can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.ensure_mutable()?;
        self.entries.reserve(additional);
        Ok(())
    }

    /// Releases unused capacity.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.entries.shrink_to_fit();
        Ok(())
    }

    /// Whether [`freeze`](Self::freeze) has been called.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Makes the heap read-only. Cannot be undone, but clones start unfrozen.
    pub fn freeze(&mut self) -> &mut Self {
        if !self.frozen {
            trace!(len = self.entries.len(), "freezing heap");
            self.frozen = true;
        }
        self
    }

    #[inline]
    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            Err(HeapError::Frozen)
        } else {
            Ok(())
        }
    }

    /// Inserts `value` with `score` and returns the slot it settled in.
    ///
    /// On an indexed heap, a value that is already queued gets the new score
    /// instead of a second entry.
    ///
    /// # Errors
    /// [`HeapError::Frozen`], or [`HeapError::Encoding`] if the score has no
    /// key (NaN, for instance). The heap is unchanged on error.
    pub fn push(&mut self, value: T, score: S) -> Result<usize> {
        self.ensure_mutable()?;
        let key = score.encode()?;

        if let Some(slot) = self.index.position(&value) {
            return Ok(self.rekey(slot, key, score));
        }

        let slot = self.entries.len();
        if slot == self.entries.capacity() {
            trace!(capacity = slot, "heap storage full, growing");
        }
        self.entries.push(Entry { key, score, value });
        self.index.placed(&self.entries[slot].value, slot);
        Ok(self.sift_up(slot))
    }

    /// Returns the minimum value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|entry| &entry.value)
    }

    /// Returns the minimum value's score.
    #[inline]
    pub fn peek_score(&self) -> Option<&S> {
        self.entries.first().map(|entry| &entry.score)
    }

    /// Returns the minimum value and its score.
    #[inline]
    pub fn peek_with_score(&self) -> Option<(&T, &S)> {
        self.entries.first().map(|entry| (&entry.value, &entry.score))
    }

    /// Returns the minimum value's encoded key.
    #[inline]
    pub fn peek_key(&self) -> Option<ComparableKey> {
        self.entries.first().map(|entry| entry.key)
    }

    /// Removes and returns the minimum value.
    ///
    /// # Errors
    /// [`HeapError::Frozen`].
    pub fn pop(&mut self) -> Result<Option<T>> {
        self.ensure_mutable()?;
        Ok(self.take_root().map(|entry| entry.value))
    }

    /// Removes and returns the minimum value with its score.
    ///
    /// # Errors
    /// [`HeapError::Frozen`].
    pub fn pop_with_score(&mut self) -> Result<Option<(T, S)>> {
        self.ensure_mutable()?;
        Ok(self.take_root().map(|entry| (entry.value, entry.score)))
    }

    /// Pops the minimum only if its score is strictly below `bound`.
    ///
    /// # Errors
    /// [`HeapError::Frozen`], or [`HeapError::Encoding`] if `bound` has no
    /// key. Nothing is popped on error.
    pub fn pop_lt<B: Score>(&mut self, bound: B) -> Result<Option<T>> {
        Ok(self.pop_if(bound, false)?.map(|entry| entry.value))
    }

    /// Pops the minimum only if its score is at most `bound`.
    ///
    /// # Errors
    /// As for [`pop_lt`](Self::pop_lt).
    pub fn pop_lte<B: Score>(&mut self, bound: B) -> Result<Option<T>> {
        Ok(self.pop_if(bound, true)?.map(|entry| entry.value))
    }

    /// [`pop_lt`](Self::pop_lt), also returning the score.
    pub fn pop_lt_with_score<B: Score>(&mut self, bound: B) -> Result<Option<(T, S)>> {
        Ok(self
            .pop_if(bound, false)?
            .map(|entry| (entry.value, entry.score)))
    }

    /// [`pop_lte`](Self::pop_lte), also returning the score.
    pub fn pop_lte_with_score<B: Score>(&mut self, bound: B) -> Result<Option<(T, S)>> {
        Ok(self
            .pop_if(bound, true)?
            .map(|entry| (entry.value, entry.score)))
    }

    fn pop_if<B: Score>(&mut self, bound: B, inclusive: bool) -> Result<Option<Entry<T, S>>> {
        self.ensure_mutable()?;
        let bound = bound.encode()?;
        let qualifies = match self.entries.first() {
            Some(root) if inclusive => root.key <= bound,
            Some(root) => root.key < bound,
            None => false,
        };
        Ok(if qualifies { self.take_root() } else { None })
    }

    /// Pops every value scored strictly below `bound` into `sink`, in
    /// ascending order, and hands the sink back.
    ///
    /// A sink that reports a [`remaining_capacity`](Sink::remaining_capacity)
    /// is checked before anything is popped.
    ///
    /// # Errors
    /// [`HeapError::Frozen`], [`HeapError::Encoding`] for a bad bound, or
    /// [`HeapError::SinkFull`]. Nothing is popped on error.
    ///
    /// ```rust
    /// use dheap::DHeap;
    ///
    /// let mut heap: DHeap<char, u32> = DHeap::new();
    /// for (c, score) in [('c', 30), ('a', 10), ('d', 40), ('b', 20)] {
    ///     heap.push(c, score).unwrap();
    /// }
    /// let due = heap.pop_all_below(30, Vec::new()).unwrap();
    /// assert_eq!(due, ['a', 'b']);
    /// assert_eq!(heap.len(), 2);
    /// ```
    pub fn pop_all_below<B: Score, K: Sink<T>>(&mut self, bound: B, mut sink: K) -> Result<K> {
        self.ensure_mutable()?;
        let bound = bound.encode()?;

        if let Some(available) = sink.remaining_capacity() {
            let needed = self.count_below(bound);
            if needed > available {
                return Err(HeapError::SinkFull { needed, available });
            }
        }

        let mut drained = 0usize;
        while let Some(root) = self.entries.first() {
            if root.key >= bound {
                break;
            }
            let entry = self.remove_slot(0);
            sink.append(entry.value);
            drained += 1;
        }
        trace!(drained, remaining = self.entries.len(), "drained entries below bound");
        Ok(sink)
    }

    /// Counts entries with keys below `bound`, visiting only the subtrees
    /// whose roots qualify.
    fn count_below(&self, bound: ComparableKey) -> usize {
        let mut count = 0;
        let mut stack: SmallVec<[usize; 32]> = SmallVec::new();
        if self.entries.first().is_some_and(|root| root.key < bound) {
            stack.push(0);
        }
        while let Some(slot) = stack.pop() {
            count += 1;
            let (first, last) = self.children(slot);
            for child in first..last {
                if self.entries[child].key < bound {
                    stack.push(child);
                }
            }
        }
        count
    }

    /// Removes every value, keeping the allocation.
    ///
    /// # Errors
    /// [`HeapError::Frozen`].
    pub fn clear(&mut self) -> Result<&mut Self> {
        self.ensure_mutable()?;
        trace!(len = self.entries.len(), "clearing heap");
        self.entries.clear();
        self.index.cleared();
        Ok(self)
    }

    /// Borrowing iterator over `(value, score)` in array (heap) order.
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter::new(&self.entries)
    }

    /// Consumes the heap into `(value, score)` pairs in array (heap) order.
    pub fn into_vec(self) -> Vec<(T, S)> {
        self.entries
            .into_iter()
            .map(|entry| (entry.value, entry.score))
            .collect()
    }

    /// Lazily pops values in ascending order.
    ///
    /// Dropping the iterator early leaves the remaining values queued.
    ///
    /// # Errors
    /// [`HeapError::Frozen`].
    pub fn each_pop(&mut self) -> Result<EachPop<'_, T, S, I>> {
        self.ensure_mutable()?;
        Ok(EachPop::new(self))
    }

    /// Like [`each_pop`](Self::each_pop), yielding `(value, score)` pairs.
    pub fn each_pop_with_score(&mut self) -> Result<EachPopWithScore<'_, T, S, I>> {
        self.ensure_mutable()?;
        Ok(EachPopWithScore::new(self))
    }

    /// Checks the heap property (and index consistency, when indexed) in O(n).
    pub fn is_heap(&self) -> bool {
        let ordered = (1..self.entries.len())
            .all(|slot| self.entries[(slot - 1) / self.d].key <= self.entries[slot].key);
        let indexed = match self.index.tracked() {
            None => true,
            Some(tracked) => {
                tracked == self.entries.len()
                    && self
                        .entries
                        .iter()
                        .enumerate()
                        .all(|(slot, entry)| self.index.position(&entry.value) == Some(slot))
            }
        };
        ordered && indexed
    }

    /// Unchecked pop for callers that already verified mutability.
    pub(crate) fn take_root(&mut self) -> Option<Entry<T, S>> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.remove_slot(0))
        }
    }

    /// Removes the entry at `slot`, filling the hole with the last entry.
    fn remove_slot(&mut self, slot: usize) -> Entry<T, S> {
        let entry = self.entries.swap_remove(slot);
        self.index.removed(&entry.value);
        if slot < self.entries.len() {
            self.index.placed(&self.entries[slot].value, slot);
            if self.sift_up(slot) == slot {
                self.sift_down(slot);
            }
        }
        entry
    }

    /// Replaces the key at `slot` and restores order in whichever direction
    /// it moved.
    fn rekey(&mut self, slot: usize, key: ComparableKey, score: S) -> usize {
        let entry = &mut self.entries[slot];
        let old = std::mem::replace(&mut entry.key, key);
        entry.score = score;
        let settled = if key < old {
            self.sift_up(slot)
        } else if key > old {
            self.sift_down(slot)
        } else {
            slot
        };
        trace!(from = slot, to = settled, "re-sifted queued value");
        settled
    }

    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.index.placed(&self.entries[a].value, a);
        self.index.placed(&self.entries[b].value, b);
    }

    /// Child slot range of `slot`, clamped to the array.
    #[inline]
    fn children(&self, slot: usize) -> (usize, usize) {
        let len = self.entries.len();
        let first = slot.saturating_mul(self.d).saturating_add(1).min(len);
        let last = first.saturating_add(self.d).min(len);
        (first, last)
    }

    /// Move entry at slot up to maintain heap property
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / self.d;
            if self.entries[slot].key < self.entries[parent].key {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
        slot
    }

    /// Move entry at slot down to maintain heap property
    fn sift_down(&mut self, mut slot: usize) -> usize {
        loop {
            let (first, last) = self.children(slot);
            let Some(offset) = min_index::min_index_with(self.backend, &self.entries[first..last])
            else {
                break;
            };
            let child = first + offset;
            if self.entries[child].key < self.entries[slot].key {
                self.swap_slots(slot, child);
                slot = child;
            } else {
                break;
            }
        }
        slot
    }
}

impl<T: Clone, S: Score + Clone, I: SlotIndex<T> + Clone> DHeap<T, S, I> {
    /// Snapshot of `(value, score)` pairs in array (heap) order.
    pub fn to_vec(&self) -> Vec<(T, S)> {
        self.iter()
            .map(|(value, score)| (value.clone(), score.clone()))
            .collect()
    }

    /// A frozen copy; `self` is left as it is.
    pub fn clone_frozen(&self) -> Self {
        let mut copy = self.clone();
        copy.frozen = true;
        copy
    }
}

impl<S: Score + Clone, I: SlotIndex<S>> DHeap<S, S, I> {
    /// Pushes a score that is also its own value, for chaining.
    ///
    /// ```rust
    /// use dheap::DHeap;
    ///
    /// let mut heap: DHeap<i32, i32> = DHeap::new();
    /// heap.insert(3)?.insert(1)?.insert(2)?;
    /// assert_eq!(heap.each_pop()?.collect::<Vec<_>>(), [1, 2, 3]);
    /// # Ok::<(), dheap::HeapError>(())
    /// ```
    pub fn insert(&mut self, score: S) -> Result<&mut Self> {
        self.push(score.clone(), score)?;
        Ok(self)
    }
}

impl<T: Hash + Eq + Clone, S: Score> DHeap<T, S, ValueIndex<T>> {
    /// Inserts `value`, or moves it to `score` if it is already queued.
    ///
    /// # Errors
    /// As for [`push`](Self::push).
    pub fn set(&mut self, value: T, score: S) -> Result<usize> {
        self.push(value, score)
    }

    /// The score of a queued value.
    pub fn get<Q>(&self, value: &Q) -> Option<&S>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .slot_of(value)
            .map(|slot| &self.entries[slot].score)
    }

    /// Whether `value` is queued.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.slot_of(value).is_some()
    }

    /// Current slot of a queued value.
    pub fn slot_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.slot_of(value)
    }

    /// Removes `value` and returns its score.
    ///
    /// # Errors
    /// [`HeapError::Frozen`].
    pub fn delete<Q>(&mut self, value: &Q) -> Result<Option<S>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Ok(self.remove(value)?.map(|(_, score)| score))
    }

    /// Removes `value` and returns it with its score.
    ///
    /// # Errors
    /// [`HeapError::Frozen`].
    pub fn remove<Q>(&mut self, value: &Q) -> Result<Option<(T, S)>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ensure_mutable()?;
        let Some(slot) = self.index.slot_of(value) else {
            return Ok(None);
        };
        let entry = self.remove_slot(slot);
        Ok(Some((entry.value, entry.score)))
    }
}

impl<T: Clone, S: Clone, I: Clone> Clone for DHeap<T, S, I> {
    /// Duplicates the heap; the copy is never frozen.
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            d: self.d,
            backend: self.backend,
            frozen: false,
            index: self.index.clone(),
        }
    }
}

impl<T, S: Score, I: SlotIndex<T>> Default for DHeap<T, S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, S: Score, I: SlotIndex<T>> IntoIterator for &'a DHeap<T, S, I> {
    type Item = (&'a T, &'a S);
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
