//! Portable linear scan; the reference every vector backend must agree with.

use crate::OrderedKey;

#[inline]
pub(crate) fn min_index<K: OrderedKey>(items: &[K]) -> Option<usize> {
    let (first, rest) = items.split_first()?;
    let mut best = first.ordered_bits();
    let mut best_idx = 0;
    for (offset, item) in rest.iter().enumerate() {
        let bits = item.ordered_bits();
        // strict: an equal key later in the run never displaces an earlier one
        if bits < best {
            best = bits;
            best_idx = offset + 1;
        }
    }
    Some(best_idx)
}
