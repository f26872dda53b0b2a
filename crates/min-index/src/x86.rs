//! SSE4.2 and AVX2 kernels.
//!
//! Each 128-bit key is split into a (high, low) pair of 64-bit words, both
//! biased by 2^63 so that the signed `pcmpgtq` yields unsigned order.
//!
//! Lane `j` of the running minimum only ever sees indices `j`, `j + LANES`,
//! `j + 2 * LANES`, ... in increasing order and is replaced only on a strictly
//! smaller key, so it always holds the earliest occurrence of its minimum. The
//! horizontal step then breaks key ties by index, and the scalar tail (whose
//! indices are larger than every lane's) replaces only on a strictly smaller
//! key. Together that reproduces the scalar scan's answer exactly.

use std::arch::x86_64::*;

use crate::OrderedKey;

const BIAS: u64 = 1 << 63;

#[inline(always)]
fn biased_words<K: OrderedKey>(item: &K) -> (i64, i64) {
    let bits = item.ordered_bits();
    let hi = (bits >> 64) as u64;
    let lo = bits as u64;
    ((hi ^ BIAS) as i64, (lo ^ BIAS) as i64)
}

/// Reduces the per-lane minima, then scans the leftover tail.
#[inline(always)]
fn finish<K: OrderedKey>(
    his: &[i64],
    los: &[i64],
    idxs: &[i64],
    items: &[K],
    tail_start: usize,
) -> usize {
    let mut best = (his[0], los[0]);
    let mut best_lane_idx = idxs[0];
    for lane in 1..his.len() {
        let key = (his[lane], los[lane]);
        if key < best || (key == best && idxs[lane] < best_lane_idx) {
            best = key;
            best_lane_idx = idxs[lane];
        }
    }

    let mut best_idx = best_lane_idx as usize;
    for (offset, item) in items[tail_start..].iter().enumerate() {
        let key = biased_words(item);
        if key < best {
            best = key;
            best_idx = tail_start + offset;
        }
    }
    best_idx
}

// ============================================================================
// SSE4.2: two keys per step
// ============================================================================

#[inline]
#[target_feature(enable = "sse4.1,sse4.2")]
unsafe fn load2<K: OrderedKey>(items: &[K], base: usize) -> (__m128i, __m128i) {
    let (h0, l0) = biased_words(&items[base]);
    let (h1, l1) = biased_words(&items[base + 1]);
    (_mm_set_epi64x(h1, h0), _mm_set_epi64x(l1, l0))
}

/// All-ones lanes where `(a_hi, a_lo) < (b_hi, b_lo)`.
#[inline]
#[target_feature(enable = "sse4.1,sse4.2")]
unsafe fn lt_sse42(a_hi: __m128i, a_lo: __m128i, b_hi: __m128i, b_lo: __m128i) -> __m128i {
    let hi_lt = _mm_cmpgt_epi64(b_hi, a_hi);
    let hi_eq = _mm_cmpeq_epi64(a_hi, b_hi);
    let lo_lt = _mm_cmpgt_epi64(b_lo, a_lo);
    _mm_or_si128(hi_lt, _mm_and_si128(hi_eq, lo_lt))
}

/// # Safety
///
/// The CPU must support SSE4.1 and SSE4.2, and `items.len() >= 2`.
#[target_feature(enable = "sse4.1,sse4.2")]
pub(crate) unsafe fn min_index_sse42<K: OrderedKey>(items: &[K]) -> usize {
    const LANES: usize = 2;
    debug_assert!(items.len() >= LANES);

    let chunks = items.len() / LANES;
    let (mut min_hi, mut min_lo) = load2(items, 0);
    let mut min_idx = _mm_set_epi64x(1, 0);
    let mut idx = min_idx;
    let step = _mm_set1_epi64x(LANES as i64);

    for chunk in 1..chunks {
        idx = _mm_add_epi64(idx, step);
        let (hi, lo) = load2(items, chunk * LANES);
        let lt = lt_sse42(hi, lo, min_hi, min_lo);
        min_hi = _mm_blendv_epi8(min_hi, hi, lt);
        min_lo = _mm_blendv_epi8(min_lo, lo, lt);
        min_idx = _mm_blendv_epi8(min_idx, idx, lt);
    }

    let mut his = [0i64; LANES];
    let mut los = [0i64; LANES];
    let mut idxs = [0i64; LANES];
    _mm_storeu_si128(his.as_mut_ptr().cast(), min_hi);
    _mm_storeu_si128(los.as_mut_ptr().cast(), min_lo);
    _mm_storeu_si128(idxs.as_mut_ptr().cast(), min_idx);

    finish(&his, &los, &idxs, items, chunks * LANES)
}

// ============================================================================
// AVX2: four keys per step
// ============================================================================

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load4<K: OrderedKey>(items: &[K], base: usize) -> (__m256i, __m256i) {
    let (h0, l0) = biased_words(&items[base]);
    let (h1, l1) = biased_words(&items[base + 1]);
    let (h2, l2) = biased_words(&items[base + 2]);
    let (h3, l3) = biased_words(&items[base + 3]);
    (
        _mm256_set_epi64x(h3, h2, h1, h0),
        _mm256_set_epi64x(l3, l2, l1, l0),
    )
}

/// All-ones lanes where `(a_hi, a_lo) < (b_hi, b_lo)`.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn lt_avx2(a_hi: __m256i, a_lo: __m256i, b_hi: __m256i, b_lo: __m256i) -> __m256i {
    let hi_lt = _mm256_cmpgt_epi64(b_hi, a_hi);
    let hi_eq = _mm256_cmpeq_epi64(a_hi, b_hi);
    let lo_lt = _mm256_cmpgt_epi64(b_lo, a_lo);
    _mm256_or_si256(hi_lt, _mm256_and_si256(hi_eq, lo_lt))
}

/// # Safety
///
/// The CPU must support AVX2, and `items.len() >= 4`.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn min_index_avx2<K: OrderedKey>(items: &[K]) -> usize {
    const LANES: usize = 4;
    debug_assert!(items.len() >= LANES);

    let chunks = items.len() / LANES;
    let (mut min_hi, mut min_lo) = load4(items, 0);
    let mut min_idx = _mm256_set_epi64x(3, 2, 1, 0);
    let mut idx = min_idx;
    let step = _mm256_set1_epi64x(LANES as i64);

    for chunk in 1..chunks {
        idx = _mm256_add_epi64(idx, step);
        let (hi, lo) = load4(items, chunk * LANES);
        let lt = lt_avx2(hi, lo, min_hi, min_lo);
        min_hi = _mm256_blendv_epi8(min_hi, hi, lt);
        min_lo = _mm256_blendv_epi8(min_lo, lo, lt);
        min_idx = _mm256_blendv_epi8(min_idx, idx, lt);
    }

    let mut his = [0i64; LANES];
    let mut los = [0i64; LANES];
    let mut idxs = [0i64; LANES];
    _mm256_storeu_si256(his.as_mut_ptr().cast(), min_hi);
    _mm256_storeu_si256(los.as_mut_ptr().cast(), min_lo);
    _mm256_storeu_si256(idxs.as_mut_ptr().cast(), min_idx);

    finish(&his, &los, &idxs, items, chunks * LANES)
}
