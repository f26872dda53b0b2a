//! Order preservation of the score encoder

use dheap::{ComparableKey, Score};

/// Proof: i64 scores keep their order and equality
#[cfg(kani)]
#[kani::proof]
fn verify_i64_order_preserved() {
    let a: i64 = kani::any();
    let b: i64 = kani::any();
    match (a.encode(), b.encode()) {
        (Ok(ka), Ok(kb)) => assert!(a.cmp(&b) == ka.cmp(&kb)),
        _ => unreachable!(),
    }
}

/// Proof: u64 and i64 agree wherever both can hold the value
#[cfg(kani)]
#[kani::proof]
fn verify_unsigned_matches_signed() {
    let a: i64 = kani::any();
    kani::assume(a >= 0);
    assert!(ComparableKey::from_i64(a) == ComparableKey::from_u64(a as u64));
}

/// Proof: every non-infinite key sits strictly between the infinities
#[cfg(kani)]
#[kani::proof]
fn verify_infinities_bound_all_integers() {
    let a: i64 = kani::any();
    let key = ComparableKey::from_i64(a);
    assert!(ComparableKey::NEG_INFINITY < key);
    assert!(key < ComparableKey::INFINITY);
    assert!(!key.is_infinite());
    assert!(key.is_negative() == (a < 0));
}
