//! Kani proof harnesses
//!
//! - `heap_proofs.rs`: bounded push/pop sequences on small heaps
//! - `key_proofs.rs`: order preservation of the score encoder

#[cfg(kani)]
#[path = "heap_proofs.rs"]
mod heap_proofs;
#[cfg(kani)]
#[path = "key_proofs.rs"]
mod key_proofs;
