//! Kani proof harnesses
//!
//! The proofs live in the tests/kani/ subdirectory and only build under
//! `cargo kani`.

#[cfg(kani)]
#[path = "kani/mod.rs"]
mod kani_module;
