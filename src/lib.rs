//! d-ary min-heaps keyed by arbitrary numeric scores
//!
//! This crate provides a priority queue for timer wheels, schedulers and graph
//! search: an array-backed d-ary min-heap whose scores may be any mix of
//! integers (of any size), floats and exact rationals.
//!
//! # Features
//!
//! - **Configurable branching factor**: any `d` from 2 to `i32::MAX`; the
//!   default of 4 keeps the tree shallow without making pops scan wide nodes
//! - **One key type for every score**: each score is encoded once into a
//!   [`ComparableKey`] whose integer order is numeric order, so sifting never
//!   dispatches on score kinds
//! - **Vectorized sift-down**: the smallest of a node's children is found
//!   with SSE4.2 or AVX2 when the CPU has them (see [`Backend`])
//! - **Indexed variant**: [`DHeapMap`] maps values to slots, giving
//!   `O(d log_d n)` score updates and deletion by value
//! - **Conditional pops**: [`pop_lt`](DHeap::pop_lt),
//!   [`pop_lte`](DHeap::pop_lte) and
//!   [`pop_all_below`](DHeap::pop_all_below) for deadline-driven consumers
//!
//! # Example
//!
//! ```rust
//! use dheap::DHeap;
//!
//! let mut timers: DHeap<&str, f64> = DHeap::with_branching_factor(8).unwrap();
//! timers.push("flush", 2.5).unwrap();
//! timers.push("tick", 0.5).unwrap();
//! timers.push("gc", 10.0).unwrap();
//!
//! let due = timers.pop_all_below(3.0, Vec::new()).unwrap();
//! assert_eq!(due, ["tick", "flush"]);
//! assert_eq!(timers.peek_with_score(), Some((&"gc", &10.0)));
//! ```
//!
//! # Logging
//!
//! Construction and backend selection are reported at `debug` level through
//! [`tracing`](https://docs.rs/tracing); storage growth, clears, freezes and
//! score updates of queued values at `trace` level. No subscriber is
//! installed by this crate.

pub mod config;
pub mod dheap;
pub mod error;
pub mod index;
pub mod iter;
pub mod key;
pub mod number;
pub mod score;
pub mod sink;
pub mod traits;

pub use config::{HeapConfig, DEFAULT_CAPACITY, DEFAULT_D, MAX_D};
pub use dheap::{DHeap, DHeapMap};
pub use error::{EncodingError, HeapError, Result};
pub use key::ComparableKey;
pub use min_index::Backend;
pub use number::{ratio, Number};
pub use score::Score;
pub use sink::Sink;
pub use traits::{Heap, IndexedHeap};
