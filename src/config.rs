//! Construction parameters for [`DHeap`](crate::DHeap).
//!
//! ```rust
//! use dheap::{Backend, DHeap, HeapConfig};
//!
//! let config = HeapConfig::default()
//!     .with_branching_factor(8)
//!     .with_capacity(1024)
//!     .with_backend(Backend::Scalar);
//! let heap: DHeap<&str> = DHeap::with_config(config).unwrap();
//! assert_eq!(heap.branching_factor(), 8);
//! assert!(heap.capacity() >= 1024);
//! ```

use min_index::Backend;
use tracing::warn;

use crate::error::{HeapError, Result};

/// Branching factor used when none is given.
pub const DEFAULT_D: usize = 4;

/// Largest accepted branching factor.
pub const MAX_D: usize = i32::MAX as usize;

/// Entries preallocated by a new heap.
pub const DEFAULT_CAPACITY: usize = 32;

/// Builder-style configuration for a heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapConfig {
    /// Children per node, in `[2, MAX_D]`.
    pub branching_factor: usize,
    /// Initial capacity in entries.
    pub capacity: usize,
    /// Min-finder backend; `None` uses the one detected for this process.
    pub backend: Option<Backend>,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            branching_factor: DEFAULT_D,
            capacity: DEFAULT_CAPACITY,
            backend: None,
        }
    }
}

impl HeapConfig {
    /// Sets the branching factor.
    pub fn with_branching_factor(mut self, d: usize) -> Self {
        self.branching_factor = d;
        self
    }

    /// Sets the initial capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Forces a min-finder backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Checks the branching factor.
    pub fn validate(&self) -> Result<()> {
        validate_branching_factor(self.branching_factor)
    }

    /// The backend a heap built from this config will use.
    ///
    /// A forced backend the CPU cannot run is replaced by the detected one.
    pub fn resolved_backend(&self) -> Backend {
        let detected = min_index::detect();
        match self.backend {
            Some(backend) if backend.is_available() => backend,
            Some(backend) => {
                warn!(requested = %backend, fallback = %detected, "configured backend is not supported by this CPU");
                detected
            }
            None => detected,
        }
    }
}

pub(crate) fn validate_branching_factor(d: usize) -> Result<()> {
    if (2..=MAX_D).contains(&d) {
        Ok(())
    } else {
        Err(HeapError::InvalidBranchingFactor { d })
    }
}
