//! # min-index - lowest-index minimum search over 128-bit ordered keys
//!
//! Sift-down in a d-ary heap spends most of its time answering one question:
//! which of these `d` contiguous children has the smallest key? This crate
//! answers it with lane-wise vector comparisons where the CPU supports them
//! and a plain linear scan everywhere else.
//!
//! Keys are anything implementing [`OrderedKey`], i.e. anything that can be
//! viewed as a `u128` whose unsigned order is the order you care about.
//!
//! ## Backends
//!
//! | Backend            | Lanes | Requirement            |
//! |--------------------|-------|------------------------|
//! | [`Backend::Scalar`]| 1     | none                   |
//! | [`Backend::Sse42`] | 2     | x86_64 with SSE4.1/4.2 |
//! | [`Backend::Avx2`]  | 4     | x86_64 with AVX2       |
//!
//! The best backend is detected once per process ([`detect`]). Setting
//! `MIN_INDEX_BACKEND=scalar|sse4.2|avx2` forces a specific one; an
//! unsupported request is logged and ignored.
//!
//! ## Tie-breaking
//!
//! Every backend returns the *lowest* index among equal minimum keys, so the
//! choice of backend never changes the shape of a heap built on top of it.
//!
//! ## Example
//!
//! ```rust
//! use min_index::{min_index, min_index_with, Backend};
//!
//! let keys: [u128; 6] = [9, 4, 7, 4, 8, 5];
//! assert_eq!(min_index(&keys), Some(1));
//! assert_eq!(min_index_with(Backend::Scalar, &keys), Some(1));
//! assert_eq!(min_index::<u128>(&[]), None);
//! ```

#![warn(missing_docs)]

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

mod scalar;
#[cfg(target_arch = "x86_64")]
mod x86;

/// Environment variable consulted by [`detect`] to force a backend.
pub const BACKEND_ENV: &str = "MIN_INDEX_BACKEND";

/// A key that can be compared as an unsigned 128-bit integer.
///
/// Implementations must be pure: calling `ordered_bits` twice on the same
/// value returns the same bits.
pub trait OrderedKey {
    /// The key's bits; smaller means "comes first".
    fn ordered_bits(&self) -> u128;
}

impl OrderedKey for u128 {
    #[inline]
    fn ordered_bits(&self) -> u128 {
        *self
    }
}

impl OrderedKey for u64 {
    #[inline]
    fn ordered_bits(&self) -> u128 {
        u128::from(*self)
    }
}

impl<K: OrderedKey + ?Sized> OrderedKey for &K {
    #[inline]
    fn ordered_bits(&self) -> u128 {
        (**self).ordered_bits()
    }
}

/// An implementation strategy for [`min_index_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Linear scan, available everywhere.
    Scalar,
    /// Two 64-bit lane pairs per step (SSE4.2 `pcmpgtq`).
    Sse42,
    /// Four 64-bit lane pairs per step (AVX2).
    Avx2,
}

impl Backend {
    /// Every backend, narrowest first.
    pub const ALL: [Backend; 3] = [Backend::Scalar, Backend::Sse42, Backend::Avx2];

    /// Number of keys compared per vector step.
    #[inline]
    pub const fn lanes(self) -> usize {
        match self {
            Backend::Scalar => 1,
            Backend::Sse42 => 2,
            Backend::Avx2 => 4,
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Sse42 => "sse4.2",
            Backend::Avx2 => "avx2",
        }
    }

    /// Whether the running CPU can execute this backend.
    #[inline]
    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            Backend::Sse42 => {
                is_x86_feature_detected!("sse4.1") && is_x86_feature_detected!("sse4.2")
            }
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(not(target_arch = "x86_64"))]
            Backend::Sse42 | Backend::Avx2 => false,
        }
    }

    /// Backends the running CPU supports, narrowest first.
    pub fn available() -> impl Iterator<Item = Backend> {
        Self::ALL.into_iter().filter(|backend| backend.is_available())
    }

    /// The widest backend the running CPU supports.
    pub fn best_available() -> Backend {
        Self::available().last().unwrap_or(Backend::Scalar)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a backend name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown min-index backend {0:?} (expected scalar, sse4.2 or avx2)")]
pub struct ParseBackendError(String);

impl FromStr for Backend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" | "none" => Ok(Backend::Scalar),
            "sse4.2" | "sse42" | "sse" => Ok(Backend::Sse42),
            "avx2" | "avx" => Ok(Backend::Avx2),
            _ => Err(ParseBackendError(s.to_owned())),
        }
    }
}

static DETECTED: OnceLock<Backend> = OnceLock::new();

/// The backend used by [`min_index`], chosen once per process.
pub fn detect() -> Backend {
    *DETECTED.get_or_init(|| {
        let best = Backend::best_available();
        let chosen = match std::env::var(BACKEND_ENV) {
            Ok(raw) => match raw.parse::<Backend>() {
                Ok(forced) if forced.is_available() => forced,
                Ok(forced) => {
                    warn!(requested = %forced, fallback = %best, "requested min-index backend is not supported by this CPU");
                    best
                }
                Err(err) => {
                    warn!(%err, fallback = %best, "ignoring {}", BACKEND_ENV);
                    best
                }
            },
            Err(_) => best,
        };
        debug!(backend = %chosen, "selected min-index backend");
        chosen
    })
}

/// Index of the smallest key, using the detected backend.
///
/// Returns `None` for an empty slice. Ties resolve to the lowest index.
#[inline]
pub fn min_index<K: OrderedKey>(items: &[K]) -> Option<usize> {
    min_index_with(detect(), items)
}

/// Index of the smallest key, using a specific backend.
///
/// An unavailable backend silently degrades to [`Backend::Scalar`], as do
/// inputs too short to fill one vector.
#[inline]
pub fn min_index_with<K: OrderedKey>(backend: Backend, items: &[K]) -> Option<usize> {
    if items.len() < backend.lanes().max(2) {
        return scalar::min_index(items);
    }
    match backend {
        Backend::Scalar => scalar::min_index(items),
        #[cfg(target_arch = "x86_64")]
        Backend::Sse42 if backend.is_available() => {
            // SAFETY: SSE4.1 and SSE4.2 support was just checked.
            Some(unsafe { x86::min_index_sse42(items) })
        }
        #[cfg(target_arch = "x86_64")]
        Backend::Avx2 if backend.is_available() => {
            // SAFETY: AVX2 support was just checked.
            Some(unsafe { x86::min_index_avx2(items) })
        }
        _ => scalar::min_index(items),
    }
}
