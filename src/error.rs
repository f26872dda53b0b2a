//! Error types for heap operations
//!
//! Every fallible operation validates before it mutates, so an `Err` always
//! leaves the heap exactly as it was. Empty-heap results are `None`, never
//! errors.

use thiserror::Error;

use crate::config::MAX_D;

/// A score could not be turned into a [`ComparableKey`](crate::ComparableKey).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// NaN has no position in a total order.
    #[error("NaN is not a valid score")]
    NaN,
    /// The input has no numeric reading at all.
    #[error("not a numeric score: {0:?}")]
    NotNumeric(String),
    /// A rational score with a zero denominator.
    #[error("rational score has a zero denominator")]
    ZeroDenominator,
}

/// Error type for heap operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The branching factor is outside `[2, MAX_D]`.
    #[error("branching factor {d} is out of range (must be between 2 and {max})", max = MAX_D)]
    InvalidBranchingFactor {
        /// The rejected branching factor
        d: usize,
    },
    /// The score (or bound) could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// A mutating operation was attempted on a frozen heap.
    #[error("can't modify frozen heap")]
    Frozen,
    /// The sink handed to `pop_all_below` cannot hold every qualifying entry.
    #[error("sink can hold {available} more entries but {needed} are below the bound")]
    SinkFull {
        /// Number of entries that would have been popped
        needed: usize,
        /// Room the sink reported
        available: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = HeapError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(HeapError::Frozen.to_string(), "can't modify frozen heap");
        let msg = HeapError::InvalidBranchingFactor { d: 1 }.to_string();
        assert!(msg.contains("branching factor 1"), "{msg}");
        assert!(msg.contains(&MAX_D.to_string()), "{msg}");
        assert_eq!(
            HeapError::from(EncodingError::NaN).to_string(),
            "NaN is not a valid score"
        );
    }

    #[test]
    fn test_encoding_error_converts() {
        fn encode() -> Result<(), EncodingError> {
            Err(EncodingError::ZeroDenominator)
        }
        fn push() -> Result<()> {
            encode()?;
            Ok(())
        }
        assert_eq!(
            push(),
            Err(HeapError::Encoding(EncodingError::ZeroDenominator))
        );
    }
}
