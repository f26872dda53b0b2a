//! The [`Score`] trait and its implementations for native types
//!
//! A score is anything that can be reduced to a [`ComparableKey`]. Encoding
//! happens once per push, so even costly encodings (big integers, rationals)
//! never slow down the sift loops.
//!
//! Arbitrary-precision and rational scores live in [`crate::number`].

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::EncodingError;
use crate::key::ComparableKey;

/// A value that can be used as a heap score.
///
/// Implementations must be monotonic: if `a < b` numerically then
/// `a.encode() <= b.encode()`, with equality only where both values agree in
/// their 64 most significant bits. Encoding the same value twice yields the
/// same key.
///
/// # Example
///
/// ```rust
/// use dheap::Score;
///
/// assert!(1u8.encode().unwrap() < 1.5f32.encode().unwrap());
/// assert!((-3i64).encode().unwrap() < 0u64.encode().unwrap());
/// assert!(f64::NAN.encode().is_err());
/// ```
pub trait Score {
    /// Produces the order-preserving key for this score.
    fn encode(&self) -> Result<ComparableKey, EncodingError>;
}

macro_rules! impl_score_unsigned {
    ($($t:ty),*) => {
        $(
            impl Score for $t {
                #[inline]
                fn encode(&self) -> Result<ComparableKey, EncodingError> {
                    Ok(ComparableKey::from_u64(*self as u64))
                }
            }
        )*
    };
}

macro_rules! impl_score_signed {
    ($($t:ty),*) => {
        $(
            impl Score for $t {
                #[inline]
                fn encode(&self) -> Result<ComparableKey, EncodingError> {
                    Ok(ComparableKey::from_i64(*self as i64))
                }
            }
        )*
    };
}

impl_score_unsigned!(u8, u16, u32, u64, usize);
impl_score_signed!(i8, i16, i32, i64, isize);

impl Score for u128 {
    #[inline]
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        Ok(ComparableKey::from_u128(*self))
    }
}

impl Score for i128 {
    #[inline]
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        Ok(ComparableKey::from_i128(*self))
    }
}

impl Score for f64 {
    #[inline]
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        ComparableKey::from_f64(*self)
    }
}

impl Score for f32 {
    #[inline]
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        ComparableKey::from_f64(f64::from(*self))
    }
}

/// Whole nanoseconds.
impl Score for Duration {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        Ok(ComparableKey::from_u128(self.as_nanos()))
    }
}

/// Signed nanoseconds relative to the UNIX epoch, so instants before 1970
/// sort before it.
impl Score for SystemTime {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        Ok(match self.duration_since(UNIX_EPOCH) {
            Ok(after) => ComparableKey::from_wide(false, after.as_nanos()),
            Err(before) => ComparableKey::from_wide(true, before.duration().as_nanos()),
        })
    }
}

impl Score for ComparableKey {
    #[inline]
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        Ok(*self)
    }
}

impl<S: Score + ?Sized> Score for &S {
    #[inline]
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        (**self).encode()
    }
}

impl<S: Score + ?Sized> Score for Box<S> {
    #[inline]
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        (**self).encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key<S: Score>(score: S) -> ComparableKey {
        score.encode().unwrap()
    }

    #[test]
    fn test_native_integers_agree() {
        assert_eq!(key(7u8), key(7i64));
        assert_eq!(key(7u16), key(7.0f32));
        assert_eq!(key(-7i8), key(-7.0f64));
        assert_eq!(key(usize::MAX), key(u64::MAX));
        assert_eq!(key(isize::MIN), key(i64::MIN));
        assert_eq!(key(5u128), key(5u32));
        assert_eq!(key(-5i128), key(-5i16));
    }

    #[test]
    fn test_mixed_order() {
        assert!(key(-1i32) < key(-0.5f64));
        assert!(key(-0.5f64) < key(0u8));
        assert!(key(0u8) < key(0.25f32));
        assert!(key(0.25f32) < key(1u64));
        assert!(key(u64::MAX) < key(u128::from(u64::MAX) + 1));
        assert!(key(i128::MIN) < key(i64::MIN));
    }

    #[test]
    fn test_nan_fails() {
        assert_eq!(f32::NAN.encode(), Err(EncodingError::NaN));
        assert_eq!(f64::NAN.encode(), Err(EncodingError::NaN));
    }

    #[test]
    fn test_durations_and_times() {
        let short = Duration::from_millis(5);
        let long = Duration::from_secs(5);
        assert!(key(short) < key(long));
        assert_eq!(key(short), key(5_000_000u64));

        let before_epoch = UNIX_EPOCH - Duration::from_secs(60);
        let after_epoch = UNIX_EPOCH + Duration::from_secs(60);
        assert!(key(before_epoch) < key(UNIX_EPOCH));
        assert!(key(UNIX_EPOCH) < key(after_epoch));
        assert_eq!(key(UNIX_EPOCH), ComparableKey::ZERO);
        assert_eq!(key(before_epoch), key(-60_000_000_000i64));
    }

    #[test]
    fn test_wrappers_delegate() {
        let boxed: Box<f64> = Box::new(2.5);
        assert_eq!(key(&boxed), key(2.5f64));
        assert_eq!(key(&&3u8), key(3u8));
        let key_score = ComparableKey::from_i64(-9);
        assert_eq!(key(key_score), key_score);
    }
}
