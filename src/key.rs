//! Order-preserving numeric keys
//!
//! A [`ComparableKey`] packs an 80-bit extended-precision number into a
//! `u128` so that plain unsigned integer comparison is numeric comparison.
//! Every score is encoded exactly once, when it enters the heap; sifting then
//! compares integers only.
//!
//! # Layout
//!
//! | Bits   | Field                                            |
//! |--------|--------------------------------------------------|
//! | 79     | 1 for nonnegative values, 0 for negative values  |
//! | 78..64 | biased binary exponent (bias 16383)              |
//! | 63..0  | mantissa with an explicit leading one            |
//!
//! Negative values store the bitwise complement of their magnitude in the low
//! 79 bits, so a larger magnitude sorts lower. Bits 127..80 are always zero.
//!
//! The exponent field `0x7FFF` holds the infinities. Finite magnitudes too
//! large for the field saturate to the largest finite key of their sign;
//! magnitudes too small flush to the smallest nonzero key of their sign.
//! Positive and negative zero share one key.
//!
//! ```rust
//! use dheap::ComparableKey;
//!
//! let a = ComparableKey::from_f64(-2.5).unwrap();
//! let b = ComparableKey::from_i64(-2);
//! let c = ComparableKey::from_u64(1 << 40);
//! assert!(a < b && b < ComparableKey::ZERO && ComparableKey::ZERO < c);
//! assert_eq!(ComparableKey::from_i64(3), ComparableKey::from_f64(3.0).unwrap());
//! ```

use std::fmt;

use min_index::OrderedKey;

use crate::error::EncodingError;

const SIGN_BIT: u128 = 1 << 79;
const MAGNITUDE_MASK: u128 = SIGN_BIT - 1;
const EXP_BIAS: i64 = 16383;
const INF_FIELD: i64 = 0x7FFF;
const MAX_FINITE_FIELD: i64 = 0x7FFE;
const LEADING_BIT: u64 = 1 << 63;

const fn magnitude(field: i64, mantissa: u64) -> u128 {
    ((field as u128) << 64) | mantissa as u128
}

/// A score reduced to a totally ordered 128-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComparableKey(u128);

impl ComparableKey {
    /// Key of both zeros.
    pub const ZERO: Self = Self(SIGN_BIT);
    /// Key of positive infinity, the largest key any score produces.
    pub const INFINITY: Self = Self(SIGN_BIT | magnitude(INF_FIELD, 0));
    /// Key of negative infinity, the smallest key any score produces.
    pub const NEG_INFINITY: Self = Self(MAGNITUDE_MASK - magnitude(INF_FIELD, 0));
    /// Largest finite key; finite overflow saturates here.
    pub const MAX: Self = Self(SIGN_BIT | magnitude(MAX_FINITE_FIELD, u64::MAX));
    /// Smallest finite key; negative finite overflow saturates here.
    pub const MIN: Self = Self(MAGNITUDE_MASK - magnitude(MAX_FINITE_FIELD, u64::MAX));
    /// Smallest positive key; positive underflow flushes here.
    pub const MIN_POSITIVE: Self = Self(SIGN_BIT | magnitude(1, LEADING_BIT));

    /// Wraps raw bits without validation.
    ///
    /// Useful for callers who already have an order-preserving encoding of
    /// their own; such keys sort correctly against each other but decode
    /// meaninglessly through [`to_f64`](Self::to_f64).
    #[inline]
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    /// The raw bits.
    #[inline]
    pub const fn to_bits(self) -> u128 {
        self.0
    }

    /// Encodes `±mantissa · 2^exp2`.
    ///
    /// The mantissa is normalized so its leading one lands in bit 63; the
    /// exponent saturates at both ends of the representable range.
    pub fn from_scaled(negative: bool, mantissa: u64, exp2: i64) -> Self {
        if mantissa == 0 {
            return Self::ZERO;
        }
        let lz = mantissa.leading_zeros();
        let normalized = mantissa << lz;
        let exponent = exp2.saturating_add(63 - i64::from(lz));
        let field = exponent.saturating_add(EXP_BIAS);

        let mag = if field >= INF_FIELD {
            magnitude(MAX_FINITE_FIELD, u64::MAX)
        } else if field < 1 {
            magnitude(1, LEADING_BIT)
        } else {
            magnitude(field, normalized)
        };
        Self::from_magnitude(negative, mag)
    }

    #[inline]
    const fn from_magnitude(negative: bool, mag: u128) -> Self {
        if negative {
            Self(MAGNITUDE_MASK - mag)
        } else {
            Self(SIGN_BIT | mag)
        }
    }

    /// Exact for every `u64`.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        Self::from_scaled(false, value, 0)
    }

    /// Exact for every `i64`.
    #[inline]
    pub fn from_i64(value: i64) -> Self {
        Self::from_scaled(value < 0, value.unsigned_abs(), 0)
    }

    /// Signed 128-bit magnitude, truncated toward zero beyond 64 significant bits.
    pub fn from_wide(negative: bool, value: u128) -> Self {
        match u64::try_from(value) {
            Ok(narrow) => Self::from_scaled(negative, narrow, 0),
            Err(_) => {
                let shift = 64 - value.leading_zeros();
                Self::from_scaled(negative, (value >> shift) as u64, i64::from(shift))
            }
        }
    }

    /// Exact for every `u128` below 2^64; truncated toward zero above.
    #[inline]
    pub fn from_u128(value: u128) -> Self {
        Self::from_wide(false, value)
    }

    /// Exact for every `i128` whose magnitude is below 2^64; truncated toward zero above.
    #[inline]
    pub fn from_i128(value: i128) -> Self {
        Self::from_wide(value < 0, value.unsigned_abs())
    }

    /// Exact for every non-NaN `f64`, with `-0.0` collapsed onto `0.0`.
    pub fn from_f64(value: f64) -> Result<Self, EncodingError> {
        if value.is_nan() {
            return Err(EncodingError::NaN);
        }
        if value.is_infinite() {
            return Ok(if value > 0.0 {
                Self::INFINITY
            } else {
                Self::NEG_INFINITY
            });
        }
        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7FF) as i64;
        let fraction = bits & ((1 << 52) - 1);
        let (mantissa, exp2) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1 << 52), biased - 1075)
        };
        Ok(Self::from_scaled(negative, mantissa, exp2))
    }

    /// `±numer / denom`, truncated toward zero to 64 significant bits.
    ///
    /// Dyadic fractions that a float can hold encode exactly as that float.
    pub fn from_ratio(negative: bool, numer: u64, denom: u64) -> Result<Self, EncodingError> {
        if denom == 0 {
            return Err(EncodingError::ZeroDenominator);
        }
        if numer == 0 {
            return Ok(Self::ZERO);
        }
        // numer << k has 64 + bits(denom) bits, which fits since bits(numer) <= 64
        let bits_n = 64 - numer.leading_zeros();
        let bits_d = 64 - denom.leading_zeros();
        let k = 64 + bits_d - bits_n;
        let mut quotient = (u128::from(numer) << k) / u128::from(denom);
        let mut exp2 = -i64::from(k);
        if quotient >> 64 != 0 {
            quotient >>= 1;
            exp2 += 1;
        }
        Ok(Self::from_scaled(negative, quotient as u64, exp2))
    }

    /// Whether the key encodes a value below zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < SIGN_BIT
    }

    /// Whether the key encodes zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == SIGN_BIT
    }

    /// Whether the key encodes an infinity.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 == Self::INFINITY.0 || self.0 == Self::NEG_INFINITY.0
    }

    /// Approximate decoded value.
    ///
    /// Exact for every key produced from an `f64`. Wider mantissas round to
    /// 53 bits, and exponents beyond `f64`'s range become zero or infinity.
    pub fn to_f64(self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let negative = self.is_negative();
        let mag = if negative {
            MAGNITUDE_MASK.saturating_sub(self.0)
        } else {
            self.0 - SIGN_BIT
        };
        let field = i64::try_from(mag >> 64).unwrap_or(i64::MAX);
        let value = if field >= INF_FIELD {
            f64::INFINITY
        } else {
            let fraction = (mag as u64) as f64 / LEADING_BIT as f64;
            fraction * pow2(field - EXP_BIAS)
        };
        if negative {
            -value
        } else {
            value
        }
    }
}

/// `2^e` as an `f64`, zero below the subnormal range and infinite above.
fn pow2(e: i64) -> f64 {
    if e > 1023 {
        f64::INFINITY
    } else if e >= -1022 {
        f64::from_bits(((e + 1023) as u64) << 52)
    } else if e >= -1074 {
        f64::from_bits(1 << (e + 1074))
    } else {
        0.0
    }
}

impl Default for ComparableKey {
    fn default() -> Self {
        Self::ZERO
    }
}

impl OrderedKey for ComparableKey {
    #[inline]
    fn ordered_bits(&self) -> u128 {
        self.0
    }
}

impl fmt::Debug for ComparableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparableKey")
            .field("bits", &format_args!("{:#022x}", self.0))
            .field("approx", &self.to_f64())
            .finish()
    }
}

impl fmt::Display for ComparableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}
