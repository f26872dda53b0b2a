//! Arbitrary-precision and rational scores, plus the heterogeneous [`Number`]
//!
//! Big integers encode exactly while they fit in 64 significant bits and are
//! truncated toward zero beyond that. Rationals take the extended-precision
//! path: the quotient is computed to 64 significant bits, so `1/3` orders
//! strictly between `0.333` and `0.334` and `3/4` encodes exactly like `0.75`.
//!
//! [`Number`] lets one heap mix integers, floats and rationals, and its
//! [`FromStr`] impl coerces raw literals:
//!
//! ```rust
//! use dheap::{DHeap, Number};
//!
//! let mut heap: DHeap<&str, Number> = DHeap::new();
//! heap.push("float", Number::from(0.5)).unwrap();
//! heap.push("ratio", "1/3".parse::<Number>().unwrap()).unwrap();
//! heap.push("huge", "123456789012345678901234567890".parse::<Number>().unwrap()).unwrap();
//! heap.push("int", Number::from(-2)).unwrap();
//!
//! let order: Vec<_> = heap.each_pop().unwrap().collect();
//! assert_eq!(order, ["int", "ratio", "float", "huge"]);
//! ```

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::{BigRational, Ratio};
use num_traits::{Signed, Zero};

use crate::error::EncodingError;
use crate::key::ComparableKey;
use crate::score::Score;

fn low_u64(n: &BigUint) -> u64 {
    n.iter_u64_digits().next().unwrap_or(0)
}

fn bit_len(n: &BigUint) -> i64 {
    i64::try_from(n.bits()).unwrap_or(i64::MAX)
}

fn big_key(negative: bool, magnitude: &BigUint) -> ComparableKey {
    let bits = magnitude.bits();
    if bits <= 64 {
        ComparableKey::from_scaled(negative, low_u64(magnitude), 0)
    } else {
        let shift = bits - 64;
        ComparableKey::from_scaled(
            negative,
            low_u64(&(magnitude >> shift)),
            i64::try_from(shift).unwrap_or(i64::MAX),
        )
    }
}

fn big_ratio_key(
    negative: bool,
    numer: &BigUint,
    denom: &BigUint,
) -> Result<ComparableKey, EncodingError> {
    if denom.is_zero() {
        return Err(EncodingError::ZeroDenominator);
    }
    if numer.is_zero() {
        return Ok(ComparableKey::ZERO);
    }
    // scale so the quotient has 64 or 65 significant bits
    let k = 64i64
        .saturating_add(bit_len(denom))
        .saturating_sub(bit_len(numer));
    let mut quotient = if k >= 0 {
        (numer << k.unsigned_abs()) / denom
    } else {
        numer / (denom << k.unsigned_abs())
    };
    let mut exp2 = k.saturating_neg();
    if quotient.bits() > 64 {
        quotient >>= 1u32;
        exp2 = exp2.saturating_add(1);
    }
    Ok(ComparableKey::from_scaled(negative, low_u64(&quotient), exp2))
}

impl Score for BigUint {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        Ok(big_key(false, self))
    }
}

impl Score for BigInt {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        Ok(big_key(self.sign() == Sign::Minus, self.magnitude()))
    }
}

impl Score for BigRational {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        let negative = self.numer().is_negative() != self.denom().is_negative();
        big_ratio_key(negative, self.numer().magnitude(), self.denom().magnitude())
    }
}

macro_rules! impl_score_small_ratio {
    ($($t:ty),*) => {
        $(
            impl Score for Ratio<$t> {
                fn encode(&self) -> Result<ComparableKey, EncodingError> {
                    let numer = *self.numer() as i64;
                    let denom = *self.denom() as i64;
                    ComparableKey::from_ratio(
                        (numer < 0) != (denom < 0),
                        numer.unsigned_abs(),
                        denom.unsigned_abs(),
                    )
                }
            }
        )*
    };
}

impl_score_small_ratio!(i8, i16, i32, i64, isize);

/// A score of any numeric kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// A signed machine integer.
    Int(i64),
    /// An unsigned machine integer too large for [`Number::Int`].
    UInt(u64),
    /// An integer of any size.
    Big(BigInt),
    /// A float; NaN is representable but fails to encode.
    Float(f64),
    /// An exact fraction.
    Ratio(BigRational),
}

impl Number {
    /// Parses a literal; same as [`str::parse`].
    pub fn parse(raw: &str) -> Result<Self, EncodingError> {
        raw.parse()
    }

    /// Approximate value as an `f64`; NaN when the number has no encoding.
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Float(f) => *f,
            other => other.encode().map_or(f64::NAN, ComparableKey::to_f64),
        }
    }

    /// Whether this is an integer kind.
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_) | Number::UInt(_) | Number::Big(_))
    }
}

impl Score for Number {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        match self {
            Number::Int(v) => v.encode(),
            Number::UInt(v) => v.encode(),
            Number::Big(v) => v.encode(),
            Number::Float(v) => v.encode(),
            Number::Ratio(v) => v.encode(),
        }
    }
}

/// Literals are coerced through [`Number`]'s parser.
impl Score for str {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        self.parse::<Number>()?.encode()
    }
}

impl Score for String {
    fn encode(&self) -> Result<ComparableKey, EncodingError> {
        self.as_str().encode()
    }
}

impl FromStr for Number {
    type Err = EncodingError;

    /// Accepts `p/q` rationals, decimal integers of any size, and floats
    /// (including `inf` and `-inf`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        let not_numeric = || EncodingError::NotNumeric(raw.to_owned());

        if let Some((numer, denom)) = s.split_once('/') {
            let numer: BigInt = numer.trim().parse().map_err(|_| not_numeric())?;
            let denom: BigInt = denom.trim().parse().map_err(|_| not_numeric())?;
            if denom.is_zero() {
                return Err(EncodingError::ZeroDenominator);
            }
            return Ok(Number::Ratio(BigRational::new(numer, denom)));
        }
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Number::Int(v));
        }
        if let Ok(v) = s.parse::<u64>() {
            return Ok(Number::UInt(v));
        }
        if let Ok(v) = s.parse::<BigInt>() {
            return Ok(Number::Big(v));
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_nan() => Err(EncodingError::NaN),
            Ok(v) => Ok(Number::Float(v)),
            Err(_) => Err(not_numeric()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::UInt(v) => write!(f, "{v}"),
            Number::Big(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
            Number::Ratio(v) => write!(f, "{}/{}", v.numer(), v.denom()),
        }
    }
}

macro_rules! impl_from_for_number {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Number::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_number!(Int: i8, i16, i32, i64, u8, u16, u32);
impl_from_for_number!(Float: f32, f64);
impl_from_for_number!(Big: BigInt, BigUint);
impl_from_for_number!(Ratio: BigRational);

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(small) => Number::Int(small),
            Err(_) => Number::UInt(v),
        }
    }
}

impl From<i128> for Number {
    fn from(v: i128) -> Self {
        match i64::try_from(v) {
            Ok(small) => Number::Int(small),
            Err(_) => Number::Big(v.into()),
        }
    }
}

impl From<u128> for Number {
    fn from(v: u128) -> Self {
        match u64::try_from(v) {
            Ok(small) => small.into(),
            Err(_) => Number::Big(v.into()),
        }
    }
}

impl From<Ratio<i64>> for Number {
    fn from(v: Ratio<i64>) -> Self {
        let (numer, denom) = v.into_raw();
        Number::Ratio(BigRational::new_raw(numer.into(), denom.into()))
    }
}

/// Reduces a fraction the way [`BigRational::new`] would, without panicking
/// on a zero denominator.
pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<BigRational, EncodingError> {
    let numer = numer.into();
    let denom = denom.into();
    if denom.is_zero() {
        return Err(EncodingError::ZeroDenominator);
    }
    let gcd = numer.gcd(&denom);
    let (mut numer, mut denom) = (numer / &gcd, denom / gcd);
    if denom.is_negative() {
        numer = -numer;
        denom = -denom;
    }
    Ok(BigRational::new_raw(numer, denom))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key<S: Score + ?Sized>(score: &S) -> ComparableKey {
        score.encode().unwrap()
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(Number::parse("42"), Ok(Number::Int(42)));
        assert_eq!(Number::parse(" -7 "), Ok(Number::Int(-7)));
        assert_eq!(Number::parse("18446744073709551615"), Ok(Number::UInt(u64::MAX)));
        assert!(matches!(
            Number::parse("123456789012345678901234567890"),
            Ok(Number::Big(_))
        ));
        assert_eq!(Number::parse("1.5"), Ok(Number::Float(1.5)));
        assert_eq!(Number::parse("-inf"), Ok(Number::Float(f64::NEG_INFINITY)));
        assert_eq!(Number::parse("inf"), Ok(Number::Float(f64::INFINITY)));
        assert!(matches!(Number::parse("6/4"), Ok(Number::Ratio(r)) if r == ratio(3, 2).unwrap()));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Number::parse("NaN"), Err(EncodingError::NaN));
        assert_eq!(Number::parse("1/0"), Err(EncodingError::ZeroDenominator));
        assert_eq!(
            Number::parse("twelve"),
            Err(EncodingError::NotNumeric("twelve".to_owned()))
        );
        assert_eq!(
            Number::parse("1/x"),
            Err(EncodingError::NotNumeric("1/x".to_owned()))
        );
        assert!("".encode().is_err());
    }

    #[test]
    fn test_big_integers_around_64_bits() {
        // 2^62 .. 2^67, each power and its predecessor
        let mut prev = key(&BigInt::from(0));
        for exp in 62..=67u32 {
            let pow = BigInt::from(1) << exp;
            let below = &pow - 1u32;
            assert!(prev < key(&below), "2^{exp} - 1");
            assert!(key(&below) <= key(&pow), "2^{exp}");
            prev = key(&pow);
        }
        // exact while they fit in 64 bits
        let max = BigUint::from(u64::MAX);
        assert_eq!(key(&max), key(&u64::MAX));
        assert_eq!(key(&BigInt::from(i64::MIN)), key(&i64::MIN));
        assert_eq!(key(&(BigInt::from(1) << 100)), key(&(1u128 << 100)));
        assert!(key(&-(BigInt::from(1) << 100usize)) < key(&i64::MIN));
    }

    #[test]
    fn test_huge_exponent_saturates() {
        let enormous = BigUint::from(1u8) << 20_000u32;
        assert_eq!(key(&enormous), ComparableKey::MAX);
        assert!(key(&enormous) < ComparableKey::INFINITY);
        let tiny = ratio(1, BigInt::from(1) << 20_000u32).unwrap();
        assert_eq!(key(&tiny), ComparableKey::MIN_POSITIVE);
    }

    #[test]
    fn test_rationals() {
        let third = ratio(1, 3).unwrap();
        assert!(key(&0.333f64) < key(&third));
        assert!(key(&third) < key(&0.334f64));
        assert_eq!(key(&ratio(3, 4).unwrap()), key(&0.75f64));
        assert_eq!(key(&ratio(-3, 4).unwrap()), key(&-0.75f64));
        assert_eq!(key(&ratio(3, -4).unwrap()), key(&-0.75f64));
        assert_eq!(key(&Ratio::new(3i64, 4)), key(&ratio(3, 4).unwrap()));
        assert_eq!(key(&Ratio::new(-1i32, 3)), key(&ratio(-1, 3).unwrap()));
        assert_eq!(
            Ratio::new_raw(1i64, 0).encode(),
            Err(EncodingError::ZeroDenominator)
        );
        assert_eq!(ratio(1, 0), Err(EncodingError::ZeroDenominator));
    }

    #[test]
    fn test_heterogeneous_order() {
        let ordered = [
            Number::Float(f64::NEG_INFINITY),
            Number::Big(-(BigInt::from(1) << 80usize)),
            Number::Int(-5),
            Number::from(ratio(-1, 2).unwrap()),
            Number::Int(0),
            Number::from(ratio(1, 3).unwrap()),
            Number::Float(0.5),
            Number::Int(1),
            Number::UInt(u64::MAX),
            Number::Big(BigInt::from(1) << 80),
            Number::Float(f64::INFINITY),
        ];
        for pair in ordered.windows(2) {
            assert!(key(&pair[0]) < key(&pair[1]), "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Number::from(5u64), Number::Int(5));
        assert_eq!(Number::from(u64::MAX), Number::UInt(u64::MAX));
        assert!(matches!(Number::from(u128::MAX), Number::Big(_)));
        assert_eq!(Number::from(-3i128), Number::Int(-3));
        assert_eq!(Number::from(Ratio::new(2i64, 4)).to_string(), "1/2");
        assert!(Number::from(7u8).is_integer());
        assert!(!Number::from(7.0f32).is_integer());
        assert_eq!(Number::from(ratio(1, 4).unwrap()).to_f64(), 0.25);
    }

    #[test]
    fn test_string_scores() {
        assert_eq!(key("12"), key(&12u8));
        assert_eq!(key(&"2.5".to_owned()), key(&2.5f64));
        assert_eq!(key("1/4"), key(&0.25f64));
    }
}
