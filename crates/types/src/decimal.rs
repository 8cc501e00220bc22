//! 18-decimal fixed-point arithmetic over arbitrary-precision integers.
//!
//! `Dec` stores a value as `i / 10^18` where `i` is a `BigInt`. Addition and
//! subtraction are exact; multiplication and division chop the extra scale
//! factor with round-half-to-even at the exact midpoint. Rounding to whole
//! units happens only where a caller asks for it (`round_int`,
//! `truncate_int`), never implicitly.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits carried by every `Dec`.
pub const DECIMAL_PLACES: u32 = 18;

static PRECISION: Lazy<BigInt> = Lazy::new(|| BigInt::from(10u64).pow(DECIMAL_PLACES));
static PRECISION_SQ: Lazy<BigInt> = Lazy::new(|| BigInt::from(10u64).pow(DECIMAL_PLACES * 2));
static HALF_PRECISION: Lazy<BigInt> = Lazy::new(|| BigInt::from(5u64) * BigInt::from(10u64).pow(DECIMAL_PLACES - 1));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid decimal literal: {0}")]
    InvalidDecimal(String),
}

/// Fixed-point decimal with 18 fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Dec {
    i: BigInt,
}

/// Drop an extra `10^18` scale factor from `d`, rounding half to even.
fn chop_precision_and_round(d: &BigInt) -> BigInt {
    if d.is_negative() {
        return -chop_precision_and_round(&-d);
    }

    let quo = d / &*PRECISION;
    let rem = d - &quo * &*PRECISION;

    if rem.is_zero() || rem < *HALF_PRECISION {
        quo
    } else if rem > *HALF_PRECISION {
        quo + 1
    } else if (&quo % 2u8).is_zero() {
        quo
    } else {
        quo + 1
    }
}

impl Dec {
    pub fn zero() -> Self {
        Self { i: BigInt::zero() }
    }

    pub fn one() -> Self {
        Self { i: PRECISION.clone() }
    }

    /// Whole-unit constructor: `from_int(3)` is `3.000000000000000000`.
    pub fn from_int(value: impl Into<BigInt>) -> Self {
        Self {
            i: value.into() * &*PRECISION,
        }
    }

    /// Construct from an already-scaled integer (`raw / 10^18`).
    pub fn from_raw(i: BigInt) -> Self {
        Self { i }
    }

    pub fn is_zero(&self) -> bool {
        self.i.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.i.is_negative()
    }

    /// Exact product of the operands, chopped back to 18 fractional digits.
    pub fn mul(&self, other: &Dec) -> Dec {
        Dec {
            i: chop_precision_and_round(&(&self.i * &other.i)),
        }
    }

    /// Exact product with a whole integer; no rounding occurs.
    pub fn mul_int(&self, other: &BigInt) -> Dec {
        Dec { i: &self.i * other }
    }

    /// Quotient at 18-digit precision: `(a * 10^36) / b` truncated toward
    /// zero, then chopped with round-half-to-even.
    pub fn div(&self, other: &Dec) -> Result<Dec, DecError> {
        if other.i.is_zero() {
            return Err(DecError::DivisionByZero);
        }
        let scaled = &self.i * &*PRECISION_SQ;
        Ok(Dec {
            i: chop_precision_and_round(&(scaled / &other.i)),
        })
    }

    /// Truncating quotient by a whole integer, keeping the 18-digit scale.
    pub fn div_int(&self, other: &BigInt) -> Result<Dec, DecError> {
        if other.is_zero() {
            return Err(DecError::DivisionByZero);
        }
        Ok(Dec { i: &self.i / other })
    }

    /// Whole-unit part, truncated toward zero.
    pub fn truncate_int(&self) -> BigInt {
        &self.i / &*PRECISION
    }

    /// Nearest whole unit, half-to-even at the exact midpoint.
    pub fn round_int(&self) -> BigInt {
        chop_precision_and_round(&self.i)
    }

    /// Clamp into `[min, max]`.
    pub fn clamp(self, min: &Dec, max: &Dec) -> Dec {
        if self > *max {
            max.clone()
        } else if self < *min {
            min.clone()
        } else {
            self
        }
    }
}

impl Add for Dec {
    type Output = Dec;

    fn add(self, rhs: Dec) -> Dec {
        Dec { i: self.i + rhs.i }
    }
}

impl Add<&Dec> for Dec {
    type Output = Dec;

    fn add(self, rhs: &Dec) -> Dec {
        Dec { i: self.i + &rhs.i }
    }
}

impl AddAssign<&Dec> for Dec {
    fn add_assign(&mut self, rhs: &Dec) {
        self.i += &rhs.i;
    }
}

impl Sub for Dec {
    type Output = Dec;

    fn sub(self, rhs: Dec) -> Dec {
        Dec { i: self.i - rhs.i }
    }
}

impl Sub<&Dec> for Dec {
    type Output = Dec;

    fn sub(self, rhs: &Dec) -> Dec {
        Dec { i: self.i - &rhs.i }
    }
}

impl SubAssign<&Dec> for Dec {
    fn sub_assign(&mut self, rhs: &Dec) {
        self.i -= &rhs.i;
    }
}

impl Neg for Dec {
    type Output = Dec;

    fn neg(self) -> Dec {
        Dec { i: -self.i }
    }
}

impl fmt::Display for Dec {
    /// Canonical form: the full 18 fractional digits are always printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.i.magnitude();
        let precision = PRECISION.magnitude();
        let whole = magnitude / precision;
        let frac = magnitude % precision;
        let sign = if self.i.is_negative() { "-" } else { "" };
        write!(f, "{sign}{whole}.{frac:018}")
    }
}

impl FromStr for Dec {
    type Err = DecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecError::InvalidDecimal(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > DECIMAL_PLACES as usize || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: BigInt = whole.parse().map_err(|_| invalid())?;
        let frac_scaled = if frac.is_empty() {
            BigInt::zero()
        } else {
            let frac_int: BigInt = frac.parse().map_err(|_| invalid())?;
            frac_int * BigInt::from(10u64).pow(DECIMAL_PLACES - frac.len() as u32)
        };

        let i = whole * &*PRECISION + frac_scaled;
        Ok(Dec {
            i: if negative { -i } else { i },
        })
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display_roundtrip() {
        assert_eq!(dec("0.130000000000000000").to_string(), "0.130000000000000000");
        assert_eq!(dec("0.13").to_string(), "0.130000000000000000");
        assert_eq!(dec("42").to_string(), "42.000000000000000000");
        assert_eq!(dec("-1.5").to_string(), "-1.500000000000000000");
        assert_eq!(Dec::zero().to_string(), "0.000000000000000000");
    }

    #[test]
    fn parse_rejects_malformed_literals() {
        assert!("".parse::<Dec>().is_err());
        assert!(".5".parse::<Dec>().is_err());
        assert!("1.".parse::<Dec>().is_ok()); // empty fraction is zero
        assert!("1,5".parse::<Dec>().is_err());
        assert!("abc".parse::<Dec>().is_err());
        // 19 fractional digits exceed the fixed scale
        assert!("0.1234567890123456789".parse::<Dec>().is_err());
    }

    #[test]
    fn add_sub_are_exact() {
        let a = dec("1.000000000000000001");
        let b = dec("2.000000000000000002");
        assert_eq!((a.clone() + b.clone()).to_string(), "3.000000000000000003");
        assert_eq!((b - a).to_string(), "1.000000000000000001");
    }

    #[test]
    fn mul_chops_with_half_to_even() {
        // 1.5 * 1.5 = 2.25, representable exactly
        assert_eq!(dec("1.5").mul(&dec("1.5")).to_string(), "2.250000000000000000");
        // smallest unit squared is far below half a unit and chops to zero
        let eps = dec("0.000000000000000001");
        assert!(eps.mul(&eps).is_zero());
    }

    #[test]
    fn div_known_quotients() {
        assert_eq!(dec("1").div(&dec("3")).unwrap().to_string(), "0.333333333333333333");
        assert_eq!(dec("2").div(&dec("3")).unwrap().to_string(), "0.666666666666666667");
        assert_eq!(
            dec("1000000").div(&dec("11582258000000")).unwrap().to_string(),
            "0.000000086338950488"
        );
    }

    #[test]
    fn div_by_zero_is_an_error() {
        assert_eq!(dec("1").div(&Dec::zero()), Err(DecError::DivisionByZero));
        assert_eq!(dec("1").div_int(&BigInt::zero()), Err(DecError::DivisionByZero));
    }

    #[test]
    fn div_int_truncates_at_full_scale() {
        // 10 / 3 on the raw representation keeps 18 digits, truncated
        let d = dec("10").div_int(&BigInt::from(3)).unwrap();
        assert_eq!(d.to_string(), "3.333333333333333333");
    }

    #[test]
    fn round_int_is_bankers_at_half() {
        assert_eq!(dec("2.5").round_int(), BigInt::from(2));
        assert_eq!(dec("3.5").round_int(), BigInt::from(4));
        assert_eq!(dec("2.4").round_int(), BigInt::from(2));
        assert_eq!(dec("2.6").round_int(), BigInt::from(3));
        assert_eq!(dec("-2.5").round_int(), BigInt::from(-2));
        assert_eq!(dec("-2.6").round_int(), BigInt::from(-3));
    }

    #[test]
    fn truncate_int_drops_the_fraction() {
        assert_eq!(dec("2.999999999999999999").truncate_int(), BigInt::from(2));
        assert_eq!(dec("-2.9").truncate_int(), BigInt::from(-2));
    }

    #[test]
    fn clamp_bounds_inclusive() {
        let min = dec("0.07");
        let max = dec("0.14");
        assert_eq!(dec("0.2").clamp(&min, &max), max);
        assert_eq!(dec("0.01").clamp(&min, &max), min);
        assert_eq!(dec("0.1").clamp(&min, &max), dec("0.1"));
    }

    #[test]
    fn mul_int_is_exact() {
        let d = dec("0.13").mul_int(&BigInt::from(11_582_258_000_000u64));
        assert_eq!(d.to_string(), "1505693540000.000000000000000000");
    }
}
