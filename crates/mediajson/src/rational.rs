//! Exact rational numbers, e.g. frame rates such as 30000/1001.
//!
//! On the wire a rational is a JSON object with exactly two integer members:
//! `{"numerator": 30000, "denominator": 1001}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MediaJsonError, Result};

/// A fraction kept in lowest terms with a positive denominator.
///
/// Normalising at construction means `Rational::new(2, 4)` and
/// `Rational::new(-1, -2)` both equal `Rational::new(1, 2)`, and the encoder
/// always emits the reduced pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRational")]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRational {
    numerator: i64,
    denominator: i64,
}

impl TryFrom<RawRational> for Rational {
    type Error = MediaJsonError;

    fn try_from(raw: RawRational) -> Result<Self> {
        Rational::new(raw.numerator, raw.denominator)
    }
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(MediaJsonError::ZeroDenominator);
        }
        // Widen so that i64::MIN / -1 style corner cases cannot overflow mid-reduction.
        let mut n = i128::from(numerator);
        let mut d = i128::from(denominator);
        let g = gcd(n.unsigned_abs(), d.unsigned_abs()) as i128;
        n /= g;
        d /= g;
        if d < 0 {
            n = -n;
            d = -d;
        }
        let out_of_range =
            || MediaJsonError::InvalidRational(format!("{numerator}/{denominator} does not fit in i64"));
        Ok(Self {
            numerator: i64::try_from(n).map_err(|_| out_of_range())?,
            denominator: i64::try_from(d).map_err(|_| out_of_range())?,
        })
    }

    pub fn from_integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Lossy conversion, for display and arithmetic outside this crate.
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
