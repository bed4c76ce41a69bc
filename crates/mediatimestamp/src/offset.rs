//! Signed durations between two instants.
//!
//! The canonical text form always carries a sign: `"+10:500"`, `"-3:0"`.
//! Zero renders as `"+0:0"`; `"-0:0"` is accepted and means zero.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::canonical::{split_sec_nsec, CanonicalForm};
use crate::error::{Result, TimeError};
use crate::timestamp::{MAX_SECONDS, NANOS_PER_SEC};

/// A signed span of time with nanosecond resolution.
///
/// The magnitude is bounded by `MAX_SECONDS` seconds so that the difference
/// of any two timestamps is representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOffset {
    nanos: i128,
}

const MAX_NANOS: i128 = (MAX_SECONDS as i128) * (NANOS_PER_SEC as i128);

impl TimeOffset {
    pub const ZERO: TimeOffset = TimeOffset { nanos: 0 };

    /// Build from a sign and a magnitude split into seconds and nanoseconds.
    pub fn new(negative: bool, sec: u64, nsec: u32) -> Result<Self> {
        if nsec >= NANOS_PER_SEC {
            return Err(TimeError::OutOfRange(format!(
                "nanoseconds {nsec} must be below {NANOS_PER_SEC}"
            )));
        }
        if sec >= MAX_SECONDS {
            return Err(TimeError::OutOfRange(format!(
                "seconds {sec} must be below {MAX_SECONDS}"
            )));
        }
        let magnitude = i128::from(sec) * i128::from(NANOS_PER_SEC) + i128::from(nsec);
        Ok(Self {
            nanos: if negative { -magnitude } else { magnitude },
        })
    }

    pub fn from_nanos(nanos: i128) -> Result<Self> {
        if nanos.unsigned_abs() >= MAX_NANOS.unsigned_abs() {
            return Err(TimeError::OutOfRange(format!(
                "{nanos}ns exceeds {MAX_SECONDS} seconds"
            )));
        }
        Ok(Self { nanos })
    }

    pub(crate) fn from_nanos_unchecked(nanos: i128) -> Self {
        Self { nanos }
    }

    pub fn to_nanos(&self) -> i128 {
        self.nanos
    }

    pub fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    pub fn abs(&self) -> Self {
        Self {
            nanos: self.nanos.abs(),
        }
    }

    /// Whole seconds of the magnitude.
    pub fn seconds(&self) -> u64 {
        (self.nanos.unsigned_abs() / NANOS_PER_SEC as u128) as u64
    }

    /// Sub-second nanoseconds of the magnitude.
    pub fn nanoseconds(&self) -> u32 {
        (self.nanos.unsigned_abs() % NANOS_PER_SEC as u128) as u32
    }

    /// Parse the canonical `"<+|->sec:nsec"` form. The sign is mandatory.
    pub fn from_sec_nsec(s: &str) -> Result<Self> {
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'+') => (false, &s[1..]),
            Some(b'-') => (true, &s[1..]),
            _ => {
                return Err(TimeError::Malformed {
                    kind: Self::KIND,
                    input: s.to_string(),
                })
            }
        };
        let (sec, nsec) = split_sec_nsec(rest, Self::KIND).map_err(|e| match e {
            TimeError::Malformed { kind, .. } => TimeError::Malformed {
                kind,
                input: s.to_string(),
            },
            other => other,
        })?;
        let nsec = u32::try_from(nsec).map_err(|_| {
            TimeError::OutOfRange(format!("nanoseconds {nsec} must be below {NANOS_PER_SEC}"))
        })?;
        Self::new(negative, sec, nsec)
    }

    pub fn to_sec_nsec(&self) -> String {
        self.to_string()
    }

    /// Sum of two offsets, failing if the result leaves the representable range.
    pub fn checked_add(&self, other: &TimeOffset) -> Result<Self> {
        Self::from_nanos(self.nanos + other.nanos)
    }
}

impl Neg for TimeOffset {
    type Output = TimeOffset;

    fn neg(self) -> TimeOffset {
        Self { nanos: -self.nanos }
    }
}

impl CanonicalForm for TimeOffset {
    const KIND: &'static str = "time offset";

    fn to_canonical(&self) -> String {
        self.to_sec_nsec()
    }

    fn from_canonical(s: &str) -> Result<Self> {
        Self::from_sec_nsec(s)
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { '-' } else { '+' };
        write!(f, "{}{}:{}", sign, self.seconds(), self.nanoseconds())
    }
}

impl FromStr for TimeOffset {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_sec_nsec(s)
    }
}

impl Serialize for TimeOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_sec_nsec())
    }
}

impl<'de> Deserialize<'de> for TimeOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_sec_nsec(&s).map_err(serde::de::Error::custom)
    }
}
