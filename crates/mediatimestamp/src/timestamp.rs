//! Absolute points in time on the TAI timescale.
//!
//! A [`Timestamp`] is a non-negative `(seconds, nanoseconds)` pair counted
//! from the TAI epoch 1970-01-01T00:00:00. Its canonical text form is
//! `"<seconds>:<nanoseconds>"` with no sign and no padding, e.g. `"417798915:0"`.
//!
//! # Example
//! ```
//! use mediatimestamp::Timestamp;
//! let ts = Timestamp::from_sec_nsec("417798915:0").unwrap();
//! assert_eq!(ts.seconds(), 417_798_915);
//! assert_eq!(ts.to_string(), "417798915:0");
//! ```

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::canonical::{split_sec_nsec, CanonicalForm};
use crate::error::{Result, TimeError};
use crate::leap;
use crate::offset::TimeOffset;

/// Exclusive upper bound on the seconds component (2^48).
pub const MAX_SECONDS: u64 = 1 << 48;

pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// An absolute TAI instant with nanosecond resolution.
///
/// Field order matters: the derived `Ord` compares seconds first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    sec: u64,
    nsec: u32,
}

impl Timestamp {
    /// The TAI epoch, `"0:0"`.
    pub const ZERO: Timestamp = Timestamp { sec: 0, nsec: 0 };

    /// The latest representable instant.
    pub const MAX: Timestamp = Timestamp {
        sec: MAX_SECONDS - 1,
        nsec: NANOS_PER_SEC - 1,
    };

    /// Build a timestamp, rejecting `nsec >= 1e9` and `sec >= 2^48`.
    pub fn new(sec: u64, nsec: u32) -> Result<Self> {
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
        Ok(Self { sec, nsec })
    }

    pub fn seconds(&self) -> u64 {
        self.sec
    }

    pub fn nanoseconds(&self) -> u32 {
        self.nsec
    }

    /// Parse the canonical `"sec:nsec"` form.
    pub fn from_sec_nsec(s: &str) -> Result<Self> {
        let (sec, nsec) = split_sec_nsec(s, Self::KIND)?;
        let nsec = u32::try_from(nsec)
            .map_err(|_| TimeError::OutOfRange(format!("nanoseconds {nsec} must be below {NANOS_PER_SEC}")))?;
        Self::new(sec, nsec)
    }

    /// Render the canonical `"sec:nsec"` form.
    pub fn to_sec_nsec(&self) -> String {
        format!("{}:{}", self.sec, self.nsec)
    }

    /// Total nanoseconds since the TAI epoch.
    pub fn to_nanos(&self) -> i128 {
        i128::from(self.sec) * i128::from(NANOS_PER_SEC) + i128::from(self.nsec)
    }

    /// Inverse of [`to_nanos`](Self::to_nanos). Negative or oversized inputs are out of range.
    pub fn from_nanos(nanos: i128) -> Result<Self> {
        if nanos < 0 {
            return Err(TimeError::OutOfRange(format!(
                "{nanos}ns is before the TAI epoch"
            )));
        }
        let per_sec = i128::from(NANOS_PER_SEC);
        let sec = u64::try_from(nanos / per_sec)
            .map_err(|_| TimeError::OutOfRange(format!("{nanos}ns is too large")))?;
        // Remainder of a non-negative value is in 0..1e9.
        let nsec = (nanos % per_sec) as u32;
        Self::new(sec, nsec)
    }

    /// Shift forwards (or backwards, for a negative offset).
    pub fn checked_add(&self, offset: &TimeOffset) -> Result<Self> {
        let nanos = self
            .to_nanos()
            .checked_add(offset.to_nanos())
            .ok_or(TimeError::Overflow)?;
        Self::from_nanos(nanos)
    }

    pub fn checked_sub(&self, offset: &TimeOffset) -> Result<Self> {
        let nanos = self
            .to_nanos()
            .checked_sub(offset.to_nanos())
            .ok_or(TimeError::Overflow)?;
        Self::from_nanos(nanos)
    }

    /// Signed distance from `other` to `self`.
    pub fn offset_from(&self, other: &Timestamp) -> TimeOffset {
        // Both operands are below 2^48 seconds, so the difference always fits.
        TimeOffset::from_nanos_unchecked(self.to_nanos() - other.to_nanos())
    }

    /// Convert a UTC instant to TAI by adding the leap-second offset in force at that time.
    ///
    /// UTC instants before the Unix epoch cannot be represented.
    pub fn from_utc(dt: DateTime<Utc>) -> Result<Self> {
        let unix = dt.timestamp();
        let mut nsec = dt.timestamp_subsec_nanos();
        // chrono encodes a positive leap second as nanos in 1e9..2e9.
        let mut carry = 0;
        if nsec >= NANOS_PER_SEC {
            nsec -= NANOS_PER_SEC;
            carry = 1;
        }
        let unix = u64::try_from(unix).map_err(|_| {
            TimeError::OutOfRange(format!("{dt} is before the Unix epoch"))
        })?;
        let tai = unix + leap::tai_minus_utc_at_utc(unix) + carry;
        Self::new(tai, nsec)
    }

    /// Convert to UTC by removing the leap-second offset in force at this instant.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        let unix = self.sec.saturating_sub(leap::tai_minus_utc_at_tai(self.sec));
        let unix = i64::try_from(unix).map_err(|_| TimeError::Overflow)?;
        DateTime::from_timestamp(unix, self.nsec).ok_or_else(|| {
            TimeError::OutOfRange(format!("{self} is outside the UTC calendar range"))
        })
    }
}

impl Sub for Timestamp {
    type Output = TimeOffset;

    fn sub(self, rhs: Timestamp) -> TimeOffset {
        self.offset_from(&rhs)
    }
}

impl CanonicalForm for Timestamp {
    const KIND: &'static str = "timestamp";

    fn to_canonical(&self) -> String {
        self.to_sec_nsec()
    }

    fn from_canonical(s: &str) -> Result<Self> {
        Self::from_sec_nsec(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sec, self.nsec)
    }
}

impl FromStr for Timestamp {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_sec_nsec(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_sec_nsec())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_sec_nsec(&s).map_err(serde::de::Error::custom)
    }
}
