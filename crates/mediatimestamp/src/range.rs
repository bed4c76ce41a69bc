//! Spans of time between two optional endpoints.
//!
//! Text form, with `<ts>` meaning a canonical `sec:nsec` timestamp:
//!
//! | Range | Text |
//! |---|---|
//! | both ends inclusive | `[<ts>_<ts>]` |
//! | both ends exclusive | `(<ts>_<ts>)` |
//! | half open | `[<ts>_<ts>)` / `(<ts>_<ts>]` |
//! | from a start | `[<ts>_` / `(<ts>_` |
//! | up to an end | `_<ts>]` / `_<ts>)` |
//! | eternity (unbounded) | `_` |
//! | never (empty) | `()` |
//!
//! Ranges that contain no instant (start after end, or a single point with
//! an exclusive end) are normalised to [`TimeRange::never`] on construction,
//! so they compare equal to it and render as `()`.

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::canonical::CanonicalForm;
use crate::error::{Result, TimeError};
use crate::timestamp::Timestamp;

/// Which ends of a bounded range are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Inclusivity {
    #[default]
    Inclusive,
    Exclusive,
    IncludeStart,
    IncludeEnd,
}

impl Inclusivity {
    pub fn includes_start(self) -> bool {
        matches!(self, Inclusivity::Inclusive | Inclusivity::IncludeStart)
    }

    pub fn includes_end(self) -> bool {
        matches!(self, Inclusivity::Inclusive | Inclusivity::IncludeEnd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Never,
    Span(Bound<Timestamp>, Bound<Timestamp>),
}

/// A possibly-empty, possibly-unbounded interval of timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    repr: Repr,
}

fn bound(ts: Timestamp, included: bool) -> Bound<Timestamp> {
    if included {
        Bound::Included(ts)
    } else {
        Bound::Excluded(ts)
    }
}

impl TimeRange {
    /// A range between two timestamps.
    pub fn new(start: Timestamp, end: Timestamp, inclusivity: Inclusivity) -> Self {
        Self::from_bounds(
            bound(start, inclusivity.includes_start()),
            bound(end, inclusivity.includes_end()),
        )
    }

    /// Everything from `start` onwards. Only the start side of `inclusivity` is used.
    pub fn from_start(start: Timestamp, inclusivity: Inclusivity) -> Self {
        Self::from_bounds(bound(start, inclusivity.includes_start()), Bound::Unbounded)
    }

    /// Everything up to `end`. Only the end side of `inclusivity` is used.
    pub fn from_end(end: Timestamp, inclusivity: Inclusivity) -> Self {
        Self::from_bounds(Bound::Unbounded, bound(end, inclusivity.includes_end()))
    }

    /// The range containing exactly one instant.
    pub fn from_single(ts: Timestamp) -> Self {
        Self::new(ts, ts, Inclusivity::Inclusive)
    }

    pub fn from_bounds(start: Bound<Timestamp>, end: Bound<Timestamp>) -> Self {
        let empty = match (start, end) {
            (
                Bound::Included(s) | Bound::Excluded(s),
                Bound::Included(e) | Bound::Excluded(e),
            ) => {
                s > e
                    || (s == e
                        && !(matches!(start, Bound::Included(_))
                            && matches!(end, Bound::Included(_))))
            }
            _ => false,
        };
        if empty {
            Self::never()
        } else {
            Self {
                repr: Repr::Span(start, end),
            }
        }
    }

    /// The empty range.
    pub fn never() -> Self {
        Self { repr: Repr::Never }
    }

    /// The range with no bounds at all.
    pub fn eternity() -> Self {
        Self {
            repr: Repr::Span(Bound::Unbounded, Bound::Unbounded),
        }
    }

    pub fn is_never(&self) -> bool {
        self.repr == Repr::Never
    }

    pub fn is_eternity(&self) -> bool {
        self.repr == Repr::Span(Bound::Unbounded, Bound::Unbounded)
    }

    /// Lower bound, or `None` for the empty range.
    pub fn start_bound(&self) -> Option<Bound<Timestamp>> {
        match self.repr {
            Repr::Never => None,
            Repr::Span(start, _) => Some(start),
        }
    }

    /// Upper bound, or `None` for the empty range.
    pub fn end_bound(&self) -> Option<Bound<Timestamp>> {
        match self.repr {
            Repr::Never => None,
            Repr::Span(_, end) => Some(end),
        }
    }

    pub fn start(&self) -> Option<Timestamp> {
        match self.start_bound()? {
            Bound::Included(ts) | Bound::Excluded(ts) => Some(ts),
            Bound::Unbounded => None,
        }
    }

    pub fn end(&self) -> Option<Timestamp> {
        match self.end_bound()? {
            Bound::Included(ts) | Bound::Excluded(ts) => Some(ts),
            Bound::Unbounded => None,
        }
    }

    pub fn contains(&self, ts: &Timestamp) -> bool {
        match self.repr {
            Repr::Never => false,
            Repr::Span(start, end) => (start, end).contains(ts),
        }
    }

    /// The overlap of two ranges; never if they do not overlap.
    pub fn intersect(&self, other: &TimeRange) -> TimeRange {
        match (self.repr, other.repr) {
            (Repr::Span(s1, e1), Repr::Span(s2, e2)) => {
                Self::from_bounds(later_start(s1, s2), earlier_end(e1, e2))
            }
            _ => Self::never(),
        }
    }

    /// Render the canonical text form.
    pub fn to_sec_nsec_range(&self) -> String {
        let (start, end) = match self.repr {
            Repr::Never => return "()".to_string(),
            Repr::Span(start, end) => (start, end),
        };
        let mut out = String::new();
        match start {
            Bound::Included(ts) => {
                out.push('[');
                out.push_str(&ts.to_sec_nsec());
            }
            Bound::Excluded(ts) => {
                out.push('(');
                out.push_str(&ts.to_sec_nsec());
            }
            Bound::Unbounded => {}
        }
        out.push('_');
        match end {
            Bound::Included(ts) => {
                out.push_str(&ts.to_sec_nsec());
                out.push(']');
            }
            Bound::Excluded(ts) => {
                out.push_str(&ts.to_sec_nsec());
                out.push(')');
            }
            Bound::Unbounded => {}
        }
        out
    }

    /// Parse the canonical text form.
    ///
    /// `"()"` is the empty range. Otherwise the text is an optional `[`/`(`,
    /// an optional timestamp, `_`, an optional timestamp and an optional
    /// `]`/`)`. A bracket next to a missing timestamp is ignored; a timestamp
    /// without a bracket is taken as inclusive.
    pub fn from_sec_nsec_range(s: &str) -> Result<Self> {
        if s == "()" {
            return Ok(Self::never());
        }
        let malformed = || TimeError::Malformed {
            kind: Self::KIND,
            input: s.to_string(),
        };
        let (lower, upper) = s.split_once('_').ok_or_else(malformed)?;

        let (start_included, lower) = if let Some(rest) = lower.strip_prefix('[') {
            (true, rest)
        } else if let Some(rest) = lower.strip_prefix('(') {
            (false, rest)
        } else {
            (true, lower)
        };
        let (end_included, upper) = if let Some(rest) = upper.strip_suffix(']') {
            (true, rest)
        } else if let Some(rest) = upper.strip_suffix(')') {
            (false, rest)
        } else {
            (true, upper)
        };

        let parse_endpoint = |text: &str, included: bool| -> Result<Bound<Timestamp>> {
            if text.is_empty() {
                return Ok(Bound::Unbounded);
            }
            let ts = Timestamp::from_sec_nsec(text).map_err(|e| match e {
                TimeError::Malformed { .. } => malformed(),
                other => other,
            })?;
            Ok(bound(ts, included))
        };

        let start = parse_endpoint(lower, start_included)?;
        let end = parse_endpoint(upper, end_included)?;
        Ok(Self::from_bounds(start, end))
    }
}

fn later_start(a: Bound<Timestamp>, b: Bound<Timestamp>) -> Bound<Timestamp> {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other,
        (Bound::Included(x), Bound::Included(y)) => Bound::Included(x.max(y)),
        (Bound::Excluded(x), Bound::Excluded(y)) => Bound::Excluded(x.max(y)),
        (Bound::Included(i), Bound::Excluded(e)) | (Bound::Excluded(e), Bound::Included(i)) => {
            if i > e {
                Bound::Included(i)
            } else {
                Bound::Excluded(e)
            }
        }
    }
}

fn earlier_end(a: Bound<Timestamp>, b: Bound<Timestamp>) -> Bound<Timestamp> {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other,
        (Bound::Included(x), Bound::Included(y)) => Bound::Included(x.min(y)),
        (Bound::Excluded(x), Bound::Excluded(y)) => Bound::Excluded(x.min(y)),
        (Bound::Included(i), Bound::Excluded(e)) | (Bound::Excluded(e), Bound::Included(i)) => {
            if i < e {
                Bound::Included(i)
            } else {
                Bound::Excluded(e)
            }
        }
    }
}

impl CanonicalForm for TimeRange {
    const KIND: &'static str = "time range";

    fn to_canonical(&self) -> String {
        self.to_sec_nsec_range()
    }

    fn from_canonical(s: &str) -> Result<Self> {
        Self::from_sec_nsec_range(s)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sec_nsec_range())
    }
}

impl FromStr for TimeRange {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_sec_nsec_range(s)
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_sec_nsec_range())
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_sec_nsec_range(&s).map_err(serde::de::Error::custom)
    }
}
