//! The canonical text capability shared by every temporal value.
//!
//! Anything that wants to move temporal values through a text-only carrier
//! (JSON strings, CLI output) only needs this trait, not the concrete type.

use crate::error::{Result, TimeError};

/// A value with exactly one canonical text form that parses back to an equal value.
pub trait CanonicalForm: Sized {
    /// Human-readable name of the value kind, used in error messages.
    const KIND: &'static str;

    fn to_canonical(&self) -> String;

    fn from_canonical(s: &str) -> Result<Self>;
}

/// Split `"<digits>:<digits>"` into its raw seconds and nanoseconds.
///
/// Only ASCII digits are accepted in either component: no sign, no
/// whitespace, no empty halves. Components too large for `u64` are
/// reported as out of range rather than malformed.
pub(crate) fn split_sec_nsec(s: &str, kind: &'static str) -> Result<(u64, u64)> {
    let malformed = || TimeError::Malformed {
        kind,
        input: s.to_string(),
    };
    let (sec, nsec) = s.split_once(':').ok_or_else(malformed)?;
    if !is_digits(sec) || !is_digits(nsec) {
        return Err(malformed());
    }
    let sec = sec
        .parse::<u64>()
        .map_err(|_| TimeError::OutOfRange(format!("seconds component of {s:?}")))?;
    let nsec = nsec
        .parse::<u64>()
        .map_err(|_| TimeError::OutOfRange(format!("nanoseconds component of {s:?}")))?;
    Ok((sec, nsec))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
