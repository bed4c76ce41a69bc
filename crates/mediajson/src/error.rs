//! Error types for media JSON encoding and decoding.

use mediatimestamp::TimeError;
use thiserror::Error;

/// Errors that can occur while encoding or decoding media JSON.
///
/// Failures from `serde_json`, the temporal types and the UUID parser are
/// passed through with their own messages.
#[derive(Error, Debug)]
pub enum MediaJsonError {
    /// Malformed JSON text, or an I/O failure on the underlying reader/writer.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A string had the shape of a timestamp, offset or range but was rejected by its parser.
    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Uuid(#[from] uuid::Error),

    /// A `{"numerator", "denominator"}` map whose members are not integers
    /// representable as `i64`.
    #[error("Invalid rational: {0}")]
    InvalidRational(String),

    #[error("Rational denominator is zero")]
    ZeroDenominator,

    /// The value tree nests containers deeper than the configured limit.
    #[error("Nesting exceeds the maximum depth of {0}")]
    DepthLimit(usize),
}

/// Convenience alias used throughout mediajson.
pub type Result<T> = std::result::Result<T, MediaJsonError>;
