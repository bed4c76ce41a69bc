//! Error types for timestamp, offset and range operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The text did not have the shape of the named value kind.
    #[error("Malformed {kind}: {input:?}")]
    Malformed { kind: &'static str, input: String },

    /// A component was syntactically fine but outside the representable range.
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Arithmetic overflow")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, TimeError>;
