//! # mediajson
//!
//! JSON encoding and decoding that round-trips the value types used in
//! media grain metadata: UUIDs, exact rationals, TAI timestamps, signed time
//! offsets and time ranges. None of these has a native JSON form, so each is
//! written in a fixed canonical shape and recognised again by shape on load.
//!
//! ## Quick start
//!
//! ```rust
//! use mediajson::{dumps, loads, MediaValue, Rational};
//! use mediatimestamp::Timestamp;
//!
//! let text = r#"{"rate":{"numerator":30000,"denominator":1001},"origin":"417798915:0"}"#;
//! let value = loads(text).unwrap();
//!
//! assert_eq!(value.get("rate"), Some(&MediaValue::Rational(Rational::new(30000, 1001).unwrap())));
//! assert_eq!(
//!     value.get("origin"),
//!     Some(&MediaValue::Timestamp(Timestamp::new(417798915, 0).unwrap()))
//! );
//!
//! // Canonical forms are written back unchanged.
//! assert_eq!(dumps(&value).unwrap(), text);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `MediaValue`, the closed value tree
//! - [`encoder`] — `MediaValue` → plain `serde_json::Value` (`encode_leaf`, `encode_tree`)
//! - [`decoder`] — plain `serde_json::Value` → `MediaValue` (`decode_tree`)
//! - [`codec`] — `loads`/`load`/`dumps`/`dump` over text, bytes and streams
//! - [`rational`] — `Rational`, exact fractions
//! - [`options`] — depth limit and output formatting
//! - [`error`] — Error types

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod rational;
pub mod value;

pub use codec::{
    dump, dump_pretty, dump_with, dumps, dumps_pretty, dumps_with, load, load_with, loads,
    loads_slice, loads_slice_with, loads_with,
};
pub use decoder::{decode_tree, decode_tree_with};
pub use encoder::{encode_leaf, encode_tree, encode_tree_with};
pub use error::MediaJsonError;
pub use options::{Options, DEFAULT_MAX_DEPTH, MAX_DEPTH};
pub use rational::Rational;
pub use value::{MediaValue, Object, ValueKind};
