//! Text and stream entry points: `loads`/`load` and `dumps`/`dump`.
//!
//! These are thin wrappers around `serde_json`. Parsing produces a plain
//! `Value` that is then rewritten by [`decode_tree`](crate::decode_tree);
//! serialising drives `serde_json` over the tree and swaps each domain leaf
//! for its canonical form as it is reached. Any `serde_json` error (bad
//! syntax, I/O failure) is returned as-is.

use std::io::{Read, Write};

use serde_json::Value;

use crate::decoder::decode_tree_with;
use crate::error::{MediaJsonError, Result};
use crate::options::Options;
use crate::value::MediaValue;

/// Parse media JSON from a string.
///
/// # Example
/// ```
/// use mediajson::loads;
///
/// let value = loads(r#"{"ts": "417798915:0", "name": "clip"}"#).unwrap();
/// assert_eq!(value.get("ts").unwrap().as_timestamp().unwrap().seconds(), 417798915);
/// assert_eq!(value.get("name").unwrap().as_str(), Some("clip"));
/// ```
pub fn loads(text: &str) -> Result<MediaValue> {
    loads_with(text, &Options::default())
}

pub fn loads_with(text: &str, options: &Options) -> Result<MediaValue> {
    tracing::debug!(bytes = text.len(), "parsing media JSON text");
    let value: Value = serde_json::from_str(text)?;
    decode_tree_with(value, options)
}

/// Parse media JSON from UTF-8 bytes.
pub fn loads_slice(bytes: &[u8]) -> Result<MediaValue> {
    loads_slice_with(bytes, &Options::default())
}

pub fn loads_slice_with(bytes: &[u8], options: &Options) -> Result<MediaValue> {
    tracing::debug!(bytes = bytes.len(), "parsing media JSON bytes");
    let value: Value = serde_json::from_slice(bytes)?;
    decode_tree_with(value, options)
}

/// Parse media JSON from a reader.
///
/// The reader is consumed unbuffered; wrap files in a `BufReader`.
pub fn load<R: Read>(reader: R) -> Result<MediaValue> {
    load_with(reader, &Options::default())
}

pub fn load_with<R: Read>(reader: R, options: &Options) -> Result<MediaValue> {
    tracing::debug!("parsing media JSON stream");
    let value: Value = serde_json::from_reader(reader)?;
    decode_tree_with(value, options)
}

/// Serialise to compact JSON text.
///
/// # Example
/// ```
/// use mediajson::{dumps, MediaValue};
/// use mediatimestamp::TimeRange;
///
/// let value: MediaValue = [("valid", MediaValue::from(TimeRange::eternity()))]
///     .into_iter()
///     .collect();
/// assert_eq!(dumps(&value).unwrap(), r#"{"valid":"_"}"#);
/// ```
pub fn dumps(value: &MediaValue) -> Result<String> {
    dumps_with(value, &Options::default())
}

/// Serialise to indented JSON text.
pub fn dumps_pretty(value: &MediaValue) -> Result<String> {
    dumps_with(value, &Options::default().with_pretty(true))
}

pub fn dumps_with(value: &MediaValue, options: &Options) -> Result<String> {
    check_depth(value, options)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// Serialise compact JSON into a writer.
pub fn dump<W: Write>(value: &MediaValue, writer: W) -> Result<()> {
    dump_with(value, writer, &Options::default())
}

/// Serialise indented JSON into a writer.
pub fn dump_pretty<W: Write>(value: &MediaValue, writer: W) -> Result<()> {
    dump_with(value, writer, &Options::default().with_pretty(true))
}

pub fn dump_with<W: Write>(value: &MediaValue, writer: W, options: &Options) -> Result<()> {
    check_depth(value, options)?;
    if options.pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

/// `serde_json` does not bound recursion while serialising, so the tree is
/// measured up front.
fn check_depth(value: &MediaValue, options: &Options) -> Result<()> {
    let depth = value.depth();
    if depth > options.max_depth {
        tracing::debug!(depth, max_depth = options.max_depth, "refusing to serialise deep tree");
        return Err(MediaJsonError::DepthLimit(options.max_depth));
    }
    Ok(())
}
