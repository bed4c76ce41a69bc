//! The `MediaValue` tree: plain JSON plus the five media value types.
//!
//! `MediaValue` is a closed sum type. Every node is either something JSON
//! can already express (null, bool, number, string, array, object) or one
//! of the domain types that needs a canonical encoding (UUID, rational,
//! timestamp, time offset, time range). Encoding and decoding dispatch on
//! the variant; there is no runtime type registry.

use std::fmt;

use indexmap::IndexMap;
use mediatimestamp::{TimeOffset, TimeRange, Timestamp};
use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::decoder::decode_tree;
use crate::encoder::{classify, Classified};
use crate::rational::Rational;

/// Object members in insertion order.
pub type Object = IndexMap<String, MediaValue>;

/// A JSON value tree that may also hold media domain values.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<MediaValue>),
    Object(Object),
    Uuid(Uuid),
    Rational(Rational),
    Timestamp(Timestamp),
    TimeOffset(TimeOffset),
    TimeRange(TimeRange),
}

/// The discriminant of a [`MediaValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Uuid,
    Rational,
    Timestamp,
    TimeOffset,
    TimeRange,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Uuid => "uuid",
            ValueKind::Rational => "rational",
            ValueKind::Timestamp => "timestamp",
            ValueKind::TimeOffset => "timeoffset",
            ValueKind::TimeRange => "timerange",
        }
    }

    /// True for the five media types that need a canonical encoding.
    pub fn is_domain(self) -> bool {
        matches!(
            self,
            ValueKind::Uuid
                | ValueKind::Rational
                | ValueKind::Timestamp
                | ValueKind::TimeOffset
                | ValueKind::TimeRange
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MediaValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            MediaValue::Null => ValueKind::Null,
            MediaValue::Bool(_) => ValueKind::Bool,
            MediaValue::Number(_) => ValueKind::Number,
            MediaValue::String(_) => ValueKind::String,
            MediaValue::Array(_) => ValueKind::Array,
            MediaValue::Object(_) => ValueKind::Object,
            MediaValue::Uuid(_) => ValueKind::Uuid,
            MediaValue::Rational(_) => ValueKind::Rational,
            MediaValue::Timestamp(_) => ValueKind::Timestamp,
            MediaValue::TimeOffset(_) => ValueKind::TimeOffset,
            MediaValue::TimeRange(_) => ValueKind::TimeRange,
        }
    }

    /// Look up an object member. `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&MediaValue> {
        match self {
            MediaValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MediaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            MediaValue::Uuid(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            MediaValue::Rational(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            MediaValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_time_offset(&self) -> Option<&TimeOffset> {
        match self {
            MediaValue::TimeOffset(off) => Some(off),
            _ => None,
        }
    }

    pub fn as_time_range(&self) -> Option<&TimeRange> {
        match self {
            MediaValue::TimeRange(r) => Some(r),
            _ => None,
        }
    }

    /// Container nesting depth of the encoded JSON: 0 for a scalar, 1 for a
    /// flat array or object. A rational encodes as an object, so it counts
    /// as one level.
    ///
    /// Iterative, so it is safe to call on trees too deep to recurse over.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, level)) = stack.pop() {
            match node {
                MediaValue::Array(items) => {
                    deepest = deepest.max(level + 1);
                    stack.extend(items.iter().map(|v| (v, level + 1)));
                }
                MediaValue::Object(map) => {
                    deepest = deepest.max(level + 1);
                    stack.extend(map.values().map(|v| (v, level + 1)));
                }
                MediaValue::Rational(_) => deepest = deepest.max(level + 1),
                _ => {}
            }
        }
        deepest
    }

    /// Every domain-typed node paired with its JSON Pointer (RFC 6901), in document order.
    pub fn domain_leaves(&self) -> Vec<(String, &MediaValue)> {
        let mut out = Vec::new();
        let mut stack = vec![(String::new(), self)];
        while let Some((path, node)) = stack.pop() {
            match node {
                MediaValue::Array(items) => {
                    for (i, item) in items.iter().enumerate().rev() {
                        stack.push((format!("{path}/{i}"), item));
                    }
                }
                MediaValue::Object(map) => {
                    for (key, item) in map.iter().rev() {
                        stack.push((format!("{path}/{}", escape_pointer_token(key)), item));
                    }
                }
                leaf if leaf.kind().is_domain() => out.push((path, leaf)),
                _ => {}
            }
        }
        out
    }
}

fn escape_pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

// ----------------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------------

impl From<bool> for MediaValue {
    fn from(b: bool) -> Self {
        MediaValue::Bool(b)
    }
}

impl From<i64> for MediaValue {
    fn from(n: i64) -> Self {
        MediaValue::Number(n.into())
    }
}

impl From<u64> for MediaValue {
    fn from(n: u64) -> Self {
        MediaValue::Number(n.into())
    }
}

/// Non-finite floats become `Null`, as with `serde_json::Value`.
impl From<f64> for MediaValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(MediaValue::Null, MediaValue::Number)
    }
}

impl From<&str> for MediaValue {
    fn from(s: &str) -> Self {
        MediaValue::String(s.to_string())
    }
}

impl From<String> for MediaValue {
    fn from(s: String) -> Self {
        MediaValue::String(s)
    }
}

impl From<Uuid> for MediaValue {
    fn from(u: Uuid) -> Self {
        MediaValue::Uuid(u)
    }
}

impl From<Rational> for MediaValue {
    fn from(r: Rational) -> Self {
        MediaValue::Rational(r)
    }
}

impl From<Timestamp> for MediaValue {
    fn from(ts: Timestamp) -> Self {
        MediaValue::Timestamp(ts)
    }
}

impl From<TimeOffset> for MediaValue {
    fn from(off: TimeOffset) -> Self {
        MediaValue::TimeOffset(off)
    }
}

impl From<TimeRange> for MediaValue {
    fn from(r: TimeRange) -> Self {
        MediaValue::TimeRange(r)
    }
}

impl From<Vec<MediaValue>> for MediaValue {
    fn from(items: Vec<MediaValue>) -> Self {
        MediaValue::Array(items)
    }
}

impl From<Object> for MediaValue {
    fn from(map: Object) -> Self {
        MediaValue::Object(map)
    }
}

/// Structural conversion only: strings stay strings. Use
/// [`decode_tree`](crate::decode_tree) to recognise media values.
impl From<Value> for MediaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MediaValue::Null,
            Value::Bool(b) => MediaValue::Bool(b),
            Value::Number(n) => MediaValue::Number(n),
            Value::String(s) => MediaValue::String(s),
            Value::Array(items) => MediaValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                MediaValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, MediaValue)> for MediaValue {
    fn from_iter<I: IntoIterator<Item = (K, MediaValue)>>(iter: I) -> Self {
        MediaValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ----------------------------------------------------------------------------
// serde
// ----------------------------------------------------------------------------

/// Containers are walked by the serializer itself; each domain leaf is
/// swapped for its canonical form on the way past.
impl Serialize for MediaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match classify(self) {
            Classified::List(items) => serializer.collect_seq(items),
            Classified::Map(map) => serializer.collect_map(map),
            Classified::Domain(canonical) => canonical.serialize(serializer),
            Classified::Plain => match self {
                MediaValue::Null => serializer.serialize_unit(),
                MediaValue::Bool(b) => serializer.serialize_bool(*b),
                MediaValue::Number(n) => n.serialize(serializer),
                MediaValue::String(s) => serializer.serialize_str(s),
                // classify() only reports Plain for the four scalars above.
                other => Err(serde::ser::Error::custom(format!(
                    "unexpected {} in scalar position",
                    other.kind()
                ))),
            },
        }
    }
}

/// Parses any JSON, then runs the decode pass with default options.
impl<'de> Deserialize<'de> for MediaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_tree(value).map_err(D::Error::custom)
    }
}
