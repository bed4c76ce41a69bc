//! Encoder: `MediaValue` → plain `serde_json::Value`.
//!
//! Two entry points share one classifier:
//!
//! - [`encode_leaf`] is the hook form. It replaces a single domain leaf with
//!   its canonical JSON and reports `None` for anything else, including
//!   containers, whose children are the caller's business.
//! - [`encode_tree`] walks the whole tree and returns a fully plain value.
//!
//! Canonical forms:
//!
//! | Type | JSON |
//! |---|---|
//! | UUID | `"b8b4a34f-3293-11e8-89c0-acde48001122"` (lowercase, hyphenated) |
//! | Rational | `{"numerator": 30000, "denominator": 1001}` |
//! | Timestamp | `"417798915:0"` |
//! | TimeOffset | `"+10:500"` / `"-3:0"` |
//! | TimeRange | `"[417798915:0_417798916:999)"`, `"_"`, `"()"` |

use mediatimestamp::CanonicalForm;
use serde_json::{json, Map, Value};

use crate::error::{MediaJsonError, Result};
use crate::options::Options;
use crate::value::{MediaValue, Object};

/// How a single node is handled by the encoder.
pub(crate) enum Classified<'a> {
    List(&'a [MediaValue]),
    Map(&'a Object),
    /// Null, bool, number or string: already JSON.
    Plain,
    /// A domain leaf, already converted to its canonical form.
    Domain(Value),
}

pub(crate) fn classify(value: &MediaValue) -> Classified<'_> {
    match value {
        MediaValue::Array(items) => Classified::List(items),
        MediaValue::Object(map) => Classified::Map(map),
        MediaValue::Null | MediaValue::Bool(_) | MediaValue::Number(_) | MediaValue::String(_) => {
            Classified::Plain
        }
        MediaValue::Uuid(u) => Classified::Domain(Value::String(u.hyphenated().to_string())),
        MediaValue::Rational(r) => Classified::Domain(json!({
            "numerator": r.numerator(),
            "denominator": r.denominator(),
        })),
        MediaValue::Timestamp(ts) => Classified::Domain(Value::String(ts.to_canonical())),
        MediaValue::TimeOffset(off) => Classified::Domain(Value::String(off.to_canonical())),
        MediaValue::TimeRange(range) => Classified::Domain(Value::String(range.to_canonical())),
    }
}

/// Canonical JSON for a single domain leaf; `None` for plain scalars and containers.
///
/// # Example
/// ```
/// use mediajson::{encode_leaf, MediaValue};
/// use uuid::Uuid;
///
/// let id = Uuid::parse_str("b8b4a34f-3293-11e8-89c0-acde48001122").unwrap();
/// let encoded = encode_leaf(&MediaValue::Uuid(id)).unwrap();
/// assert_eq!(encoded, "b8b4a34f-3293-11e8-89c0-acde48001122");
/// assert!(encode_leaf(&MediaValue::from("plain")).is_none());
/// ```
pub fn encode_leaf(value: &MediaValue) -> Option<Value> {
    match classify(value) {
        Classified::Domain(canonical) => Some(canonical),
        Classified::List(_) | Classified::Map(_) | Classified::Plain => None,
    }
}

/// Convert a whole tree to plain JSON using default [`Options`].
pub fn encode_tree(value: &MediaValue) -> Result<Value> {
    encode_tree_with(value, &Options::default())
}

/// Convert a whole tree to plain JSON.
///
/// Plain scalars are copied, containers are rebuilt with the same keys and
/// order, and domain leaves become their canonical forms. Fails only when
/// containers nest deeper than `options.max_depth`.
pub fn encode_tree_with(value: &MediaValue, options: &Options) -> Result<Value> {
    encode_at(value, 0, options.max_depth)
}

fn encode_at(value: &MediaValue, depth: usize, max_depth: usize) -> Result<Value> {
    match classify(value) {
        Classified::List(items) => {
            let depth = enter(depth, max_depth)?;
            items
                .iter()
                .map(|item| encode_at(item, depth, max_depth))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        Classified::Map(map) => {
            let depth = enter(depth, max_depth)?;
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), encode_at(item, depth, max_depth)?);
            }
            Ok(Value::Object(out))
        }
        Classified::Domain(canonical) => {
            // Rationals are objects on the wire and count against the limit.
            if canonical.is_object() {
                enter(depth, max_depth)?;
            }
            Ok(canonical)
        }
        Classified::Plain => Ok(plain_scalar(value)),
    }
}

/// Step one container level down, failing past the limit.
pub(crate) fn enter(depth: usize, max_depth: usize) -> Result<usize> {
    let depth = depth + 1;
    if depth > max_depth {
        tracing::debug!(max_depth, "container nesting limit exceeded");
        return Err(MediaJsonError::DepthLimit(max_depth));
    }
    Ok(depth)
}

fn plain_scalar(value: &MediaValue) -> Value {
    match value {
        MediaValue::Null => Value::Null,
        MediaValue::Bool(b) => Value::Bool(*b),
        MediaValue::Number(n) => Value::Number(n.clone()),
        MediaValue::String(s) => Value::String(s.clone()),
        MediaValue::Array(_)
        | MediaValue::Object(_)
        | MediaValue::Uuid(_)
        | MediaValue::Rational(_)
        | MediaValue::Timestamp(_)
        | MediaValue::TimeOffset(_)
        | MediaValue::TimeRange(_) => {
            unreachable!(
                "classify() reports Plain only for JSON scalars, got {}",
                value.kind()
            )
        }
    }
}
