//! Decoder: plain `serde_json::Value` → `MediaValue`.
//!
//! JSON carries no type tags for the media values, so they are recovered
//! from shape alone:
//!
//! - An object with exactly the keys `numerator` and `denominator` becomes a
//!   [`Rational`]. Any other object is decoded member by member.
//! - A string is tested against an ordered rule list and converted by the
//!   first rule that matches. Strings matching no rule are kept as strings.
//!
//! # Rule order
//!
//! The rules are not proven mutually exclusive, so their order is part of
//! the format:
//!
//! 1. UUID, `8-4-4-4-12` hex digits (either case)
//! 2. Timestamp, `^[0-9]+:[0-9]+$`
//! 3. Time offset, `^[+-][0-9]+:[0-9]+$`
//! 4. Time range, `^[\[(]?([0-9]+:[0-9]+)?_([0-9]+:[0-9]+)?[\])]?$`
//! 5. The literal `"()"`, the empty range
//!
//! Only ASCII digits count as digits, and `$` anchors at the true end of
//! the string (a trailing newline does not match).

use std::sync::OnceLock;

use mediatimestamp::{CanonicalForm, TimeOffset, TimeRange, Timestamp};
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::encoder::enter;
use crate::error::{MediaJsonError, Result};
use crate::options::Options;
use crate::rational::Rational;
use crate::value::{MediaValue, Object};

const UUID_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";
const TIMESTAMP_PATTERN: &str = r"^[0-9]+:[0-9]+$";
const TIME_OFFSET_PATTERN: &str = r"^[+-][0-9]+:[0-9]+$";
const TIME_RANGE_PATTERN: &str = r"^[\[(]?([0-9]+:[0-9]+)?_([0-9]+:[0-9]+)?[\])]?$";
const NEVER_LITERAL: &str = "()";

enum Matcher {
    Pattern(Regex),
    Literal(&'static str),
}

impl Matcher {
    fn is_match(&self, s: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(s),
            Matcher::Literal(lit) => s == *lit,
        }
    }
}

type Build = fn(&str) -> Result<MediaValue>;

/// One entry of the string recognition table.
struct Rule {
    name: &'static str,
    matcher: Matcher,
    build: Build,
}

/// Build any temporal value through its canonical text form.
fn temporal<T>(s: &str) -> Result<MediaValue>
where
    T: CanonicalForm + Into<MediaValue>,
{
    Ok(T::from_canonical(s)?.into())
}

fn decode_uuid(s: &str) -> Result<MediaValue> {
    Ok(MediaValue::Uuid(Uuid::parse_str(s)?))
}

fn decode_never(_: &str) -> Result<MediaValue> {
    Ok(MediaValue::TimeRange(TimeRange::never()))
}

fn pattern(re: &str) -> Matcher {
    Matcher::Pattern(Regex::new(re).expect("decoder patterns are valid regexes"))
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule {
                name: "uuid",
                matcher: pattern(UUID_PATTERN),
                build: decode_uuid,
            },
            Rule {
                name: "timestamp",
                matcher: pattern(TIMESTAMP_PATTERN),
                build: temporal::<Timestamp>,
            },
            Rule {
                name: "timeoffset",
                matcher: pattern(TIME_OFFSET_PATTERN),
                build: temporal::<TimeOffset>,
            },
            Rule {
                name: "timerange",
                matcher: pattern(TIME_RANGE_PATTERN),
                build: temporal::<TimeRange>,
            },
            Rule {
                name: "never",
                matcher: Matcher::Literal(NEVER_LITERAL),
                build: decode_never,
            },
        ]
    })
}

/// Recognise media values in a parsed JSON tree using default [`Options`].
///
/// # Example
/// ```
/// use mediajson::{decode_tree, MediaValue};
/// use serde_json::json;
///
/// let decoded = decode_tree(json!({"rate": {"numerator": 30000, "denominator": 1001}})).unwrap();
/// let rate = decoded.get("rate").and_then(MediaValue::as_rational).unwrap();
/// assert_eq!((rate.numerator(), rate.denominator()), (30000, 1001));
/// ```
pub fn decode_tree(value: Value) -> Result<MediaValue> {
    decode_tree_with(value, &Options::default())
}

/// Recognise media values in a parsed JSON tree.
///
/// Numbers, booleans and null pass through. Decoding fails only when a
/// string or rational object has the right shape but is rejected by the
/// value's own constructor, or when nesting exceeds `options.max_depth`.
pub fn decode_tree_with(value: Value, options: &Options) -> Result<MediaValue> {
    decode_at(value, 0, options.max_depth)
}

fn decode_at(value: Value, depth: usize, max_depth: usize) -> Result<MediaValue> {
    match value {
        Value::Object(map) => {
            let depth = enter(depth, max_depth)?;
            if is_rational_map(&map) {
                return decode_rational(&map);
            }
            let mut out = Object::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key, decode_at(item, depth, max_depth)?);
            }
            Ok(MediaValue::Object(out))
        }
        Value::Array(items) => {
            let depth = enter(depth, max_depth)?;
            items
                .into_iter()
                .map(|item| decode_at(item, depth, max_depth))
                .collect::<Result<Vec<_>>>()
                .map(MediaValue::Array)
        }
        Value::String(s) => decode_string(s),
        Value::Number(n) => Ok(MediaValue::Number(n)),
        Value::Bool(b) => Ok(MediaValue::Bool(b)),
        Value::Null => Ok(MediaValue::Null),
    }
}

fn decode_string(s: String) -> Result<MediaValue> {
    match rules().iter().find(|rule| rule.matcher.is_match(&s)) {
        Some(rule) => {
            tracing::trace!(rule = rule.name, value = %s, "string matched media rule");
            (rule.build)(&s)
        }
        None => Ok(MediaValue::String(s)),
    }
}

fn is_rational_map(map: &Map<String, Value>) -> bool {
    map.len() == 2 && map.contains_key("numerator") && map.contains_key("denominator")
}

fn decode_rational(map: &Map<String, Value>) -> Result<MediaValue> {
    let numerator = rational_member(map, "numerator")?;
    let denominator = rational_member(map, "denominator")?;
    tracing::trace!(numerator, denominator, "object matched rational rule");
    Ok(MediaValue::Rational(Rational::new(numerator, denominator)?))
}

fn rational_member(map: &Map<String, Value>, key: &str) -> Result<i64> {
    match map.get(key) {
        Some(Value::Number(n)) if n.is_f64() => Err(MediaJsonError::InvalidRational(format!(
            "{key} must be an integer, found {n}"
        ))),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
            MediaJsonError::InvalidRational(format!(
                "{key} {n} is too large, the limit is {}",
                i64::MAX
            ))
        }),
        Some(other) => Err(MediaJsonError::InvalidRational(format!(
            "{key} must be an integer, found {other}"
        ))),
        None => Err(MediaJsonError::InvalidRational(format!("missing {key}"))),
    }
}
