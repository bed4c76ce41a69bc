//! End-to-end `dumps`/`loads` scenarios over a document mixing plain JSON
//! with every media value type.

use std::io::Cursor;

use mediajson::{
    decode_tree, dump, dump_pretty, dumps, dumps_pretty, dumps_with, encode_tree, load, loads,
    loads_slice, loads_with, MediaJsonError, MediaValue, Options, Rational, MAX_DEPTH,
};
use mediatimestamp::{Inclusivity, TimeRange, Timestamp};
use serde_json::{json, Value};
use uuid::Uuid;

const PURE_JSON_STRING: &str = r#"{"foo": "bar", "baz": ["boop", "beep"], "boggle": {"cat": "猫", "kitten": "子猫"}, "numeric": 25, "boolean": true, "decimal": 0.44}"#;

const MEDIAJSON_STRING: &str = r#"{"foo": "bar", "baz": ["boop", "beep"], "boggle": {"cat": "猫", "kitten": "子猫"}, "numeric": 25, "boolean": true, "decimal": 0.44, "uuid": "b8b4a34f-3293-11e8-89c0-acde48001122", "rational": {"numerator": 30000, "denominator": 1001}, "timestamp": "417798915:0", "timeranges": ["[417798915:0_417798916:999]", "(417798915:0_417798916:999)", "[417798915:0_417798916:999)", "(417798915:0_417798916:999]", "()", "_", "[417798915:0_", "(417798915:0_", "_417798915:0]", "_417798915:0)"]}"#;

fn ts(sec: u64, nsec: u32) -> Timestamp {
    Timestamp::new(sec, nsec).unwrap()
}

fn pure_json_data() -> MediaValue {
    MediaValue::from(json!({
        "foo": "bar",
        "baz": ["boop", "beep"],
        "boggle": {"cat": "\u{732b}", "kitten": "\u{5b50}\u{732b}"},
        "numeric": 25,
        "boolean": true,
        "decimal": 0.44
    }))
}

fn mediajson_data() -> MediaValue {
    let (a, b) = (ts(417_798_915, 0), ts(417_798_916, 999));
    let ranges = vec![
        TimeRange::new(a, b, Inclusivity::Inclusive),
        TimeRange::new(a, b, Inclusivity::Exclusive),
        TimeRange::new(a, b, Inclusivity::IncludeStart),
        TimeRange::new(a, b, Inclusivity::IncludeEnd),
        TimeRange::never(),
        TimeRange::eternity(),
        TimeRange::from_start(a, Inclusivity::Inclusive),
        TimeRange::from_start(a, Inclusivity::Exclusive),
        TimeRange::from_end(a, Inclusivity::Inclusive),
        TimeRange::from_end(a, Inclusivity::Exclusive),
    ];

    let mut value = pure_json_data();
    if let MediaValue::Object(map) = &mut value {
        map.insert(
            "uuid".into(),
            Uuid::parse_str("b8b4a34f-3293-11e8-89c0-acde48001122").unwrap().into(),
        );
        map.insert("rational".into(), Rational::new(30000, 1001).unwrap().into());
        map.insert("timestamp".into(), ts(417_798_915, 0).into());
        map.insert(
            "timeranges".into(),
            MediaValue::Array(ranges.into_iter().map(MediaValue::from).collect()),
        );
    }
    value
}

// ============================================================================
// Pure JSON
// ============================================================================

#[test]
fn loads_pure_json() {
    assert_eq!(loads(PURE_JSON_STRING).unwrap(), pure_json_data());
}

#[test]
fn load_pure_json() {
    let decoded = load(Cursor::new(PURE_JSON_STRING)).unwrap();
    assert_eq!(decoded, pure_json_data());
}

#[test]
fn dumps_pure_json_is_plain_json() {
    let encoded = dumps(&pure_json_data()).unwrap();
    let plain: Value = serde_json::from_str(&encoded).unwrap();
    let expected: Value = serde_json::from_str(PURE_JSON_STRING).unwrap();
    assert_eq!(plain, expected);
}

#[test]
fn dump_pure_json_is_plain_json() {
    let mut buf = Vec::new();
    dump(&pure_json_data(), &mut buf).unwrap();
    let plain: Value = serde_json::from_slice(&buf).unwrap();
    let expected: Value = serde_json::from_str(PURE_JSON_STRING).unwrap();
    assert_eq!(plain, expected);
}

// ============================================================================
// Media JSON
// ============================================================================

#[test]
fn loads_mediajson() {
    assert_eq!(loads(MEDIAJSON_STRING).unwrap(), mediajson_data());
}

#[test]
fn load_mediajson() {
    assert_eq!(load(Cursor::new(MEDIAJSON_STRING)).unwrap(), mediajson_data());
}

#[test]
fn loads_slice_mediajson() {
    assert_eq!(loads_slice(MEDIAJSON_STRING.as_bytes()).unwrap(), mediajson_data());
}

#[test]
fn dumps_mediajson_roundtrips() {
    let encoded = dumps(&mediajson_data()).unwrap();
    assert_eq!(loads(&encoded).unwrap(), mediajson_data());
}

#[test]
fn dumps_mediajson_matches_reference_text() {
    let encoded: Value = serde_json::from_str(&dumps(&mediajson_data()).unwrap()).unwrap();
    let expected: Value = serde_json::from_str(MEDIAJSON_STRING).unwrap();
    assert_eq!(encoded, expected);
}

#[test]
fn dump_mediajson_roundtrips() {
    let mut buf = Vec::new();
    dump(&mediajson_data(), &mut buf).unwrap();
    assert_eq!(loads_slice(&buf).unwrap(), mediajson_data());
}

#[test]
fn pretty_output_roundtrips() {
    let text = dumps_pretty(&mediajson_data()).unwrap();
    assert!(text.contains('\n'));
    assert_eq!(loads(&text).unwrap(), mediajson_data());

    let mut buf = Vec::new();
    dump_pretty(&mediajson_data(), &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), text);
}

#[test]
fn encode_tree_then_plain_serde_json() {
    let partially_encoded = encode_tree(&mediajson_data()).unwrap();
    let text = serde_json::to_string(&partially_encoded).unwrap();
    assert_eq!(loads(&text).unwrap(), mediajson_data());
}

#[test]
fn decode_tree_matches_loads() {
    let plain: Value = serde_json::from_str(MEDIAJSON_STRING).unwrap();
    assert_eq!(decode_tree(plain).unwrap(), loads(MEDIAJSON_STRING).unwrap());
}

#[test]
fn serde_deserialize_runs_decode_pass() {
    let decoded: MediaValue = serde_json::from_str(MEDIAJSON_STRING).unwrap();
    assert_eq!(decoded, mediajson_data());
}

// ============================================================================
// Canonicalisation and errors
// ============================================================================

#[test]
fn empty_range_text_canonicalises_to_never() {
    let value = loads(r#"["(5:0_5:0)", "[6:0_5:0]"]"#).unwrap();
    assert_eq!(dumps(&value).unwrap(), r#"["()","()"]"#);
}

#[test]
fn unreduced_rational_is_written_reduced() {
    let value = loads(r#"{"numerator": 50, "denominator": 2}"#).unwrap();
    assert_eq!(dumps(&value).unwrap(), r#"{"numerator":25,"denominator":1}"#);
}

#[test]
fn malformed_json_error_passes_through() {
    let err = loads(r#"{"foo": "#).unwrap_err();
    assert!(matches!(err, MediaJsonError::Json(ref e) if e.is_eof()));
}

#[test]
fn parse_depth_limit_applies() {
    let err = loads_with("[[[1]]]", &Options::default().with_max_depth(2)).unwrap_err();
    assert!(matches!(err, MediaJsonError::DepthLimit(2)));
}

#[test]
fn serialise_depth_limit_applies() {
    let mut value = MediaValue::Null;
    for _ in 0..10 {
        value = MediaValue::Array(vec![value]);
    }
    let err = dumps_with(&value, &Options::default().with_max_depth(9)).unwrap_err();
    assert!(matches!(err, MediaJsonError::DepthLimit(9)));
}

fn nest_in_arrays(mut value: MediaValue, levels: usize) -> MediaValue {
    for _ in 0..levels {
        value = MediaValue::Array(vec![value]);
    }
    value
}

#[test]
fn rational_counts_as_a_nesting_level() {
    let half = MediaValue::Rational(Rational::new(1, 2).unwrap());
    let value = nest_in_arrays(half, 1);
    assert_eq!(value.depth(), 2);

    let tight = Options::default().with_max_depth(1);
    assert!(matches!(dumps_with(&value, &tight), Err(MediaJsonError::DepthLimit(1))));

    let enough = Options::default().with_max_depth(2);
    let text = dumps_with(&value, &enough).unwrap();
    assert_eq!(text, r#"[{"numerator":1,"denominator":2}]"#);
    assert_eq!(loads_with(&text, &enough).unwrap(), value);
}

#[test]
fn default_depth_limit_roundtrips_at_the_boundary() {
    let half = MediaValue::Rational(Rational::new(1, 2).unwrap());

    let deepest = nest_in_arrays(half.clone(), MAX_DEPTH - 1);
    assert_eq!(deepest.depth(), MAX_DEPTH);
    let text = dumps(&deepest).unwrap();
    assert_eq!(loads(&text).unwrap(), deepest);

    let too_deep = nest_in_arrays(half, MAX_DEPTH);
    assert!(matches!(dumps(&too_deep), Err(MediaJsonError::DepthLimit(MAX_DEPTH))));
}

#[test]
fn max_depth_is_clamped_to_parser_limit() {
    assert_eq!(Options::default().with_max_depth(500).max_depth, MAX_DEPTH);
    assert_eq!(Options::default().max_depth, MAX_DEPTH);
}

#[test]
fn deeply_nested_input_is_rejected_not_overflowed() {
    let text = "[".repeat(100_000) + &"]".repeat(100_000);
    assert!(loads(&text).is_err());
}
