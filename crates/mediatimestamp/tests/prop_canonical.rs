/// Property tests: every value's canonical text parses back to an equal value.
use std::ops::Bound;

use mediatimestamp::{CanonicalForm, TimeOffset, TimeRange, Timestamp, MAX_SECONDS, NANOS_PER_SEC};
use proptest::prelude::*;

fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (0..MAX_SECONDS, 0..NANOS_PER_SEC).prop_map(|(s, n)| Timestamp::new(s, n).unwrap())
}

fn arb_offset() -> impl Strategy<Value = TimeOffset> {
    (any::<bool>(), 0..MAX_SECONDS, 0..NANOS_PER_SEC)
        .prop_map(|(neg, s, n)| TimeOffset::new(neg, s, n).unwrap())
}

fn arb_bound() -> impl Strategy<Value = Bound<Timestamp>> {
    prop_oneof![
        Just(Bound::Unbounded),
        arb_timestamp().prop_map(Bound::Included),
        arb_timestamp().prop_map(Bound::Excluded),
    ]
}

fn arb_range() -> impl Strategy<Value = TimeRange> {
    prop_oneof![
        1 => Just(TimeRange::never()),
        8 => (arb_bound(), arb_bound()).prop_map(|(s, e)| TimeRange::from_bounds(s, e)),
    ]
}

proptest! {
    #[test]
    fn timestamp_canonical_roundtrip(ts in arb_timestamp()) {
        prop_assert_eq!(Timestamp::from_canonical(&ts.to_canonical()).unwrap(), ts);
    }

    #[test]
    fn offset_canonical_roundtrip(off in arb_offset()) {
        let text = off.to_canonical();
        prop_assert!(text.starts_with('+') || text.starts_with('-'));
        prop_assert_eq!(TimeOffset::from_canonical(&text).unwrap(), off);
    }

    #[test]
    fn range_canonical_roundtrip(range in arb_range()) {
        prop_assert_eq!(TimeRange::from_canonical(&range.to_canonical()).unwrap(), range);
    }

    #[test]
    fn difference_then_add_returns_original(a in arb_timestamp(), b in arb_timestamp()) {
        let off = a - b;
        prop_assert_eq!(b.checked_add(&off).unwrap(), a);
    }
}
