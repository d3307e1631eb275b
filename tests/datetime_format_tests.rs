//! Datetime formatter behavior that must hold in any host timezone: offset
//! arithmetic, strict segment validation, and instant-preserving round
//! trips. Local-time rendering itself is covered indirectly through the
//! round-trip tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use chrono::DateTime;
use test_case::test_case;

use gridview::formatter::DatetimeFormatter;
use gridview::{CellFormatter, RawValue};

fn wire(raw: &RawValue) -> &str {
    match raw {
        RawValue::Text(t) => t,
        other => panic!("expected text raw value, got {other:?}"),
    }
}

#[test_case("2015-07-04T12:30:45+02:00", "2015-07-04T10:30:45Z"; "positive offset")]
#[test_case("2015-07-04T12:30:45-05:00", "2015-07-04T17:30:45Z"; "negative offset")]
#[test_case("2015-07-04T12:30:45+0200", "2015-07-04T10:30:45Z"; "offset without colon")]
#[test_case("2015-07-04 12:30:45Z", "2015-07-04T12:30:45Z"; "space separator and zulu")]
#[test_case("2015-12-31T23:30:00-01:00", "2016-01-01T00:30:00Z"; "offset crosses midnight")]
fn explicit_offset_normalizes_to_utc(input: &str, expected: &str) {
    let f = DatetimeFormatter::default();
    assert_eq!(wire(&f.to_raw(input).unwrap()), expected);
}

#[test]
fn offsetless_input_roundtrips_through_local_time() {
    // Whatever the host timezone, display -> raw -> display must settle on
    // the same instant.
    let f = DatetimeFormatter::default();
    let original = RawValue::Text("2015-07-04T10:30:45Z".to_string());
    let display = f.from_raw(&original);
    let back = f.to_raw(&display).unwrap();
    assert_eq!(
        DateTime::parse_from_rfc3339(wire(&back)).unwrap(),
        DateTime::parse_from_rfc3339("2015-07-04T10:30:45Z").unwrap()
    );
}

#[test_case(true, false, "2015-07-04"; "date only passes through")]
#[test_case(false, true, "12:30:45"; "time only passes through")]
fn partial_values_skip_zone_conversion(include_date: bool, include_time: bool, input: &str) {
    let f = DatetimeFormatter::new(include_date, include_time, false).unwrap();
    assert_eq!(wire(&f.to_raw(input).unwrap()), input);
    assert_eq!(f.from_raw(&RawValue::Text(input.to_string())), input);
}

#[test]
fn missing_configured_segment_rejects() {
    let f = DatetimeFormatter::default();
    assert_eq!(f.to_raw("2015-07-04"), None);
    assert_eq!(f.to_raw("12:30:45"), None);
    assert_eq!(f.to_raw(""), None);
    assert_eq!(f.to_raw("soon"), None);
}

#[test]
fn extra_segment_rejects() {
    let date_only = DatetimeFormatter::new(true, false, false).unwrap();
    assert_eq!(date_only.to_raw("2015-07-04T12:30:45Z"), None);

    let time_only = DatetimeFormatter::new(false, true, false).unwrap();
    assert_eq!(time_only.to_raw("2015-07-04T12:30:45Z"), None);
}

#[test]
fn milliseconds_respect_configuration() {
    let without = DatetimeFormatter::default();
    assert_eq!(without.to_raw("2015-07-04T12:30:45.123Z"), None);

    let with = DatetimeFormatter::new(true, true, true).unwrap();
    assert_eq!(
        wire(&with.to_raw("2015-07-04T12:30:45.123Z").unwrap()),
        "2015-07-04T12:30:45.123Z"
    );
    // Absent millis are allowed and rendered as zero.
    assert_eq!(
        wire(&with.to_raw("2015-07-04T12:30:45Z").unwrap()),
        "2015-07-04T12:30:45.000Z"
    );
}

#[test]
fn invalid_calendar_values_reject() {
    let f = DatetimeFormatter::default();
    assert_eq!(f.to_raw("2015-02-30T12:00:00Z"), None);
    assert_eq!(f.to_raw("2015-07-04T24:00:00Z"), None);
    assert_eq!(f.to_raw("2015-07-04T12:61:00Z"), None);
}

#[test]
fn from_raw_never_panics_on_junk() {
    let f = DatetimeFormatter::default();
    for raw in [
        RawValue::Empty,
        RawValue::Number(1e9),
        RawValue::Boolean(true),
        RawValue::Text("not a date".into()),
        RawValue::Text("2015-07-04".into()),
    ] {
        assert_eq!(f.from_raw(&raw), "");
    }
}

#[test]
fn leap_day_roundtrip() {
    let date_only = DatetimeFormatter::new(true, false, false).unwrap();
    assert_eq!(wire(&date_only.to_raw("2016-02-29").unwrap()), "2016-02-29");
    assert_eq!(date_only.to_raw("2015-02-29"), None);
}
