//! ISO-8601 datetime formatter.
//!
//! The wire form is an ISO-8601 subset: `YYYY-MM-DD`, `HH:mm:ss[.SSS]`,
//! `±HH:MM` (colon optional) or a literal `Z`, joined by `T` or whitespace.
//! Display uses local time; the wire form is UTC. Values carrying only a
//! date or only a time are calendar/wall values and pass through without
//! zone conversion.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{GridError, Result};
use crate::formatter::CellFormatter;
use crate::value::RawValue;

/// Converts between ISO-8601 wire strings and local-time display strings.
///
/// `from_raw` treats wire input as UTC (or UTC-with-offset) and renders the
/// configured segments in local time. `to_raw` treats offset-less input as
/// local time and converts back to UTC, emitting strict ISO-8601 with a `T`
/// separator and a trailing `Z` when both date and time are present.
#[derive(Debug, Clone, Copy)]
pub struct DatetimeFormatter {
    include_date: bool,
    include_time: bool,
    include_milli: bool,
}

impl Default for DatetimeFormatter {
    fn default() -> Self {
        DatetimeFormatter {
            include_date: true,
            include_time: true,
            include_milli: false,
        }
    }
}

impl DatetimeFormatter {
    /// Create a formatter. Fails unless at least one of date/time is included.
    pub fn new(include_date: bool, include_time: bool, include_milli: bool) -> Result<Self> {
        if !include_date && !include_time {
            return Err(GridError::Config(
                "datetime formatter must include at least one of date or time".to_string(),
            ));
        }
        Ok(DatetimeFormatter {
            include_date,
            include_time,
            include_milli,
        })
    }

    fn time_pattern(&self) -> &'static str {
        if self.include_milli {
            "%H:%M:%S%.3f"
        } else {
            "%H:%M:%S"
        }
    }
}

impl CellFormatter for DatetimeFormatter {
    fn from_raw(&self, raw: &RawValue) -> String {
        let Some(input) = raw.as_text() else {
            return String::new();
        };
        let Some(parsed) = parse_wire(input) else {
            return String::new();
        };

        if self.include_date && self.include_time {
            let (Some(date), Some(time)) = (parsed.date, parsed.time) else {
                return String::new();
            };
            let naive = NaiveDateTime::new(date, time);
            // Wire time is UTC-relative; apply the explicit offset if any.
            let instant = match parsed.offset {
                Some(offset) => offset.from_local_datetime(&naive).single(),
                None => Some(Utc.from_utc_datetime(&naive).fixed_offset()),
            };
            let Some(instant) = instant else {
                return String::new();
            };
            let local = instant.with_timezone(&Local);
            format!(
                "{} {}",
                local.format("%Y-%m-%d"),
                local.format(self.time_pattern())
            )
        } else if self.include_date {
            match parsed.date {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => String::new(),
            }
        } else {
            match parsed.time {
                Some(time) => time.format(self.time_pattern()).to_string(),
                None => String::new(),
            }
        }
    }

    fn to_raw(&self, display: &str) -> Option<RawValue> {
        let parsed = parse_wire(display)?;

        // Strict validation: every configured segment must be present, and
        // nothing beyond the configuration may appear.
        if self.include_date != parsed.date.is_some() {
            return None;
        }
        if self.include_time != parsed.time.is_some() {
            return None;
        }
        if parsed.has_milli && !self.include_milli {
            return None;
        }
        if parsed.offset.is_some() && !(self.include_date && self.include_time) {
            return None;
        }

        let wire = if self.include_date && self.include_time {
            let naive = NaiveDateTime::new(parsed.date?, parsed.time?);
            let utc = match parsed.offset {
                // Explicit offset: the input is already UTC-relative.
                Some(offset) => offset
                    .from_local_datetime(&naive)
                    .single()?
                    .with_timezone(&Utc),
                // No offset: interpret as local time.
                None => Local
                    .from_local_datetime(&naive)
                    .earliest()?
                    .with_timezone(&Utc),
            };
            if self.include_milli {
                utc.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
            } else {
                utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()
            }
        } else if self.include_date {
            parsed.date?.format("%Y-%m-%d").to_string()
        } else {
            parsed.time?.format(self.time_pattern()).to_string()
        };

        Some(RawValue::Text(wire))
    }
}

/// Segments extracted from a wire or display string.
struct ParsedWire {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    offset: Option<chrono::FixedOffset>,
    has_milli: bool,
}

/// Split an ISO-8601-like string on `T`, literal `Z`, or whitespace and
/// parse the date/time/zone segments. Returns `None` when any segment is
/// malformed, duplicated, or no segment is present at all.
fn parse_wire(input: &str) -> Option<ParsedWire> {
    let mut parsed = ParsedWire {
        date: None,
        time: None,
        offset: None,
        has_milli: false,
    };

    for token in input.trim().split(|c: char| c == 'T' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }

        // A literal Z marks an explicit zero offset.
        let token = match token.strip_suffix('Z') {
            Some(rest) => {
                if parsed.offset.is_some() {
                    return None;
                }
                parsed.offset = chrono::FixedOffset::east_opt(0);
                if rest.is_empty() {
                    continue;
                }
                rest
            }
            None => token,
        };

        if token.starts_with('+') || token.starts_with('-') {
            if parsed.offset.is_some() {
                return None;
            }
            parsed.offset = Some(parse_offset(token)?);
        } else if token.contains(':') {
            // A time segment may carry a trailing offset ("12:30:45+02:00").
            let (time_part, offset_part) = split_trailing_offset(token);
            if parsed.time.is_some() {
                return None;
            }
            parsed.has_milli = time_part.contains('.');
            parsed.time = NaiveTime::parse_from_str(time_part, "%H:%M:%S%.f").ok();
            parsed.time?;
            if let Some(off) = offset_part {
                if parsed.offset.is_some() {
                    return None;
                }
                parsed.offset = Some(parse_offset(off)?);
            }
        } else if token.contains('-') {
            if parsed.date.is_some() {
                return None;
            }
            parsed.date = NaiveDate::parse_from_str(token, "%Y-%m-%d").ok();
            parsed.date?;
        } else {
            return None;
        }
    }

    if parsed.date.is_none() && parsed.time.is_none() {
        return None;
    }
    Some(parsed)
}

/// Split `"12:30:45+0200"` into the time part and an optional offset part.
fn split_trailing_offset(token: &str) -> (&str, Option<&str>) {
    for (i, c) in token.char_indices() {
        if i > 0 && (c == '+' || c == '-') {
            let (time, offset) = token.split_at(i);
            return (time, Some(offset));
        }
    }
    (token, None)
}

/// Parse `±HH:MM` or `±HHMM` into a fixed offset.
fn parse_offset(token: &str) -> Option<chrono::FixedOffset> {
    let (sign, rest) = match token.strip_prefix('+') {
        Some(rest) => (1i32, rest),
        None => (-1i32, token.strip_prefix('-')?),
    };
    let digits: String = rest.chars().filter(|&c| c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hh, mm) = digits.split_at(2);
    let hours = hh.parse::<i32>().ok()?;
    let minutes = mm.parse::<i32>().ok()?;
    if minutes >= 60 {
        return None;
    }
    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn text(raw: &RawValue) -> &str {
        match raw {
            RawValue::Text(t) => t,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_construction_requires_a_segment() {
        assert!(DatetimeFormatter::new(false, false, false).is_err());
        assert!(DatetimeFormatter::new(true, false, false).is_ok());
        assert!(DatetimeFormatter::new(false, true, true).is_ok());
    }

    #[test]
    fn test_parse_wire_segments() {
        let p = parse_wire("2015-07-04T12:30:45.123+02:00").unwrap();
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2015, 7, 4));
        assert_eq!(p.time, NaiveTime::from_hms_milli_opt(12, 30, 45, 123));
        assert_eq!(p.offset, chrono::FixedOffset::east_opt(2 * 3600));
        assert!(p.has_milli);

        let p = parse_wire("2015-07-04 12:30:45Z").unwrap();
        assert_eq!(p.offset, chrono::FixedOffset::east_opt(0));
        assert!(!p.has_milli);

        let p = parse_wire("12:30:45-0330").unwrap();
        assert!(p.date.is_none());
        assert_eq!(p.offset, chrono::FixedOffset::east_opt(-(3 * 3600 + 30 * 60)));

        assert!(parse_wire("garbage").is_none());
        assert!(parse_wire("").is_none());
        assert!(parse_wire("2015-13-40").is_none());
        assert!(parse_wire("25:61:00").is_none());
    }

    #[test]
    fn test_to_raw_explicit_offset_converts_to_utc() {
        let f = DatetimeFormatter::default();
        let raw = f.to_raw("2015-07-04T12:30:45+02:00").unwrap();
        assert_eq!(text(&raw), "2015-07-04T10:30:45Z");

        let raw = f.to_raw("2015-07-04T22:30:45-0330").unwrap();
        assert_eq!(text(&raw), "2015-07-05T02:00:45Z");
    }

    #[test]
    fn test_to_raw_rejects_excluded_segments() {
        let date_only = DatetimeFormatter::new(true, false, false).unwrap();
        assert_eq!(date_only.to_raw("2015-07-04T12:30:45"), None);
        assert_eq!(text(&date_only.to_raw("2015-07-04").unwrap()), "2015-07-04");

        let no_milli = DatetimeFormatter::default();
        assert_eq!(no_milli.to_raw("2015-07-04T12:30:45.123Z"), None);

        let with_milli = DatetimeFormatter::new(true, true, true).unwrap();
        assert!(with_milli.to_raw("2015-07-04T12:30:45.123Z").is_some());
    }

    #[test]
    fn test_to_raw_rejects_missing_segments() {
        let f = DatetimeFormatter::default();
        assert_eq!(f.to_raw("2015-07-04"), None);
        assert_eq!(f.to_raw("12:30:45"), None);
        assert_eq!(f.to_raw(""), None);
        assert_eq!(f.to_raw("not a date"), None);
    }

    #[test]
    fn test_display_roundtrip_preserves_instant() {
        // from_raw converts UTC -> local, to_raw converts local -> UTC.
        // The reconstructed instant must match regardless of host timezone.
        let f = DatetimeFormatter::default();
        for wire in ["2015-07-04T10:30:45Z", "2015-12-31T23:59:59Z"] {
            let display = f.from_raw(&RawValue::Text(wire.into()));
            let back = f.to_raw(&display).unwrap();
            let original = DateTime::parse_from_rfc3339(wire).unwrap();
            let reconstructed = DateTime::parse_from_rfc3339(text(&back)).unwrap();
            assert_eq!(original, reconstructed, "wire {wire}");
        }
    }

    #[test]
    fn test_time_only_passthrough() {
        let f = DatetimeFormatter::new(false, true, false).unwrap();
        assert_eq!(f.from_raw(&RawValue::Text("12:30:45".into())), "12:30:45");
        assert_eq!(text(&f.to_raw("12:30:45").unwrap()), "12:30:45");
    }

    #[test]
    fn test_from_raw_invalid_is_empty() {
        let f = DatetimeFormatter::default();
        assert_eq!(f.from_raw(&RawValue::Empty), "");
        assert_eq!(f.from_raw(&RawValue::Number(1.0)), "");
        assert_eq!(f.from_raw(&RawValue::Text("garbage".into())), "");
        // Required time segment missing for a date+time config.
        assert_eq!(f.from_raw(&RawValue::Text("2015-07-04".into())), "");
    }

    #[test]
    fn test_milli_display() {
        let f = DatetimeFormatter::new(false, true, true).unwrap();
        assert_eq!(
            f.from_raw(&RawValue::Text("12:30:45.042".into())),
            "12:30:45.042"
        );
        assert_eq!(
            f.from_raw(&RawValue::Text("12:30:45".into())),
            "12:30:45.000"
        );
    }
}
