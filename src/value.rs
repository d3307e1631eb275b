//! Raw attribute values.
//!
//! A `RawValue` is the typed value living in the attribute store, as opposed
//! to the display string a formatter produces from it. Datetime values travel
//! as `Text` holding the ISO-8601 wire form (see `formatter::datetime`).

use serde::{Deserialize, Serialize};

/// The underlying typed value stored for one attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Absent / cleared value. Serializes as JSON `null`.
    #[default]
    Empty,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// Numeric view: `Number` directly, `Text` if it parses as a finite float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(t) => t.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Plain display form used by the identity formatter: `Empty` is the
    /// empty string, numbers use general formatting, booleans lowercase.
    pub fn display(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Boolean(b) => b.to_string(),
            RawValue::Number(n) => format_general(*n),
            RawValue::Text(t) => t.clone(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// General number display: integer when whole, otherwise a trimmed decimal.
#[allow(clippy::float_cmp)]
#[allow(clippy::cast_possible_truncation)]
fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == value.floor() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.10}");
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
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

    #[test]
    fn test_display_general() {
        assert_eq!(RawValue::Number(42.0).display(), "42");
        assert_eq!(RawValue::Number(3.25).display(), "3.25");
        assert_eq!(RawValue::Number(f64::NAN).display(), "");
        assert_eq!(RawValue::Empty.display(), "");
        assert_eq!(RawValue::Boolean(true).display(), "true");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(RawValue::Number(1.5).as_number(), Some(1.5));
        assert_eq!(RawValue::Text(" 2.5 ".into()).as_number(), Some(2.5));
        assert_eq!(RawValue::Text("abc".into()).as_number(), None);
        assert_eq!(RawValue::Boolean(true).as_number(), None);
        assert_eq!(RawValue::Empty.as_number(), None);
    }

    #[test]
    fn test_serde_untagged() {
        let v: RawValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, RawValue::Empty);
        let v: RawValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(v, RawValue::Number(3.5));
        let v: RawValue = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(v, RawValue::Text("hi".into()));
        let v: RawValue = serde_json::from_str("false").unwrap();
        assert_eq!(v, RawValue::Boolean(false));
    }
}
