//! Fixed-decimal number formatter with digit grouping.

use crate::error::{GridError, Result};
use crate::formatter::CellFormatter;
use crate::value::RawValue;

/// Upper bound on configurable decimal places.
pub const MAX_DECIMALS: u32 = 20;

/// Formats numbers to a fixed decimal count, grouping integer digits in
/// threes. Parsing strips the grouping separator, normalizes the decimal
/// separator, and re-rounds, so `to_raw(from_raw(n))` equals `n` rounded to
/// the configured precision.
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    decimals: u32,
    decimal_separator: char,
    order_separator: char,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        NumberFormatter {
            decimals: 2,
            decimal_separator: '.',
            order_separator: ',',
        }
    }
}

impl NumberFormatter {
    /// Create a formatter. Fails when `decimals` is outside `[0, 20]`.
    pub fn new(decimals: u32, decimal_separator: char, order_separator: char) -> Result<Self> {
        if decimals > MAX_DECIMALS {
            return Err(GridError::Config(format!(
                "decimals must be between 0 and {MAX_DECIMALS}, got {decimals}"
            )));
        }
        Ok(NumberFormatter {
            decimals,
            decimal_separator,
            order_separator,
        })
    }

    /// Round half away from zero to the configured precision via fixed-point
    /// conversion.
    fn round(&self, value: f64) -> f64 {
        #[allow(clippy::cast_possible_wrap)]
        let factor = 10f64.powi(self.decimals as i32);
        (value * factor).round() / factor
    }
}

impl CellFormatter for NumberFormatter {
    fn from_raw(&self, raw: &RawValue) -> String {
        let Some(value) = raw.as_number() else {
            return String::new();
        };
        if !value.is_finite() {
            return String::new();
        }

        let rounded = self.round(value);
        let fixed = format!("{:.prec$}", rounded.abs(), prec = self.decimals as usize);
        let (int_part, dec_part) = match fixed.split_once('.') {
            Some((i, d)) => (i, Some(d)),
            None => (fixed.as_str(), None),
        };

        // Group integer digits in threes from the right.
        let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        if rounded < 0.0 {
            grouped.push('-');
        }
        let len = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(self.order_separator);
            }
            grouped.push(c);
        }

        if let Some(dec) = dec_part {
            grouped.push(self.decimal_separator);
            grouped.push_str(dec);
        }
        grouped
    }

    fn to_raw(&self, display: &str) -> Option<RawValue> {
        let trimmed = display.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            if c == self.order_separator {
                continue;
            }
            if c == self.decimal_separator {
                normalized.push('.');
            } else {
                normalized.push(c);
            }
        }

        let parsed = normalized.parse::<f64>().ok()?;
        let rounded = self.round(parsed);
        if !rounded.is_finite() {
            return None;
        }
        Some(RawValue::Number(rounded))
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

    fn number(raw: &RawValue) -> f64 {
        match raw {
            RawValue::Number(n) => *n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_from_raw_grouping() {
        let f = NumberFormatter::default();
        assert_eq!(f.from_raw(&RawValue::Number(1234.5)), "1,234.50");
        assert_eq!(f.from_raw(&RawValue::Number(1_234_567.891)), "1,234,567.89");
        assert_eq!(f.from_raw(&RawValue::Number(0.5)), "0.50");
        assert_eq!(f.from_raw(&RawValue::Number(-1234.5)), "-1,234.50");
    }

    #[test]
    fn test_from_raw_zero_decimals_rounds_half_up() {
        let f = NumberFormatter::new(0, '.', ',').unwrap();
        assert_eq!(f.from_raw(&RawValue::Number(3.7)), "4");
        assert_eq!(f.from_raw(&RawValue::Number(2.5)), "3");
        assert_eq!(f.from_raw(&RawValue::Number(-2.5)), "-3");
    }

    #[test]
    fn test_from_raw_invalid_is_empty() {
        let f = NumberFormatter::default();
        assert_eq!(f.from_raw(&RawValue::Empty), "");
        assert_eq!(f.from_raw(&RawValue::Number(f64::NAN)), "");
        assert_eq!(f.from_raw(&RawValue::Number(f64::INFINITY)), "");
        assert_eq!(f.from_raw(&RawValue::Text("abc".into())), "");
    }

    #[test]
    fn test_to_raw() {
        let f = NumberFormatter::default();
        assert_eq!(number(&f.to_raw("1,234.50").unwrap()), 1234.5);
        assert_eq!(number(&f.to_raw("42").unwrap()), 42.0);
        assert_eq!(f.to_raw("12x3"), None);
        assert_eq!(f.to_raw(""), None);
        assert_eq!(f.to_raw("1.2.3"), None);
    }

    #[test]
    fn test_european_separators() {
        let f = NumberFormatter::new(2, ',', '.').unwrap();
        assert_eq!(f.from_raw(&RawValue::Number(1234.5)), "1.234,50");
        assert_eq!(number(&f.to_raw("1.234,50").unwrap()), 1234.5);
    }

    #[test]
    fn test_construction_range() {
        assert!(NumberFormatter::new(21, '.', ',').is_err());
        assert!(NumberFormatter::new(20, '.', ',').is_ok());
        assert!(NumberFormatter::new(0, '.', ',').is_ok());
    }

    #[test]
    fn test_roundtrip_is_round() {
        let f = NumberFormatter::default();
        for &n in &[0.0, 1.005, -17.254, 1234.5, 99999.999, -0.004] {
            let display = f.from_raw(&RawValue::Number(n));
            let back = number(&f.to_raw(&display).unwrap());
            assert_eq!(back, f.round(n), "value {n}");
        }
    }
}
