//! Value <-> display-string conversion.
//!
//! Every cell owns exactly one formatter. `from_raw` never fails (invalid
//! input maps to an empty, display-safe string); `to_raw` returns `None` as
//! a definite "unparsable" marker that callers treat as a hard validation
//! failure, never as a partial value.
//!
//! Formatter selection per cell: explicit option > column's formatter spec >
//! cell-kind default (see `registry`).

mod datetime;
mod number;
mod string;

pub use datetime::DatetimeFormatter;
pub use number::{NumberFormatter, MAX_DECIMALS};
pub use string::{EscapedFormatter, StringFormatter};

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::RawValue;

/// Bidirectional converter between raw values and display strings.
pub trait CellFormatter {
    /// Convert a raw value to its display string. Never fails; invalid or
    /// empty raw values map to `""`.
    fn from_raw(&self, raw: &RawValue) -> String;

    /// Convert user input back to a raw value. `None` means the input is
    /// unparsable and the edit must be rejected.
    fn to_raw(&self, display: &str) -> Option<RawValue>;
}

/// Declarative formatter configuration, deserializable from column config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormatterSpec {
    /// Identity string conversion.
    String,
    /// HTML-escaping string conversion.
    Escaped,
    /// Fixed-decimal number with digit grouping.
    #[serde(rename_all = "camelCase")]
    Number {
        #[serde(default = "default_decimals")]
        decimals: u32,
        #[serde(default = "default_decimal_separator")]
        decimal_separator: char,
        #[serde(default = "default_order_separator")]
        order_separator: char,
    },
    /// ISO-8601 datetime with configurable date/time/millisecond inclusion.
    #[serde(rename_all = "camelCase")]
    Datetime {
        #[serde(default = "default_true")]
        include_date: bool,
        #[serde(default = "default_true")]
        include_time: bool,
        #[serde(default)]
        include_milli: bool,
    },
}

fn default_decimals() -> u32 {
    2
}

fn default_decimal_separator() -> char {
    '.'
}

fn default_order_separator() -> char {
    ','
}

fn default_true() -> bool {
    true
}

impl FormatterSpec {
    /// Default numeric spec: two decimals, `.` decimal point, `,` grouping.
    pub fn number() -> Self {
        FormatterSpec::Number {
            decimals: default_decimals(),
            decimal_separator: default_decimal_separator(),
            order_separator: default_order_separator(),
        }
    }

    /// Numeric spec with a fixed decimal count and default separators.
    pub fn number_with_decimals(decimals: u32) -> Self {
        FormatterSpec::Number {
            decimals,
            decimal_separator: default_decimal_separator(),
            order_separator: default_order_separator(),
        }
    }

    /// Datetime spec with the given segment inclusion.
    pub fn datetime(include_date: bool, include_time: bool, include_milli: bool) -> Self {
        FormatterSpec::Datetime {
            include_date,
            include_time,
            include_milli,
        }
    }

    /// Build the formatter this spec describes.
    ///
    /// Fails with `GridError::Config` when the configuration violates a
    /// construction invariant (decimals out of range, date and time both
    /// excluded).
    pub fn build(&self) -> Result<Rc<dyn CellFormatter>> {
        match self {
            FormatterSpec::String => Ok(Rc::new(StringFormatter)),
            FormatterSpec::Escaped => Ok(Rc::new(EscapedFormatter)),
            FormatterSpec::Number {
                decimals,
                decimal_separator,
                order_separator,
            } => Ok(Rc::new(NumberFormatter::new(
                *decimals,
                *decimal_separator,
                *order_separator,
            )?)),
            FormatterSpec::Datetime {
                include_date,
                include_time,
                include_milli,
            } => Ok(Rc::new(DatetimeFormatter::new(
                *include_date,
                *include_time,
                *include_milli,
            )?)),
        }
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
    fn test_spec_deserialize_defaults() {
        let spec: FormatterSpec = serde_json::from_str(r#"{"kind": "number"}"#).unwrap();
        assert_eq!(spec, FormatterSpec::number());

        let spec: FormatterSpec = serde_json::from_str(r#"{"kind": "datetime"}"#).unwrap();
        assert_eq!(spec, FormatterSpec::datetime(true, true, false));
    }

    #[test]
    fn test_spec_deserialize_overrides() {
        let spec: FormatterSpec = serde_json::from_str(
            r#"{"kind": "number", "decimals": 0, "decimalSeparator": ",", "orderSeparator": "."}"#,
        )
        .unwrap();
        assert_eq!(
            spec,
            FormatterSpec::Number {
                decimals: 0,
                decimal_separator: ',',
                order_separator: '.',
            }
        );
    }

    #[test]
    fn test_build_invalid_specs_fail() {
        assert!(FormatterSpec::number_with_decimals(21).build().is_err());
        assert!(FormatterSpec::datetime(false, false, false).build().is_err());
        assert!(FormatterSpec::number_with_decimals(0).build().is_ok());
    }
}
