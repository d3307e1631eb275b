//! Plain and HTML-escaping string formatters.

use crate::formatter::CellFormatter;
use crate::value::RawValue;

/// Identity conversion: raw values display as-is, input is taken verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFormatter;

impl CellFormatter for StringFormatter {
    fn from_raw(&self, raw: &RawValue) -> String {
        raw.display()
    }

    fn to_raw(&self, display: &str) -> Option<RawValue> {
        Some(RawValue::Text(display.to_string()))
    }
}

/// Like `StringFormatter`, but HTML-escapes the display string so it is safe
/// to insert into markup. Input text is stored unescaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapedFormatter;

impl CellFormatter for EscapedFormatter {
    fn from_raw(&self, raw: &RawValue) -> String {
        escape_html(&raw.display())
    }

    fn to_raw(&self, display: &str) -> Option<RawValue> {
        Some(RawValue::Text(display.to_string()))
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
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
    fn test_identity_roundtrip() {
        let f = StringFormatter;
        assert_eq!(f.from_raw(&RawValue::Text("hello".into())), "hello");
        assert_eq!(f.to_raw("hello"), Some(RawValue::Text("hello".into())));
        assert_eq!(f.from_raw(&RawValue::Empty), "");
    }

    #[test]
    fn test_identity_stringifies_other_types() {
        let f = StringFormatter;
        assert_eq!(f.from_raw(&RawValue::Number(7.0)), "7");
        assert_eq!(f.from_raw(&RawValue::Boolean(false)), "false");
    }

    #[test]
    fn test_escaped_display() {
        let f = EscapedFormatter;
        assert_eq!(
            f.from_raw(&RawValue::Text(r#"<a href="x">&'"#.into())),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_escaped_input_is_verbatim() {
        let f = EscapedFormatter;
        assert_eq!(f.to_raw("<b>"), Some(RawValue::Text("<b>".into())));
    }
}
