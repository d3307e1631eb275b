//! Cell-kind registry.
//!
//! Column configs refer to cell kinds by name ("string", "integer",
//! "datetime", ...). The registry maps those names to rendering info: the
//! CSS class the cell carries, the default formatter, and alignment. Lookup
//! of an unregistered kind is a configuration error, surfaced as
//! `GridError::UnknownCellKind` at column-parse time rather than at render
//! time.

use std::collections::HashMap;

use crate::column::Column;
use crate::error::{GridError, Result};
use crate::formatter::FormatterSpec;

/// Rendering info for one registered cell kind.
#[derive(Debug, Clone)]
pub struct CellKindInfo {
    /// CSS class added to every cell of this kind.
    pub class_name: String,
    /// Formatter applied when the column has no explicit override.
    pub default_formatter: FormatterSpec,
    /// Right-align content (numeric kinds).
    pub align_right: bool,
}

impl CellKindInfo {
    pub fn new(class_name: &str, default_formatter: FormatterSpec) -> Self {
        CellKindInfo {
            class_name: class_name.to_string(),
            default_formatter,
            align_right: false,
        }
    }

    pub fn align_right(mut self) -> Self {
        self.align_right = true;
        self
    }
}

/// Name -> `CellKindInfo` map. The built-in set covers the common kinds;
/// callers may register their own before parsing columns.
#[derive(Debug, Default)]
pub struct CellRegistry {
    kinds: HashMap<String, CellKindInfo>,
}

impl CellRegistry {
    /// An empty registry with no kinds at all.
    pub fn new() -> Self {
        CellRegistry::default()
    }

    /// A registry pre-populated with the built-in kinds: `string`, `escaped`,
    /// `number`, `integer`, `datetime`, `date`, `time`, `boolean`, `header`.
    pub fn with_builtins() -> Self {
        let mut registry = CellRegistry::new();
        registry.register("string", CellKindInfo::new("string-cell", FormatterSpec::String));
        registry.register(
            "escaped",
            CellKindInfo::new("escaped-cell", FormatterSpec::Escaped),
        );
        registry.register(
            "number",
            CellKindInfo::new("number-cell", FormatterSpec::number()).align_right(),
        );
        registry.register(
            "integer",
            CellKindInfo::new("integer-cell", FormatterSpec::number_with_decimals(0))
                .align_right(),
        );
        registry.register(
            "datetime",
            CellKindInfo::new("datetime-cell", FormatterSpec::datetime(true, true, false)),
        );
        registry.register(
            "date",
            CellKindInfo::new("date-cell", FormatterSpec::datetime(true, false, false)),
        );
        registry.register(
            "time",
            CellKindInfo::new("time-cell", FormatterSpec::datetime(false, true, false)),
        );
        registry.register(
            "boolean",
            CellKindInfo::new("boolean-cell", FormatterSpec::String),
        );
        registry.register("header", CellKindInfo::new("header-cell", FormatterSpec::String));
        registry
    }

    /// Register or replace a kind.
    pub fn register(&mut self, name: &str, info: CellKindInfo) {
        self.kinds.insert(name.to_string(), info);
    }

    /// Look up a kind. Unknown names are a configuration error.
    pub fn get(&self, name: &str) -> Result<&CellKindInfo> {
        self.kinds
            .get(name)
            .ok_or_else(|| GridError::UnknownCellKind(name.to_string()))
    }

    /// Formatter spec for a column: explicit column override wins, then the
    /// cell kind's default.
    pub fn resolve_formatter(&self, column: &Column) -> Result<FormatterSpec> {
        if let Some(spec) = &column.formatter {
            return Ok(spec.clone());
        }
        Ok(self.get(&column.cell_kind)?.default_formatter.clone())
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
    fn test_builtin_kinds() {
        let registry = CellRegistry::with_builtins();
        for kind in [
            "string", "escaped", "number", "integer", "datetime", "date", "time", "boolean",
            "header",
        ] {
            assert!(registry.get(kind).is_ok(), "missing builtin {kind}");
        }
        assert!(registry.get("integer").unwrap().align_right);
        assert!(!registry.get("string").unwrap().align_right);
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let registry = CellRegistry::with_builtins();
        let err = registry.get("currency").unwrap_err();
        assert!(matches!(err, GridError::UnknownCellKind(k) if k == "currency"));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = CellRegistry::with_builtins();
        registry.register(
            "percent",
            CellKindInfo::new("percent-cell", FormatterSpec::number_with_decimals(1))
                .align_right(),
        );
        assert_eq!(registry.get("percent").unwrap().class_name, "percent-cell");
    }

    #[test]
    fn test_resolve_formatter_precedence() {
        let registry = CellRegistry::with_builtins();
        let plain = Column::builder("n").cell_kind("integer").build().unwrap();
        assert_eq!(
            registry.resolve_formatter(&plain).unwrap(),
            FormatterSpec::number_with_decimals(0)
        );

        let overridden = Column::builder("n")
            .cell_kind("integer")
            .formatter(FormatterSpec::number_with_decimals(4))
            .build()
            .unwrap();
        assert_eq!(
            registry.resolve_formatter(&overridden).unwrap(),
            FormatterSpec::number_with_decimals(4)
        );
    }
}
