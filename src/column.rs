//! Column descriptors.
//!
//! A `Column` describes one vertical slice of the grid: which attribute it
//! reads, how its header is labelled, whether users may sort or edit it, and
//! which cell kind / formatter render it. Columns are immutable once built
//! and shared across cells via `Rc`.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::formatter::FormatterSpec;
use crate::registry::CellRegistry;

/// Immutable description of one grid column.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    /// Attribute name this column reads from each row.
    pub name: String,
    /// Header text. Defaults to `name`.
    pub label: String,
    /// Whether clicking the header cycles the sort order.
    pub sortable: bool,
    /// Whether body cells accept edits.
    pub editable: bool,
    /// Whether body cells render their value at all.
    pub renderable: bool,
    /// Explicit formatter override. When absent the cell kind's default
    /// formatter applies.
    pub formatter: Option<FormatterSpec>,
    /// Registered kind for body cells.
    pub cell_kind: String,
    /// Registered kind for the header cell.
    pub header_cell_kind: String,
}

impl Column {
    /// Start building a column for the named attribute.
    pub fn builder(name: &str) -> ColumnBuilder {
        ColumnBuilder::new(name)
    }
}

/// Builder for `Column` with the same defaults the JSON form uses.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    name: String,
    label: Option<String>,
    sortable: bool,
    editable: bool,
    renderable: bool,
    formatter: Option<FormatterSpec>,
    cell_kind: String,
    header_cell_kind: String,
}

impl ColumnBuilder {
    pub fn new(name: &str) -> Self {
        ColumnBuilder {
            name: name.to_string(),
            label: None,
            sortable: true,
            editable: true,
            renderable: true,
            formatter: None,
            cell_kind: "string".to_string(),
            header_cell_kind: "header".to_string(),
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn renderable(mut self, renderable: bool) -> Self {
        self.renderable = renderable;
        self
    }

    pub fn formatter(mut self, spec: FormatterSpec) -> Self {
        self.formatter = Some(spec);
        self
    }

    pub fn cell_kind(mut self, kind: &str) -> Self {
        self.cell_kind = kind.to_string();
        self
    }

    pub fn header_cell_kind(mut self, kind: &str) -> Self {
        self.header_cell_kind = kind.to_string();
        self
    }

    /// Finish the column. Fails when the attribute name or a cell kind is
    /// empty.
    pub fn build(self) -> Result<Column> {
        if self.name.is_empty() {
            return Err(GridError::Config(
                "column requires a non-empty attribute name".to_string(),
            ));
        }
        if self.cell_kind.is_empty() || self.header_cell_kind.is_empty() {
            return Err(GridError::Config(format!(
                "column '{}' requires non-empty cell kinds",
                self.name
            )));
        }
        let label = self.label.unwrap_or_else(|| self.name.clone());
        Ok(Column {
            name: self.name,
            label,
            sortable: self.sortable,
            editable: self.editable,
            renderable: self.renderable,
            formatter: self.formatter,
            cell_kind: self.cell_kind,
            header_cell_kind: self.header_cell_kind,
        })
    }
}

/// JSON wire form of a column definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ColumnSpec {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default = "default_true")]
    sortable: bool,
    #[serde(default = "default_true")]
    editable: bool,
    #[serde(default = "default_true")]
    renderable: bool,
    #[serde(default)]
    formatter: Option<FormatterSpec>,
    #[serde(default = "default_cell_kind")]
    cell: String,
    #[serde(default = "default_header_cell_kind")]
    header_cell: String,
}

fn default_true() -> bool {
    true
}

fn default_cell_kind() -> String {
    "string".to_string()
}

fn default_header_cell_kind() -> String {
    "header".to_string()
}

impl ColumnSpec {
    fn into_column(self) -> Result<Column> {
        let mut builder = Column::builder(&self.name)
            .sortable(self.sortable)
            .editable(self.editable)
            .renderable(self.renderable)
            .cell_kind(&self.cell)
            .header_cell_kind(&self.header_cell);
        if let Some(label) = &self.label {
            builder = builder.label(label);
        }
        if let Some(spec) = self.formatter {
            builder = builder.formatter(spec);
        }
        builder.build()
    }
}

fn validate(column: &Column, registry: &CellRegistry) -> Result<()> {
    registry.get(&column.cell_kind)?;
    registry.get(&column.header_cell_kind)?;
    if let Some(spec) = &column.formatter {
        spec.build()?;
    }
    Ok(())
}

/// Parse a single JSON column definition, validating its cell kinds and
/// formatter against the registry.
pub fn parse_column(json: &str, registry: &CellRegistry) -> Result<Rc<Column>> {
    let spec: ColumnSpec = serde_json::from_str(json)?;
    let column = spec.into_column()?;
    validate(&column, registry)?;
    Ok(Rc::new(column))
}

/// Parse a JSON array of column definitions, validating every referenced
/// cell kind and formatter against the registry.
pub fn parse_columns(json: &str, registry: &CellRegistry) -> Result<Vec<Rc<Column>>> {
    let specs: Vec<ColumnSpec> = serde_json::from_str(json)?;
    if specs.is_empty() {
        return Err(GridError::Config(
            "column list must not be empty".to_string(),
        ));
    }
    let mut columns = Vec::with_capacity(specs.len());
    for spec in specs {
        let column = spec.into_column()?;
        validate(&column, registry)?;
        columns.push(Rc::new(column));
    }
    Ok(columns)
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
    fn test_builder_defaults() {
        let col = Column::builder("age").build().unwrap();
        assert_eq!(col.name, "age");
        assert_eq!(col.label, "age");
        assert!(col.sortable);
        assert!(col.editable);
        assert!(col.renderable);
        assert!(col.formatter.is_none());
        assert_eq!(col.cell_kind, "string");
        assert_eq!(col.header_cell_kind, "header");
    }

    #[test]
    fn test_builder_rejects_empty_name() {
        assert!(Column::builder("").build().is_err());
        assert!(Column::builder("x").cell_kind("").build().is_err());
    }

    #[test]
    fn test_parse_columns_defaults_and_overrides() {
        let registry = CellRegistry::with_builtins();
        let columns = parse_columns(
            r#"[
                {"name": "name", "label": "Name"},
                {"name": "age", "cell": "integer", "editable": false}
            ]"#,
            &registry,
        )
        .unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].label, "Name");
        assert_eq!(columns[1].label, "age");
        assert_eq!(columns[1].cell_kind, "integer");
        assert!(!columns[1].editable);
    }

    #[test]
    fn test_parse_columns_rejects_unknown_kind() {
        let registry = CellRegistry::with_builtins();
        let err = parse_columns(r#"[{"name": "x", "cell": "nope"}]"#, &registry);
        assert!(matches!(err, Err(GridError::UnknownCellKind(k)) if k == "nope"));
    }

    #[test]
    fn test_parse_columns_rejects_bad_input() {
        let registry = CellRegistry::with_builtins();
        assert!(parse_columns("[]", &registry).is_err());
        assert!(parse_columns("not json", &registry).is_err());
        assert!(parse_columns(r#"[{"label": "no name"}]"#, &registry).is_err());
        // Formatter configs are validated up front.
        assert!(parse_columns(
            r#"[{"name": "x", "formatter": {"kind": "number", "decimals": 99}}]"#,
            &registry
        )
        .is_err());
    }
}
