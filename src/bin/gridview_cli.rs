//! Render a grid to stdout from JSON column and row files.
//!
//! Usage:
//!   gridview_cli <columns.json> <rows.json> [-s COLUMN] [-d asc|desc]
//!
//! The columns file holds a JSON array of column definitions; the rows file
//! a JSON array of attribute objects. `-s` sorts by the named column,
//! ascending unless `-d desc`.

use std::collections::HashMap;
use std::process::ExitCode;
use std::rc::Rc;

use gridview::{
    parse_columns, sort_rows, AttributeStore, CellFormatter, CellRegistry, Column, GridError,
    MemoryModel, RawValue, Result, RowComparator,
};

struct Args {
    columns_path: String,
    rows_path: String,
    sort_column: Option<String>,
    descending: bool,
}

fn parse_args() -> Result<Args> {
    let mut columns_path = None;
    let mut rows_path = None;
    let mut sort_column = None;
    let mut descending = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--sort" => {
                sort_column = Some(
                    args.next()
                        .ok_or_else(|| GridError::from("-s requires a column name"))?,
                );
            }
            "-d" | "--direction" => {
                let value = args
                    .next()
                    .ok_or_else(|| GridError::from("-d requires asc or desc"))?;
                descending = match value.as_str() {
                    "asc" => false,
                    "desc" => true,
                    other => {
                        return Err(GridError::Config(format!(
                            "unknown direction '{other}', expected asc or desc"
                        )))
                    }
                };
            }
            "-h" | "--help" => {
                return Err(GridError::from(
                    "usage: gridview_cli <columns.json> <rows.json> [-s COLUMN] [-d asc|desc]",
                ))
            }
            positional => {
                if columns_path.is_none() {
                    columns_path = Some(positional.to_string());
                } else if rows_path.is_none() {
                    rows_path = Some(positional.to_string());
                } else {
                    return Err(GridError::Config(format!(
                        "unexpected argument '{positional}'"
                    )));
                }
            }
        }
    }

    Ok(Args {
        columns_path: columns_path.ok_or_else(|| GridError::from("missing columns file"))?,
        rows_path: rows_path.ok_or_else(|| GridError::from("missing rows file"))?,
        sort_column,
        descending,
    })
}

fn load_rows(path: &str) -> Result<Vec<MemoryModel>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| GridError::Config(format!("cannot read {path}: {e}")))?;
    let rows: Vec<HashMap<String, RawValue>> = serde_json::from_str(&text)?;
    Ok(rows.into_iter().map(MemoryModel::from_pairs).collect())
}

/// Format the grid as aligned text columns.
fn render(columns: &[Rc<Column>], rows: &[MemoryModel], registry: &CellRegistry) -> Result<String> {
    let mut table: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    table.push(columns.iter().map(|c| c.label.clone()).collect());

    let mut formatters = Vec::with_capacity(columns.len());
    for column in columns {
        formatters.push(registry.resolve_formatter(column)?.build()?);
    }

    for row in rows {
        let mut cells = Vec::with_capacity(columns.len());
        for (column, formatter) in columns.iter().zip(&formatters) {
            if column.renderable {
                let value = row.get(&column.name).unwrap_or_default();
                cells.push(formatter.from_raw(&value));
            } else {
                cells.push(String::new());
            }
        }
        table.push(cells);
    }

    let mut widths = vec![0usize; columns.len()];
    for line in &table {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in &table {
        let mut rendered = Vec::with_capacity(line.len());
        for ((cell, width), column) in line.iter().zip(&widths).zip(columns) {
            let pad = width.saturating_sub(cell.chars().count());
            let align_right = registry.get(&column.cell_kind)?.align_right;
            if align_right {
                rendered.push(format!("{}{}", " ".repeat(pad), cell));
            } else {
                rendered.push(format!("{}{}", cell, " ".repeat(pad)));
            }
        }
        out.push_str(rendered.join("  ").trim_end());
        out.push('\n');
    }
    Ok(out)
}

fn run() -> Result<String> {
    let args = parse_args()?;

    let registry = CellRegistry::with_builtins();
    let columns_text = std::fs::read_to_string(&args.columns_path)
        .map_err(|e| GridError::Config(format!("cannot read {}: {e}", args.columns_path)))?;
    let columns = parse_columns(&columns_text, &registry)?;
    let mut rows = load_rows(&args.rows_path)?;

    if let Some(name) = &args.sort_column {
        let column = columns
            .iter()
            .find(|c| &c.name == name)
            .ok_or_else(|| GridError::Config(format!("no column named '{name}'")))?;
        if !column.sortable {
            return Err(GridError::Config(format!("column '{name}' is not sortable")));
        }
        let comparator = RowComparator::ByColumn {
            column: name.clone(),
            ascending: !args.descending,
        };
        rows = sort_rows(rows, &comparator);
    }

    render(&columns, &rows, &registry)
}

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("gridview_cli: {err}");
            ExitCode::FAILURE
        }
    }
}
