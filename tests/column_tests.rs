//! Column config parsing and formatter resolution end to end.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::{
    parse_columns, CellFormatter, CellRegistry, FormatterSpec, GridError, RawValue,
};

#[test]
fn realistic_grid_config_parses() {
    let registry = CellRegistry::with_builtins();
    let columns = parse_columns(
        r#"[
            {"name": "id", "cell": "integer", "editable": false},
            {"name": "name", "label": "Full name", "cell": "escaped"},
            {"name": "balance", "label": "Balance", "cell": "number",
             "formatter": {"kind": "number", "decimals": 2, "decimalSeparator": ",", "orderSeparator": "."}},
            {"name": "joined", "label": "Joined", "cell": "date", "editable": false},
            {"name": "notes", "renderable": false, "sortable": false}
        ]"#,
        &registry,
    )
    .unwrap();

    assert_eq!(columns.len(), 5);
    assert_eq!(columns[0].label, "id");
    assert!(!columns[0].editable);
    assert_eq!(columns[1].cell_kind, "escaped");
    assert!(columns[2].formatter.is_some());
    assert!(!columns[4].renderable);
    assert!(!columns[4].sortable);
}

#[test]
fn formatter_resolution_override_beats_kind_default() {
    let registry = CellRegistry::with_builtins();
    let columns = parse_columns(
        r#"[
            {"name": "a", "cell": "number"},
            {"name": "b", "cell": "number", "formatter": {"kind": "number", "decimals": 0}}
        ]"#,
        &registry,
    )
    .unwrap();

    let default_fmt = registry.resolve_formatter(&columns[0]).unwrap().build().unwrap();
    let override_fmt = registry.resolve_formatter(&columns[1]).unwrap().build().unwrap();
    assert_eq!(default_fmt.from_raw(&RawValue::Number(1234.5)), "1,234.50");
    assert_eq!(override_fmt.from_raw(&RawValue::Number(1234.5)), "1,235");
}

#[test]
fn unknown_cell_kind_names_the_kind() {
    let registry = CellRegistry::with_builtins();
    let err = parse_columns(r#"[{"name": "x", "cell": "sparkline"}]"#, &registry).unwrap_err();
    match err {
        GridError::UnknownCellKind(kind) => assert_eq!(kind, "sparkline"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unknown_fields_are_rejected() {
    let registry = CellRegistry::with_builtins();
    assert!(parse_columns(r#"[{"name": "x", "wdith": 30}]"#, &registry).is_err());
}

#[test]
fn datetime_formatter_spec_roundtrips_through_json() {
    let spec = FormatterSpec::datetime(true, false, false);
    let json = serde_json::to_string(&spec).unwrap();
    let back: FormatterSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(spec, back);
}

#[test]
fn column_records_serialize_for_host_consumption() {
    let registry = CellRegistry::with_builtins();
    let columns = parse_columns(r#"[{"name": "age", "cell": "integer"}]"#, &registry).unwrap();
    let json = serde_json::to_string(&columns).unwrap();
    assert!(json.contains(r#""name":"age""#));
    assert!(json.contains(r#""cell_kind":"integer""#));
}
