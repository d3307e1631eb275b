//! Header sort cycling and row ordering over realistic row sets.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use gridview::{
    derive, sort_rows, AttributeStore, Column, MemoryModel, RawValue, RowComparator,
    SortDirection,
};

use common::person;

fn names(rows: &[MemoryModel]) -> Vec<String> {
    rows.iter()
        .map(|r| match r.get("name") {
            Some(RawValue::Text(t)) => t,
            other => panic!("unexpected name value {other:?}"),
        })
        .collect()
}

fn roster() -> Vec<MemoryModel> {
    vec![
        person("Charlie", 28.0),
        person("Alice", 34.0),
        person("Bob", 28.0),
    ]
}

#[test]
fn three_clicks_return_to_natural_order() {
    let column = Column::builder("age").build().unwrap();
    let mut direction = SortDirection::None;
    let original = names(&roster());

    let (cmp, next) = derive(direction, &column);
    direction = next;
    let rows = sort_rows(roster(), &cmp);
    assert_eq!(names(&rows), vec!["Charlie", "Bob", "Alice"]);

    let (cmp, next) = derive(direction, &column);
    direction = next;
    let rows = sort_rows(roster(), &cmp);
    assert_eq!(names(&rows), vec!["Alice", "Charlie", "Bob"]);

    let (cmp, next) = derive(direction, &column);
    assert_eq!(next, SortDirection::None);
    let rows = sort_rows(roster(), &cmp);
    assert_eq!(names(&rows), original);
}

#[test]
fn ties_preserve_insertion_order_both_directions() {
    // Charlie and Bob share age 28; they must keep their relative order
    // whichever way the sort runs.
    let ascending = sort_rows(
        roster(),
        &RowComparator::ByColumn {
            column: "age".into(),
            ascending: true,
        },
    );
    assert_eq!(names(&ascending), vec!["Charlie", "Bob", "Alice"]);

    let descending = sort_rows(
        roster(),
        &RowComparator::ByColumn {
            column: "age".into(),
            ascending: false,
        },
    );
    assert_eq!(names(&descending), vec!["Alice", "Charlie", "Bob"]);
}

#[test]
fn missing_attribute_sorts_first_ascending() {
    let rows = vec![
        person("Alice", 34.0),
        MemoryModel::from_pairs([("name", RawValue::from("Nobody"))]),
        person("Bob", 28.0),
    ];
    let sorted = sort_rows(
        rows,
        &RowComparator::ByColumn {
            column: "age".into(),
            ascending: true,
        },
    );
    assert_eq!(names(&sorted), vec!["Nobody", "Bob", "Alice"]);
}

#[test]
fn text_column_sorts_lexicographically() {
    let sorted = sort_rows(
        roster(),
        &RowComparator::ByColumn {
            column: "name".into(),
            ascending: true,
        },
    );
    assert_eq!(names(&sorted), vec!["Alice", "Bob", "Charlie"]);
}

#[test]
fn iso_datetime_text_sorts_chronologically() {
    // The ISO-8601 wire form sorts correctly as plain text.
    let rows = vec![
        MemoryModel::from_pairs([
            ("name", RawValue::from("late")),
            ("at", RawValue::from("2016-01-01T00:00:00Z")),
        ]),
        MemoryModel::from_pairs([
            ("name", RawValue::from("early")),
            ("at", RawValue::from("2015-07-04T10:30:45Z")),
        ]),
    ];
    let sorted = sort_rows(
        rows,
        &RowComparator::ByColumn {
            column: "at".into(),
            ascending: true,
        },
    );
    assert_eq!(names(&sorted), vec!["early", "late"]);
}

#[test]
fn derive_ignores_sortable_flag() {
    // derive is pure; gating clicks on `sortable` is the header's job.
    let column = Column::builder("age").sortable(false).build().unwrap();
    let (cmp, direction) = derive(SortDirection::None, &column);
    assert_eq!(direction, SortDirection::Ascending);
    assert!(matches!(cmp, RowComparator::ByColumn { .. }));
}
