//! End-to-end edit lifecycle: activation, commit, cancel, blur, and error
//! handling through the full cell / editor / store / event stack.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use gridview::{
    Cell, CellMode, CellRegistry, CellSurface, Column, EventBus, Gesture, GridEvent, MemoryModel,
    RawValue, StoreError, TestSurface,
};

use common::{cell_with_recorder, event_names, number_column, person};

#[test]
fn full_commit_lifecycle_event_order() {
    let (mut cell, seen) = cell_with_recorder(number_column("age"), person("Alice", 34.0));

    cell.activate();
    cell.surface_mut().set_input_value("35");
    cell.gesture(Gesture::Commit);

    assert_eq!(
        event_names(&seen),
        vec!["edit_started", "editing", "edited"]
    );
    assert_eq!(cell.value(), RawValue::Number(35.0));
    assert_eq!(cell.surface().text, "35.00");
    assert_eq!(cell.mode(), CellMode::Display);
}

#[test]
fn cancel_lifecycle_event_order() {
    let (mut cell, seen) = cell_with_recorder(number_column("age"), person("Alice", 34.0));

    cell.activate();
    cell.surface_mut().set_input_value("99");
    cell.gesture(Gesture::Cancel);

    assert_eq!(
        event_names(&seen),
        vec!["edit_started", "editing", "edit_cancelled"]
    );
    assert_eq!(cell.value(), RawValue::Number(34.0));
}

#[test]
fn error_then_retry_succeeds() {
    let (mut cell, seen) = cell_with_recorder(number_column("age"), person("Alice", 34.0));

    cell.activate();
    cell.surface_mut().set_input_value("thirty five");
    cell.gesture(Gesture::Commit);
    assert_eq!(cell.mode(), CellMode::Editing);
    assert!(cell.has_error());

    // The input keeps its (bad) contents; the user corrects it.
    assert_eq!(cell.surface().input_value(), "thirty five");
    cell.surface_mut().set_input_value("35");
    cell.gesture(Gesture::Commit);

    assert_eq!(
        event_names(&seen),
        vec!["edit_started", "editing", "edit_error", "edited"]
    );
    assert!(!cell.has_error());
    assert_eq!(cell.value(), RawValue::Number(35.0));
}

#[test]
fn error_then_cancel_restores_original() {
    let (mut cell, seen) = cell_with_recorder(number_column("age"), person("Alice", 34.0));

    cell.activate();
    cell.surface_mut().set_input_value("bad");
    cell.gesture(Gesture::Commit);
    cell.gesture(Gesture::Cancel);

    assert_eq!(
        event_names(&seen),
        vec!["edit_started", "editing", "edit_error", "edit_cancelled"]
    );
    assert_eq!(cell.value(), RawValue::Number(34.0));
    assert_eq!(cell.surface().text, "34.00");
    assert!(!cell.surface().has_class("error"));
}

#[test]
fn edit_error_event_carries_the_rejected_input() {
    let (mut cell, seen) = cell_with_recorder(number_column("age"), person("Alice", 34.0));

    cell.activate();
    cell.surface_mut().set_input_value("12x");
    cell.gesture(Gesture::Commit);

    let events = seen.borrow();
    assert_eq!(
        events.last(),
        Some(&GridEvent::EditError {
            column: "age".into(),
            input: "12x".into()
        })
    );
}

#[test]
fn store_validator_rejection_keeps_editing() {
    let model = person("Alice", 34.0).with_validator(|name, value| {
        if name == "age" && value.as_number().is_none_or(|n| n < 0.0) {
            return Err(StoreError::from("age must be non-negative"));
        }
        Ok(())
    });
    let (mut cell, seen) = cell_with_recorder(number_column("age"), model);

    cell.activate();
    cell.surface_mut().set_input_value("-3");
    cell.gesture(Gesture::Commit);

    assert_eq!(cell.mode(), CellMode::Editing);
    assert_eq!(cell.value(), RawValue::Number(34.0));
    assert_eq!(
        event_names(&seen),
        vec!["edit_started", "editing", "edit_error"]
    );
}

#[test]
fn blur_after_typing_discards() {
    let (mut cell, seen) = cell_with_recorder(number_column("age"), person("Alice", 34.0));

    cell.activate();
    cell.surface_mut().set_input_value("99");
    cell.gesture(Gesture::Blur);

    assert_eq!(cell.value(), RawValue::Number(34.0));
    assert_eq!(
        event_names(&seen),
        vec!["edit_started", "editing", "edit_cancelled"]
    );
}

#[test]
fn two_cells_share_one_row() {
    // Editing through one cell is visible to another cell over the same row.
    let registry = CellRegistry::with_builtins();
    let events = EventBus::new();
    let model: Rc<RefCell<MemoryModel>> = Rc::new(RefCell::new(person("Alice", 34.0)));

    let age_col = Rc::new(number_column("age"));
    let mut editor_cell = Cell::new(
        Rc::clone(&age_col),
        Rc::<RefCell<MemoryModel>>::clone(&model),
        TestSurface::new(),
        &registry,
        events.clone(),
    )
    .unwrap();
    let mut mirror_cell = Cell::new(
        age_col,
        Rc::<RefCell<MemoryModel>>::clone(&model),
        TestSurface::new(),
        &registry,
        events,
    )
    .unwrap();

    editor_cell.activate();
    editor_cell.surface_mut().set_input_value("40");
    editor_cell.gesture(Gesture::Commit);

    assert_eq!(mirror_cell.surface().text, "34.00");
    mirror_cell.render();
    assert_eq!(mirror_cell.surface().text, "40.00");
}

#[test]
fn empty_input_on_string_cell_commits_empty_text() {
    let column = Column::builder("name").build().unwrap();
    let (mut cell, _) = cell_with_recorder(column, person("Alice", 34.0));

    cell.activate();
    assert_eq!(cell.surface().input_value(), "Alice");
    cell.surface_mut().set_input_value("");
    cell.gesture(Gesture::Commit);

    assert_eq!(cell.value(), RawValue::Text(String::new()));
    assert_eq!(cell.surface().text, "");
}
