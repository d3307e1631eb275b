//! Shared helpers for integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::RefCell;
use std::rc::Rc;

use gridview::{
    Cell, CellRegistry, Column, EventBus, FormatterSpec, GridEvent, MemoryModel, RawValue,
    TestSurface,
};

/// A row with the attributes most tests use.
pub fn person(name: &str, age: f64) -> MemoryModel {
    MemoryModel::from_pairs([
        ("name", RawValue::from(name)),
        ("age", RawValue::from(age)),
    ])
}

pub fn number_column(name: &str) -> Column {
    Column::builder(name).cell_kind("number").build().unwrap()
}

pub fn column_with_formatter(name: &str, spec: FormatterSpec) -> Column {
    Column::builder(name).formatter(spec).build().unwrap()
}

/// Build a cell over a `TestSurface` plus a recorder of every emitted event.
pub fn cell_with_recorder(
    column: Column,
    model: MemoryModel,
) -> (Cell<TestSurface>, Rc<RefCell<Vec<GridEvent>>>) {
    let events = EventBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    events.subscribe(Rc::new(move |e: &GridEvent| {
        sink.borrow_mut().push(e.clone());
    }));

    let cell = Cell::new(
        Rc::new(column),
        Rc::new(RefCell::new(model)),
        TestSurface::new(),
        &CellRegistry::with_builtins(),
        events,
    )
    .unwrap();
    (cell, seen)
}

/// The event names in emission order, for compact assertions.
pub fn event_names(seen: &Rc<RefCell<Vec<GridEvent>>>) -> Vec<&'static str> {
    seen.borrow()
        .iter()
        .map(|e| match e {
            GridEvent::EditStarted { .. } => "edit_started",
            GridEvent::Editing { .. } => "editing",
            GridEvent::Edited { .. } => "edited",
            GridEvent::EditError { .. } => "edit_error",
            GridEvent::EditCancelled { .. } => "edit_cancelled",
            GridEvent::Sorted { .. } => "sorted",
        })
        .collect()
}
