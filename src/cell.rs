//! The cell state machine.
//!
//! A cell is either displaying its formatted value or editing it. Activation
//! opens an editor session and shows the input; a closing gesture routes
//! through `CellEditor` and either returns to display mode or stays in
//! editing mode with a durable error mark. The error class persists until
//! the next successful render so styling can keep the cell highlighted while
//! the user fixes the input.

use std::cell::RefCell;
use std::rc::Rc;

use crate::column::Column;
use crate::editor::{CellEditor, EditorSignal, Gesture};
use crate::error::Result;
use crate::events::{EventBus, GridEvent};
use crate::formatter::CellFormatter;
use crate::model::AttributeStore;
use crate::registry::CellRegistry;
use crate::surface::CellSurface;

/// CSS class carried while the input is shown.
pub const EDITING_CLASS: &str = "editing";
/// CSS class carried after a failed commit, cleared on the next render.
pub const ERROR_CLASS: &str = "error";
/// CSS class for right-aligned (numeric) kinds.
pub const ALIGN_RIGHT_CLASS: &str = "align-right";

/// Which of the two modes the cell is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMode {
    Display,
    Editing,
}

/// One body cell: a column applied to one row, rendered onto a surface.
pub struct Cell<S: CellSurface> {
    column: Rc<Column>,
    formatter: Rc<dyn CellFormatter>,
    store: Rc<RefCell<dyn AttributeStore>>,
    surface: S,
    events: EventBus,
    mode: CellMode,
    editor: Option<CellEditor>,
    errored: bool,
}

impl<S: CellSurface> Cell<S> {
    /// Bind a column to a row and render the initial value. The formatter
    /// comes from the column override or the cell kind's default.
    pub fn new(
        column: Rc<Column>,
        store: Rc<RefCell<dyn AttributeStore>>,
        mut surface: S,
        registry: &CellRegistry,
        events: EventBus,
    ) -> Result<Self> {
        let info = registry.get(&column.cell_kind)?;
        surface.add_class(&info.class_name);
        if info.align_right {
            surface.add_class(ALIGN_RIGHT_CLASS);
        }
        let formatter = registry.resolve_formatter(&column)?.build()?;

        let mut cell = Cell {
            column,
            formatter,
            store,
            surface,
            events,
            mode: CellMode::Display,
            editor: None,
            errored: false,
        };
        cell.render();
        Ok(cell)
    }

    pub fn mode(&self) -> CellMode {
        self.mode
    }

    pub fn has_error(&self) -> bool {
        self.errored
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    /// The attribute's current raw value.
    pub fn value(&self) -> crate::value::RawValue {
        self.store.borrow().get(&self.column.name).unwrap_or_default()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Enter editing mode. A no-op on non-editable cells and on cells
    /// already editing.
    pub fn activate(&mut self) {
        if !self.column.editable || self.mode == CellMode::Editing {
            return;
        }

        // EditStarted fires before the input appears so subscribers can
        // observe the transition order.
        self.events.emit(&GridEvent::EditStarted {
            column: self.column.name.clone(),
        });

        let editor = CellEditor::open(
            Rc::clone(&self.formatter),
            &self.column.name,
            &*self.store.borrow(),
        );
        self.surface.add_class(EDITING_CLASS);
        self.surface.show_input(editor.original_display());
        self.surface.focus();
        self.editor = Some(editor);
        self.mode = CellMode::Editing;

        self.events.emit(&GridEvent::Editing {
            column: self.column.name.clone(),
        });
    }

    /// Close (or try to close) the edit with a gesture. A no-op outside
    /// editing mode.
    pub fn gesture(&mut self, gesture: Gesture) {
        let Some(editor) = &self.editor else {
            return;
        };
        let input = self.surface.input_value();
        let signal = editor.handle(gesture, &input, &mut *self.store.borrow_mut());
        self.apply(signal, &input);
    }

    fn apply(&mut self, signal: EditorSignal, input: &str) {
        match signal {
            EditorSignal::Done { committed } => {
                self.surface.remove_class(EDITING_CLASS);
                self.surface.hide_input();
                self.editor = None;
                self.mode = CellMode::Display;
                self.render();
                let event = if committed {
                    GridEvent::Edited {
                        column: self.column.name.clone(),
                    }
                } else {
                    GridEvent::EditCancelled {
                        column: self.column.name.clone(),
                    }
                };
                self.events.emit(&event);
            }
            EditorSignal::Error { .. } => {
                // Stay in editing mode; the user can fix the input or
                // cancel.
                self.errored = true;
                self.surface.add_class(ERROR_CLASS);
                self.surface.focus();
                self.events.emit(&GridEvent::EditError {
                    column: self.column.name.clone(),
                    input: input.to_string(),
                });
            }
        }
    }

    /// Render the formatted value, clearing any error mark.
    pub fn render(&mut self) {
        self.errored = false;
        self.surface.remove_class(ERROR_CLASS);
        if self.column.renderable {
            let value = self.store.borrow().get(&self.column.name).unwrap_or_default();
            self.surface.set_text(&self.formatter.from_raw(&value));
        } else {
            self.surface.set_text("");
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
    use crate::model::MemoryModel;
    use crate::surface::TestSurface;
    use crate::value::RawValue;

    fn make_cell(
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

    fn age_cell() -> (Cell<TestSurface>, Rc<RefCell<Vec<GridEvent>>>) {
        make_cell(
            Column::builder("age").cell_kind("number").build().unwrap(),
            MemoryModel::from_pairs([("age", RawValue::Number(30.0))]),
        )
    }

    #[test]
    fn test_initial_render() {
        let (cell, _) = age_cell();
        assert_eq!(cell.mode(), CellMode::Display);
        assert_eq!(cell.surface().text, "30.00");
        assert!(cell.surface().has_class("number-cell"));
        assert!(cell.surface().has_class(ALIGN_RIGHT_CLASS));
        assert!(!cell.surface().input_shown());
    }

    #[test]
    fn test_activate_shows_primed_input() {
        let (mut cell, seen) = age_cell();
        cell.activate();

        assert_eq!(cell.mode(), CellMode::Editing);
        assert!(cell.surface().has_class(EDITING_CLASS));
        assert_eq!(cell.surface().input_value(), "30.00");
        assert!(cell.surface().focus_count > 0);

        let events = seen.borrow();
        assert_eq!(
            *events,
            vec![
                GridEvent::EditStarted {
                    column: "age".into()
                },
                GridEvent::Editing {
                    column: "age".into()
                },
            ]
        );
    }

    #[test]
    fn test_activate_is_idempotent_while_editing() {
        let (mut cell, seen) = age_cell();
        cell.activate();
        let count = seen.borrow().len();
        cell.activate();
        assert_eq!(seen.borrow().len(), count);
    }

    #[test]
    fn test_non_editable_cell_ignores_activation() {
        let (mut cell, seen) = make_cell(
            Column::builder("age")
                .cell_kind("number")
                .editable(false)
                .build()
                .unwrap(),
            MemoryModel::from_pairs([("age", RawValue::Number(30.0))]),
        );
        cell.activate();
        assert_eq!(cell.mode(), CellMode::Display);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_commit_rerenders_and_emits_edited() {
        let (mut cell, seen) = age_cell();
        cell.activate();
        cell.surface_mut().set_input_value("1,234.5");
        cell.gesture(Gesture::Commit);

        assert_eq!(cell.mode(), CellMode::Display);
        assert!(!cell.surface().input_shown());
        assert!(!cell.surface().has_class(EDITING_CLASS));
        assert_eq!(cell.surface().text, "1,234.50");
        assert_eq!(cell.value(), RawValue::Number(1234.5));
        assert_eq!(
            seen.borrow().last(),
            Some(&GridEvent::Edited {
                column: "age".into()
            })
        );
    }

    #[test]
    fn test_cancel_restores_original() {
        let (mut cell, seen) = age_cell();
        cell.activate();
        cell.surface_mut().set_input_value("999");
        cell.gesture(Gesture::Cancel);

        assert_eq!(cell.mode(), CellMode::Display);
        assert_eq!(cell.surface().text, "30.00");
        assert_eq!(cell.value(), RawValue::Number(30.0));
        assert_eq!(
            seen.borrow().last(),
            Some(&GridEvent::EditCancelled {
                column: "age".into()
            })
        );
    }

    #[test]
    fn test_blur_discards_like_cancel() {
        let (mut cell, _) = age_cell();
        cell.activate();
        cell.surface_mut().set_input_value("7");
        cell.gesture(Gesture::Blur);
        assert_eq!(cell.value(), RawValue::Number(30.0));
        assert_eq!(cell.mode(), CellMode::Display);
    }

    #[test]
    fn test_failed_commit_keeps_editing_with_error_mark() {
        let (mut cell, seen) = age_cell();
        cell.activate();
        cell.surface_mut().set_input_value("not a number");
        cell.gesture(Gesture::Commit);

        assert_eq!(cell.mode(), CellMode::Editing);
        assert!(cell.has_error());
        assert!(cell.surface().has_class(ERROR_CLASS));
        assert!(cell.surface().input_shown());
        assert_eq!(
            seen.borrow().last(),
            Some(&GridEvent::EditError {
                column: "age".into(),
                input: "not a number".into()
            })
        );
        assert_eq!(cell.value(), RawValue::Number(30.0));
    }

    #[test]
    fn test_error_mark_clears_on_successful_commit() {
        let (mut cell, _) = age_cell();
        cell.activate();
        cell.surface_mut().set_input_value("bad");
        cell.gesture(Gesture::Commit);
        assert!(cell.surface().has_class(ERROR_CLASS));

        cell.surface_mut().set_input_value("41");
        cell.gesture(Gesture::Commit);
        assert!(!cell.has_error());
        assert!(!cell.surface().has_class(ERROR_CLASS));
        assert_eq!(cell.surface().text, "41.00");
    }

    #[test]
    fn test_gesture_outside_editing_is_ignored() {
        let (mut cell, seen) = age_cell();
        cell.gesture(Gesture::Commit);
        assert!(seen.borrow().is_empty());
        assert_eq!(cell.value(), RawValue::Number(30.0));
    }

    #[test]
    fn test_non_renderable_cell_shows_nothing() {
        let (cell, _) = make_cell(
            Column::builder("secret")
                .renderable(false)
                .build()
                .unwrap(),
            MemoryModel::from_pairs([("secret", RawValue::Text("hidden".into()))]),
        );
        assert_eq!(cell.surface().text, "");
    }
}
