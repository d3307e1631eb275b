//! JavaScript-facing bindings.
//!
//! `GridCell` wraps one [`Cell`] over a real DOM element so a host page can
//! drive the edit lifecycle from event listeners it wires itself (click to
//! activate, Enter/Escape/blur to close). Events are forwarded to a JS
//! callback as `(name, column)` string pairs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::cell::{Cell, CellMode};
use crate::column::{parse_column, parse_columns};
use crate::editor::Gesture;
use crate::events::{EventBus, GridEvent};
use crate::model::MemoryModel;
use crate::registry::CellRegistry;
use crate::surface::DomSurface;
use crate::value::RawValue;

/// Parse and normalize a JSON column array, returning the full column
/// records with defaults applied. Throws on unknown cell kinds or invalid
/// formatter configs.
#[wasm_bindgen(js_name = parseColumns)]
pub fn parse_columns_js(json: &str) -> Result<JsValue, JsValue> {
    let registry = CellRegistry::with_builtins();
    let columns = parse_columns(json, &registry)?;
    let records: Vec<&crate::column::Column> = columns.iter().map(Rc::as_ref).collect();
    serde_wasm_bindgen::to_value(&records).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn event_name(event: &GridEvent) -> &'static str {
    match event {
        GridEvent::EditStarted { .. } => "editStarted",
        GridEvent::Editing { .. } => "editing",
        GridEvent::Edited { .. } => "edited",
        GridEvent::EditError { .. } => "editError",
        GridEvent::EditCancelled { .. } => "editCancelled",
        GridEvent::Sorted { .. } => "sorted",
    }
}

/// One editable table cell bound to a DOM element.
#[wasm_bindgen]
pub struct GridCell {
    inner: Cell<DomSurface>,
    events: EventBus,
}

#[wasm_bindgen]
impl GridCell {
    /// Bind a column (single JSON column definition) and a row (JSON object
    /// of attribute values) to the given element and render the value.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, column_json: &str, row_json: &str) -> Result<GridCell, JsValue> {
        console_error_panic_hook::set_once();

        let registry = CellRegistry::with_builtins();
        let column = parse_column(column_json, &registry)?;
        let attributes: HashMap<String, RawValue> = serde_json::from_str(row_json)
            .map_err(|e| JsValue::from_str(&format!("row config: {e}")))?;
        let model = MemoryModel::from_pairs(attributes);

        let surface = DomSurface::attach(element)?;
        let events = EventBus::new();
        let inner = Cell::new(
            column,
            Rc::new(RefCell::new(model)),
            surface,
            &registry,
            events.clone(),
        )?;
        Ok(GridCell { inner, events })
    }

    /// Forward every grid event to the callback as `(name, column)`.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: js_sys::Function) {
        self.events.subscribe(Rc::new(move |event: &GridEvent| {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(event_name(event)),
                &JsValue::from_str(event.column()),
            );
        }));
    }

    /// The input element, so the host can attach key and blur listeners.
    #[wasm_bindgen(js_name = inputElement)]
    pub fn input_element(&self) -> web_sys::HtmlInputElement {
        self.inner.surface().input_element().clone()
    }

    pub fn activate(&mut self) {
        self.inner.activate();
    }

    pub fn commit(&mut self) {
        self.inner.gesture(Gesture::Commit);
    }

    pub fn cancel(&mut self) {
        self.inner.gesture(Gesture::Cancel);
    }

    pub fn blur(&mut self) {
        self.inner.gesture(Gesture::Blur);
    }

    /// Current raw value as a JS value (null / boolean / number / string).
    pub fn value(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.value())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self) -> bool {
        self.inner.mode() == CellMode::Editing
    }

    #[wasm_bindgen(js_name = hasError)]
    pub fn has_error(&self) -> bool {
        self.inner.has_error()
    }

    pub fn render(&mut self) {
        self.inner.render();
    }
}
