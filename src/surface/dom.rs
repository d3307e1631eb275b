//! DOM-backed surface for wasm targets.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

use crate::error::{GridError, Result};
use crate::surface::CellSurface;

/// Drives one table cell element. The cell gets two children: a text span
/// for display mode and a hidden input for edit mode; `show_input` /
/// `hide_input` toggle between them.
pub struct DomSurface {
    cell: HtmlElement,
    text: HtmlElement,
    input: HtmlInputElement,
    input_shown: bool,
}

impl DomSurface {
    /// Attach to a cell element, creating the text and input children.
    pub fn attach(cell: HtmlElement) -> Result<Self> {
        let document = cell
            .owner_document()
            .ok_or_else(|| GridError::from("cell element has no owner document"))?;

        let text: HtmlElement = document
            .create_element("span")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| GridError::from("created span is not an HtmlElement"))?;
        text.set_class_name("gridview-text");

        let input: HtmlInputElement = document
            .create_element("input")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| GridError::from("created input is not an HtmlInputElement"))?;
        input.set_type("text");
        input.set_class_name("gridview-input");
        input.style().set_property("display", "none").map_err(js_err)?;

        cell.append_child(&text).map_err(js_err)?;
        cell.append_child(&input).map_err(js_err)?;

        Ok(DomSurface {
            cell,
            text,
            input,
            input_shown: false,
        })
    }

    /// The input element, for wiring key and blur listeners.
    pub fn input_element(&self) -> &HtmlInputElement {
        &self.input
    }

    /// The cell element itself, for wiring click listeners.
    pub fn cell_element(&self) -> &HtmlElement {
        &self.cell
    }
}

fn js_err(value: wasm_bindgen::JsValue) -> GridError {
    GridError::Other(format!("{value:?}"))
}

impl CellSurface for DomSurface {
    fn set_text(&mut self, text: &str) {
        self.text.set_text_content(Some(text));
    }

    fn add_class(&mut self, class: &str) {
        let _ = self.cell.class_list().add_1(class);
    }

    fn remove_class(&mut self, class: &str) {
        let _ = self.cell.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.cell.class_list().contains(class)
    }

    fn focus(&mut self) {
        if self.input_shown {
            let _ = self.input.focus();
        } else {
            let _ = self.cell.focus();
        }
    }

    fn show_input(&mut self, initial: &str) {
        self.input.set_value(initial);
        let _ = self.text.style().set_property("display", "none");
        let _ = self.input.style().remove_property("display");
        self.input_shown = true;
        let _ = self.input.focus();
        let _ = self.input.select();
    }

    fn input_value(&self) -> String {
        if self.input_shown {
            self.input.value()
        } else {
            String::new()
        }
    }

    fn set_input_value(&mut self, value: &str) {
        if self.input_shown {
            self.input.set_value(value);
        }
    }

    fn hide_input(&mut self) {
        let _ = self.input.style().set_property("display", "none");
        let _ = self.text.style().remove_property("display");
        self.input_shown = false;
    }
}
