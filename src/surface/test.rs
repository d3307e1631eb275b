//! In-memory surface for native tests.

use std::collections::BTreeSet;

use crate::surface::CellSurface;

/// Records every surface operation so tests can assert on the visible state
/// of a cell without a DOM.
#[derive(Debug, Default)]
pub struct TestSurface {
    pub text: String,
    pub classes: BTreeSet<String>,
    /// Current input text; `None` while no input is shown.
    pub input: Option<String>,
    pub focus_count: u32,
}

impl TestSurface {
    pub fn new() -> Self {
        TestSurface::default()
    }

    pub fn input_shown(&self) -> bool {
        self.input.is_some()
    }
}

impl CellSurface for TestSurface {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }

    fn show_input(&mut self, initial: &str) {
        self.input = Some(initial.to_string());
    }

    fn input_value(&self) -> String {
        self.input.clone().unwrap_or_default()
    }

    fn set_input_value(&mut self, value: &str) {
        if self.input.is_some() {
            self.input = Some(value.to_string());
        }
    }

    fn hide_input(&mut self) {
        self.input = None;
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
    fn test_records_operations() {
        let mut surface = TestSurface::new();
        surface.set_text("42");
        surface.add_class("number-cell");
        surface.add_class("number-cell");
        assert_eq!(surface.text, "42");
        assert!(surface.has_class("number-cell"));
        assert_eq!(surface.classes.len(), 1);

        surface.remove_class("number-cell");
        assert!(!surface.has_class("number-cell"));
    }

    #[test]
    fn test_input_lifecycle() {
        let mut surface = TestSurface::new();
        assert!(!surface.input_shown());
        assert_eq!(surface.input_value(), "");

        surface.show_input("42");
        assert_eq!(surface.input_value(), "42");
        surface.set_input_value("43");
        assert_eq!(surface.input_value(), "43");

        surface.hide_input();
        assert!(!surface.input_shown());
        // Setting the value with no input shown is ignored.
        surface.set_input_value("x");
        assert_eq!(surface.input_value(), "");
    }
}
