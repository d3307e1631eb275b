//! Rendering surfaces.
//!
//! A `CellSurface` is the one seam between the grid core and the host
//! presentation layer. On wasm targets `DomSurface` drives a real table
//! cell; everywhere else `TestSurface` records the same operations for
//! assertions. The core never touches `web_sys` directly outside this
//! module.

#[cfg(target_arch = "wasm32")]
mod dom;
mod test;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
pub use test::TestSurface;

/// Presentation operations a cell needs from its host element.
pub trait CellSurface {
    /// Replace the cell's visible text.
    fn set_text(&mut self, text: &str);

    /// Add a CSS class. Adding a class twice is a no-op.
    fn add_class(&mut self, class: &str);

    /// Remove a CSS class. Removing an absent class is a no-op.
    fn remove_class(&mut self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    /// Give the cell (or its input, when shown) keyboard focus.
    fn focus(&mut self);

    /// Show the edit input primed with the given text, hiding the cell text.
    fn show_input(&mut self, initial: &str);

    /// Current text in the edit input. Empty when no input is shown.
    fn input_value(&self) -> String;

    fn set_input_value(&mut self, value: &str);

    /// Hide the edit input and restore the cell text.
    fn hide_input(&mut self);
}
