//! gridview: an editable data-grid widget core.
//!
//! The crate renders row data into HTML table cells and manages the cell
//! edit lifecycle: formatting values for display, parsing user input back,
//! cycling header sort order, and publishing typed events the host
//! application can subscribe to. Compiled to WebAssembly it drives real DOM
//! elements; on native targets the same core runs against an in-memory
//! surface for tests and tooling.
//!
//! The main pieces:
//! - [`value::RawValue`] / [`model::AttributeStore`]: typed row data.
//! - [`formatter::CellFormatter`]: value <-> display-string conversion.
//! - [`column::Column`] / [`registry::CellRegistry`]: column configuration.
//! - [`cell::Cell`] / [`editor::CellEditor`]: the edit state machine.
//! - [`sort`]: header sort cycling and row comparison.
//! - [`events::EventBus`]: the typed event channel.

pub mod cell;
pub mod column;
pub mod editor;
pub mod error;
pub mod events;
pub mod formatter;
pub mod model;
pub mod registry;
pub mod sort;
pub mod surface;
pub mod value;

#[cfg(target_arch = "wasm32")]
pub mod widget;

pub use cell::{Cell, CellMode};
pub use column::{parse_column, parse_columns, Column, ColumnBuilder};
pub use editor::{CellEditor, EditorSignal, Gesture};
pub use error::{GridError, Result};
pub use events::{EventBus, GridEvent, SubscriptionId};
pub use formatter::{CellFormatter, FormatterSpec};
pub use model::{AttributeStore, MemoryModel, StoreError};
pub use registry::{CellKindInfo, CellRegistry};
pub use sort::{derive, sort_rows, RowComparator, SortDirection};
pub use surface::{CellSurface, TestSurface};
pub use value::RawValue;

/// Crate version, exposed to the host page.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
