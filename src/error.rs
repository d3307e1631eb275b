//! Structured error types for gridview.
//!
//! Everything fatal in this crate is a construction error: bad column or
//! formatter configuration, or an unregistered cell kind. Conversion
//! failures during editing are *not* errors — they surface as the cell's
//! error state (see `cell`).

/// All errors that can occur while building grid components.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid column or formatter configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Cell kind tag not present in the registry.
    #[error("Unknown cell kind: {0}")]
    UnknownCellKind(String),

    /// Column configuration JSON could not be deserialized.
    #[error("Column config: {0}")]
    ColumnConfig(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
