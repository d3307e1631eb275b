//! Row data access.
//!
//! Cells read and write row attributes through the `AttributeStore` trait so
//! the grid core stays independent of where the data lives. `MemoryModel` is
//! the plain in-memory implementation with an optional validation hook that
//! can veto writes.

use std::collections::HashMap;

use crate::value::RawValue;

/// A rejected write. The message is surfaced to subscribers via
/// `GridEvent::EditError`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<&str> for StoreError {
    fn from(msg: &str) -> Self {
        StoreError(msg.to_string())
    }
}

/// Attribute access for one row.
pub trait AttributeStore {
    /// Current value of the attribute, if set.
    fn get(&self, name: &str) -> Option<RawValue>;

    /// Replace the attribute's value. Implementations may reject the write;
    /// on `Err` the stored value must be unchanged.
    fn set(&mut self, name: &str, value: RawValue) -> Result<(), StoreError>;

    /// Stable row identifier used as a sort tie-breaker, if the store has
    /// one.
    fn row_id(&self) -> Option<&str> {
        None
    }
}

type Validator = Box<dyn Fn(&str, &RawValue) -> Result<(), StoreError>>;

/// In-memory attribute map with an optional write validator.
#[derive(Default)]
pub struct MemoryModel {
    attributes: HashMap<String, RawValue>,
    id: Option<String>,
    validator: Option<Validator>,
}

impl MemoryModel {
    pub fn new() -> Self {
        MemoryModel::default()
    }

    /// Build a model from attribute pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, RawValue)>,
        S: Into<String>,
    {
        let mut model = MemoryModel::new();
        for (name, value) in pairs {
            model.attributes.insert(name.into(), value);
        }
        model
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Install a validation hook consulted before every `set`.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str, &RawValue) -> Result<(), StoreError> + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }
}

impl AttributeStore for MemoryModel {
    fn get(&self, name: &str) -> Option<RawValue> {
        self.attributes.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: RawValue) -> Result<(), StoreError> {
        if let Some(validator) = &self.validator {
            validator(name, &value)?;
        }
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    fn row_id(&self) -> Option<&str> {
        self.id.as_deref()
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
    fn test_get_set() {
        let mut model = MemoryModel::from_pairs([("age", RawValue::Number(30.0))]);
        assert_eq!(model.get("age"), Some(RawValue::Number(30.0)));
        assert_eq!(model.get("missing"), None);

        model.set("age", RawValue::Number(31.0)).unwrap();
        assert_eq!(model.get("age"), Some(RawValue::Number(31.0)));
    }

    #[test]
    fn test_row_id() {
        let model = MemoryModel::new().with_id("row-7");
        assert_eq!(model.row_id(), Some("row-7"));
        assert_eq!(MemoryModel::new().row_id(), None);
    }

    #[test]
    fn test_validator_vetoes_write() {
        let mut model = MemoryModel::from_pairs([("age", RawValue::Number(30.0))])
            .with_validator(|name, value| {
                if name == "age" && value.as_number().is_none_or(|n| n < 0.0) {
                    return Err(StoreError::from("age must be a non-negative number"));
                }
                Ok(())
            });

        let err = model.set("age", RawValue::Number(-1.0)).unwrap_err();
        assert_eq!(err.0, "age must be a non-negative number");
        // Value unchanged after the rejected write.
        assert_eq!(model.get("age"), Some(RawValue::Number(30.0)));

        model.set("age", RawValue::Number(40.0)).unwrap();
        assert_eq!(model.get("age"), Some(RawValue::Number(40.0)));
    }
}
