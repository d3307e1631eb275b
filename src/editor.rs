//! Cell edit session.
//!
//! A `CellEditor` exists only while a cell is in editing mode. It holds the
//! original value so a cancel can restore it, and turns the closing gesture
//! plus the input text into exactly one store write attempt.

use std::rc::Rc;

use crate::formatter::CellFormatter;
use crate::model::AttributeStore;
use crate::value::RawValue;

/// How the user ended the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Enter: parse the input and write it.
    Commit,
    /// Escape: discard the input.
    Cancel,
    /// Focus left the input: discard, same as cancel.
    Blur,
}

/// Outcome of handling a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSignal {
    /// The edit session is over. `committed` is true when a new value was
    /// written.
    Done { committed: bool },
    /// The commit failed; the session stays open with the input intact.
    Error { message: String },
}

/// One in-flight edit of a single attribute.
pub struct CellEditor {
    formatter: Rc<dyn CellFormatter>,
    attribute: String,
    original: RawValue,
    original_display: String,
}

impl CellEditor {
    /// Open a session for the attribute's current value.
    pub fn open(
        formatter: Rc<dyn CellFormatter>,
        attribute: &str,
        store: &dyn AttributeStore,
    ) -> Self {
        let original = store.get(attribute).unwrap_or_default();
        let original_display = formatter.from_raw(&original);
        CellEditor {
            formatter,
            attribute: attribute.to_string(),
            original,
            original_display,
        }
    }

    /// Text the input should be primed with.
    pub fn original_display(&self) -> &str {
        &self.original_display
    }

    /// The value as it was when the session opened.
    pub fn original(&self) -> &RawValue {
        &self.original
    }

    /// Handle the closing gesture. A commit makes at most one write attempt:
    /// unparsable input or a store rejection yields `Error` and leaves the
    /// stored value untouched.
    pub fn handle(
        &self,
        gesture: Gesture,
        input: &str,
        store: &mut dyn AttributeStore,
    ) -> EditorSignal {
        match gesture {
            Gesture::Cancel | Gesture::Blur => EditorSignal::Done { committed: false },
            Gesture::Commit => {
                let Some(value) = self.formatter.to_raw(input) else {
                    return EditorSignal::Error {
                        message: format!("could not parse '{input}'"),
                    };
                };
                match store.set(&self.attribute, value) {
                    Ok(()) => EditorSignal::Done { committed: true },
                    Err(err) => EditorSignal::Error {
                        message: err.to_string(),
                    },
                }
            }
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
    use crate::formatter::NumberFormatter;
    use crate::model::{MemoryModel, StoreError};

    fn session(model: &MemoryModel) -> CellEditor {
        CellEditor::open(Rc::new(NumberFormatter::default()), "age", model)
    }

    #[test]
    fn test_open_captures_original() {
        let model = MemoryModel::from_pairs([("age", RawValue::Number(30.0))]);
        let editor = session(&model);
        assert_eq!(editor.original(), &RawValue::Number(30.0));
        assert_eq!(editor.original_display(), "30.00");
    }

    #[test]
    fn test_commit_writes_parsed_value() {
        let mut model = MemoryModel::from_pairs([("age", RawValue::Number(30.0))]);
        let editor = session(&model);
        let signal = editor.handle(Gesture::Commit, "1,234.5", &mut model);
        assert_eq!(signal, EditorSignal::Done { committed: true });
        assert_eq!(model.get("age"), Some(RawValue::Number(1234.5)));
    }

    #[test]
    fn test_cancel_and_blur_leave_store_untouched() {
        let mut model = MemoryModel::from_pairs([("age", RawValue::Number(30.0))]);
        let editor = session(&model);
        for gesture in [Gesture::Cancel, Gesture::Blur] {
            let signal = editor.handle(gesture, "999", &mut model);
            assert_eq!(signal, EditorSignal::Done { committed: false });
        }
        assert_eq!(model.get("age"), Some(RawValue::Number(30.0)));
    }

    #[test]
    fn test_unparsable_input_errors_without_write() {
        let mut model = MemoryModel::from_pairs([("age", RawValue::Number(30.0))]);
        let editor = session(&model);
        let signal = editor.handle(Gesture::Commit, "not a number", &mut model);
        assert!(matches!(signal, EditorSignal::Error { .. }));
        assert_eq!(model.get("age"), Some(RawValue::Number(30.0)));
    }

    #[test]
    fn test_store_rejection_surfaces_as_error() {
        let mut model = MemoryModel::from_pairs([("age", RawValue::Number(30.0))])
            .with_validator(|_, value| {
                if value.as_number().is_none_or(|n| n < 0.0) {
                    return Err(StoreError::from("negative age"));
                }
                Ok(())
            });
        let editor = session(&model);
        let signal = editor.handle(Gesture::Commit, "-5", &mut model);
        assert_eq!(
            signal,
            EditorSignal::Error {
                message: "negative age".to_string()
            }
        );
        assert_eq!(model.get("age"), Some(RawValue::Number(30.0)));
    }

    #[test]
    fn test_missing_attribute_opens_empty() {
        let model = MemoryModel::new();
        let editor = session(&model);
        assert_eq!(editor.original(), &RawValue::Empty);
        assert_eq!(editor.original_display(), "");
    }
}
