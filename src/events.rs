//! Typed grid events.
//!
//! Cells and headers publish lifecycle events on a shared `EventBus`; the
//! embedding application subscribes to react (persist edits, update toolbar
//! state, flash validation errors). The bus is single-threaded and clonable:
//! clones share one subscriber list via `Rc`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::sort::SortDirection;

/// Events published during the cell edit lifecycle and header sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// An editable cell was activated; the input is about to be shown.
    EditStarted { column: String },
    /// The input is visible and receiving keystrokes.
    Editing { column: String },
    /// A commit succeeded and the new value is in the store.
    Edited { column: String },
    /// A commit failed: the input was unparsable or the store rejected the
    /// value. The cell stays in editing mode.
    EditError { column: String, input: String },
    /// The edit was abandoned; the original value is untouched.
    EditCancelled { column: String },
    /// A sortable header was clicked and the order cycled.
    Sorted {
        column: String,
        direction: SortDirection,
    },
}

impl GridEvent {
    /// Name of the column the event concerns.
    pub fn column(&self) -> &str {
        match self {
            GridEvent::EditStarted { column }
            | GridEvent::Editing { column }
            | GridEvent::Edited { column }
            | GridEvent::EditError { column, .. }
            | GridEvent::EditCancelled { column }
            | GridEvent::Sorted { column, .. } => column,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&GridEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

/// Shared single-threaded event dispatcher.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Add a handler; it fires for every subsequent `emit` until
    /// unsubscribed.
    pub fn subscribe(&self, handler: Rc<dyn Fn(&GridEvent)>) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.handlers.push((id, handler));
        id
    }

    /// Remove a handler. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.borrow_mut().handlers.retain(|(h, _)| *h != id);
    }

    /// Dispatch an event to every current subscriber. The subscriber list is
    /// snapshotted first, so handlers may subscribe or unsubscribe while the
    /// event is being delivered.
    pub fn emit(&self, event: &GridEvent) {
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(event);
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

    fn recorder(bus: &EventBus) -> Rc<RefCell<Vec<GridEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(Rc::new(move |e: &GridEvent| {
            sink.borrow_mut().push(e.clone());
        }));
        seen
    }

    #[test]
    fn test_emit_reaches_subscribers() {
        let bus = EventBus::new();
        let seen = recorder(&bus);
        bus.emit(&GridEvent::Editing {
            column: "age".into(),
        });
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].column(), "age");
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&count);
        let id = bus.subscribe(Rc::new(move |_| *sink.borrow_mut() += 1));
        bus.emit(&GridEvent::EditCancelled { column: "a".into() });
        bus.unsubscribe(id);
        bus.emit(&GridEvent::EditCancelled { column: "a".into() });
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let bus = EventBus::new();
        let seen = recorder(&bus);
        let clone = bus.clone();
        clone.emit(&GridEvent::Edited { column: "x".into() });
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_handler_may_unsubscribe_during_emit() {
        let bus = EventBus::new();
        let slot: Rc<RefCell<Option<SubscriptionId>>> = Rc::new(RefCell::new(None));
        let bus_inside = bus.clone();
        let slot_inside = Rc::clone(&slot);
        let fired = Rc::new(RefCell::new(0u32));
        let fired_inside = Rc::clone(&fired);
        let id = bus.subscribe(Rc::new(move |_| {
            *fired_inside.borrow_mut() += 1;
            if let Some(id) = *slot_inside.borrow() {
                bus_inside.unsubscribe(id);
            }
        }));
        *slot.borrow_mut() = Some(id);

        bus.emit(&GridEvent::Edited { column: "x".into() });
        bus.emit(&GridEvent::Edited { column: "x".into() });
        assert_eq!(*fired.borrow(), 1);
    }
}
