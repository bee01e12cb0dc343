//! Outbound change notifications.
//!
//! The external engine supplies a [`ChangeNotifier`] so its incremental
//! scoring bookkeeping stays synchronized with derived-state updates. For
//! every element whose state changes, the engine fires `before_change` for
//! each affected attribute (while the old value is still stored), writes the
//! new record once, then fires the matching `after_change` calls. Elements
//! are notified in chain order.

use crate::chain::ElementId;

/// Receiver of "derived attribute about to change / changed" calls.
///
/// Called once per attribute that actually changes value; attributes whose
/// recomputed value equals the stored one produce no calls at all.
pub trait ChangeNotifier {
    /// The attribute's old value is still readable through the engine.
    fn before_change(&mut self, element: ElementId, attribute: &'static str);

    /// The attribute's new value is now stored.
    fn after_change(&mut self, element: ElementId, attribute: &'static str);
}

/// Notifier that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopNotifier;

impl ChangeNotifier for NopNotifier {
    fn before_change(&mut self, _element: ElementId, _attribute: &'static str) {}

    fn after_change(&mut self, _element: ElementId, _attribute: &'static str) {}
}

/// Which side of a state write a notification was fired on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePhase {
    /// Fired before the new record was stored.
    Before,
    /// Fired after the new record was stored.
    After,
}

/// One recorded change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Before or after the write.
    pub phase: ChangePhase,
    /// The element whose attribute changed.
    pub element: ElementId,
    /// The attribute name, as declared by the state record.
    pub attribute: &'static str,
}

/// Notifier that records every notification for post-run consumption.
///
/// Useful both for callers that prefer draining an event queue after the run
/// over being called back mid-run, and for tests asserting exact
/// notification sequences.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ChangeEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in firing order.
    pub fn events(&self) -> &[ChangeEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Elements that received an `after_change`, deduplicated, in order.
    pub fn changed_elements(&self) -> Vec<ElementId> {
        let mut elements = Vec::new();
        for event in &self.events {
            if event.phase == ChangePhase::After && elements.last() != Some(&event.element) {
                elements.push(event.element);
            }
        }
        elements
    }
}

impl ChangeNotifier for EventLog {
    fn before_change(&mut self, element: ElementId, attribute: &'static str) {
        self.events.push(ChangeEvent {
            phase: ChangePhase::Before,
            element,
            attribute,
        });
    }

    fn after_change(&mut self, element: ElementId, attribute: &'static str) {
        self.events.push(ChangeEvent {
            phase: ChangePhase::After,
            element,
            attribute,
        });
    }
}
