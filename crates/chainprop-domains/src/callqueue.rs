//! Call-center queues.
//!
//! Each agent (anchor) answers one call at a time; waiting calls queue
//! behind the call the agent currently handles. A call's estimated waiting
//! time accumulates its predecessor's waiting time plus the predecessor's
//! own duration. When the predecessor has already been picked up, the time
//! elapsed since that pick-up no longer counts.
//!
//! The current time is an explicit injected input ([`CallQueueComputer::set_now`]),
//! never a global clock read, so the computation stays a pure function of
//! its inputs and tests can pin the clock.

use std::collections::HashMap;

use chainprop_core::{
    AttributeComputer, ComputeError, DerivedState, ElementId, PredecessorView,
};

/// Time in seconds from the queue baseline.
pub type Seconds = i64;

/// Static data of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    /// Expected handling duration.
    pub duration: Seconds,
    /// When an agent picked this call up, if it is already in progress.
    pub pick_up_time: Option<Seconds>,
}

/// Derived state of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallWait {
    /// Estimated time until an agent picks this call up.
    pub estimated_waiting: Seconds,
}

impl DerivedState for CallWait {
    fn attribute_names() -> &'static [&'static str] {
        &["estimated_waiting"]
    }

    fn attribute_eq(&self, other: &Self, _index: usize) -> bool {
        self.estimated_waiting == other.estimated_waiting
    }
}

/// Attribute computer for call-center chains.
///
/// The head of an agent's queue is picked up immediately (waiting zero).
/// Every later call waits until its predecessor is picked up and handled.
#[derive(Debug, Clone, Default)]
pub struct CallQueueComputer {
    calls: HashMap<ElementId, Call>,
    now: Seconds,
}

impl CallQueueComputer {
    /// Creates an empty computer at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a call's static data.
    pub fn set_call(&mut self, element: ElementId, call: Call) {
        self.calls.insert(element, call);
    }

    /// Injects the current time; the caller advances it before each batch of
    /// mutations that should observe real-time progress.
    pub fn set_now(&mut self, now: Seconds) {
        self.now = now;
    }

    /// The currently injected time.
    pub fn now(&self) -> Seconds {
        self.now
    }

    fn call(&self, element: ElementId) -> Result<Call, ComputeError> {
        self.calls
            .get(&element)
            .copied()
            .ok_or_else(|| ComputeError::MissingStaticData(format!("no call data for {element}")))
    }
}

impl AttributeComputer for CallQueueComputer {
    type State = CallWait;

    fn compute(
        &self,
        _element: ElementId,
        predecessor: PredecessorView<'_, CallWait>,
    ) -> Result<CallWait, ComputeError> {
        let estimated_waiting = match predecessor {
            // The agent is free for the head call.
            PredecessorView::Anchor(_) => 0,
            PredecessorView::Element(prev, state) => {
                let prev_call = self.call(prev)?;
                let mut waiting = state.estimated_waiting + prev_call.duration;
                if let Some(pick_up_time) = prev_call.pick_up_time {
                    waiting -= self.now - pick_up_time;
                }
                waiting
            }
        };
        Ok(CallWait { estimated_waiting })
    }
}
