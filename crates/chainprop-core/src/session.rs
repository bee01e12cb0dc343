//! The inbound surface binding one chain solution instance.
//!
//! A [`ChainSession`] owns one [`ChainStore`], one [`PropagationEngine`] and
//! the collaborator's [`ChangeNotifier`]. Every inbound operation performs
//! its topology mutation and triggers exactly one propagation run before
//! returning, so the caller always observes a consistent fixed point.
//!
//! Sessions are single-threaded and synchronous. A multi-threaded search
//! gives each worker its own cloned session; nothing here is shared.
//!
//! Undo is recomputation, not restoration: to reject a candidate move, the
//! caller re-applies the inverse topology operations and lets propagation
//! re-derive state under the restored topology. Cached derived state is
//! never hand-patched, so topology and cache cannot drift apart.

use crate::chain::{AnchorId, ChainPosition, ChainStore, ElementId};
use crate::compute::AttributeComputer;
use crate::error::PropagationError;
use crate::notify::ChangeNotifier;
use crate::propagate::{PropagationEngine, PropagationOutcome};

/// One chain solution instance: topology, derived state and the outbound
/// notification hook.
#[derive(Debug, Clone)]
pub struct ChainSession<C: AttributeComputer, N: ChangeNotifier> {
    store: ChainStore,
    engine: PropagationEngine<C>,
    notifier: N,
}

impl<C: AttributeComputer, N: ChangeNotifier> ChainSession<C, N> {
    /// Creates an empty session around a domain computer and the
    /// collaborator's notifier.
    pub fn new(computer: C, notifier: N) -> Self {
        Self {
            store: ChainStore::new(),
            engine: PropagationEngine::new(computer),
            notifier,
        }
    }

    /// Registers a new anchor (chain root resource).
    pub fn add_anchor(&mut self) -> AnchorId {
        self.store.add_anchor()
    }

    /// Registers a new planning entity, initially unassigned with Absent
    /// derived state, and runs the mandated propagation (a no-op for a fresh
    /// element, producing zero notifications).
    pub fn entity_added(&mut self) -> Result<ElementId, PropagationError> {
        let element = self.store.add_element();
        self.engine
            .propagate(&self.store, element, &mut self.notifier)?;
        Ok(element)
    }

    /// Links `element` after `predecessor` and propagates forward from it.
    pub fn link_requested(
        &mut self,
        element: ElementId,
        predecessor: impl Into<ChainPosition>,
    ) -> Result<PropagationOutcome, PropagationError> {
        self.store.link(element, predecessor.into())?;
        self.engine
            .propagate(&self.store, element, &mut self.notifier)
    }

    /// Unlinks `element` and propagates over both severed ends: the element
    /// itself goes Absent, then the old successor (now spliced onto the old
    /// predecessor) seeds the forward walk.
    ///
    /// The returned outcome aggregates both walks.
    pub fn unlink_requested(
        &mut self,
        element: ElementId,
    ) -> Result<PropagationOutcome, PropagationError> {
        let severed = self.store.unlink(element)?;
        let mut outcome = self
            .engine
            .propagate(&self.store, element, &mut self.notifier)?;
        if let Some(successor) = severed.successor {
            let suffix = self
                .engine
                .propagate(&self.store, successor, &mut self.notifier)?;
            outcome = PropagationOutcome {
                terminal: suffix.terminal,
                visited: outcome.visited + suffix.visited,
                changed: outcome.changed + suffix.changed,
            };
        }
        Ok(outcome)
    }

    /// Removes `element` from solving: unlinks it (with the same propagation
    /// as [`unlink_requested`]) and drops its state record.
    ///
    /// The arena slot stays allocated; the id must simply not be used again.
    ///
    /// [`unlink_requested`]: ChainSession::unlink_requested
    pub fn entity_removed(
        &mut self,
        element: ElementId,
    ) -> Result<PropagationOutcome, PropagationError> {
        let outcome = self.unlink_requested(element)?;
        self.engine.forget(element);
        Ok(outcome)
    }

    /// Read-only topology access.
    pub fn store(&self) -> &ChainStore {
        &self.store
    }

    /// The stored derived state of `element`; `None` means Absent.
    pub fn state(&self, element: ElementId) -> Option<&C::State> {
        self.engine.state(element)
    }

    /// The domain computer.
    pub fn computer(&self) -> &C {
        self.engine.computer()
    }

    /// Mutable access to the domain computer, e.g. to register static data
    /// or inject the current time.
    pub fn computer_mut(&mut self) -> &mut C {
        self.engine.computer_mut()
    }

    /// The collaborator's notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notifier, e.g. to drain a recorded event queue.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
