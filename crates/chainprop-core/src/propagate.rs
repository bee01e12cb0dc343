//! Forward fixed-point propagation over a chain suffix.
//!
//! After any topology mutation, the engine walks forward from the mutation
//! point, recomputing each element from its predecessor, and stops at the
//! first element whose recomputed state equals the stored one. The strict
//! forward dependency of conforming computers guarantees nothing downstream
//! of that point can change either, so a run touches only the suffix that
//! actually changes: appending at the tail of a long chain costs O(1).

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::chain::{ChainPosition, ChainStore, ElementId};
use crate::compute::{AttributeComputer, DerivedState, PredecessorView};
use crate::error::{ChainError, PropagationError};
use crate::notify::ChangeNotifier;

/// How a propagation run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// A recomputed state equalled the stored one; the rest of the chain is
    /// already at the fixed point.
    Converged,
    /// The walk updated every element through the tail.
    EndOfChain,
}

/// Summary of one propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// How the run stopped.
    pub terminal: Terminal,
    /// Elements visited, including the converging one.
    pub visited: usize,
    /// Elements whose stored state changed.
    pub changed: usize,
}

/// The incremental recomputation engine.
///
/// Owns the per-element derived-state table (`None` = Absent, the state of
/// an unassigned element) and a domain [`AttributeComputer`]. Topology stays
/// in the [`ChainStore`], borrowed per run; states are mutated exclusively
/// here.
#[derive(Debug, Clone)]
pub struct PropagationEngine<C: AttributeComputer> {
    computer: C,
    states: Vec<Option<C::State>>,
}

impl<C: AttributeComputer> PropagationEngine<C> {
    /// Creates an engine around a domain computer.
    pub fn new(computer: C) -> Self {
        Self {
            computer,
            states: Vec::new(),
        }
    }

    /// The domain computer.
    pub fn computer(&self) -> &C {
        &self.computer
    }

    /// Mutable access to the domain computer, e.g. to register static data
    /// or inject the current time.
    pub fn computer_mut(&mut self) -> &mut C {
        &mut self.computer
    }

    /// The stored derived state of `element`; `None` means Absent.
    pub fn state(&self, element: ElementId) -> Option<&C::State> {
        self.states.get(element.0).and_then(Option::as_ref)
    }

    /// Drops the stored state of a destroyed element without notifications.
    pub fn forget(&mut self, element: ElementId) {
        if let Some(slot) = self.states.get_mut(element.0) {
            *slot = None;
        }
    }

    fn put(&mut self, element: ElementId, state: Option<C::State>) {
        if self.states.len() <= element.0 {
            self.states.resize_with(element.0 + 1, || None);
        }
        self.states[element.0] = state;
    }

    /// Walks forward from `seed` until the fixed point, notifying every real
    /// change in chain order.
    ///
    /// Iterative by construction; call depth never grows with chain length.
    /// A walk that visits more elements than the store holds aborts with
    /// [`ChainError::CorruptTopology`] instead of looping forever. That
    /// guard cannot fire while the store's invariants hold.
    pub fn propagate<N: ChangeNotifier>(
        &mut self,
        store: &ChainStore,
        seed: ElementId,
        notifier: &mut N,
    ) -> Result<PropagationOutcome, PropagationError> {
        let limit = store.element_count();
        let attrs = C::State::attribute_names();
        let mut current = seed;
        let mut visited = 0usize;
        let mut changed = 0usize;

        let terminal = loop {
            if visited == limit {
                return Err(ChainError::CorruptTopology(format!(
                    "walk from {seed} exceeded {limit} elements; probable cycle"
                ))
                .into());
            }
            visited += 1;

            let new_state = match store.predecessor_of(current)? {
                None => None,
                Some(ChainPosition::Anchor(anchor)) => Some(
                    self.computer
                        .compute(current, PredecessorView::Anchor(anchor))?,
                ),
                Some(ChainPosition::Element(prev)) => match self.state(prev) {
                    Some(prev_state) => Some(
                        self.computer
                            .compute(current, PredecessorView::Element(prev, prev_state))?,
                    ),
                    // Behind an Absent predecessor everything is Absent.
                    None => None,
                },
            };

            let old_state = self.state(current);
            if old_state == new_state.as_ref() {
                trace!(element = %current, "fixed point reached");
                break Terminal::Converged;
            }
            let changed_attrs: SmallVec<[usize; 4]> = (0..attrs.len())
                .filter(|&idx| match (old_state, new_state.as_ref()) {
                    (Some(old), Some(new)) => !old.attribute_eq(new, idx),
                    (None, None) => false,
                    _ => true,
                })
                .collect();
            debug_assert!(
                !changed_attrs.is_empty(),
                "record inequality implies at least one changed attribute"
            );

            for &idx in &changed_attrs {
                notifier.before_change(current, attrs[idx]);
            }
            trace!(element = %current, state = ?new_state, "derived state updated");
            self.put(current, new_state);
            for &idx in &changed_attrs {
                notifier.after_change(current, attrs[idx]);
            }
            changed += 1;

            match store.successor_of(current.into())? {
                Some(next) => current = next,
                None => break Terminal::EndOfChain,
            }
        };

        let outcome = PropagationOutcome {
            terminal,
            visited,
            changed,
        };
        debug!(seed = %seed, ?outcome, "propagation run complete");
        Ok(outcome)
    }
}
