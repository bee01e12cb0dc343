//! Shared test fixtures: a minimal conforming computer and chain rigs.

use std::collections::HashMap;

use crate::chain::{AnchorId, ChainStore, ElementId};
use crate::compute::{AttributeComputer, DerivedState, PredecessorView};
use crate::error::ComputeError;
use crate::propagate::PropagationEngine;

/// Single-attribute accumulator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Total(pub i64);

impl DerivedState for Total {
    fn attribute_names() -> &'static [&'static str] {
        &["total"]
    }

    fn attribute_eq(&self, other: &Self, _index: usize) -> bool {
        self.0 == other.0
    }
}

/// Forward accumulator: `total = max(predecessor_total, floor) + weight`.
///
/// The floor defaults to zero; a large floor absorbs upstream changes, which
/// is how tests exercise mid-chain convergence.
#[derive(Debug, Clone)]
pub(crate) struct OffsetComputer {
    baseline: i64,
    weights: HashMap<ElementId, i64>,
    floors: HashMap<ElementId, i64>,
}

impl OffsetComputer {
    pub(crate) fn new(baseline: i64) -> Self {
        Self {
            baseline,
            weights: HashMap::new(),
            floors: HashMap::new(),
        }
    }

    pub(crate) fn set_weight(&mut self, element: ElementId, weight: i64) {
        self.weights.insert(element, weight);
    }

    pub(crate) fn set_floor(&mut self, element: ElementId, floor: i64) {
        self.floors.insert(element, floor);
    }
}

impl AttributeComputer for OffsetComputer {
    type State = Total;

    fn compute(
        &self,
        element: ElementId,
        predecessor: PredecessorView<'_, Total>,
    ) -> Result<Total, ComputeError> {
        let weight = self
            .weights
            .get(&element)
            .copied()
            .ok_or_else(|| ComputeError::MissingStaticData(format!("no weight for {element}")))?;
        let incoming = match predecessor {
            PredecessorView::Anchor(_) => self.baseline,
            PredecessorView::Element(_, state) => state.0,
        };
        let floor = self.floors.get(&element).copied().unwrap_or(0);
        Ok(Total(incoming.max(floor) + weight))
    }
}

/// Builds one anchor with `weights.len()` elements linked in order, plus an
/// engine whose computer knows every weight. No propagation is run.
pub(crate) fn rig(
    baseline: i64,
    weights: &[i64],
) -> (
    ChainStore,
    AnchorId,
    Vec<ElementId>,
    PropagationEngine<OffsetComputer>,
) {
    let mut store = ChainStore::new();
    let anchor = store.add_anchor();
    let mut computer = OffsetComputer::new(baseline);
    let mut elements = Vec::new();
    let mut tail = anchor.into();
    for &weight in weights {
        let element = store.add_element();
        computer.set_weight(element, weight);
        store
            .link(element, tail)
            .expect("rig links into empty slots");
        tail = element.into();
        elements.push(element);
    }
    (store, anchor, elements, PropagationEngine::new(computer))
}
