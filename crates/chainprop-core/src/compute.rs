//! The pluggable per-domain derivation seam.
//!
//! An [`AttributeComputer`] turns a predecessor's derived state and an
//! element's static data into the element's new derived state. All conforming
//! implementations share the same shape: a strictly forward-flowing
//! accumulation where element *i* depends only on element *i-1* and its own
//! static data. That property is what makes forward-only propagation with
//! early exit correct.

use std::fmt;

use crate::chain::{AnchorId, ElementId};
use crate::error::ComputeError;

/// A domain-specific derived-state record.
///
/// Derived state is a cache: entirely recomputable from chain topology and
/// static data, produced only by an [`AttributeComputer`] and stored only by
/// the propagation engine. Whole-record value equality is the fixed-point
/// test; per-attribute equality drives change notifications.
pub trait DerivedState: Clone + PartialEq + fmt::Debug {
    /// Attribute names of this record, in notification order.
    fn attribute_names() -> &'static [&'static str];

    /// Whether the attribute at `index` (into [`attribute_names`]) has equal
    /// values in both records.
    ///
    /// [`attribute_names`]: DerivedState::attribute_names
    fn attribute_eq(&self, other: &Self, index: usize) -> bool;
}

/// The predecessor an element is derived from.
///
/// The engine resolves the Absent cases before computing: an unassigned
/// element, or one behind an Absent predecessor, never reaches a computer.
#[derive(Debug, Clone, Copy)]
pub enum PredecessorView<'a, S> {
    /// The element is the chain head; seed from the anchor's baseline.
    Anchor(AnchorId),
    /// The element follows another element with the given derived state.
    Element(ElementId, &'a S),
}

/// Pure per-domain computation of one element's derived state.
///
/// # Contract
///
/// - Pure and total: equal inputs always produce equal output; no hidden
///   reads of mutable global state (the call-queue implementation takes the
///   current time as an explicit injected input for this reason).
/// - Missing static data is a fatal [`ComputeError::MissingStaticData`],
///   never a silent default.
/// - Must not inspect chain topology; everything it may depend on arrives
///   through the arguments.
pub trait AttributeComputer {
    /// The derived-state record this computer produces.
    type State: DerivedState;

    /// Computes `element`'s derived state from its predecessor.
    fn compute(
        &self,
        element: ElementId,
        predecessor: PredecessorView<'_, Self::State>,
    ) -> Result<Self::State, ComputeError>;
}
