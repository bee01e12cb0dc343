//! Error types for chainprop
//!
//! Every variant here is fail-fast: topology violations indicate a bug in the
//! calling engine and missing static data indicates a broken problem
//! definition. None of them are retried inside the core, since retrying a
//! pure deterministic computation cannot change the outcome.

use thiserror::Error;

use crate::chain::{AnchorId, ChainPosition, ElementId};

/// Errors raised by chain topology operations and walks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The element id is not part of this store.
    #[error("unknown element {0}")]
    UnknownElement(ElementId),

    /// The anchor id is not part of this store.
    #[error("unknown anchor {0}")]
    UnknownAnchor(AnchorId),

    /// The element is already linked; unlink it before linking elsewhere.
    #[error("{0} is already linked and must be unlinked first")]
    AlreadyLinked(ElementId),

    /// The element still has a successor and cannot be attached elsewhere.
    #[error("{element} still has successor {successor} and cannot be linked")]
    TrailingSuccessor {
        /// The element being linked.
        element: ElementId,
        /// Its current successor.
        successor: ElementId,
    },

    /// The target predecessor slot is already occupied (chains are
    /// singly-occupied).
    #[error("{predecessor} is already followed by {occupant}")]
    OccupiedPredecessor {
        /// The requested predecessor position.
        predecessor: ChainPosition,
        /// The element currently following it.
        occupant: ElementId,
    },

    /// An element cannot be its own predecessor.
    #[error("{0} cannot be linked to itself")]
    SelfLink(ElementId),

    /// The requested predecessor element is not itself part of a rooted
    /// chain.
    #[error("predecessor {0} is not part of any chain")]
    DetachedPredecessor(ElementId),

    /// Defensive guard: the store's invariants no longer hold (cycle or
    /// dangling link). Unreachable through the public mutation API.
    #[error("chain topology is corrupt: {0}")]
    CorruptTopology(String),
}

/// Errors raised by attribute computers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// Static data required by the computation is absent from the problem
    /// definition. Never silently defaulted: a wrong numeric result would
    /// corrupt scoring invisibly.
    #[error("missing static data: {0}")]
    MissingStaticData(String),
}

/// Umbrella error surfaced by a propagation run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropagationError {
    /// Topology invariant violation.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Attribute computation failure.
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// Result type alias for chainprop operations.
pub type Result<T, E = ChainError> = std::result::Result<T, E>;
