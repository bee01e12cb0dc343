//! Chain topology: ids, positions, and the owning store.
//!
//! Chains are singly-linked sequences of planning elements rooted at an
//! anchor (the resource: a production line, a vehicle, an agent). The
//! [`ChainStore`] is the only component allowed to mutate topology; derived
//! state lives elsewhere and is recomputed from topology, never the other
//! way around.

mod ids;
mod store;

pub use ids::{AnchorId, ChainPosition, ElementId};
pub use store::{ChainIter, ChainStore, Severed};
