//! chainprop-core - Chain topology and incremental shadow-attribute propagation
//!
//! This crate provides the hot-path machinery for chained planning entities:
//! - [`ChainStore`]: anchor-rooted singly-linked chain topology
//! - [`AttributeComputer`]: pluggable per-domain derived-state computation
//! - [`PropagationEngine`]: forward fixed-point recomputation after a mutation
//! - [`ChangeNotifier`]: outbound hook keeping an external scorer synchronized
//! - [`ChainSession`]: inbound surface binding the above per solution instance

pub mod chain;
pub mod compute;
pub mod error;
pub mod notify;
pub mod propagate;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

pub use chain::{AnchorId, ChainPosition, ChainStore, ElementId, Severed};
pub use compute::{AttributeComputer, DerivedState, PredecessorView};
pub use error::{ChainError, ComputeError, PropagationError};
pub use notify::{ChangeEvent, ChangeNotifier, ChangePhase, EventLog, NopNotifier};
pub use propagate::{PropagationEngine, PropagationOutcome, Terminal};
pub use session::ChainSession;
