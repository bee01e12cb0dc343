//! chainprop-domains - Reference attribute computers
//!
//! Three conforming [`AttributeComputer`] implementations, one per source
//! domain:
//! - [`packline`]: production-line job sequencing (cleaning, production, end)
//! - [`routing`]: vehicle-visit routing (arrival and departure times)
//! - [`callqueue`]: call-center queues (estimated waiting, injected clock)
//!
//! All three share the strictly forward-flowing shape the propagation engine
//! relies on: an element's derived state depends only on its predecessor's
//! derived state and its own static data.
//!
//! [`AttributeComputer`]: chainprop_core::AttributeComputer

pub mod callqueue;
pub mod packline;
pub mod routing;

pub use callqueue::{Call, CallQueueComputer, CallWait, Seconds};
pub use packline::{Job, JobSchedule, Minutes, PacklineComputer, ProductId};
pub use routing::{Depot, LocationId, RoutingComputer, Visit, VisitSchedule};
