//! Vehicle-visit routing with time windows.
//!
//! A vehicle (anchor) leaves its depot at a departure baseline. Each visit
//! arrives after the travel time from the previous standstill, starts
//! service no earlier than its ready time, and departs after its service
//! duration. The departure is part of the derived record because the next
//! visit consumes it.

use std::collections::HashMap;

use chainprop_core::{
    AnchorId, AttributeComputer, ComputeError, DerivedState, ElementId, PredecessorView,
};

use crate::packline::Minutes;

/// Identity of a location in the travel-time matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationId(pub usize);

/// Static data of one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    /// Where the vehicle starts.
    pub location: LocationId,
    /// When the vehicle leaves the depot.
    pub departure: Minutes,
}

/// Static data of one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    /// The customer location.
    pub location: LocationId,
    /// Earliest instant service may start.
    pub ready: Minutes,
    /// Service duration at the customer.
    pub service_duration: Minutes,
}

/// Derived schedule of one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitSchedule {
    /// When the vehicle arrives at the visit.
    pub arrival: Minutes,
    /// When the vehicle leaves: `max(arrival, ready) + service_duration`.
    pub departure: Minutes,
}

impl DerivedState for VisitSchedule {
    fn attribute_names() -> &'static [&'static str] {
        &["arrival", "departure"]
    }

    fn attribute_eq(&self, other: &Self, index: usize) -> bool {
        match index {
            0 => self.arrival == other.arrival,
            1 => self.departure == other.departure,
            _ => true,
        }
    }
}

/// Attribute computer for vehicle-routing chains.
///
/// Travel times are a directed matrix keyed by `(from, to)` location pairs;
/// a missing entry is a fatal configuration error.
#[derive(Debug, Clone, Default)]
pub struct RoutingComputer {
    depots: HashMap<AnchorId, Depot>,
    visits: HashMap<ElementId, Visit>,
    travel: HashMap<(LocationId, LocationId), Minutes>,
}

impl RoutingComputer {
    /// Creates an empty computer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a vehicle's depot data.
    pub fn set_depot(&mut self, vehicle: AnchorId, depot: Depot) {
        self.depots.insert(vehicle, depot);
    }

    /// Registers a visit's static data.
    pub fn set_visit(&mut self, element: ElementId, visit: Visit) {
        self.visits.insert(element, visit);
    }

    /// Registers the directed travel time between two locations.
    pub fn set_travel(&mut self, from: LocationId, to: LocationId, minutes: Minutes) {
        self.travel.insert((from, to), minutes);
    }

    fn depot(&self, vehicle: AnchorId) -> Result<Depot, ComputeError> {
        self.depots
            .get(&vehicle)
            .copied()
            .ok_or_else(|| ComputeError::MissingStaticData(format!("no depot data for {vehicle}")))
    }

    fn visit(&self, element: ElementId) -> Result<Visit, ComputeError> {
        self.visits
            .get(&element)
            .copied()
            .ok_or_else(|| ComputeError::MissingStaticData(format!("no visit data for {element}")))
    }

    fn travel(&self, from: LocationId, to: LocationId) -> Result<Minutes, ComputeError> {
        self.travel.get(&(from, to)).copied().ok_or_else(|| {
            ComputeError::MissingStaticData(format!("no travel time from {from:?} to {to:?}"))
        })
    }
}

impl AttributeComputer for RoutingComputer {
    type State = VisitSchedule;

    fn compute(
        &self,
        element: ElementId,
        predecessor: PredecessorView<'_, VisitSchedule>,
    ) -> Result<VisitSchedule, ComputeError> {
        let visit = self.visit(element)?;
        let (from, departure) = match predecessor {
            PredecessorView::Anchor(vehicle) => {
                let depot = self.depot(vehicle)?;
                (depot.location, depot.departure)
            }
            PredecessorView::Element(prev, state) => {
                (self.visit(prev)?.location, state.departure)
            }
        };
        let arrival = departure + self.travel(from, visit.location)?;
        Ok(VisitSchedule {
            arrival,
            departure: arrival.max(visit.ready) + visit.service_duration,
        })
    }
}
