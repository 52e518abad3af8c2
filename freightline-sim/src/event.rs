//! Structured depart/arrive records emitted by the simulation.
//!
//! The core never prints; it hands each record to a pluggable [`EventSink`]
//! so output formatting stays at the process boundary.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::container::Container;
use crate::network::NodeId;
use crate::transporter::{Transporter, TransporterKind};
use crate::trip::Trip;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Arrive,
    Depart,
}

/// One carried unit as it appears on the event wire.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CargoEntry {
    pub cargo_id: u32,
    pub destination: String,
    pub origin: String,
}

impl CargoEntry {
    #[must_use]
    pub fn from_container(container: &Container) -> Self {
        // The factory is the only loading point in the fixed network.
        Self {
            cargo_id: container.id,
            destination: container.destination.as_str().to_string(),
            origin: NodeId::Factory.name().to_string(),
        }
    }
}

/// One transporter movement: a departure onto a route or an arrival at its
/// end. `location`/`destination` are start/end for departs and end/start for
/// arrives, matching the movement's point of view.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransportEvent {
    pub event: EventKind,
    pub time: u32,
    pub transport_id: u32,
    pub kind: TransporterKind,
    pub location: String,
    pub destination: String,
    pub cargo: SmallVec<[CargoEntry; 1]>,
}

impl TransportEvent {
    /// Build the record for `trip` as seen at `time`, reading the manifest
    /// from the transporter's current hold. Empty hold means empty `cargo`
    /// (return legs).
    #[must_use]
    pub fn for_trip(kind: EventKind, time: u32, trip: &Trip, transporter: &Transporter) -> Self {
        let (location, destination) = match kind {
            EventKind::Depart => (trip.route.start, trip.route.end),
            EventKind::Arrive => (trip.route.end, trip.route.start),
        };
        let cargo = transporter
            .carrying()
            .map(CargoEntry::from_container)
            .into_iter()
            .collect();
        Self {
            event: kind,
            time,
            transport_id: transporter.id,
            kind: transporter.kind,
            location: location.name().to_string(),
            destination: destination.name().to_string(),
            cargo,
        }
    }
}

/// Capability the simulation calls with each structured event.
pub trait EventSink {
    fn record(&mut self, event: &TransportEvent);
}

/// Discards every event; used when the caller opts out of the stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &TransportEvent) {}
}

/// Collects events in order; used by tests and by callers that post-process
/// the stream.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub events: Vec<TransportEvent>,
}

impl EventSink for MemorySink {
    fn record(&mut self, event: &TransportEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Container, Destination};
    use crate::route::FACTORY_TO_WAREHOUSE_B;

    #[test]
    fn depart_record_serializes_with_wire_names() {
        let mut truck = Transporter::new(0, TransporterKind::Truck);
        truck.load(Container::new(3, Destination::B)).unwrap();
        let trip = Trip::new(FACTORY_TO_WAREHOUSE_B, truck.id);

        let event = TransportEvent::for_trip(EventKind::Depart, 0, &trip, &truck);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "DEPART");
        assert_eq!(json["kind"], "TRUCK");
        assert_eq!(json["location"], "FACTORY");
        assert_eq!(json["destination"], "B");
        assert_eq!(json["cargo"][0]["cargo_id"], 3);
        assert_eq!(json["cargo"][0]["origin"], "FACTORY");
    }

    #[test]
    fn arrive_record_flips_location_and_destination() {
        let truck = Transporter::new(1, TransporterKind::Truck);
        let trip = Trip::new(FACTORY_TO_WAREHOUSE_B, truck.id);
        let event = TransportEvent::for_trip(EventKind::Arrive, 5, &trip, &truck);
        assert_eq!(event.location, "B");
        assert_eq!(event.destination, "FACTORY");
        assert!(event.cargo.is_empty());
    }

    #[test]
    fn memory_sink_keeps_emission_order() {
        let truck = Transporter::new(0, TransporterKind::Truck);
        let trip = Trip::new(FACTORY_TO_WAREHOUSE_B, truck.id);
        let mut sink = MemorySink::default();
        sink.record(&TransportEvent::for_trip(EventKind::Depart, 0, &trip, &truck));
        sink.record(&TransportEvent::for_trip(EventKind::Arrive, 5, &trip, &truck));
        assert_eq!(sink.events.len(), 2);
        assert_eq!(sink.events[0].event, EventKind::Depart);
        assert_eq!(sink.events[1].event, EventKind::Arrive);
    }
}
