//! Freightline Simulation Engine
//!
//! Platform-agnostic core for the Freightline cargo logistics simulator: a
//! discrete-time model of containers moving from a factory to two warehouses
//! via two trucks, a port, and a ship. This crate provides the full tick
//! loop, dispatch policy, and structured event stream without any I/O or
//! platform-specific dependencies; callers plug in an [`EventSink`] and read
//! back the elapsed hours.

pub mod container;
pub mod dispatch;
pub mod event;
pub mod network;
pub mod route;
pub mod transporter;
pub mod trip;

// Re-export commonly used types
pub use container::{Container, Destination};
pub use dispatch::{
    SAFETY_BOUND_HOURS, Simulation, SimulationError, SimulationReport, calculate_hours,
};
pub use event::{CargoEntry, EventKind, EventSink, MemorySink, NullSink, TransportEvent};
pub use network::{Network, Node, NodeId};
pub use route::{FACTORY_TO_PORT, FACTORY_TO_WAREHOUSE_B, PORT_TO_WAREHOUSE_A, Route};
pub use transporter::{Transporter, TransporterError, TransporterId, TransporterKind};
pub use trip::{Trip, TripAlreadyComplete};
