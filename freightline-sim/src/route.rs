//! Immutable directed edges of the fixed network.
use serde::{Deserialize, Serialize};

use crate::network::NodeId;

/// A directed edge between two nodes with a fixed traversal time in hours.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Route {
    pub start: NodeId,
    pub end: NodeId,
    pub hours: u32,
}

/// Overland leg for B-bound containers.
pub const FACTORY_TO_WAREHOUSE_B: Route = Route::new(NodeId::Factory, NodeId::WarehouseB, 5);
/// Short truck leg feeding the port.
pub const FACTORY_TO_PORT: Route = Route::new(NodeId::Factory, NodeId::Port, 1);
/// Sea leg for A-bound containers.
pub const PORT_TO_WAREHOUSE_A: Route = Route::new(NodeId::Port, NodeId::WarehouseA, 4);

impl Route {
    #[must_use]
    pub const fn new(start: NodeId, end: NodeId, hours: u32) -> Self {
        debug_assert!(hours >= 1);
        Self { start, end, hours }
    }

    /// Same edge traversed in the opposite direction, same duration.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            hours: self.hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_swaps_endpoints_and_keeps_duration() {
        let back = PORT_TO_WAREHOUSE_A.reversed();
        assert_eq!(back.start, NodeId::WarehouseA);
        assert_eq!(back.end, NodeId::Port);
        assert_eq!(back.hours, PORT_TO_WAREHOUSE_A.hours);
    }

    #[test]
    fn fixed_routes_match_network_timetable() {
        assert_eq!(FACTORY_TO_WAREHOUSE_B.hours, 5);
        assert_eq!(FACTORY_TO_PORT.hours, 1);
        assert_eq!(PORT_TO_WAREHOUSE_A.hours, 4);
    }
}
