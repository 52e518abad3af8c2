//! Fixed logistics network: node identities and FIFO container queues.
//!
//! The topology never changes at runtime, so nodes live in a fixed arena and
//! everything else (routes, trips, events) refers to them by [`NodeId`].
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::container::Container;

/// Stable index of a node in the fixed network arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NodeId {
    Factory,
    Port,
    WarehouseA,
    WarehouseB,
}

impl NodeId {
    pub const COUNT: usize = 4;

    /// Display name used in the per-tick trace and in event records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Factory => "FACTORY",
            Self::Port => "PORT",
            Self::WarehouseA => "A",
            Self::WarehouseB => "B",
        }
    }

    /// Whether this node is a terminal warehouse.
    #[must_use]
    pub const fn is_warehouse(self) -> bool {
        matches!(self, Self::WarehouseA | Self::WarehouseB)
    }

    const fn index(self) -> usize {
        match self {
            Self::Factory => 0,
            Self::Port => 1,
            Self::WarehouseA => 2,
            Self::WarehouseB => 3,
        }
    }
}

/// A named holding area with a FIFO queue of containers awaiting pickup.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    queue: VecDeque<Container>,
}

impl Node {
    #[must_use]
    fn new(id: NodeId) -> Self {
        Self {
            id,
            queue: VecDeque::new(),
        }
    }

    /// Append a container at the queue tail, preserving arrival order.
    pub fn enqueue(&mut self, container: Container) {
        self.queue.push_back(container);
    }

    /// Remove and return the head container, or `None` when the queue is
    /// empty.
    pub fn dequeue_next(&mut self) -> Option<Container> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Read-only view of queued containers, used by the termination check
    /// and by tests.
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.queue.iter()
    }
}

/// Arena of the four fixed nodes. Seeds the factory with every container in
/// input order; the port and warehouses start empty.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: [Node; NodeId::COUNT],
}

impl Network {
    #[must_use]
    pub fn new(containers: impl IntoIterator<Item = Container>) -> Self {
        let mut network = Self {
            nodes: [
                Node::new(NodeId::Factory),
                Node::new(NodeId::Port),
                Node::new(NodeId::WarehouseA),
                Node::new(NodeId::WarehouseB),
            ],
        };
        for container in containers {
            network.node_mut(NodeId::Factory).enqueue(container);
        }
        network
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Total containers currently sitting in terminal warehouses.
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.node(NodeId::WarehouseA).len() + self.node(NodeId::WarehouseB).len()
    }

    /// Whether every warehouse container carries the destination tag matching
    /// its warehouse. Dispatch upholds this by construction; debug builds
    /// assert it at termination.
    #[must_use]
    pub fn deliveries_consistent(&self) -> bool {
        use crate::container::Destination;
        self.node(NodeId::WarehouseA)
            .containers()
            .all(|c| c.destination == Destination::A)
            && self
                .node(NodeId::WarehouseB)
                .containers()
                .all(|c| c.destination == Destination::B)
    }
}
