//! Mobile units: two trucks and one ship, each holding at most one container.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::container::Container;
use crate::network::NodeId;

/// Stable fleet index; doubles as the dispatch tie-break order.
pub type TransporterId = u32;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransporterKind {
    Truck,
    Ship,
}

impl TransporterKind {
    /// Wire name used in event records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Truck => "TRUCK",
            Self::Ship => "SHIP",
        }
    }

    /// Node this kind returns to when running empty.
    #[must_use]
    pub const fn home_base(self) -> NodeId {
        match self {
            Self::Truck => NodeId::Factory,
            Self::Ship => NodeId::Port,
        }
    }
}

/// Errors raised when hold invariants are violated. Both indicate a
/// dispatcher bug rather than a recoverable runtime condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransporterError {
    #[error("transporter {id} ({kind:?}) was loaded while already carrying container {carrying}")]
    Capacity {
        id: TransporterId,
        kind: TransporterKind,
        carrying: u32,
    },
    #[error("transporter {id} ({kind:?}) was unloaded with an empty hold")]
    EmptyHold {
        id: TransporterId,
        kind: TransporterKind,
    },
}

/// Pure cargo-holding state. A transporter knows nothing about routes or
/// trips; the dispatcher owns that association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transporter {
    pub id: TransporterId,
    pub kind: TransporterKind,
    carrying: Option<Container>,
}

impl Transporter {
    #[must_use]
    pub const fn new(id: TransporterId, kind: TransporterKind) -> Self {
        Self {
            id,
            kind,
            carrying: None,
        }
    }

    /// Take ownership of a container.
    ///
    /// # Errors
    ///
    /// Returns `TransporterError::Capacity` when a container is already
    /// aboard.
    pub fn load(&mut self, container: Container) -> Result<(), TransporterError> {
        if let Some(current) = self.carrying {
            return Err(TransporterError::Capacity {
                id: self.id,
                kind: self.kind,
                carrying: current.id,
            });
        }
        self.carrying = Some(container);
        Ok(())
    }

    /// Clear the hold and hand the container back.
    ///
    /// # Errors
    ///
    /// Returns `TransporterError::EmptyHold` when nothing is carried.
    pub fn unload(&mut self) -> Result<Container, TransporterError> {
        self.carrying.take().ok_or(TransporterError::EmptyHold {
            id: self.id,
            kind: self.kind,
        })
    }

    /// Current hold contents, if any.
    #[must_use]
    pub const fn carrying(&self) -> Option<&Container> {
        self.carrying.as_ref()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.carrying.is_none()
    }

    /// Node this transporter returns to when running empty.
    #[must_use]
    pub const fn home_base(&self) -> NodeId {
        self.kind.home_base()
    }
}
