//! In-progress route traversals.
//!
//! A trip is the only mutable link between a transporter and a route. It
//! advances one hour per tick and becomes immutable once complete; the
//! dispatcher guarantees at most one active trip per transporter by storing
//! trips in a one-slot-per-transporter table.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::route::Route;
use crate::transporter::TransporterId;

/// Raised when a completed trip is advanced again; a dispatcher bug.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("trip for transporter {transporter} over {start}->{end} advanced after completion")]
pub struct TripAlreadyComplete {
    pub transporter: TransporterId,
    pub start: &'static str,
    pub end: &'static str,
}

/// A stateful traversal of one route by one transporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub route: Route,
    pub transporter: TransporterId,
    elapsed: u32,
    complete: bool,
}

impl Trip {
    #[must_use]
    pub const fn new(route: Route, transporter: TransporterId) -> Self {
        Self {
            route,
            transporter,
            elapsed: 0,
            complete: false,
        }
    }

    /// Advance the traversal by exactly one hour.
    ///
    /// # Errors
    ///
    /// Returns `TripAlreadyComplete` when called on a finished trip.
    pub const fn advance(&mut self) -> Result<(), TripAlreadyComplete> {
        if self.complete {
            return Err(TripAlreadyComplete {
                transporter: self.transporter,
                start: self.route.start.name(),
                end: self.route.end.name(),
            });
        }
        self.elapsed += 1;
        if self.elapsed == self.route.hours {
            self.complete = true;
        }
        Ok(())
    }

    /// Pure constructor of the return leg: same transporter, same duration,
    /// endpoints swapped, progress reset. Does not touch `self`.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.route.reversed(), self.transporter)
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }
}
