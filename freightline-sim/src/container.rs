//! Cargo units and their destination tags.
use serde::{Deserialize, Serialize};

use crate::dispatch::SimulationError;

/// Terminal warehouse a container is bound for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Destination {
    A,
    B,
}

impl Destination {
    /// Wire/display name for this destination.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Parse a single destination character.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidDestination` for any character
    /// outside `{A, B}`.
    pub const fn parse(ch: char) -> Result<Self, SimulationError> {
        match ch {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            other => Err(SimulationError::InvalidDestination { found: other }),
        }
    }

    /// Validate a whole destination string before any simulation state is
    /// built. Containers are numbered in input order starting at zero.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidDestination` on the first character
    /// outside `{A, B}`.
    pub fn parse_sequence(input: &str) -> Result<Vec<Self>, SimulationError> {
        input.chars().map(Self::parse).collect()
    }
}

/// A single cargo unit: immutable identity plus its destination tag.
///
/// A container lives in exactly one node queue or one transporter hold at any
/// tick; it is never duplicated or destroyed mid-run.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Container {
    pub id: u32,
    pub destination: Destination,
}

impl Container {
    #[must_use]
    pub const fn new(id: u32, destination: Destination) -> Self {
        Self { id, destination }
    }
}
