//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of simulated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Non-maneuverable celestial body.
    Celestial,
    /// Slow utility ship.
    Tug,
    /// Fast, high-thrust ship.
    Fighter,
    /// Flagship class.
    Escort,
    /// Immobile station. Zero thrust.
    Port,
}

impl ObjectKind {
    pub fn is_celestial(self) -> bool {
        self == ObjectKind::Celestial
    }

    pub fn is_ship(self) -> bool {
        !self.is_celestial()
    }
}

/// Navigation phase of a ship, derived from its flight plan and the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderPhase {
    #[default]
    Idle,
    /// Accelerating toward cruise speed.
    CruiseBurn,
    /// Coasting at cruise speed.
    Cruising,
    /// Decelerating toward the destination.
    BreakBurn,
}

/// Command authority of an admiral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmiralRole {
    /// Human-controlled; exposes a command surface.
    Player,
    /// AI-controlled.
    Agent,
}

/// Feedback severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeedbackLevel {
    Info,
    Warning,
}
