//! Fundamental identifiers, time and flight plan types.

use serde::{Deserialize, Serialize};

/// Dense object index assigned by the registry. Never reused.
pub type ObjectId = u32;

/// Identifier of a fleet (one per admiral).
pub type FleetId = u32;

/// Per-ship order identifier. `0` is the unconditional marker.
pub type OrderToken = u64;

/// Simulation time. Real-valued, not necessarily integral.
pub type Tick = f64;

/// Token for events that must fire regardless of the ship's current order.
pub const UNCONDITIONAL: OrderToken = 0;

/// Simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current simulation tick.
    pub tick: Tick,
    /// Number of integration steps taken so far.
    pub steps: u64,
}

impl SimTime {
    /// Advance the clock by one integration step of `dt` ticks.
    pub fn advance(&mut self, dt: Tick) {
        self.tick += dt;
        self.steps += 1;
    }
}

/// Timed burn-cruise-burn maneuver. All timestamps are absolute ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// End of the acceleration burn.
    pub cutoff: Tick,
    /// Start of the deceleration burn.
    pub break_burn: Tick,
    /// End of the deceleration burn.
    pub arrival: Tick,
    /// Duration of the whole maneuver.
    pub total: Tick,
    /// Cruise speed actually reached (may be lower than requested).
    pub cruise_speed: f64,
}

impl FlightPlan {
    /// Length of each burn phase.
    pub fn burn_time(&self) -> Tick {
        self.arrival - self.break_burn
    }

    /// Length of the coasting phase.
    pub fn cruise_time(&self) -> Tick {
        self.break_burn - self.cutoff
    }
}
