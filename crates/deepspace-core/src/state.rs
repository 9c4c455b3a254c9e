//! Simulation snapshot: the complete read-only view handed to the UI and debug surface.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{ObjectKind, OrderPhase};
use crate::events::Feedback;
use crate::types::{FleetId, FlightPlan, ObjectId, OrderToken, SimTime, Tick};

/// Complete simulation state, built on demand after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub objects: Vec<ObjectView>,
    pub ships: Vec<ShipView>,
    /// Pending events in firing order.
    pub events: Vec<EventView>,
    pub feedback: Vec<Feedback>,
}

/// One simulated object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,
    /// Kind name for display, e.g. `fighter`.
    pub type_name: String,
    pub glyph: char,
    pub color: String,
    pub position: DVec3,
    pub velocity: DVec3,
    pub acceleration: DVec3,
    pub owner: Option<FleetId>,
}

/// Navigation state of one ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub id: ObjectId,
    /// Glyph, id and name, e.g. `≡3 XSS. Devship`.
    pub label: String,
    pub fleet: Option<FleetId>,
    pub phase: OrderPhase,
    /// Human-readable status line.
    pub orders: String,
    pub current_token: OrderToken,
    pub flight: Option<FlightPlan>,
    pub patrol_remaining: usize,
    /// Cockpit forward axis.
    pub forward: DVec3,
    /// Object the cockpit camera follows.
    pub following: Option<ObjectId>,
}

/// A pending scheduler event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    pub due: Tick,
    pub token: OrderToken,
    pub label: String,
}
