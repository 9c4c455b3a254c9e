//! Commands sent from the command surface to the simulation.
//!
//! The external dispatcher tokenizes input into a command name and a list of
//! [`CommandArg`]s; the engine resolves those into the typed commands below.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::ObjectId;

/// A single already-tokenized command argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandArg {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CommandArg {
    /// Coerce a raw token: integer first, then float (integral floats become
    /// integers), then plain text.
    pub fn coerce(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return CommandArg::Int(i);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                CommandArg::Int(f as i64)
            }
            Ok(f) => CommandArg::Float(f),
            Err(_) => CommandArg::Text(raw.to_string()),
        }
    }

    /// Tokenize a whitespace-separated line into a command name and arguments.
    pub fn tokenize(line: &str) -> Option<(String, Vec<CommandArg>)> {
        let mut parts = line.split_whitespace();
        let name = parts.next()?.to_string();
        Some((name, parts.map(CommandArg::coerce).collect()))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CommandArg::Int(i) => Some(*i as f64),
            CommandArg::Float(f) => Some(*f),
            CommandArg::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CommandArg::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CommandArg::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// An order executed by a single ship (or its cockpit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShipCommand {
    // --- Navigation ---
    /// Fly to another object and stop there.
    Fly { target: ObjectId, cruise_speed: f64 },
    /// Fly through each waypoint in turn.
    Patrol {
        waypoints: Vec<ObjectId>,
        cruise_speed: f64,
    },

    // --- Engine ---
    /// Burn along `direction`, or the cockpit's forward axis if omitted.
    Burn {
        direction: Option<DVec3>,
        throttle: f64,
    },
    /// Burn against the current velocity.
    BreakBurn { throttle: f64, auto_cutoff: bool },
    /// Shut the engine off.
    CutBurn,

    // --- Cockpit ---
    Yaw { degrees: f64 },
    Pitch { degrees: f64 },
    Roll { degrees: f64 },
    /// Point the forward axis at an object.
    Look { target: ObjectId },
    /// Turn `fraction` of the way toward an object.
    Turn { target: ObjectId, fraction: f64 },
    Follow { target: ObjectId },
    ResetCockpit,
}

/// Whole-universe manipulation of object motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UniverseCommand {
    /// Give every object a random velocity, each axis in `[-scale, scale]`.
    RandomizeVelocities { scale: f64 },
    /// Scatter every object inside a cube of half-size `radius`.
    RandomizePositions { radius: f64 },
    /// Subtract the mean velocity from every object.
    CenterVelocities,
    /// Reverse every object's velocity.
    FlipVelocities,
    /// Stop everything: zero velocities and accelerations, cancel all orders.
    Reset,
    /// Give `object` the velocity of `target`.
    MatchVelocity { object: ObjectId, target: ObjectId },
    /// Move `object` onto `target`.
    MatchPosition { object: ObjectId, target: ObjectId },
}

/// All possible actions issued through the player's command surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Command the player's own flagship.
    Flagship { command: ShipCommand },
    /// Command another ship of the player's fleet.
    OrderShip { ship: ObjectId, command: ShipCommand },
    /// Report the fleet roster as feedback.
    PrintFleet,
    /// Advance the simulation by the given number of ticks.
    Simulate { ticks: f64 },
    /// Act on every object at once.
    Universe { command: UniverseCommand },
}
