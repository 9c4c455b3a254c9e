//! Simulation constants and tuning parameters.

/// Tolerance for floating comparisons and degenerate-input checks.
pub const EPSILON: f64 = 1e-9;

/// Default integration step size in ticks.
pub const DEFAULT_STEP: f64 = 1.0;

// --- Flight planning ---

/// Factor applied to the cruise speed while the burns alone would cover the trip.
pub const CRUISE_SPEED_DECAY: f64 = 0.95;

/// Relative tolerance of the planner's arrival postcondition.
pub const PLAN_TOLERANCE: f64 = 1e-6;

// --- World ---

/// Default number of celestial bodies spawned at setup.
pub const DEFAULT_CELESTIAL_COUNT: usize = 40;

/// Default radius of the region celestial bodies are scattered in.
pub const DEFAULT_WORLD_RADIUS: f64 = 5_000.0;

/// Default per-axis bound of the `random` velocity command.
pub const DEFAULT_RANDOM_VELOCITY: f64 = 1.0;

/// Maximum distance of a new ship from its parent.
pub const SHIP_SPAWN_SPREAD: f64 = 20.0;

// --- Fleets ---

/// Fleet id reserved for the human player.
pub const PLAYER_FLEET_ID: u32 = 0;

/// Ships built for the player at setup.
pub const DEFAULT_PLAYER_FLEET_SIZE: usize = 20;

/// AI admirals created at setup.
pub const DEFAULT_AGENT_COUNT: usize = 3;

/// Waypoints sampled for an agent's first patrol.
pub const AGENT_PATROL_WAYPOINTS: usize = 5;

/// Cruise speed requested for agent patrol legs.
pub const AGENT_PATROL_SPEED: f64 = 5.0;

/// Registry prefixes for ship names.
pub const SHIP_PREFIXES: [&str; 5] = ["XSS", "KRS", "ISS", "JTS", "VSS"];

pub const PLAYER_FLAGSHIP_NAME: &str = "Devship";
pub const AGENT_FLAGSHIP_NAME: &str = "Flagship";

/// Names used for celestial bodies and player ships.
pub const CELESTIAL_NAMES: [&str; 24] = [
    "Acamar", "Achernar", "Adhara", "Aldebaran", "Alnair", "Altair", "Antares", "Arcturus",
    "Bellatrix", "Betelgeuse", "Canopus", "Capella", "Deneb", "Diphda", "Elnath", "Fomalhaut",
    "Hadar", "Hamal", "Mimosa", "Mirfak", "Pollux", "Procyon", "Rigel", "Vega",
];

// --- Scheduler ---

/// Most integration steps a single advance may take.
pub const MAX_STEPS_PER_ADVANCE: u64 = 1_000_000;

/// Queue length above which stale events are compacted away.
pub const DEFAULT_MAX_PENDING_EVENTS: usize = 4096;

// --- Feedback ---

/// Maximum feedback messages retained between snapshots.
pub const MAX_FEEDBACK: usize = 64;
