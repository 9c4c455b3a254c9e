//! Simulation kernel for DEEPSPACE.
//!
//! Owns the object registry and the event scheduler, runs ship orders as
//! chains of scheduled events, and produces `SimSnapshot`s for the app.

pub mod cockpit;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod fleet;
pub mod flight_plan;
pub mod patrol;
pub mod registry;
pub mod scheduler;
pub mod ship;
pub mod systems;
pub mod world_setup;

pub use config::SimConfig;
pub use deepspace_core as core;
pub use engine::SimulationEngine;
