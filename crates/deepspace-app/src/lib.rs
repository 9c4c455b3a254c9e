//! DEEPSPACE headless application.
//!
//! Runs the simulation engine on a logic thread, feeds it commands typed on
//! stdin, and keeps the latest snapshot for status queries.

pub mod console;
pub mod game_loop;
pub mod state;

pub use deepspace_core as core;
