//! Core types and definitions for the DEEPSPACE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! quaternion math, object kinds, flight plans, commands, snapshots,
//! errors and constants. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod profiles;
pub mod quaternion;
pub mod state;
pub mod types;

pub use error::{SimError, SimResult};
pub use quaternion::Quaternion;

#[cfg(test)]
mod tests;
