//! Systems that operate on the object world.
//!
//! Systems are pure functions over the hecs `World` and the engine's side
//! tables. They do not own state.

pub mod movement;
pub mod snapshot;
