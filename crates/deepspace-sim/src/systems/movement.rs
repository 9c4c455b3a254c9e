//! Kinematic integration system.
//!
//! First-order update applied uniformly to every object each step:
//! velocity += acceleration * dt, then position += velocity * dt.

use hecs::World;

use deepspace_core::components::{Acceleration, Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity + Acceleration.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel, acc)) in
        world.query_mut::<(&mut Position, &mut Velocity, &Acceleration)>()
    {
        vel.0 += acc.0 * dt;
        pos.0 += vel.0 * dt;
    }
}
