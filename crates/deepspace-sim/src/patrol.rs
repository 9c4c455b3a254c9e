//! Patrol routes: a queue of waypoints flown one leg at a time.

use std::collections::VecDeque;

use rand::Rng;

use deepspace_core::error::SimResult;
use deepspace_core::types::ObjectId;

use crate::registry::ObjectRegistry;

#[derive(Debug, Clone, Default)]
pub struct PatrolRoute {
    waypoints: VecDeque<ObjectId>,
    pub cruise_speed: f64,
}

impl PatrolRoute {
    pub fn new(waypoints: impl IntoIterator<Item = ObjectId>, cruise_speed: f64) -> Self {
        Self {
            waypoints: waypoints.into_iter().collect(),
            cruise_speed,
        }
    }

    /// Pop the next waypoint to fly to.
    pub fn next_waypoint(&mut self) -> Option<ObjectId> {
        self.waypoints.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }
}

/// Sample `count` celestial waypoints (with replacement).
pub fn pick_waypoints<R: Rng>(
    registry: &ObjectRegistry,
    rng: &mut R,
    count: usize,
) -> SimResult<Vec<ObjectId>> {
    (0..count)
        .map(|_| registry.random_celestial_id(rng))
        .collect()
}
