//! Object registry: arena of every simulated object.
//!
//! Objects live in a hecs `World`; a dense `Vec<Entity>` maps the stable
//! integer id onto the entity. Kinds and the celestial mask are kept as
//! parallel vectors so sampling never touches the ECS.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;

use deepspace_core::components::*;
use deepspace_core::enums::ObjectKind;
use deepspace_core::error::{SimError, SimResult};
use deepspace_core::types::{FleetId, ObjectId};

use crate::systems;

/// Read-only copy of one object's state.
#[derive(Debug, Clone, PartialEq)]
pub struct SimObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,
    pub position: DVec3,
    pub velocity: DVec3,
    pub acceleration: DVec3,
    pub owner: Option<FleetId>,
}

#[derive(Default)]
pub struct ObjectRegistry {
    world: World,
    entities: Vec<Entity>,
    kinds: Vec<ObjectKind>,
    celestial_mask: Vec<bool>,
    max_objects: Option<usize>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that refuses to grow beyond `max_objects`.
    pub fn with_capacity_limit(max_objects: usize) -> Self {
        Self {
            max_objects: Some(max_objects),
            ..Self::default()
        }
    }

    /// Add an object and return its newly assigned id.
    pub fn add_object(
        &mut self,
        kind: ObjectKind,
        owner: Option<FleetId>,
        position: Option<DVec3>,
    ) -> SimResult<ObjectId> {
        if let Some(max) = self.max_objects {
            if self.entities.len() >= max {
                return Err(SimError::CapacityExceeded(max));
            }
        }
        let id = self.entities.len() as ObjectId;
        let entity = self.world.spawn((
            Id(id),
            Kind(kind),
            Owner(owner),
            Name::default(),
            Position(position.unwrap_or(DVec3::ZERO)),
            Velocity::default(),
            Acceleration::default(),
        ));
        self.entities.push(entity);
        self.kinds.push(kind);
        self.celestial_mask.push(kind.is_celestial());
        Ok(id)
    }

    fn entity(&self, id: ObjectId) -> SimResult<Entity> {
        self.entities
            .get(id as usize)
            .copied()
            .ok_or(SimError::UnknownId(id))
    }

    fn component<T: hecs::Component + Copy>(&self, id: ObjectId) -> SimResult<T> {
        let entity = self.entity(id)?;
        self.world
            .get::<&T>(entity)
            .map(|c| *c)
            .map_err(|_| SimError::UnknownId(id))
    }

    fn component_mut<T: hecs::Component>(
        &mut self,
        id: ObjectId,
    ) -> SimResult<hecs::RefMut<'_, T>> {
        let entity = self.entity(id)?;
        self.world
            .get::<&mut T>(entity)
            .map_err(|_| SimError::UnknownId(id))
    }

    /// Full view of one object.
    pub fn get(&self, id: ObjectId) -> SimResult<SimObject> {
        Ok(SimObject {
            id,
            kind: self.kind(id)?,
            name: self.name(id)?,
            position: self.position(id)?,
            velocity: self.velocity(id)?,
            acceleration: self.acceleration(id)?,
            owner: self.owner(id)?,
        })
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        (id as usize) < self.entities.len()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All assigned ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> {
        0..self.entities.len() as ObjectId
    }

    pub fn kind(&self, id: ObjectId) -> SimResult<ObjectKind> {
        self.kinds
            .get(id as usize)
            .copied()
            .ok_or(SimError::UnknownId(id))
    }

    pub fn position(&self, id: ObjectId) -> SimResult<DVec3> {
        self.component::<Position>(id).map(|p| p.0)
    }

    pub fn velocity(&self, id: ObjectId) -> SimResult<DVec3> {
        self.component::<Velocity>(id).map(|v| v.0)
    }

    pub fn acceleration(&self, id: ObjectId) -> SimResult<DVec3> {
        self.component::<Acceleration>(id).map(|a| a.0)
    }

    pub fn owner(&self, id: ObjectId) -> SimResult<Option<FleetId>> {
        self.component::<Owner>(id).map(|o| o.0)
    }

    pub fn name(&self, id: ObjectId) -> SimResult<String> {
        let entity = self.entity(id)?;
        self.world
            .get::<&Name>(entity)
            .map(|n| n.0.clone())
            .map_err(|_| SimError::UnknownId(id))
    }

    pub fn set_position(&mut self, id: ObjectId, position: DVec3) -> SimResult<()> {
        self.component_mut::<Position>(id)?.0 = position;
        Ok(())
    }

    pub fn set_velocity(&mut self, id: ObjectId, velocity: DVec3) -> SimResult<()> {
        self.component_mut::<Velocity>(id)?.0 = velocity;
        Ok(())
    }

    /// Overwrite an object's acceleration. No physical validation.
    pub fn set_acceleration(&mut self, id: ObjectId, acceleration: DVec3) -> SimResult<()> {
        self.component_mut::<Acceleration>(id)?.0 = acceleration;
        Ok(())
    }

    pub fn set_owner(&mut self, id: ObjectId, owner: Option<FleetId>) -> SimResult<()> {
        self.component_mut::<Owner>(id)?.0 = owner;
        Ok(())
    }

    pub fn set_name(&mut self, id: ObjectId, name: impl Into<String>) -> SimResult<()> {
        self.component_mut::<Name>(id)?.0 = name.into();
        Ok(())
    }

    /// Ids of all celestial objects, ascending.
    pub fn celestial_ids(&self) -> Vec<ObjectId> {
        self.celestial_mask
            .iter()
            .enumerate()
            .filter(|&(_, &celestial)| celestial)
            .map(|(id, _)| id as ObjectId)
            .collect()
    }

    pub fn is_celestial(&self, id: ObjectId) -> bool {
        self.celestial_mask.get(id as usize).copied().unwrap_or(false)
    }

    /// Uniformly sample one celestial object id.
    pub fn random_celestial_id<R: Rng>(&self, rng: &mut R) -> SimResult<ObjectId> {
        let celestials = self.celestial_ids();
        if celestials.is_empty() {
            return Err(SimError::EmptyPopulation);
        }
        Ok(celestials[rng.gen_range(0..celestials.len())])
    }

    // --- Universe manipulation ---

    /// Give every object a random velocity, each axis in `[-scale, scale]`.
    pub fn randomize_velocities<R: Rng>(&mut self, rng: &mut R, scale: f64) -> SimResult<()> {
        let scale = positive("velocity scale", scale)?;
        let ids: Vec<ObjectId> = self.ids().collect();
        for id in ids {
            self.set_velocity(id, random_vector(rng, scale))?;
        }
        Ok(())
    }

    /// Scatter every object inside a cube of half-size `radius`.
    pub fn randomize_positions<R: Rng>(&mut self, rng: &mut R, radius: f64) -> SimResult<()> {
        let radius = positive("radius", radius)?;
        let ids: Vec<ObjectId> = self.ids().collect();
        for id in ids {
            self.set_position(id, random_vector(rng, radius))?;
        }
        Ok(())
    }

    /// Subtract the mean velocity, so the population as a whole is at rest.
    pub fn center_velocities(&mut self) {
        if self.is_empty() {
            return;
        }
        let mut sum = DVec3::ZERO;
        for (_entity, vel) in self.world.query_mut::<&Velocity>() {
            sum += vel.0;
        }
        let mean = sum / self.len() as f64;
        for (_entity, vel) in self.world.query_mut::<&mut Velocity>() {
            vel.0 -= mean;
        }
    }

    pub fn flip_velocities(&mut self) {
        for (_entity, vel) in self.world.query_mut::<&mut Velocity>() {
            vel.0 = -vel.0;
        }
    }

    /// Zero every velocity and acceleration.
    pub fn stop_all(&mut self) {
        for (_entity, (vel, acc)) in self
            .world
            .query_mut::<(&mut Velocity, &mut Acceleration)>()
        {
            vel.0 = DVec3::ZERO;
            acc.0 = DVec3::ZERO;
        }
    }

    /// Give `id` the velocity of `target`.
    pub fn match_velocity(&mut self, id: ObjectId, target: ObjectId) -> SimResult<()> {
        let velocity = self.velocity(target)?;
        self.set_velocity(id, velocity)
    }

    /// Move `id` onto `target`.
    pub fn match_position(&mut self, id: ObjectId, target: ObjectId) -> SimResult<()> {
        let position = self.position(target)?;
        self.set_position(id, position)
    }

    /// Integrate every object over one step of `dt` ticks.
    pub fn integrate(&mut self, dt: f64) {
        systems::movement::run(&mut self.world, dt);
    }

    /// Read-only access to the underlying ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }
}

fn positive(what: &str, value: f64) -> SimResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidArgument(format!(
            "{what} must be positive, got {value}"
        )))
    }
}

fn random_vector<R: Rng>(rng: &mut R, bound: f64) -> DVec3 {
    DVec3::new(
        rng.gen_range(-bound..=bound),
        rng.gen_range(-bound..=bound),
        rng.gen_range(-bound..=bound),
    )
}
