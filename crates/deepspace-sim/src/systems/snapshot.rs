//! Snapshot system: builds a complete `SimSnapshot` from the engine state.
//!
//! This system is read-only.

use hecs::World;

use deepspace_core::components::*;
use deepspace_core::events::Feedback;
use deepspace_core::profiles::get_profile;
use deepspace_core::state::*;
use deepspace_core::types::SimTime;

use crate::fleet::Ships;
use crate::registry::ObjectRegistry;
use crate::scheduler::Scheduler;

/// Build a complete snapshot of the simulation.
pub fn build_snapshot(
    registry: &ObjectRegistry,
    ships: &Ships,
    scheduler: &Scheduler,
    feedback: Vec<Feedback>,
) -> SimSnapshot {
    let time = scheduler.time();
    SimSnapshot {
        time,
        objects: build_objects(registry.world()),
        ships: build_ships(registry, ships, &time),
        events: build_events(scheduler),
        feedback,
    }
}

/// One view per object, ordered by id.
fn build_objects(world: &World) -> Vec<ObjectView> {
    let mut objects: Vec<ObjectView> = world
        .query::<(
            &Id,
            &Kind,
            &Name,
            &Position,
            &Velocity,
            &Acceleration,
            &Owner,
        )>()
        .iter()
        .map(|(_, (id, kind, name, pos, vel, acc, owner))| {
            let profile = get_profile(kind.0);
            ObjectView {
                id: id.0,
                kind: kind.0,
                name: name.0.clone(),
                type_name: profile.type_name.to_string(),
                glyph: profile.glyph,
                color: profile.color.to_string(),
                position: pos.0,
                velocity: vel.0,
                acceleration: acc.0,
                owner: owner.0,
            }
        })
        .collect();
    objects.sort_by_key(|o| o.id);
    objects
}

fn build_ships(registry: &ObjectRegistry, ships: &Ships, time: &SimTime) -> Vec<ShipView> {
    ships
        .values()
        .map(|ship| ShipView {
            id: ship.id,
            label: ship.label.clone(),
            fleet: registry.owner(ship.id).ok().flatten(),
            phase: ship.phase(time.tick),
            orders: ship.current_orders(time.tick),
            current_token: ship.current_token(),
            flight: ship.flight().copied(),
            patrol_remaining: ship.patrol().remaining(),
            forward: ship.cockpit.forward(),
            following: ship.cockpit.following,
        })
        .collect()
}

fn build_events(scheduler: &Scheduler) -> Vec<EventView> {
    scheduler
        .pending()
        .into_iter()
        .map(|event| EventView {
            due: event.due,
            token: event.token,
            label: event.label.clone(),
        })
        .collect()
}
