//! Spawn factories for the initial universe.
//!
//! Celestial bodies first, then the player's admiral and fleet, then the AI
//! admirals. All randomness comes from the engine's seeded RNG.

use glam::DVec3;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use deepspace_core::constants::*;
use deepspace_core::enums::{AdmiralRole, ObjectKind};
use deepspace_core::error::SimResult;
use deepspace_core::types::FleetId;

use crate::config::SimConfig;
use crate::dispatch::CommandRegistry;
use crate::fleet::{Admiral, Ships};
use crate::registry::ObjectRegistry;
use crate::scheduler::Scheduler;

/// Everything `setup_universe` creates besides registry entries.
pub struct Universe {
    pub ships: Ships,
    pub admirals: Vec<Admiral>,
}

pub fn setup_universe(
    config: &SimConfig,
    registry: &mut ObjectRegistry,
    scheduler: &mut Scheduler,
    commands: &mut CommandRegistry,
    rng: &mut ChaCha8Rng,
) -> SimResult<Universe> {
    spawn_celestials(registry, rng, config.celestial_count, config.world_radius)?;

    let mut ships = Ships::new();
    let mut admirals = Vec::with_capacity(config.agent_count + 1);

    let mut player = Admiral::new(
        PLAYER_FLEET_ID,
        "Player",
        AdmiralRole::Player,
        DVec3::ZERO,
        registry,
        &mut ships,
        rng,
    )?;
    player.register_commands(commands);
    player.make_fleet(config.player_fleet_size, registry, &mut ships, rng)?;
    admirals.push(player);

    for i in 0..config.agent_count {
        let fleet_id = PLAYER_FLEET_ID + 1 + i as FleetId;
        let agent = Admiral::new(
            fleet_id,
            format!("Agent {fleet_id}"),
            AdmiralRole::Agent,
            random_position(rng, config.world_radius),
            registry,
            &mut ships,
            rng,
        )?;
        agent.schedule_first_order(scheduler);
        admirals.push(agent);
    }

    log::info!(
        "universe ready: {} objects, {} ships, {} admirals",
        registry.len(),
        ships.len(),
        admirals.len()
    );
    Ok(Universe { ships, admirals })
}

/// Scatter `count` celestial bodies inside the world cube.
pub fn spawn_celestials(
    registry: &mut ObjectRegistry,
    rng: &mut ChaCha8Rng,
    count: usize,
    world_radius: f64,
) -> SimResult<()> {
    for _ in 0..count {
        let position = random_position(rng, world_radius);
        let id = registry.add_object(ObjectKind::Celestial, None, Some(position))?;
        let name = CELESTIAL_NAMES.choose(rng).copied().unwrap_or("Unnamed");
        registry.set_name(id, name)?;
    }
    Ok(())
}

fn random_position(rng: &mut ChaCha8Rng, radius: f64) -> DVec3 {
    DVec3::new(
        rng.gen_range(-radius..radius),
        rng.gen_range(-radius..radius),
        rng.gen_range(-radius..radius),
    )
}
