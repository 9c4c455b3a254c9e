//! Fleet command: admirals, the ships they own, and who may order what.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec3;
use rand::seq::SliceRandom;
use rand::Rng;

use deepspace_core::commands::ShipCommand;
use deepspace_core::constants::*;
use deepspace_core::enums::{AdmiralRole, ObjectKind};
use deepspace_core::error::{SimError, SimResult};
use deepspace_core::types::{FleetId, ObjectId, UNCONDITIONAL};

use crate::dispatch::{CockpitVerb, CommandBinding, CommandRegistry, ShipVerb};
use crate::patrol;
use crate::registry::ObjectRegistry;
use crate::scheduler::{EventAction, Scheduler};
use crate::ship::Ship;

/// Ship state by object id.
pub type Ships = BTreeMap<ObjectId, Ship>;

/// The set of objects owned by one admiral.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    pub fleet_id: FleetId,
    members: BTreeSet<ObjectId>,
}

impl Fleet {
    pub fn new(fleet_id: FleetId) -> Self {
        Self {
            fleet_id,
            members: BTreeSet::new(),
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.members.contains(&id)
    }

    pub fn members(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn insert(&mut self, id: ObjectId) {
        self.members.insert(id);
    }
}

#[derive(Debug, Clone)]
pub struct Admiral {
    pub fleet_id: FleetId,
    pub name: String,
    pub ship_prefix: &'static str,
    pub flagship: ObjectId,
    /// Ships in creation order, flagship first.
    pub roster: Vec<ObjectId>,
    pub fleet: Fleet,
    pub role: AdmiralRole,
}

impl Admiral {
    /// Create an admiral and its Escort flagship at `position`.
    pub fn new<R: Rng>(
        fleet_id: FleetId,
        name: impl Into<String>,
        role: AdmiralRole,
        position: DVec3,
        registry: &mut ObjectRegistry,
        ships: &mut Ships,
        rng: &mut R,
    ) -> SimResult<Self> {
        let ship_prefix = SHIP_PREFIXES.choose(rng).copied().unwrap_or(SHIP_PREFIXES[0]);
        let flagship_name = match role {
            AdmiralRole::Player => PLAYER_FLAGSHIP_NAME,
            AdmiralRole::Agent => AGENT_FLAGSHIP_NAME,
        };
        let mut admiral = Self {
            fleet_id,
            name: name.into(),
            ship_prefix,
            flagship: 0,
            roster: Vec::new(),
            fleet: Fleet::new(fleet_id),
            role,
        };
        admiral.flagship =
            admiral.spawn_ship(ObjectKind::Escort, flagship_name, position, registry, ships)?;
        log::info!(
            "admiral {} (fleet {fleet_id}, {role:?}) commands {}",
            admiral.name,
            admiral.flagship
        );
        Ok(admiral)
    }

    /// Build a ship of `kind` near `parent` and enlist it.
    pub fn add_ship<R: Rng>(
        &mut self,
        kind: ObjectKind,
        name: &str,
        parent: ObjectId,
        registry: &mut ObjectRegistry,
        ships: &mut Ships,
        rng: &mut R,
    ) -> SimResult<ObjectId> {
        let offset = DVec3::new(
            rng.gen_range(-SHIP_SPAWN_SPREAD..=SHIP_SPAWN_SPREAD),
            rng.gen_range(-SHIP_SPAWN_SPREAD..=SHIP_SPAWN_SPREAD),
            rng.gen_range(-SHIP_SPAWN_SPREAD..=SHIP_SPAWN_SPREAD),
        );
        let position = registry.position(parent)? + offset;
        self.spawn_ship(kind, name, position, registry, ships)
    }

    fn spawn_ship(
        &mut self,
        kind: ObjectKind,
        name: &str,
        position: DVec3,
        registry: &mut ObjectRegistry,
        ships: &mut Ships,
    ) -> SimResult<ObjectId> {
        if !kind.is_ship() {
            return Err(SimError::InvalidArgument(format!(
                "{kind:?} cannot join a fleet"
            )));
        }
        let full_name = format!("{}. {name}", self.ship_prefix);
        let id = registry.add_object(kind, Some(self.fleet_id), Some(position))?;
        registry.set_name(id, full_name.clone())?;
        ships.insert(id, Ship::new(id, kind, full_name));
        self.roster.push(id);
        self.fleet.insert(id);
        Ok(id)
    }

    /// One ship label per line, in roster order.
    pub fn fleet_listing(&self, ships: &Ships) -> String {
        self.roster
            .iter()
            .filter_map(|id| ships.get(id))
            .map(|ship| ship.label.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // --- Player ---

    /// Bind the player's command surface.
    pub fn register_commands(&self, commands: &mut CommandRegistry) {
        commands.register("admiral.fleet", CommandBinding::PrintFleet);
        commands.register("order", CommandBinding::OrderShip);
        for verb in ShipVerb::ALL {
            commands.register(format!("ship.{}", verb.name()), CommandBinding::Flagship(verb));
        }
        for verb in CockpitVerb::ALL {
            commands.register(
                format!("cockpit.{}", verb.name()),
                CommandBinding::Cockpit(verb),
            );
        }
    }

    /// Add `count` ships around the flagship: every tenth a Port, the next
    /// two Fighters, the rest Tugs.
    pub fn make_fleet<R: Rng>(
        &mut self,
        count: usize,
        registry: &mut ObjectRegistry,
        ships: &mut Ships,
        rng: &mut R,
    ) -> SimResult<()> {
        for i in 0..count {
            let kind = match i % 10 {
                0 => ObjectKind::Port,
                1 | 2 => ObjectKind::Fighter,
                _ => ObjectKind::Tug,
            };
            let name = CELESTIAL_NAMES.choose(rng).copied().unwrap_or("Unnamed");
            self.add_ship(kind, name, self.flagship, registry, ships, rng)?;
        }
        log::info!("{} built a fleet of {count}", self.name);
        Ok(())
    }

    /// Apply `command` to one of this admiral's ships.
    ///
    /// Ships outside the fleet are refused before anything is touched.
    pub fn order_ship(
        &self,
        ship: ObjectId,
        command: &ShipCommand,
        ships: &mut Ships,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<()> {
        if !registry.contains(ship) {
            return Err(SimError::UnknownId(ship));
        }
        if !self.fleet.contains(ship) {
            return Err(SimError::PermissionDenied {
                ship,
                fleet: self.fleet_id,
            });
        }
        let target = ships.get_mut(&ship).ok_or(SimError::NotAShip(ship))?;
        log::info!("{} orders {}: {command:?}", self.name, target.label);
        target.apply(command, registry, scheduler)
    }

    // --- Agent ---

    /// Schedule the agent's opening move at tick 0.
    pub fn schedule_first_order(&self, scheduler: &mut Scheduler) {
        scheduler.schedule(
            UNCONDITIONAL,
            0.0,
            EventAction::AgentFirstOrder {
                fleet: self.fleet_id,
            },
            format!("{}: start first order", self.name),
        );
    }

    /// Send the flagship on a patrol through random celestial bodies.
    pub fn first_order<R: Rng>(
        &self,
        ships: &mut Ships,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
        rng: &mut R,
    ) -> SimResult<()> {
        let waypoints = match patrol::pick_waypoints(registry, rng, AGENT_PATROL_WAYPOINTS) {
            Ok(waypoints) => waypoints,
            Err(SimError::EmptyPopulation) => {
                log::warn!("{}: no celestial bodies to patrol", self.name);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let flagship = ships
            .get_mut(&self.flagship)
            .ok_or(SimError::NotAShip(self.flagship))?;
        flagship.order_patrol(waypoints, AGENT_PATROL_SPEED, registry, scheduler)
    }
}
