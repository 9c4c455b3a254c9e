//! Simulation engine: owner of all simulation state.
//!
//! `SimulationEngine` holds the object registry, the scheduler, ship and
//! admiral state, and the command surface. It applies player commands,
//! advances time, interprets fired events and builds `SimSnapshot`s.
//! Completely headless, so it can be driven deterministically from tests.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use deepspace_core::commands::{CommandArg, PlayerCommand, UniverseCommand};
use deepspace_core::constants::MAX_FEEDBACK;
use deepspace_core::enums::AdmiralRole;
use deepspace_core::error::{SimError, SimResult};
use deepspace_core::events::Feedback;
use deepspace_core::state::SimSnapshot;
use deepspace_core::types::{ObjectId, SimTime, Tick, UNCONDITIONAL};

use crate::config::SimConfig;
use crate::dispatch::{CommandBinding, CommandRegistry, UniverseVerb};
use crate::fleet::{Admiral, Ships};
use crate::registry::ObjectRegistry;
use crate::scheduler::{Event, EventAction, Scheduler};
use crate::ship::Ship;
use crate::systems;
use crate::world_setup;

pub struct SimulationEngine {
    registry: ObjectRegistry,
    scheduler: Scheduler,
    ships: Ships,
    /// Player first, then agents in fleet id order.
    admirals: Vec<Admiral>,
    commands: CommandRegistry,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    feedback: Vec<Feedback>,
    max_pending_events: usize,
}

impl SimulationEngine {
    /// Create an engine and populate the universe described by `config`.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut registry = match config.max_objects {
            Some(max) => ObjectRegistry::with_capacity_limit(max),
            None => ObjectRegistry::new(),
        };
        let mut scheduler = Scheduler::new(config.step);
        let mut commands = CommandRegistry::new();
        commands.register("tick", CommandBinding::Tick);
        for verb in UniverseVerb::ALL {
            commands.register(verb.name(), CommandBinding::Universe(verb));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let universe = world_setup::setup_universe(
            &config,
            &mut registry,
            &mut scheduler,
            &mut commands,
            &mut rng,
        )?;

        Ok(Self {
            registry,
            scheduler,
            ships: universe.ships,
            admirals: universe.admirals,
            commands,
            rng,
            command_queue: VecDeque::new(),
            feedback: Vec::new(),
            max_pending_events: config.max_pending_events,
        })
    }

    /// Queue a player command for processing at the start of the next advance.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Resolve and apply a tokenized command immediately.
    ///
    /// Failures are returned and also recorded as warning feedback.
    pub fn dispatch(&mut self, name: &str, args: &[CommandArg]) -> SimResult<()> {
        let result = self
            .commands
            .resolve(name, args)
            .and_then(|command| self.handle_command(command));
        if let Err(e) = &result {
            log::warn!("command {name} failed: {e}");
            self.push_feedback(Feedback::warning(e.to_string(), self.scheduler.now()));
        }
        result
    }

    /// Apply a typed player command immediately.
    pub fn handle_command(&mut self, command: PlayerCommand) -> SimResult<()> {
        match command {
            PlayerCommand::Flagship { command } => {
                let flagship = self.player()?.flagship;
                let ship = self
                    .ships
                    .get_mut(&flagship)
                    .ok_or(SimError::NotAShip(flagship))?;
                ship.apply(&command, &mut self.registry, &mut self.scheduler)
            }
            PlayerCommand::OrderShip { ship, command } => {
                let player = self
                    .admirals
                    .iter()
                    .find(|a| a.role == AdmiralRole::Player)
                    .ok_or(SimError::InvalidArgument("no player admiral".into()))?;
                let result = player.order_ship(
                    ship,
                    &command,
                    &mut self.ships,
                    &mut self.registry,
                    &mut self.scheduler,
                );
                if let Err(SimError::PermissionDenied { .. }) = result {
                    let listing = player.fleet_listing(&self.ships);
                    self.push_feedback(Feedback::info(listing, self.scheduler.now()));
                }
                result
            }
            PlayerCommand::PrintFleet => {
                let listing = self.player()?.fleet_listing(&self.ships);
                self.push_feedback(Feedback::info(listing, self.scheduler.now()));
                Ok(())
            }
            PlayerCommand::Simulate { ticks } => self.advance(ticks).map(|_| ()),
            PlayerCommand::Universe { command } => self.apply_universe(command),
        }
    }

    /// Apply a universe-wide motion command. Only `Reset` cancels orders.
    fn apply_universe(&mut self, command: UniverseCommand) -> SimResult<()> {
        let registry = &mut self.registry;
        match command {
            UniverseCommand::RandomizeVelocities { scale } => {
                registry.randomize_velocities(&mut self.rng, scale)?
            }
            UniverseCommand::RandomizePositions { radius } => {
                registry.randomize_positions(&mut self.rng, radius)?
            }
            UniverseCommand::CenterVelocities => registry.center_velocities(),
            UniverseCommand::FlipVelocities => registry.flip_velocities(),
            UniverseCommand::Reset => {
                registry.stop_all();
                for ship in self.ships.values_mut() {
                    ship.cancel_orders();
                }
            }
            UniverseCommand::MatchVelocity { object, target } => {
                registry.match_velocity(object, target)?
            }
            UniverseCommand::MatchPosition { object, target } => {
                registry.match_position(object, target)?
            }
        }
        log::info!("universe command applied: {command:?}");
        Ok(())
    }

    /// Advance simulated time by `delta` ticks. Returns the number of events fired.
    pub fn advance(&mut self, delta: Tick) -> SimResult<usize> {
        self.process_commands();

        let Self {
            registry,
            scheduler,
            ships,
            admirals,
            rng,
            feedback,
            ..
        } = self;
        let fired = scheduler.advance(delta, registry, |event, scheduler, registry| {
            let label = event.label.clone();
            if let Err(e) = fire_event(event, ships, admirals, scheduler, registry, rng) {
                log::warn!("event '{label}' failed: {e}");
                feedback.push(Feedback::warning(
                    format!("{label}: {e}"),
                    scheduler.now(),
                ));
            }
        })?;

        if self.scheduler.len() > self.max_pending_events {
            self.compact_events();
        }
        self.trim_feedback();
        Ok(fired)
    }

    /// Drop pending events whose order has been superseded.
    /// Returns the number of events removed.
    pub fn compact_events(&mut self) -> usize {
        let ships = &self.ships;
        let removed = self.scheduler.retain(|event| is_live(event, ships));
        log::debug!(
            "compacted {removed} stale events, {} pending",
            self.scheduler.len()
        );
        removed
    }

    /// Build a snapshot of the current state. Drains pending feedback.
    pub fn snapshot(&mut self) -> SimSnapshot {
        let feedback = std::mem::take(&mut self.feedback);
        systems::snapshot::build_snapshot(&self.registry, &self.ships, &self.scheduler, feedback)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.scheduler.time()
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn ships(&self) -> &Ships {
        &self.ships
    }

    pub fn ship(&self, id: ObjectId) -> SimResult<&Ship> {
        self.ships.get(&id).ok_or(SimError::NotAShip(id))
    }

    pub fn admirals(&self) -> &[Admiral] {
        &self.admirals
    }

    /// The human player's admiral.
    pub fn player(&self) -> SimResult<&Admiral> {
        self.admirals
            .iter()
            .find(|a| a.role == AdmiralRole::Player)
            .ok_or(SimError::InvalidArgument("no player admiral".into()))
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Feedback recorded since the last snapshot.
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    /// Mutable access to the simulation state (for tests).
    #[cfg(test)]
    pub fn parts_mut(&mut self) -> (&mut ObjectRegistry, &mut Scheduler, &mut Ships) {
        (&mut self.registry, &mut self.scheduler, &mut self.ships)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(e) = self.handle_command(command) {
                log::warn!("queued command failed: {e}");
                self.push_feedback(Feedback::warning(e.to_string(), self.scheduler.now()));
            }
        }
    }

    fn push_feedback(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
        self.trim_feedback();
    }

    fn trim_feedback(&mut self) {
        if self.feedback.len() > MAX_FEEDBACK {
            let excess = self.feedback.len() - MAX_FEEDBACK;
            self.feedback.drain(..excess);
        }
    }
}

/// Whether an event can still have an effect when it fires.
fn is_live(event: &Event, ships: &Ships) -> bool {
    if event.token == UNCONDITIONAL {
        return true;
    }
    match event.action.ship().and_then(|id| ships.get(&id)) {
        Some(ship) => ship.is_current(event.token),
        None => true,
    }
}

/// Interpret one fired event.
fn fire_event(
    event: Event,
    ships: &mut Ships,
    admirals: &[Admiral],
    scheduler: &mut Scheduler,
    registry: &mut ObjectRegistry,
    rng: &mut ChaCha8Rng,
) -> SimResult<()> {
    let token = event.token;
    match event.action {
        EventAction::CruiseCutoff { ship } => {
            ship_mut(ships, ship)?.on_cruise_cutoff(token, registry, scheduler)
        }
        EventAction::BreakBurnIgnition { ship } => {
            ship_mut(ships, ship)?.on_break_burn_ignition(token, registry, scheduler)
        }
        EventAction::Arrival { ship } => {
            ship_mut(ships, ship)?.on_arrival(token, registry, scheduler)
        }
        EventAction::EngineCutoff { ship } => {
            ship_mut(ships, ship)?.on_engine_cutoff(token, registry)
        }
        EventAction::AgentFirstOrder { fleet } => {
            let admiral = admirals
                .iter()
                .find(|a| a.fleet_id == fleet)
                .ok_or_else(|| SimError::InvalidArgument(format!("unknown fleet {fleet}")))?;
            admiral.first_order(ships, registry, scheduler, rng)
        }
    }
}

fn ship_mut(ships: &mut Ships, id: ObjectId) -> SimResult<&mut Ship> {
    ships.get_mut(&id).ok_or(SimError::NotAShip(id))
}
