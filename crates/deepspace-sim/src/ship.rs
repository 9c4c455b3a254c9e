//! Ship navigation: engine control and the fly-order state machine.
//!
//! A fly order is a chain of three events (cruise cutoff, break burn
//! ignition, arrival) scheduled under the order's token. Issuing a new order
//! mints a new token; events carrying an older one are ignored when they fire,
//! so superseded orders are cancelled without touching the queue.

use glam::DVec3;

use deepspace_core::commands::ShipCommand;
use deepspace_core::constants::EPSILON;
use deepspace_core::enums::{ObjectKind, OrderPhase};
use deepspace_core::error::{SimError, SimResult};
use deepspace_core::profiles::{get_profile, KindProfile};
use deepspace_core::types::{FlightPlan, ObjectId, OrderToken, Tick, UNCONDITIONAL};

use crate::cockpit::Cockpit;
use crate::flight_plan;
use crate::patrol::PatrolRoute;
use crate::registry::ObjectRegistry;
use crate::scheduler::{EventAction, Scheduler};

#[derive(Debug, Clone)]
pub struct Ship {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,
    /// Glyph, id and name, e.g. `‡12 KRS. Vega`.
    pub label: String,
    pub cockpit: Cockpit,
    current_token: OrderToken,
    flight: Option<FlightPlan>,
    patrol: PatrolRoute,
}

impl Ship {
    pub fn new(id: ObjectId, kind: ObjectKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let label = format!("{}{} {}", get_profile(kind).glyph, id, name);
        let mut cockpit = Cockpit::default();
        cockpit.follow(id);
        Self {
            id,
            kind,
            name,
            label,
            cockpit,
            current_token: UNCONDITIONAL,
            flight: None,
            patrol: PatrolRoute::default(),
        }
    }

    pub fn profile(&self) -> KindProfile {
        get_profile(self.kind)
    }

    pub fn thrust(&self) -> f64 {
        self.profile().thrust
    }

    pub fn current_token(&self) -> OrderToken {
        self.current_token
    }

    pub fn flight(&self) -> Option<&FlightPlan> {
        self.flight.as_ref()
    }

    pub fn patrol(&self) -> &PatrolRoute {
        &self.patrol
    }

    /// Whether an event created under `token` may still act on this ship.
    pub fn is_current(&self, token: OrderToken) -> bool {
        token == UNCONDITIONAL || token == self.current_token
    }

    fn mint_token(&mut self) -> OrderToken {
        self.current_token += 1;
        self.current_token
    }

    /// Navigation phase at tick `now`.
    pub fn phase(&self, now: Tick) -> OrderPhase {
        match self.flight {
            None => OrderPhase::Idle,
            Some(fp) if now < fp.cutoff => OrderPhase::CruiseBurn,
            Some(fp) if now < fp.break_burn => OrderPhase::Cruising,
            Some(fp) if now < fp.arrival => OrderPhase::BreakBurn,
            Some(_) => OrderPhase::Idle,
        }
    }

    /// Status line for the current order.
    pub fn current_orders(&self, now: Tick) -> String {
        let Some(fp) = self.flight else {
            return "Idle.".to_string();
        };
        let remaining = now - fp.arrival;
        if now < fp.cutoff {
            format!("Cruise burn: {:.4} ({remaining:.4})", now - fp.cutoff)
        } else if now < fp.break_burn {
            format!("Cruising: {:.4} ({remaining:.4})", now - fp.break_burn)
        } else {
            format!("Break burn: {remaining:.4}")
        }
    }

    // --- Orders ---

    /// Fly to `target` and come to rest there. Replaces any order in progress.
    pub fn fly_to(
        &mut self,
        target: ObjectId,
        cruise_speed: f64,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<FlightPlan> {
        let plan = self.start_leg(target, cruise_speed, registry, scheduler)?;
        self.patrol.clear();
        Ok(plan)
    }

    /// Fly through `waypoints` in order, one fly leg each.
    pub fn order_patrol(
        &mut self,
        waypoints: Vec<ObjectId>,
        cruise_speed: f64,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<()> {
        if let Some(&missing) = waypoints.iter().find(|&&id| !registry.contains(id)) {
            return Err(SimError::UnknownId(missing));
        }
        let mut route = PatrolRoute::new(waypoints, cruise_speed);
        let Some(first) = route.next_waypoint() else {
            return Err(SimError::InvalidArgument("patrol without waypoints".into()));
        };
        self.start_leg(first, cruise_speed, registry, scheduler)?;
        log::info!(
            "{}: patrol of {} legs at {cruise_speed}",
            self.label,
            route.remaining() + 1
        );
        self.patrol = route;
        Ok(())
    }

    /// Drop the current order. Pending events of the order become inert.
    pub fn cancel_orders(&mut self) {
        self.mint_token();
        self.flight = None;
        self.patrol.clear();
    }

    fn start_leg(
        &mut self,
        target: ObjectId,
        cruise_speed: f64,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<FlightPlan> {
        let travel = registry.position(target)? - registry.position(self.id)?;
        let plan = flight_plan::plan(
            travel.length(),
            cruise_speed,
            self.thrust(),
            scheduler.now(),
        )?;

        if travel.length() > EPSILON {
            self.cockpit.look_at(travel)?;
        }
        self.engine_burn(Some(travel), 1.0, registry)?;

        let token = self.mint_token();
        self.flight = Some(plan);
        scheduler.schedule(
            token,
            plan.cutoff,
            EventAction::CruiseCutoff { ship: self.id },
            format!("{}: Cruise burn cutoff", self.label),
        );
        log::info!(
            "{}: flying to {target}, arrival at {:.2} (cruise {:.3})",
            self.label,
            plan.arrival,
            plan.cruise_speed
        );
        Ok(plan)
    }

    fn accepts(&self, token: OrderToken, what: &str) -> bool {
        if self.is_current(token) {
            return true;
        }
        log::debug!(
            "{}: ignoring obsolete {what} (token {token}, current {})",
            self.label,
            self.current_token
        );
        false
    }

    /// Event handler: acceleration burn done, coast until the break burn.
    pub fn on_cruise_cutoff(
        &mut self,
        token: OrderToken,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<()> {
        if !self.accepts(token, "cruise cutoff") {
            return Ok(());
        }
        self.engine_cut_burn(registry)?;
        if let Some(plan) = self.flight {
            scheduler.schedule(
                token,
                plan.break_burn,
                EventAction::BreakBurnIgnition { ship: self.id },
                format!("{}: break burn ignition", self.label),
            );
        }
        Ok(())
    }

    /// Event handler: start decelerating.
    pub fn on_break_burn_ignition(
        &mut self,
        token: OrderToken,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<()> {
        if !self.accepts(token, "break burn ignition") {
            return Ok(());
        }
        self.engine_break_burn(1.0, false, registry, scheduler)?;
        if let Some(plan) = self.flight {
            scheduler.schedule(
                token,
                plan.arrival,
                EventAction::Arrival { ship: self.id },
                format!("{}: break burn cutoff, arrival.", self.label),
            );
        }
        Ok(())
    }

    /// Event handler: the leg is complete. Continues the patrol if one is active.
    pub fn on_arrival(
        &mut self,
        token: OrderToken,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<()> {
        if !self.accepts(token, "arrival") {
            return Ok(());
        }
        self.engine_cut_burn(registry)?;
        self.flight = None;
        if let Some(next) = self.patrol.next_waypoint() {
            let speed = self.patrol.cruise_speed;
            if let Err(e) = self.start_leg(next, speed, registry, scheduler) {
                log::warn!("{}: patrol aborted: {e}", self.label);
                self.patrol.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Event handler: auto cutoff scheduled by a break burn.
    pub fn on_engine_cutoff(
        &mut self,
        token: OrderToken,
        registry: &mut ObjectRegistry,
    ) -> SimResult<()> {
        if !self.accepts(token, "engine cutoff") {
            return Ok(());
        }
        self.engine_cut_burn(registry)
    }

    // --- Engine ---

    /// Accelerate along `direction` (the cockpit's forward axis if `None`).
    /// A zero direction is a warning and changes nothing.
    pub fn engine_burn(
        &self,
        direction: Option<DVec3>,
        throttle: f64,
        registry: &mut ObjectRegistry,
    ) -> SimResult<()> {
        let direction = direction.unwrap_or_else(|| self.cockpit.forward());
        let magnitude = direction.length();
        if magnitude < EPSILON {
            log::warn!(
                "{} trying to engine burn without direction: {direction:?}",
                self.label
            );
            return Ok(());
        }
        let acceleration = direction / magnitude * self.thrust() * throttle;
        registry.set_acceleration(self.id, acceleration)
    }

    pub fn engine_cut_burn(&self, registry: &mut ObjectRegistry) -> SimResult<()> {
        registry.set_acceleration(self.id, DVec3::ZERO)
    }

    /// Accelerate against the current velocity. With `auto_cutoff`, the engine
    /// is cut once the velocity should have been cancelled.
    pub fn engine_break_burn(
        &self,
        throttle: f64,
        auto_cutoff: bool,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<()> {
        let velocity = registry.velocity(self.id)?;
        let speed = velocity.length();
        if speed < EPSILON {
            log::warn!(
                "{} trying to engine break burn without direction: {velocity:?}",
                self.label
            );
            return Ok(());
        }
        self.engine_burn(Some(-velocity), throttle, registry)?;
        if auto_cutoff {
            let thrust = self.thrust();
            if thrust <= 0.0 {
                log::warn!("{}: no thrust, skipping auto cutoff", self.label);
                return Ok(());
            }
            scheduler.schedule(
                UNCONDITIONAL,
                scheduler.now() + speed / thrust,
                EventAction::EngineCutoff { ship: self.id },
                format!("Auto cutoff engine burn: {speed:.4} v"),
            );
        }
        Ok(())
    }

    // --- Commands ---

    /// Execute one command from the command surface.
    ///
    /// Manual engine commands cancel the current order first.
    pub fn apply(
        &mut self,
        command: &ShipCommand,
        registry: &mut ObjectRegistry,
        scheduler: &mut Scheduler,
    ) -> SimResult<()> {
        match command {
            ShipCommand::Fly {
                target,
                cruise_speed,
            } => {
                self.fly_to(*target, *cruise_speed, registry, scheduler)?;
            }
            ShipCommand::Patrol {
                waypoints,
                cruise_speed,
            } => {
                self.order_patrol(waypoints.clone(), *cruise_speed, registry, scheduler)?;
            }
            ShipCommand::Burn {
                direction,
                throttle,
            } => {
                self.cancel_orders();
                self.engine_burn(*direction, *throttle, registry)?;
            }
            ShipCommand::BreakBurn {
                throttle,
                auto_cutoff,
            } => {
                self.cancel_orders();
                self.engine_break_burn(*throttle, *auto_cutoff, registry, scheduler)?;
            }
            ShipCommand::CutBurn => {
                self.cancel_orders();
                self.engine_cut_burn(registry)?;
            }
            ShipCommand::Yaw { degrees } => self.cockpit.rotate(*degrees, 0.0, 0.0)?,
            ShipCommand::Pitch { degrees } => self.cockpit.rotate(0.0, *degrees, 0.0)?,
            ShipCommand::Roll { degrees } => self.cockpit.rotate(0.0, 0.0, *degrees)?,
            ShipCommand::Look { target } => {
                let direction = registry.position(*target)? - registry.position(self.id)?;
                self.cockpit.look_at(direction)?;
            }
            ShipCommand::Turn { target, fraction } => {
                if !fraction.is_finite() {
                    return Err(SimError::InvalidArgument(format!(
                        "turn fraction must be finite, got {fraction}"
                    )));
                }
                let direction = registry.position(*target)? - registry.position(self.id)?;
                self.cockpit.turn_toward(direction, *fraction)?;
            }
            ShipCommand::Follow { target } => {
                if !registry.contains(*target) {
                    return Err(SimError::UnknownId(*target));
                }
                self.cockpit.follow(*target);
            }
            ShipCommand::ResetCockpit => self.cockpit.reset(),
        }
        Ok(())
    }
}
