//! Simulation clock and time-ordered queue of deferred events.
//!
//! Events are plain data. Firing an event hands it back to the caller's
//! dispatch closure; the scheduler never knows what an action means.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use deepspace_core::constants::{DEFAULT_STEP, EPSILON, MAX_STEPS_PER_ADVANCE};
use deepspace_core::error::{SimError, SimResult};
use deepspace_core::types::{FleetId, ObjectId, OrderToken, SimTime, Tick};

use crate::registry::ObjectRegistry;

/// What a fired event does. Interpreted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    /// End of the acceleration burn of a fly order.
    CruiseCutoff { ship: ObjectId },
    /// Start of the deceleration burn of a fly order.
    BreakBurnIgnition { ship: ObjectId },
    /// End of a fly order.
    Arrival { ship: ObjectId },
    /// Auto cutoff after a break burn.
    EngineCutoff { ship: ObjectId },
    /// An agent admiral's opening move.
    AgentFirstOrder { fleet: FleetId },
}

impl EventAction {
    /// Ship the action applies to, if any.
    pub fn ship(&self) -> Option<ObjectId> {
        match *self {
            EventAction::CruiseCutoff { ship }
            | EventAction::BreakBurnIgnition { ship }
            | EventAction::Arrival { ship }
            | EventAction::EngineCutoff { ship } => Some(ship),
            EventAction::AgentFirstOrder { .. } => None,
        }
    }
}

/// A deferred action bound to an absolute due tick and an order token.
#[derive(Debug, Clone)]
pub struct Event {
    pub token: OrderToken,
    pub due: Tick,
    /// Insertion order; breaks ties between equal due ticks.
    pub seq: u64,
    pub action: EventAction,
    /// Advisory text for the debug display.
    pub label: String,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then(self.seq.cmp(&other.seq))
    }
}

pub struct Scheduler {
    time: SimTime,
    step: Tick,
    queue: BinaryHeap<Reverse<Event>>,
    next_seq: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl Scheduler {
    /// New scheduler integrating in steps of at most `step` ticks.
    pub fn new(step: Tick) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_STEP
        };
        Self {
            time: SimTime::default(),
            step,
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Current simulation tick.
    pub fn now(&self) -> Tick {
        self.time.tick
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn step(&self) -> Tick {
        self.step
    }

    /// Queue an event at absolute tick `due`. Returns its sequence number.
    pub fn schedule(
        &mut self,
        token: OrderToken,
        due: Tick,
        action: EventAction,
        label: impl Into<String>,
    ) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        let event = Event {
            token,
            due,
            seq,
            action,
            label: label.into(),
        };
        log::debug!("scheduled #{seq} at {due:.4} (token {token}): {}", event.label);
        self.queue.push(Reverse(event));
        seq
    }

    /// Remove and return the earliest event if it is due.
    pub fn pop_due(&mut self) -> Option<Event> {
        let now = self.time.tick;
        match self.queue.peek() {
            Some(Reverse(event)) if event.due <= now + EPSILON => {
                self.queue.pop().map(|Reverse(event)| event)
            }
            _ => None,
        }
    }

    /// Advance the simulation by `delta` ticks.
    ///
    /// The delta is split into equal steps no longer than the configured step.
    /// Each step integrates every object, moves the clock, then fires all due
    /// events (including ones scheduled by events fired in the same step).
    /// A delta needing more than `MAX_STEPS_PER_ADVANCE` steps is rejected.
    /// Returns the number of events fired.
    pub fn advance<F>(
        &mut self,
        delta: Tick,
        registry: &mut ObjectRegistry,
        mut fire: F,
    ) -> SimResult<usize>
    where
        F: FnMut(Event, &mut Scheduler, &mut ObjectRegistry),
    {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "advance delta must be positive, got {delta}"
            )));
        }
        let steps = (delta / self.step).ceil().max(1.0);
        if steps > MAX_STEPS_PER_ADVANCE as f64 {
            return Err(SimError::InvalidArgument(format!(
                "advance of {delta} ticks needs {steps} steps, limit is {MAX_STEPS_PER_ADVANCE}"
            )));
        }
        let steps = steps as u64;
        let dt = delta / steps as f64;
        let mut fired = 0;
        for _ in 0..steps {
            registry.integrate(dt);
            self.time.advance(dt);
            while let Some(event) = self.pop_due() {
                log::debug!(
                    "tick {:.4}: firing #{} (token {}): {}",
                    self.time.tick,
                    event.seq,
                    event.token,
                    event.label
                );
                fire(event, self, registry);
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// Pending events in firing order.
    pub fn pending(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.queue.iter().map(|Reverse(e)| e).collect();
        events.sort();
        events
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending event for which `keep` returns false.
    /// Relative order of the survivors is unchanged. Returns the number removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Event) -> bool,
    {
        let before = self.queue.len();
        let survivors: Vec<Reverse<Event>> = std::mem::take(&mut self.queue)
            .into_vec()
            .into_iter()
            .filter(|Reverse(event)| keep(event))
            .collect();
        self.queue = BinaryHeap::from(survivors);
        before - self.queue.len()
    }
}
