//! Game loop thread: advances the simulation every 20 ms and publishes snapshots.
//!
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for the console to poll; feedback is written to the log.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use deepspace_core::enums::FeedbackLevel;
use deepspace_core::state::SimSnapshot;
use deepspace_sim::SimulationEngine;

use crate::state::{AutoSim, GameLoopCommand};

/// Wall-clock duration of one logic cycle.
pub const LOGIC_INTERVAL: Duration = Duration::from_millis(20);

/// Spawns the game loop in a new thread, taking ownership of the engine.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("deepspace-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    let mut auto_sim = AutoSim::default();
    let mut next_cycle_time = Instant::now();
    log::info!("game loop started, auto-sim {} ticks per cycle", auto_sim.rate);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !apply_command(&mut engine, &mut auto_sim, command) {
                        log::info!("game loop shutting down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance simulated time
        run_cycle(&mut engine, &auto_sim);

        // 3. Report feedback and store the latest snapshot for polling
        let snapshot = engine.snapshot();
        report_feedback(&snapshot);
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next cycle
        next_cycle_time += LOGIC_INTERVAL;
        let now = Instant::now();
        if next_cycle_time > now {
            std::thread::sleep(next_cycle_time - now);
        } else if now - next_cycle_time > LOGIC_INTERVAL * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_cycle_time = now;
        }
    }
}

/// Apply one loop command. Returns `false` when the loop should stop.
fn apply_command(
    engine: &mut SimulationEngine,
    auto_sim: &mut AutoSim,
    command: GameLoopCommand,
) -> bool {
    match command {
        GameLoopCommand::Dispatch { name, args } => {
            // Failures are already recorded as feedback.
            let _ = engine.dispatch(&name, &args);
        }
        GameLoopCommand::ToggleAutoSim => {
            auto_sim.toggle();
            let state = if auto_sim.is_running() {
                "in progress"
            } else {
                "paused"
            };
            log::info!("simulation {state}");
        }
        GameLoopCommand::SimRate { value, relative } => {
            auto_sim.set_rate(value, relative);
            log::info!("simulation rate {}", auto_sim.rate);
        }
        GameLoopCommand::Shutdown => return false,
    }
    true
}

fn run_cycle(engine: &mut SimulationEngine, auto_sim: &AutoSim) {
    if !auto_sim.is_running() {
        return;
    }
    if let Err(e) = engine.advance(auto_sim.rate) {
        log::warn!("advance by {} failed: {e}", auto_sim.rate);
    }
}

fn report_feedback(snapshot: &SimSnapshot) {
    for feedback in &snapshot.feedback {
        match feedback.level {
            FeedbackLevel::Info => log::info!("{}", feedback.message),
            FeedbackLevel::Warning => log::warn!("{}", feedback.message),
        }
    }
}
