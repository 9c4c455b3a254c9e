//! Application state shared between the console and the game loop thread.

use std::sync::{Arc, Mutex};

use deepspace_core::commands::CommandArg;
use deepspace_core::constants::PLAYER_FLEET_ID;
use deepspace_core::state::SimSnapshot;

/// Ticks simulated per logic cycle at startup.
pub const DEFAULT_AUTO_SIM: f64 = 10.0;

/// Rate restored when auto-simulation is toggled on from zero.
pub const RESUME_AUTO_SIM: f64 = 50.0;

/// Commands sent from the console to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A tokenized command for the simulation's command surface.
    Dispatch { name: String, args: Vec<CommandArg> },
    /// Pause or resume auto-simulation.
    ToggleAutoSim,
    /// Set the auto-simulation rate, or shift it when `relative`.
    /// No value resets the rate to one tick per cycle.
    SimRate { value: Option<f64>, relative: bool },
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Auto-simulation rate in ticks per logic cycle.
///
/// The rate is signed: a negative rate is a paused one that toggling restores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoSim {
    pub rate: f64,
}

impl Default for AutoSim {
    fn default() -> Self {
        Self {
            rate: DEFAULT_AUTO_SIM,
        }
    }
}

impl AutoSim {
    pub fn is_running(&self) -> bool {
        self.rate > 0.0
    }

    pub fn toggle(&mut self) {
        self.rate = if self.rate == 0.0 {
            RESUME_AUTO_SIM
        } else {
            -self.rate
        };
    }

    pub fn set_rate(&mut self, value: Option<f64>, relative: bool) {
        self.rate = match (value, relative) {
            (Some(delta), true) => (self.rate + delta).max(0.0),
            (Some(rate), false) => rate,
            (None, _) => 1.0,
        };
    }
}

/// State shared with the game loop thread.
#[derive(Default)]
pub struct AppState {
    /// Latest snapshot, updated by the game loop after each cycle.
    pub latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line summary of the latest snapshot, if one exists yet.
    pub fn status_line(&self) -> Option<String> {
        let lock = self.latest_snapshot.lock().ok()?;
        let snapshot = lock.as_ref()?;
        let flagship = snapshot
            .ships
            .iter()
            .find(|ship| ship.fleet == Some(PLAYER_FLEET_ID));
        let orders = flagship.map_or_else(
            || "no flagship".to_string(),
            |ship| format!("{}: {}", ship.label, ship.orders),
        );
        Some(format!(
            "tick {:.2} | {} objects | {} events pending | {orders}",
            snapshot.time.tick,
            snapshot.objects.len(),
            snapshot.events.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(state.status_line().is_none());
    }

    #[test]
    fn test_autosim_toggle() {
        let mut auto_sim = AutoSim::default();
        assert!(auto_sim.is_running());
        auto_sim.toggle();
        assert_eq!(auto_sim.rate, -DEFAULT_AUTO_SIM);
        assert!(!auto_sim.is_running());
        auto_sim.toggle();
        assert_eq!(auto_sim.rate, DEFAULT_AUTO_SIM);

        auto_sim.rate = 0.0;
        auto_sim.toggle();
        assert_eq!(auto_sim.rate, RESUME_AUTO_SIM);
    }

    #[test]
    fn test_simrate() {
        let mut auto_sim = AutoSim::default();
        auto_sim.set_rate(Some(100.0), true);
        assert_eq!(auto_sim.rate, 110.0);
        auto_sim.set_rate(Some(-500.0), true);
        assert_eq!(auto_sim.rate, 0.0);
        auto_sim.set_rate(Some(3.0), false);
        assert_eq!(auto_sim.rate, 3.0);
        auto_sim.set_rate(None, false);
        assert_eq!(auto_sim.rate, 1.0);
    }
}
