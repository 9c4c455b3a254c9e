//! Simulation configuration.

use serde::{Deserialize, Serialize};

use deepspace_core::constants::*;
use deepspace_core::error::{SimError, SimResult};

/// Configuration for starting a new simulation.
///
/// Every field has a default, so a JSON config only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Longest integration step, in ticks.
    pub step: f64,
    pub celestial_count: usize,
    /// Celestial bodies are scattered inside a cube of this half-size.
    pub world_radius: f64,
    pub player_fleet_size: usize,
    pub agent_count: usize,
    /// Hard cap on registry size; `None` is unbounded.
    pub max_objects: Option<usize>,
    /// Queue length above which stale events are compacted away.
    pub max_pending_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            step: DEFAULT_STEP,
            celestial_count: DEFAULT_CELESTIAL_COUNT,
            world_radius: DEFAULT_WORLD_RADIUS,
            player_fleet_size: DEFAULT_PLAYER_FLEET_SIZE,
            agent_count: DEFAULT_AGENT_COUNT,
            max_objects: None,
            max_pending_events: DEFAULT_MAX_PENDING_EVENTS,
        }
    }
}

impl SimConfig {
    /// Parse a JSON config, filling missing fields with defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)
            .map_err(|e| SimError::InvalidArgument(format!("bad config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if !self.world_radius.is_finite() || self.world_radius <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "world radius must be positive, got {}",
                self.world_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "agent_count": 0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.agent_count, 0);
        assert_eq!(config.celestial_count, DEFAULT_CELESTIAL_COUNT);
        assert_eq!(config.max_objects, None);
    }

    #[test]
    fn test_rejects_bad_step() {
        assert!(SimConfig::from_json(r#"{ "step": 0.0 }"#).is_err());
        assert!(SimConfig::from_json("not json").is_err());
    }
}
