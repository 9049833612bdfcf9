//! # Game Configuration
//!
//! Tunable values for a play session. Engine constants that the algorithms
//! depend on (chunk size, streaming radius, AI thresholds) stay `const` items
//! in their own modules.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Settings for a play session, loaded from JSON.
///
/// Missing fields take their defaults and unknown fields are rejected.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::engine_state::config::GameConfig;
///
/// let config = GameConfig::from_json(r#"{ "seed": 42, "mob_count": 2 }"#).unwrap();
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.player_reach, GameConfig::default().player_reach);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed of the terrain height noise
    pub seed: u32,
    /// Where the player starts
    pub spawn_point: [f32; 3],
    /// Where the player returns to after falling out of the world
    pub respawn_point: [f32; 3],
    /// Mobs spawned by the demo driver
    pub mob_count: usize,
    /// How far the player can break, place and attack, in blocks
    pub player_reach: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: 0,
            spawn_point: [8.0, 20.0, 8.0],
            respawn_point: [8.0, 20.0, 8.0],
            mob_count: 4,
            player_reach: 5.0,
        }
    }
}

impl GameConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::Config)
    }

    /// Serialises the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(EngineError::Config)
    }

    /// Reads a configuration file.
    #[cfg(not(target_family = "wasm"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
