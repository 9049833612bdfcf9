//! # Persistence
//!
//! Saving and restoring a play session. Only the player's position and
//! inventory are saved; terrain height comes back from the seed.
//!
//! Storage goes through [`WorldStore`]. [`MemoryStore`] keeps the JSON in a
//! single string slot, the same shape as browser local storage, and
//! [`FileStore`] writes it to disk on native targets.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::inventory::Inventory;

/// Everything a save holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveBundle {
    /// Feet position of the player
    pub player_position: [f32; 3],
    /// The player's hotbar
    pub inventory: Inventory,
}

impl SaveBundle {
    /// Encodes the bundle as JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(EngineError::Persistence)
    }

    /// Decodes and checks a bundle.
    ///
    /// # Returns
    /// An error if the JSON does not decode (inventories with impossible
    /// stacks or selections do not decode) or the bundle fails [`SaveBundle::validate`].
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let bundle: SaveBundle = serde_json::from_str(json).map_err(EngineError::Persistence)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Checks that the bundle can be restored.
    ///
    /// # Returns
    /// [`EngineError::InvalidSave`] if the position is not finite or the
    /// inventory holds impossible values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.player_position.iter().all(|c| c.is_finite()) {
            return Err(EngineError::InvalidSave(format!(
                "player position {:?} is not finite",
                self.player_position
            )));
        }
        self.inventory.validate().map_err(EngineError::InvalidSave)
    }
}

/// Somewhere a save can be kept.
pub trait WorldStore {
    /// Replaces the stored save.
    fn save_world(&mut self, bundle: &SaveBundle) -> Result<(), EngineError>;

    /// Reads the stored save.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been saved yet.
    fn load_world(&self) -> Result<Option<SaveBundle>, EngineError>;
}

/// Decodes stored JSON, logging data that gets rejected.
fn decode(json: &str) -> Result<SaveBundle, EngineError> {
    SaveBundle::from_json(json).inspect_err(|err| warn!("Discarding saved world: {}", err))
}

/// Keeps the save as a JSON string in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// Creates a store already holding `json`.
    pub fn with_contents(json: impl Into<String>) -> Self {
        MemoryStore {
            slot: Some(json.into()),
        }
    }

    /// The raw stored JSON.
    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl WorldStore for MemoryStore {
    fn save_world(&mut self, bundle: &SaveBundle) -> Result<(), EngineError> {
        self.slot = Some(bundle.to_json()?);
        Ok(())
    }

    fn load_world(&self) -> Result<Option<SaveBundle>, EngineError> {
        self.slot.as_deref().map(decode).transpose()
    }
}

/// Keeps the save as a JSON file.
#[cfg(not(target_family = "wasm"))]
#[derive(Clone, Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_family = "wasm"))]
impl FileStore {
    /// Creates a store backed by the file at `path`. Nothing is read until a load.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_family = "wasm"))]
impl WorldStore for FileStore {
    fn save_world(&mut self, bundle: &SaveBundle) -> Result<(), EngineError> {
        std::fs::write(&self.path, bundle.to_json()?)?;
        info!("Saved world to {}", self.path.display());
        Ok(())
    }

    fn load_world(&self) -> Result<Option<SaveBundle>, EngineError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode(&json).map(Some)
    }
}
