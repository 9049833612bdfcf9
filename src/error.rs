//! Errors raised at the edges of the engine: configuration and save data.
//!
//! The simulation itself never fails. Out-of-range block queries read as air
//! and bodies that fall out of the world get teleported back.

use thiserror::Error;

/// Errors from loading configuration or save data.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration JSON is malformed or has unknown fields.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// A save bundle could not be encoded or decoded. Inventories with impossible
    /// stacks or selections fail here.
    #[error("save data could not be serialized: {0}")]
    Persistence(#[source] serde_json::Error),

    /// A save bundle decoded but holds impossible values.
    #[error("save data rejected: {0}")]
    InvalidSave(String),

    /// Reading or writing a save or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
