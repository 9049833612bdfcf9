#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The simulation core of a first-person voxel sandbox: a streamed block world,
//! face-culled chunk meshes, and the creatures and player that move through it
//! under a shared collision resolver.
//!
//! Rendering, input devices and UI are left to the embedding application. The
//! engine hands out chunk meshes as scene commands, takes player input as
//! intents and reports mob attacks through a callback.
//!
//! ## Key Modules
//!
//! * `engine_state` - The session context and all of its subsystems
//! * `error` - Errors from configuration and save data
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sandbox::{GameConfig, EngineState, PlayerIntent};
//!
//! let _ = voxel_sandbox::init_logging();
//! let mut engine = EngineState::new(GameConfig::default());
//! engine.step(
//!     web_time::Duration::from_millis(16),
//!     &PlayerIntent::default(),
//!     &mut |_damage| {},
//! );
//! ```

pub mod engine_state;
pub mod error;

pub use engine_state::{
    config::GameConfig,
    player::{BlockPlacement, PlayerIntent},
    EngineState, StepOutcome,
};
pub use error::EngineError;

/// Installs the logger: `env_logger` reading `RUST_LOG` and writing to stdout.
///
/// # Returns
/// An error if a logger was already installed.
#[cfg(not(target_family = "wasm"))]
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()?;

    log::info!("Logger initialized");
    Ok(())
}

/// Installs the browser console logger and routes panics to the console.
///
/// # Returns
/// An error if a logger was already installed.
#[cfg(target_family = "wasm")]
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Info)
}
