//! Flappy - a side-scrolling bird-and-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipe stream, collisions, session state)
//! - `config`: Validated tuning constants
//! - `platform`: Frame loop, clock pacing, input/render collaborators
//! - `renderer`: Display list generation (canvas backend on wasm32)

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Frame timing constants
///
/// All tuning values in [`GameConfig`] are per-frame quantities measured
/// against the 60 Hz reference clock, so one simulation step is one frame.
pub mod consts {
    /// Reference frame rate
    pub const TARGET_FPS: u32 = 60;
    /// Milliseconds per reference frame
    pub const FRAME_MS: f64 = 1000.0 / TARGET_FPS as f64;
    /// Fixed simulation timestep, in frames
    pub const SIM_DT: f32 = 1.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap fed to the accumulator in one frame (ms)
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;
}
