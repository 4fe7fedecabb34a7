//! Balloon Popper - pop growing balloons before they burst
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloons, particles, spawning, scoring)
//! - `driver`: Screen state machine and fixed-step frame loop
//! - `highscores`: Tamper-evident best score file
//! - `settings`: Persisted display preferences
//! - `persistence`: Config paths, atomic writes, IO errors
//! - `renderer`: Draw lists for an external renderer
//! - `audio`: Sound triggers for an external audio backend
//! - `tuning`: Data-driven game balance
//! - `ui`: Menu and settings button layout

pub mod audio;
pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use driver::{Driver, Flow, InputEvent, Screen, View};
pub use highscores::{HighScoreLoad, HighScoreStore};
pub use settings::{Resolution, Settings};
pub use tuning::Tuning;

/// Version shown on the main menu
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will simulate; longer stalls are dropped
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// Display width sizes are authored against
    pub const REFERENCE_WIDTH: f32 = 1920.0;
}
