//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering, audio or platform dependencies

pub mod balloon;
pub mod particle;
pub mod state;
pub mod tick;

/// RGB color, 0-255 per channel
pub type Color = [u8; 3];

pub use balloon::{Balloon, BalloonState, BalloonTransition};
pub use particle::Particle;
pub use state::{GameConfig, GameEvent, GameState};
pub use tick::{handle_click, tick};
