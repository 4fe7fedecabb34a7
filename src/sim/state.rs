//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]. Display size and
//! balance knobs come in through [`GameConfig`] and are only changed via
//! setters, so the simulation never reads ambient globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::Color;
use super::balloon::Balloon;
use super::particle::Particle;
use crate::consts::REFERENCE_WIDTH;
use crate::tuning::Tuning;

/// Display-dependent configuration for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub tuning: Tuning,
}

impl GameConfig {
    pub fn new(width: u32, height: u32, tuning: Tuning) -> Self {
        Self {
            width,
            height,
            tuning,
        }
    }

    /// Scale a size authored for a 1920 px wide display, truncated to whole pixels
    pub fn scaled_px(&self, px: f32) -> f32 {
        (px * self.width as f32 / REFERENCE_WIDTH).floor()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(1920, 1080, Tuning::default())
    }
}

/// Things that happened during an update or click, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A balloon was popped by the player (or swept by a milestone)
    BalloonPopped { pos: Vec2, color: Color, swept: bool },
    /// A balloon burst on its own
    BalloonExpired { pos: Vec2, color: Color },
    /// Score crossed a milestone multiple
    Milestone { score: u64 },
    /// Lives changed
    LifeLost { remaining: u32 },
    LifeGained { lives: u32 },
    /// Lives reached zero; raised once per run
    RunOver { score: u64 },
}

/// Complete state of a run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Active balloons in insertion order
    pub balloons: Vec<Balloon>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u64,
    pub lives: u32,
    pub growth_multiplier: f32,
    /// Time since the last successful spawn check (ms)
    pub spawn_timer_ms: f32,
    /// Simulated time since reset (ms)
    pub clock_ms: f64,
    /// Cached persisted high score; untouched by `reset`
    pub high_score: u64,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with a seeded RNG
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Create a new game state drawing from the given RNG
    pub fn with_rng(config: GameConfig, rng: Pcg32) -> Self {
        let lives = config.tuning.max_lives;
        Self {
            config,
            balloons: Vec::new(),
            particles: Vec::new(),
            score: 0,
            lives,
            growth_multiplier: 1.0,
            spawn_timer_ms: 0.0,
            clock_ms: 0.0,
            high_score: 0,
            events: Vec::new(),
            rng,
        }
    }

    /// Start a fresh run. The high score survives.
    pub fn reset(&mut self) {
        self.balloons.clear();
        self.particles.clear();
        self.events.clear();
        self.score = 0;
        self.lives = self.config.tuning.max_lives;
        self.growth_multiplier = 1.0;
        self.spawn_timer_ms = 0.0;
        self.clock_ms = 0.0;
    }

    /// Change the display size; affects balloons spawned from now on
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
    }

    pub fn is_run_over(&self) -> bool {
        self.lives == 0
    }

    /// End the run immediately (player gave up)
    pub fn force_end(&mut self) {
        if self.lives > 0 {
            self.lives = 0;
            self.events.push(GameEvent::RunOver { score: self.score });
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add a balloon directly (spawn logic goes through `tick`)
    pub fn push_balloon(&mut self, balloon: Balloon) {
        self.balloons.push(balloon);
    }

    pub(crate) fn lose_life(&mut self) {
        if self.lives == 0 {
            return;
        }
        self.lives -= 1;
        self.events.push(GameEvent::LifeLost {
            remaining: self.lives,
        });
        if self.lives == 0 {
            self.events.push(GameEvent::RunOver { score: self.score });
        }
    }

    pub(crate) fn burst_at(&mut self, pos: Vec2, color: Color) {
        let count = self.config.tuning.particles_per_burst;
        super::particle::burst(&mut self.particles, &mut self.rng, pos, color, count);
    }
}
