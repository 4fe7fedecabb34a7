//! Decorative burst particles
//!
//! Particles never affect gameplay. They drift at a constant per-tick
//! velocity and count down a fixed number of ticks; the engine drops them
//! once `life` reaches zero.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Color;

/// A single burst particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Displacement per tick (pixels)
    pub vel: Vec2,
    pub color: Color,
    pub radius: f32,
    /// Ticks remaining
    pub life: i32,
}

impl Particle {
    /// Spawn a particle at `pos` with random drift, size and lifetime
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, color: Color) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-2.0..=2.0)),
            color,
            radius: rng.random_range(2..=4) as f32,
            life: rng.random_range(20..=40),
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= 1;
    }

    /// Whether the particle should still be drawn
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.life > 0
    }
}

/// Emit a burst of `count` particles at a point
pub fn burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: Color,
    count: usize,
) {
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle::spawn(rng, pos, color));
    }
}
