//! Simulation step and click resolution
//!
//! Core game loop that advances the run by a frame's worth of time.

use glam::Vec2;
use rand::Rng;

use super::balloon::{Balloon, BalloonTransition};
use super::state::{GameEvent, GameState};

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, dt_ms: f32) {
    state.clock_ms += dt_ms as f64;

    // Spawn pacing: a fresh random threshold on every call
    state.spawn_timer_ms += dt_ms;
    let tuning = &state.config.tuning;
    let jitter = tuning.spawn_jitter_ms.max(0.0);
    let threshold = tuning.spawn_base_interval_ms + state.rng.random_range(0.0..=jitter);
    if state.spawn_timer_ms >= threshold {
        state.spawn_timer_ms = 0.0;
        if state.balloons.len() < state.config.tuning.max_balloons {
            let balloon = Balloon::spawn(&mut state.rng, &state.config, state.growth_multiplier);
            log::debug!(
                "Spawned balloon at ({}, {}) growth {:.4}",
                balloon.pos.x,
                balloon.pos.y,
                balloon.growth_rate
            );
            state.balloons.push(balloon);
        }
    }

    // Balloon lifecycles, in insertion order
    let now = state.clock_ms;
    let tuning = &state.config.tuning;
    let rng = &mut state.rng;
    let mut expired = Vec::new();
    state.balloons.retain_mut(|balloon| {
        if balloon.update(dt_ms, now, tuning, &mut *rng) == BalloonTransition::Expired {
            expired.push((balloon.pos, balloon.color));
            return false;
        }
        true
    });
    for (pos, color) in expired {
        state.lose_life();
        state.events.push(GameEvent::BalloonExpired { pos, color });
        state.burst_at(pos, color);
    }

    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0);

    // Difficulty ramps per update, not per elapsed time
    state.growth_multiplier += state.config.tuning.growth_ramp_per_update;
}

/// Resolve a click at `pos`. Returns true if a balloon was popped.
///
/// The first balloon in insertion order that contains the point wins.
/// Landing on a milestone score also pops every other balloon on screen,
/// each worth a point.
pub fn handle_click(state: &mut GameState, pos: Vec2) -> bool {
    let Some(index) = state.balloons.iter().position(|b| b.hit_test(pos)) else {
        return false;
    };

    let popped = state.balloons.remove(index);
    state.score += 1;
    state.events.push(GameEvent::BalloonPopped {
        pos: popped.pos,
        color: popped.color,
        swept: false,
    });

    let interval = state.config.tuning.milestone_interval;
    if interval > 0 && state.score % interval == 0 {
        log::debug!(
            "Milestone at {}: sweeping {} balloons",
            state.score,
            state.balloons.len()
        );
        state.lives += 1;
        state.events.push(GameEvent::Milestone { score: state.score });
        state.events.push(GameEvent::LifeGained { lives: state.lives });

        let swept = std::mem::take(&mut state.balloons);
        for balloon in swept {
            state.score += 1;
            state.events.push(GameEvent::BalloonPopped {
                pos: balloon.pos,
                color: balloon.color,
                swept: true,
            });
            state.burst_at(balloon.pos, balloon.color);
        }
    }

    state.burst_at(popped.pos, popped.color);
    true
}
