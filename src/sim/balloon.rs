//! Balloon entity and its lifecycle
//!
//! A balloon grows at a fixed rate until it reaches its maximum radius,
//! then pulses (radius oscillation plus color flicker) for a fixed
//! duration before bursting on its own. Bursting unpopped costs a life.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Color;
use super::state::GameConfig;
use crate::tuning::Tuning;

/// Amplitude of the pulse oscillation relative to the max radius
pub const PULSE_AMPLITUDE: f32 = 0.05;
/// Divisor applied to the simulation clock inside the pulse sine
pub const PULSE_PERIOD_DIVISOR_MS: f64 = 100.0;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BalloonState {
    /// Radius increasing toward the cap
    Growing,
    /// At full size; bursts when `countdown_ms` runs out
    Pulsing { countdown_ms: f32, blink_ms: f32 },
    /// Burst on its own
    Removed,
}

/// Result of a single balloon update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonTransition {
    None,
    StartedPulsing,
    Expired,
}

/// A clickable target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth_rate: f32,
    pub color: Color,
    pub state: BalloonState,
}

impl Balloon {
    pub fn new(pos: Vec2, radius: f32, max_radius: f32, growth_rate: f32, color: Color) -> Self {
        Self {
            pos,
            radius,
            max_radius,
            growth_rate,
            color,
            state: BalloonState::Growing,
        }
    }

    /// Spawn a balloon at a random on-screen position, sized for the display
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig, growth_multiplier: f32) -> Self {
        let margin = 50;
        let x = rng.random_range(margin..=(config.width as i32 - margin).max(margin));
        let y = rng.random_range(margin..=(config.height as i32 - margin).max(margin));
        let color = [
            rng.random_range(100..=200),
            rng.random_range(100..=200),
            rng.random_range(100..=200),
        ];

        Self::new(
            Vec2::new(x as f32, y as f32),
            config.scaled_px(10.0),
            config.scaled_px(60.0),
            config.tuning.initial_growth * growth_multiplier,
            color,
        )
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !matches!(self.state, BalloonState::Removed)
    }

    #[inline]
    pub fn is_pulsing(&self) -> bool {
        matches!(self.state, BalloonState::Pulsing { .. })
    }

    /// Advance the state machine by `dt_ms`.
    ///
    /// `now_ms` is the simulation clock; the pulse oscillation follows it
    /// rather than the countdown.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt_ms: f32,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> BalloonTransition {
        match self.state {
            BalloonState::Growing => {
                self.radius += self.growth_rate * dt_ms / tuning.reference_tick_ms;
                if self.radius >= self.max_radius {
                    self.radius = self.max_radius;
                    self.state = BalloonState::Pulsing {
                        countdown_ms: tuning.pulse_duration_ms,
                        blink_ms: 0.0,
                    };
                    return BalloonTransition::StartedPulsing;
                }
                BalloonTransition::None
            }
            BalloonState::Pulsing {
                mut countdown_ms,
                mut blink_ms,
            } => {
                countdown_ms -= dt_ms;
                let phase = (now_ms / PULSE_PERIOD_DIVISOR_MS).sin() as f32;
                self.radius = self.max_radius * (1.0 + PULSE_AMPLITUDE * phase);

                blink_ms += dt_ms;
                if blink_ms >= tuning.blink_interval_ms {
                    self.color = [
                        rng.random_range(100..=255),
                        rng.random_range(100..=255),
                        rng.random_range(100..=255),
                    ];
                    blink_ms = 0.0;
                }

                if countdown_ms <= 0.0 {
                    self.state = BalloonState::Removed;
                    return BalloonTransition::Expired;
                }
                self.state = BalloonState::Pulsing {
                    countdown_ms,
                    blink_ms,
                };
                BalloonTransition::None
            }
            BalloonState::Removed => BalloonTransition::None,
        }
    }

    /// Whether a click at `point` lands on this balloon
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.is_alive() && self.pos.distance(point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn test_balloon() -> Balloon {
        Balloon::new(Vec2::new(100.0, 100.0), 10.0, 60.0, 0.3, [150, 150, 150])
    }

    #[test]
    fn grows_by_rate_over_reference_tick() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut b = test_balloon();
        b.update(32.0, 32.0, &tuning, &mut rng);
        assert!((b.radius - 10.6).abs() < 1e-4);
        assert_eq!(b.state, BalloonState::Growing);
    }

    #[test]
    fn starts_pulsing_at_max_radius() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut b = Balloon::new(Vec2::ZERO, 59.9, 60.0, 0.3, [150, 150, 150]);
        let t = b.update(16.0, 16.0, &tuning, &mut rng);
        assert_eq!(t, BalloonTransition::StartedPulsing);
        assert_eq!(b.radius, 60.0);
        assert!(b.is_pulsing());
    }

    #[test]
    fn expires_after_pulse_duration() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut b = Balloon::new(Vec2::ZERO, 60.0, 60.0, 0.3, [150, 150, 150]);
        let mut now = 0.0;
        assert_eq!(b.update(1.0, now, &tuning, &mut rng), BalloonTransition::StartedPulsing);

        for _ in 0..19 {
            now += 100.0;
            assert_eq!(b.update(100.0, now, &tuning, &mut rng), BalloonTransition::None);
        }
        now += 100.0;
        assert_eq!(b.update(100.0, now, &tuning, &mut rng), BalloonTransition::Expired);
        assert!(!b.is_alive());
        // Removed is terminal
        assert_eq!(b.update(100.0, now, &tuning, &mut rng), BalloonTransition::None);
    }

    #[test]
    fn blink_recolors_after_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut b = Balloon::new(Vec2::ZERO, 60.0, 60.0, 0.3, [1, 1, 1]);
        b.update(1.0, 0.0, &tuning, &mut rng);
        b.update(50.0, 50.0, &tuning, &mut rng);
        assert_eq!(b.color, [1, 1, 1]);
        b.update(50.0, 100.0, &tuning, &mut rng);
        assert!(b.color.iter().all(|&c| c >= 100));
        match b.state {
            BalloonState::Pulsing { blink_ms, .. } => assert_eq!(blink_ms, 0.0),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn hit_test_uses_current_radius() {
        let b = test_balloon();
        assert!(b.hit_test(Vec2::new(110.0, 100.0)));
        assert!(b.hit_test(Vec2::new(106.0, 108.0)));
        assert!(!b.hit_test(Vec2::new(110.1, 100.0)));

        let mut removed = test_balloon();
        removed.state = BalloonState::Removed;
        assert!(!removed.hit_test(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn spawn_scales_with_display() {
        let mut rng = Pcg32::seed_from_u64(11);
        let hd = GameConfig::new(1280, 720, Tuning::default());
        let b = Balloon::spawn(&mut rng, &hd, 2.0);
        assert_eq!(b.radius, 6.0);
        assert_eq!(b.max_radius, 40.0);
        assert!((b.growth_rate - 0.6).abs() < 1e-6);
        assert!((50.0..=1230.0).contains(&b.pos.x));
        assert!((50.0..=670.0).contains(&b.pos.y));
        assert!(b.color.iter().all(|&c| (100..=200).contains(&c)));
    }

    proptest! {
        #[test]
        fn radius_bounds_hold(
            dts in prop::collection::vec(1.0f32..60.0, 1..400),
            growth in 0.05f32..3.0,
            seed in any::<u64>(),
        ) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut b = Balloon::new(Vec2::ZERO, 10.0, 60.0, growth, [150, 150, 150]);
            let mut now = 0.0f64;
            let mut pulse_started = 0;
            let mut pulse_elapsed = 0.0f32;

            for dt in dts {
                now += dt as f64;
                let before = b.radius;
                let was_growing = b.state == BalloonState::Growing;
                let t = b.update(dt, now, &tuning, &mut rng);

                if was_growing {
                    prop_assert!(b.radius >= before);
                    prop_assert!(b.radius <= b.max_radius);
                } else if b.is_pulsing() {
                    pulse_elapsed += dt;
                    prop_assert!(b.radius <= b.max_radius * 1.05 + 1e-3);
                }

                match t {
                    BalloonTransition::StartedPulsing => {
                        pulse_started += 1;
                        prop_assert_eq!(b.radius, b.max_radius);
                    }
                    BalloonTransition::Expired => {
                        pulse_elapsed += dt;
                        prop_assert!(pulse_elapsed >= tuning.pulse_duration_ms - 1e-2);
                        break;
                    }
                    BalloonTransition::None => {
                        if b.is_pulsing() {
                            prop_assert!(pulse_elapsed < tuning.pulse_duration_ms + 1e-2);
                        }
                    }
                }
            }
            prop_assert!(pulse_started <= 1);
        }
    }
}
