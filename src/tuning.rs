//! Data-driven game balance
//!
//! Every pacing constant lives here so a run can be rebalanced from a JSON
//! file without recompiling. Missing fields fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Minimum time between spawn attempts (ms)
    pub spawn_base_interval_ms: f32,
    /// Extra random delay added on top of the base interval (ms)
    pub spawn_jitter_ms: f32,
    /// Cap on simultaneously alive balloons
    pub max_balloons: usize,
    /// Growth per reference tick for a fresh balloon (before multiplier)
    pub initial_growth: f32,
    /// Frame length the growth rate is expressed against (ms)
    pub reference_tick_ms: f32,
    /// Difficulty ramp added to the growth multiplier on every update
    pub growth_ramp_per_update: f32,
    /// How long a balloon pulses before it bursts (ms)
    pub pulse_duration_ms: f32,
    /// Color flicker period while pulsing (ms)
    pub blink_interval_ms: f32,
    /// Lives at the start of a run
    pub max_lives: u32,
    /// Particles emitted per removed balloon
    pub particles_per_burst: usize,
    /// Score interval that triggers the board-clearing milestone
    pub milestone_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_base_interval_ms: 400.0,
            spawn_jitter_ms: 800.0,
            max_balloons: 10,
            initial_growth: 0.3,
            reference_tick_ms: 16.0,
            growth_ramp_per_update: 0.0001,
            pulse_duration_ms: 2000.0,
            blink_interval_ms: 100.0,
            max_lives: 5,
            particles_per_burst: 20,
            milestone_interval: 100,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            log::debug!("No tuning file at {}, using defaults", path.display());
            return Self::default();
        };
        let tuning: Tuning = match serde_json::from_str(&text) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning file {}: {e}", path.display());
                return Self::default();
            }
        };
        if let Err(field) = tuning.validate() {
            log::warn!(
                "Ignoring tuning file {}: invalid {field}",
                path.display()
            );
            return Self::default();
        }
        log::info!("Loaded tuning from {}", path.display());
        tuning
    }

    /// Check that every timing knob is usable by the simulation.
    ///
    /// Returns the name of the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        let non_negative = [
            ("spawn_base_interval_ms", self.spawn_base_interval_ms),
            ("spawn_jitter_ms", self.spawn_jitter_ms),
            ("initial_growth", self.initial_growth),
            ("growth_ramp_per_update", self.growth_ramp_per_update),
            ("pulse_duration_ms", self.pulse_duration_ms),
            ("blink_interval_ms", self.blink_interval_ms),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(name);
            }
        }
        if !self.reference_tick_ms.is_finite() || self.reference_tick_ms <= 0.0 {
            return Err("reference_tick_ms");
        }
        Ok(())
    }
}
