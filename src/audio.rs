//! Audio triggers
//!
//! The core decides *when* a sound plays; the platform decides *how*.
//! Playback goes through an [`AudioSink`] supplied by the host.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player popped a balloon
    Pop,
    /// Balloon burst on its own
    Expire,
    /// Menu or settings button pressed
    Click,
}

impl SoundEffect {
    /// Asset the host should play. Pops and expiries share one sample.
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Pop | SoundEffect::Expire => "balloon-pop",
            SoundEffect::Click => "click",
        }
    }

    /// Sound for a simulation event, if it has one.
    ///
    /// Milestone sweeps are silent; only the clicked balloon pops audibly.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BalloonPopped { swept: false, .. } => Some(SoundEffect::Pop),
            GameEvent::BalloonExpired { .. } => Some(SoundEffect::Expire),
            _ => None,
        }
    }
}

/// Host-provided playback backend
pub trait AudioSink {
    fn play(&mut self, asset: &'static str, volume: f32);
}

/// Sink that drops everything (headless runs)
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, _asset: &'static str, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect.asset(), vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<(&'static str, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, asset: &'static str, volume: f32) {
            self.0.borrow_mut().push((asset, volume));
        }
    }

    #[test]
    fn pop_and_expire_share_asset() {
        assert_eq!(SoundEffect::Pop.asset(), SoundEffect::Expire.asset());
        assert_ne!(SoundEffect::Click.asset(), SoundEffect::Pop.asset());
    }

    #[test]
    fn event_mapping() {
        let popped = GameEvent::BalloonPopped {
            pos: Vec2::ZERO,
            color: [0, 0, 0],
            swept: false,
        };
        let swept = GameEvent::BalloonPopped {
            pos: Vec2::ZERO,
            color: [0, 0, 0],
            swept: true,
        };
        let expired = GameEvent::BalloonExpired {
            pos: Vec2::ZERO,
            color: [0, 0, 0],
        };
        assert_eq!(SoundEffect::for_event(&popped), Some(SoundEffect::Pop));
        assert_eq!(SoundEffect::for_event(&swept), None);
        assert_eq!(SoundEffect::for_event(&expired), Some(SoundEffect::Expire));
        assert_eq!(SoundEffect::for_event(&GameEvent::RunOver { score: 1 }), None);
    }

    #[test]
    fn mute_and_volume() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.play(SoundEffect::Click);
        audio.set_muted(true);
        audio.play(SoundEffect::Pop);

        let played = recorder.0.borrow();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].0, "click");
        assert!((played[0].1 - 0.5).abs() < 1e-6);
    }
}
