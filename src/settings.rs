//! Display settings and preferences
//!
//! Persisted as JSON next to the high score file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistenceError, atomic_write};

/// Named window resolution presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[serde(rename = "HD")]
    Hd,
    #[default]
    #[serde(rename = "FullHD")]
    FullHd,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::Hd,
        Resolution::FullHd,
        Resolution::TwoK,
        Resolution::FourK,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Hd => "HD",
            Resolution::FullHd => "FullHD",
            Resolution::TwoK => "2K",
            Resolution::FourK => "4K",
        }
    }

    /// Pixel dimensions (width, height)
    pub fn size(&self) -> (u32, u32) {
        match self {
            Resolution::Hd => (1280, 720),
            Resolution::FullHd => (1920, 1080),
            Resolution::TwoK => (2560, 1440),
            Resolution::FourK => (3840, 2160),
        }
    }
}

/// Player display preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub resolution: Resolution,
    pub fullscreen: bool,
    pub antialias: bool,
    pub dark_mode: bool,
}

impl Settings {
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn toggle_antialias(&mut self) {
        self.antialias = !self.antialias;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}

/// Settings file at a fixed path
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; anything unreadable falls back to defaults
    pub fn load(&self) -> Settings {
        let Ok(bytes) = fs::read(&self.path) else {
            log::info!("Using default settings");
            return Settings::default();
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", self.path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings {}: {e}", self.path.display());
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        let text = serde_json::to_string_pretty(settings).map_err(|source| {
            PersistenceError::Serialize {
                what: "settings",
                source,
            }
        })?;
        atomic_write(&self.path, text.as_bytes())?;
        log::info!("Settings saved");
        Ok(())
    }
}
