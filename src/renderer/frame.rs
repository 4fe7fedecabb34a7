//! Per-frame draw lists handed to the external renderer

use crate::settings::Settings;
use crate::sim::{Color, GameState};
use crate::ui::{self, Button, MenuButton, SettingsButton};

use super::instance::{CircleInstance, colors, rgba};

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub lives_color: Color,
}

/// Everything needed to draw one gameplay frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDraw {
    pub background: Color,
    pub text_color: Color,
    pub antialias: bool,
    /// Balloons in insertion order
    pub balloons: Vec<CircleInstance>,
    /// Particles drawn over balloons
    pub particles: Vec<CircleInstance>,
    pub hud: Hud,
}

impl FrameDraw {
    pub fn build(state: &GameState, settings: &Settings) -> Self {
        let balloons = state
            .balloons
            .iter()
            .filter(|b| b.is_alive())
            .map(|b| CircleInstance::new(b.pos.to_array(), b.radius, 0.0, rgba(b.color)))
            .collect();

        let particles = state
            .particles
            .iter()
            .filter(|p| p.is_visible())
            .map(|p| CircleInstance::new(p.pos.to_array(), p.radius, p.life as f32, rgba(p.color)))
            .collect();

        Self {
            background: background(settings),
            text_color: text_color(settings),
            antialias: settings.antialias,
            balloons,
            particles,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                lives_color: colors::LIVES,
            },
        }
    }
}

/// Main menu contents
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub background: Color,
    pub text_color: Color,
    pub title: &'static str,
    pub button_color: Color,
    pub buttons: Vec<Button<MenuButton>>,
    pub high_score: u64,
    pub last_score: u64,
    pub version: &'static str,
}

/// Settings screen contents
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub background: Color,
    pub text_color: Color,
    pub button_color: Color,
    pub buttons: Vec<Button<SettingsButton>>,
}

impl MenuView {
    pub fn build(settings: &Settings, width: u32, high_score: u64, last_score: u64) -> Self {
        Self {
            background: background(settings),
            text_color: text_color(settings),
            title: "BALLOON POPPER",
            button_color: colors::BUTTON,
            buttons: ui::menu_layout(width),
            high_score,
            last_score,
            version: crate::VERSION,
        }
    }
}

impl SettingsView {
    pub fn build(settings: &Settings, width: u32) -> Self {
        Self {
            background: background(settings),
            text_color: text_color(settings),
            button_color: colors::BUTTON,
            buttons: ui::settings_layout(width, settings),
        }
    }
}

fn background(settings: &Settings) -> Color {
    if settings.dark_mode {
        colors::BACKGROUND_DARK
    } else {
        colors::BACKGROUND_LIGHT
    }
}

fn text_color(settings: &Settings) -> Color {
    if settings.dark_mode {
        colors::TEXT_LIGHT
    } else {
        colors::TEXT_DARK
    }
}
