//! Menu and settings screen layout
//!
//! Only geometry and labels live here: the renderer draws the buttons and
//! the driver hit-tests clicks against the same rectangles.

use glam::Vec2;

use crate::settings::{Resolution, Settings};

pub const BUTTON_WIDTH: f32 = 220.0;
pub const BUTTON_HEIGHT: f32 = 30.0;
/// Clickable padding around each button label (x, y)
pub const BUTTON_INFLATE: Vec2 = Vec2::new(20.0, 10.0);

const MENU_FIRST_ROW_Y: f32 = 250.0;
const SETTINGS_FIRST_ROW_Y: f32 = 150.0;
const ROW_SPACING: f32 = 50.0;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Grow by `amount` in total, keeping the center
    pub fn inflate(&self, amount: Vec2) -> Self {
        Self {
            min: self.min - amount / 2.0,
            size: self.size + amount,
        }
    }

    /// Half-open containment, matching pixel hit tests
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.min + self.size;
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Settings,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsButton {
    Resolution(Resolution),
    Fullscreen,
    Antialias,
    DarkMode,
    Back,
}

/// A laid-out button
#[derive(Debug, Clone, PartialEq)]
pub struct Button<K> {
    pub kind: K,
    pub label: String,
    /// Label area
    pub rect: Rect,
    /// Clickable (and drawn) area
    pub hit_rect: Rect,
}

impl<K> Button<K> {
    fn row(kind: K, label: impl Into<String>, screen_width: u32, y: f32) -> Self {
        let x = (screen_width / 2) as f32 - BUTTON_WIDTH / 2.0;
        let rect = Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT);
        Self {
            kind,
            label: label.into(),
            rect,
            hit_rect: rect.inflate(BUTTON_INFLATE),
        }
    }
}

/// Find the first button under `point`
pub fn button_at<K: Copy>(buttons: &[Button<K>], point: Vec2) -> Option<K> {
    buttons
        .iter()
        .find(|b| b.hit_rect.contains(point))
        .map(|b| b.kind)
}

/// Main menu buttons, centered horizontally
pub fn menu_layout(screen_width: u32) -> Vec<Button<MenuButton>> {
    [
        (MenuButton::Play, "New game"),
        (MenuButton::Settings, "Settings"),
        (MenuButton::Quit, "Quit"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (kind, label))| {
        Button::row(kind, label, screen_width, MENU_FIRST_ROW_Y + i as f32 * ROW_SPACING)
    })
    .collect()
}

fn checkbox(checked: bool, label: &str) -> String {
    format!("{} {label}", if checked { "[X]" } else { "[ ]" })
}

/// Settings screen buttons; toggle labels reflect the current values
pub fn settings_layout(screen_width: u32, settings: &Settings) -> Vec<Button<SettingsButton>> {
    let mut rows: Vec<(SettingsButton, String)> = Resolution::ALL
        .into_iter()
        .map(|res| (SettingsButton::Resolution(res), res.as_str().to_string()))
        .collect();
    rows.push((
        SettingsButton::Fullscreen,
        checkbox(settings.fullscreen, "Fullscreen"),
    ));
    rows.push((
        SettingsButton::Antialias,
        checkbox(settings.antialias, "Antialiasing"),
    ));
    rows.push((
        SettingsButton::DarkMode,
        checkbox(settings.dark_mode, "Dark Mode"),
    ));
    rows.push((SettingsButton::Back, "Back".to_string()));

    rows.into_iter()
        .enumerate()
        .map(|(i, (kind, label))| {
            Button::row(
                kind,
                label,
                screen_width,
                SETTINGS_FIRST_ROW_Y + i as f32 * ROW_SPACING,
            )
        })
        .collect()
}
