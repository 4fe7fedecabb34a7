//! Frame driver
//!
//! Owns the screen state machine (menu, play, settings), routes input
//! events, advances the simulation in fixed steps and handles run end.
//! The host calls [`Driver::frame`] once per rendered frame and draws
//! whatever [`Driver::view`] returns.

use glam::Vec2;

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::highscores::HighScoreStore;
use crate::persistence::ConfigDir;
use crate::renderer::{FrameDraw, MenuView, SettingsView};
use crate::settings::{Settings, SettingsStore};
use crate::sim::{GameConfig, GameState, handle_click, tick};
use crate::tuning::Tuning;
use crate::ui::{self, MenuButton, SettingsButton};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Settings,
}

/// Input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Left button pressed at a screen position
    Click { x: f32, y: f32 },
    Escape,
    /// Window closed
    Quit,
}

/// Whether the host should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Window mode the host should switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

/// What to draw this frame
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Menu(MenuView),
    Playing(FrameDraw),
    Settings(SettingsView),
}

pub struct Driver {
    state: GameState,
    settings: Settings,
    screen: Screen,
    accumulator_ms: f32,
    last_score: u64,
    high_scores: HighScoreStore,
    settings_store: SettingsStore,
    audio: AudioManager,
    pending_display: Option<DisplayMode>,
}

impl Driver {
    /// Load settings, tuning and high score from `config_dir` and open on the menu
    pub fn new(config_dir: &ConfigDir, seed: u64, audio: AudioManager) -> Self {
        let settings_store = SettingsStore::new(config_dir.settings_path());
        let high_scores = HighScoreStore::new(config_dir.high_score_path());
        let settings = settings_store.load();
        let tuning = Tuning::load_or_default(&config_dir.tuning_path());

        let (width, height) = settings.resolution.size();
        let mut state = GameState::new(GameConfig::new(width, height, tuning), seed);
        state.high_score = high_scores.load().score();
        log::info!(
            "Driver ready: {}x{} seed {seed}, high score {}",
            width,
            height,
            state.high_score
        );

        Self {
            state,
            settings,
            screen: Screen::Menu,
            accumulator_ms: 0.0,
            last_score: 0,
            high_scores,
            settings_store,
            audio,
            pending_display: Some(display_mode(&settings)),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_score(&self) -> u64 {
        self.last_score
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    /// Window change requested since the last call
    pub fn take_display_request(&mut self) -> Option<DisplayMode> {
        self.pending_display.take()
    }

    /// Process one frame: input first, then simulation
    pub fn frame(&mut self, dt_ms: f32, events: &[InputEvent]) -> Flow {
        for event in events {
            if self.handle_input(*event) == Flow::Exit {
                return Flow::Exit;
            }
        }

        if self.screen == Screen::Playing {
            // A run ended by input this frame is not simulated further
            if !self.state.is_run_over() {
                self.accumulator_ms += dt_ms.clamp(0.0, MAX_FRAME_MS);
                let mut substeps = 0;
                while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                    tick(&mut self.state, SIM_DT_MS);
                    self.accumulator_ms -= SIM_DT_MS;
                    substeps += 1;
                    if self.state.is_run_over() {
                        break;
                    }
                }
                self.flush_sounds();
            }

            if self.state.is_run_over() {
                self.end_run();
            }
        }
        Flow::Continue
    }

    /// Draw data for the active screen
    pub fn view(&self) -> View {
        let width = self.state.config.width;
        match self.screen {
            Screen::Menu => View::Menu(MenuView::build(
                &self.settings,
                width,
                self.state.high_score,
                self.last_score,
            )),
            Screen::Playing => View::Playing(FrameDraw::build(&self.state, &self.settings)),
            Screen::Settings => View::Settings(SettingsView::build(&self.settings, width)),
        }
    }

    fn handle_input(&mut self, event: InputEvent) -> Flow {
        if event == InputEvent::Quit {
            self.shutdown();
            return Flow::Exit;
        }

        match (self.screen, event) {
            (Screen::Menu, InputEvent::Click { x, y }) => {
                let buttons = ui::menu_layout(self.state.config.width);
                match ui::button_at(&buttons, Vec2::new(x, y)) {
                    Some(MenuButton::Play) => {
                        self.audio.play(SoundEffect::Click);
                        self.start_run();
                    }
                    Some(MenuButton::Settings) => {
                        self.audio.play(SoundEffect::Click);
                        self.screen = Screen::Settings;
                    }
                    Some(MenuButton::Quit) => {
                        self.audio.play(SoundEffect::Click);
                        self.shutdown();
                        return Flow::Exit;
                    }
                    None => {}
                }
            }
            (Screen::Menu, InputEvent::Escape) => {
                self.shutdown();
                return Flow::Exit;
            }
            (Screen::Playing, InputEvent::Click { x, y }) => {
                handle_click(&mut self.state, Vec2::new(x, y));
                self.flush_sounds();
            }
            (Screen::Playing, InputEvent::Escape) => {
                log::info!("Run abandoned at score {}", self.state.score);
                self.state.force_end();
            }
            (Screen::Settings, InputEvent::Click { x, y }) => {
                let buttons = ui::settings_layout(self.state.config.width, &self.settings);
                if let Some(button) = ui::button_at(&buttons, Vec2::new(x, y)) {
                    self.audio.play(SoundEffect::Click);
                    self.apply_settings_button(button);
                }
            }
            (Screen::Settings, InputEvent::Escape) | (_, InputEvent::Quit) => {}
        }
        Flow::Continue
    }

    fn apply_settings_button(&mut self, button: SettingsButton) {
        match button {
            SettingsButton::Resolution(resolution) => {
                self.settings.set_resolution(resolution);
                let (width, height) = resolution.size();
                self.state.set_display_size(width, height);
                self.pending_display = Some(display_mode(&self.settings));
            }
            SettingsButton::Fullscreen => {
                self.settings.toggle_fullscreen();
                self.pending_display = Some(display_mode(&self.settings));
            }
            SettingsButton::Antialias => self.settings.toggle_antialias(),
            SettingsButton::DarkMode => self.settings.toggle_dark_mode(),
            SettingsButton::Back => {
                self.save_settings();
                self.screen = Screen::Menu;
            }
        }
    }

    fn start_run(&mut self) {
        self.state.reset();
        self.accumulator_ms = 0.0;
        self.screen = Screen::Playing;
        log::info!("Run started");
    }

    fn end_run(&mut self) {
        let score = self.state.score;
        self.last_score = score;
        match self.high_scores.save(score) {
            Ok(true) => self.state.high_score = score,
            Ok(false) => self.state.high_score = self.high_scores.load().score(),
            Err(e) => log::warn!("Failed to save high score: {e}"),
        }
        log::info!(
            "Run over: score {score}, high score {}",
            self.state.high_score
        );
        self.state.drain_events();
        self.screen = Screen::Menu;
    }

    fn flush_sounds(&mut self) {
        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings_store.save(&self.settings) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    fn shutdown(&mut self) {
        log::info!("Shutting down");
        self.save_settings();
    }
}

fn display_mode(settings: &Settings) -> DisplayMode {
    let (width, height) = settings.resolution.size();
    DisplayMode {
        width,
        height,
        fullscreen: settings.fullscreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_util::unique_temp_dir;
    use crate::settings::Resolution;
    use crate::sim::{Balloon, BalloonState};
    use std::fs;

    fn center_of<K: Copy + PartialEq>(buttons: &[ui::Button<K>], kind: K) -> InputEvent {
        let button = buttons.iter().find(|b| b.kind == kind).unwrap();
        let c = button.hit_rect.center();
        InputEvent::Click { x: c.x, y: c.y }
    }

    fn driver(tag: &str) -> (ConfigDir, Driver) {
        let dir = ConfigDir::new(unique_temp_dir(tag));
        let driver = Driver::new(&dir, 42, AudioManager::default());
        (dir, driver)
    }

    fn start(driver: &mut Driver) {
        let play = center_of(&ui::menu_layout(driver.state().config.width), MenuButton::Play);
        driver.frame(0.0, &[play]);
        assert_eq!(driver.screen(), Screen::Playing);
    }

    #[test]
    fn opens_on_menu_with_display_request() {
        let (dir, mut driver) = driver("drv_open");
        assert_eq!(driver.screen(), Screen::Menu);
        assert_eq!(
            driver.take_display_request(),
            Some(DisplayMode {
                width: 1920,
                height: 1080,
                fullscreen: false
            })
        );
        assert_eq!(driver.take_display_request(), None);
        assert!(matches!(driver.view(), View::Menu(_)));
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn escape_ends_run_and_records_high_score() {
        let (dir, mut driver) = driver("drv_escape");
        start(&mut driver);
        driver.state_mut().score = 7;

        driver.frame(16.0, &[InputEvent::Escape]);

        assert_eq!(driver.screen(), Screen::Menu);
        assert_eq!(driver.last_score(), 7);
        assert_eq!(driver.high_score(), 7);
        assert_eq!(HighScoreStore::new(dir.high_score_path()).load().score(), 7);

        // A worse run keeps the old record
        start(&mut driver);
        driver.state_mut().score = 3;
        driver.frame(16.0, &[InputEvent::Escape]);
        assert_eq!(driver.last_score(), 3);
        assert_eq!(driver.high_score(), 7);
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn escape_stops_simulation_in_same_frame() {
        let (dir, mut driver) = driver("drv_escape_frame");
        start(&mut driver);
        // About to burst: a tick would expire it and cost a life
        let mut balloon = Balloon::new(Vec2::new(400.0, 400.0), 60.0, 60.0, 0.0, [150, 150, 150]);
        balloon.state = BalloonState::Pulsing {
            countdown_ms: 1.0,
            blink_ms: 0.0,
        };
        driver.state_mut().push_balloon(balloon);
        let clock = driver.state().clock_ms;

        driver.frame(100.0, &[InputEvent::Escape]);

        assert_eq!(driver.screen(), Screen::Menu);
        assert_eq!(driver.state().clock_ms, clock);
        assert_eq!(driver.state().balloons.len(), 1);
        assert!(driver.state().particles.is_empty());
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn escape_on_settings_is_ignored() {
        let (dir, mut driver) = driver("drv_settings_escape");
        let open = center_of(&ui::menu_layout(1920), MenuButton::Settings);
        driver.frame(0.0, &[open]);

        assert_eq!(driver.frame(0.0, &[InputEvent::Escape]), Flow::Continue);
        assert_eq!(driver.screen(), Screen::Settings);
        assert!(!dir.settings_path().exists());
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn clicks_during_play_pop_balloons() {
        let (dir, mut driver) = driver("drv_click");
        start(&mut driver);
        driver
            .state_mut()
            .push_balloon(Balloon::new(Vec2::new(400.0, 400.0), 30.0, 60.0, 0.0, [150, 150, 150]));

        driver.frame(0.0, &[InputEvent::Click { x: 410.0, y: 400.0 }]);

        assert_eq!(driver.state().score, 1);
        assert!(driver.state().events.is_empty());
        match driver.view() {
            View::Playing(frame) => {
                assert_eq!(frame.hud.score, 1);
                assert_eq!(frame.particles.len(), 20);
            }
            other => panic!("unexpected view {other:?}"),
        }
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn fixed_steps_per_frame() {
        let (dir, mut driver) = driver("drv_steps");
        start(&mut driver);

        driver.frame(40.0, &[]);
        let expected = 1.0 + 2.0 * driver.state().config.tuning.growth_ramp_per_update;
        assert!((driver.state().growth_multiplier - expected).abs() < 1e-6);

        // Long stalls are clamped
        driver.frame(10_000.0, &[]);
        assert!(driver.state().clock_ms < 200.0);
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn settings_screen_updates_and_persists() {
        let (dir, mut driver) = driver("drv_settings");
        driver.take_display_request();

        let open = center_of(&ui::menu_layout(1920), MenuButton::Settings);
        driver.frame(0.0, &[open]);
        assert_eq!(driver.screen(), Screen::Settings);

        let layout = ui::settings_layout(1920, driver.settings());
        let hd = center_of(&layout, SettingsButton::Resolution(Resolution::Hd));
        driver.frame(0.0, &[hd]);

        // Layout is now centered for the new width
        let layout = ui::settings_layout(1280, driver.settings());
        let dark = center_of(&layout, SettingsButton::DarkMode);
        driver.frame(0.0, &[dark]);

        assert_eq!(driver.settings().resolution, Resolution::Hd);
        assert!(driver.settings().dark_mode);
        assert_eq!(driver.state().config.width, 1280);
        assert_eq!(
            driver.take_display_request(),
            Some(DisplayMode {
                width: 1280,
                height: 720,
                fullscreen: false
            })
        );

        let back = center_of(&ui::settings_layout(1280, driver.settings()), SettingsButton::Back);
        driver.frame(0.0, &[back]);
        assert_eq!(driver.screen(), Screen::Menu);

        let reloaded = SettingsStore::new(dir.settings_path()).load();
        assert_eq!(reloaded.resolution, Resolution::Hd);
        assert!(reloaded.dark_mode);
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn quit_saves_settings_and_exits() {
        let (dir, mut driver) = driver("drv_quit");
        start(&mut driver);
        assert_eq!(driver.frame(16.0, &[InputEvent::Quit]), Flow::Exit);
        assert!(dir.settings_path().exists());
        fs::remove_dir_all(dir.root()).ok();
    }

    #[test]
    fn escape_on_menu_exits() {
        let (dir, mut driver) = driver("drv_menu_escape");
        assert_eq!(driver.frame(0.0, &[InputEvent::Escape]), Flow::Exit);
        fs::remove_dir_all(dir.root()).ok();
    }
}
