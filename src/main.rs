//! Balloon Popper headless runner
//!
//! Plays one run with a simple autoplay bot, no window or audio, and
//! records the result in the high score file like an interactive session.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use balloon_popper::audio::AudioManager;
use balloon_popper::consts::SIM_DT_MS;
use balloon_popper::persistence::ConfigDir;
use balloon_popper::sim::{Balloon, BalloonState};
use balloon_popper::ui::{self, MenuButton};
use balloon_popper::{Driver, Flow, InputEvent, Screen};

#[derive(Debug, Parser)]
#[command(version, about = "Play a headless Balloon Popper run with an autoplay bot")]
struct Args {
    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Chance that a bot click lands on its target (0.0 - 1.0)
    #[arg(long, default_value_t = 0.85)]
    accuracy: f64,
    /// Time between bot clicks (ms)
    #[arg(long, default_value_t = 350.0)]
    reaction_ms: f32,
    /// Master volume handed to the audio backend (0.0 - 1.0)
    #[arg(long, default_value_t = 0.8)]
    volume: f32,
    /// Silence all sound effects
    #[arg(long)]
    mute: bool,
    /// Directory holding settings, tuning and the high score
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

/// Remaining pulse time, or infinity for growing balloons
fn urgency(balloon: &Balloon) -> f32 {
    match balloon.state {
        BalloonState::Pulsing { countdown_ms, .. } => countdown_ms,
        _ => f32::INFINITY,
    }
}

/// Aim at the balloon closest to bursting, falling back to the biggest one
fn pick_target(balloons: &[Balloon]) -> Option<Vec2> {
    balloons
        .iter()
        .min_by(|a, b| {
            urgency(a)
                .total_cmp(&urgency(b))
                .then(b.radius.total_cmp(&a.radius))
        })
        .map(|b| b.pos)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let config_dir = args
        .config_dir
        .map(ConfigDir::new)
        .unwrap_or_else(ConfigDir::from_env);

    log::info!("Balloon Popper {} (headless) seed {seed}", balloon_popper::VERSION);

    let mut audio = AudioManager::default();
    audio.set_master_volume(args.volume);
    audio.set_muted(args.mute);
    let mut driver = Driver::new(&config_dir, seed, audio);
    let mut bot_rng = Pcg32::seed_from_u64(seed ^ 0x5eed_b0b);

    let width = driver.state().config.width;
    let play = ui::menu_layout(width)
        .into_iter()
        .find(|b| b.kind == MenuButton::Play)
        .map(|b| b.hit_rect.center());
    let Some(play) = play else {
        log::error!("Menu has no play button");
        return;
    };
    driver.frame(0.0, &[InputEvent::Click { x: play.x, y: play.y }]);

    let limit_ms = args.seconds.max(0.0) * 1000.0;
    let mut elapsed_ms = 0.0;
    let mut next_click_ms = args.reaction_ms;

    while driver.screen() == Screen::Playing {
        let mut events = Vec::new();
        if elapsed_ms >= limit_ms {
            log::info!("Time limit reached, ending run");
            events.push(InputEvent::Escape);
        } else if elapsed_ms >= next_click_ms {
            next_click_ms += args.reaction_ms;
            if let Some(target) = pick_target(&driver.state().balloons) {
                let aim = if bot_rng.random_bool(args.accuracy.clamp(0.0, 1.0)) {
                    target
                } else {
                    target + Vec2::new(bot_rng.random_range(-90.0..90.0), 90.0)
                };
                events.push(InputEvent::Click { x: aim.x, y: aim.y });
            }
        }

        if driver.frame(SIM_DT_MS, &events) == Flow::Exit {
            return;
        }
        elapsed_ms += SIM_DT_MS;
    }

    println!(
        "score {}  high score {}  time {:.1}s",
        driver.last_score(),
        driver.high_score(),
        elapsed_ms / 1000.0
    );
    driver.frame(0.0, &[InputEvent::Quit]);
}
