//! Archerfish headless runner
//!
//! Plays one scripted round against the in-memory score board and logs the
//! outcome. Pass a settings file path as the first argument (default
//! `archerfish.json`); `GAME_*` environment variables override it.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use glam::DVec2;

use archerfish::audio::AudioManager;
use archerfish::consts::*;
use archerfish::ranking::LocalScoreBoard;
use archerfish::sim::{GameMode, TickInput, anchor_on_screen};
use archerfish::telemetry::{BackgroundTelemetry, LogTelemetry, NullTelemetry, TelemetrySink};
use archerfish::{Game, Settings};

/// Ticks between scripted shots
const SHOT_INTERVAL_TICKS: u64 = 40;
/// Ticks the fish is held before release
const HOLD_TICKS: u64 = 12;
/// Drag offsets from the fish, cycled through shot by shot
const DRAGS: [(f64, f64); 6] = [
    (0.0, 120.0),
    (-60.0, 100.0),
    (60.0, 100.0),
    (-150.0, 80.0),
    (150.0, 80.0),
    (0.0, 60.0),
];
/// Give up waiting on the ranking after this many ticks
const RANKING_TIMEOUT_TICKS: u64 = 600;

fn main() {
    env_logger::init();
    log::info!("Archerfish (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "archerfish.json".to_string());
    let settings = Settings::load(&path).apply_env();

    let telemetry: Box<dyn TelemetrySink> = if settings.telemetry {
        Box::new(BackgroundTelemetry::spawn(LogTelemetry))
    } else {
        Box::new(NullTelemetry)
    };
    let board = Arc::new(LocalScoreBoard::new());
    let mut game = Game::new(settings, AudioManager::default(), telemetry, board.clone());

    log::info!("Round seed: {}", game.state().seed);
    game.update(&TickInput::press(anchor_on_screen()));

    let mut ticks = 0u64;
    while game.state().mode == GameMode::Playing {
        game.update(&scripted_input(ticks));
        ticks += 1;
    }
    log::info!("Final score: {}", game.state().score);

    // Let the submission land, then open the leaderboard
    let mut waited = 0;
    while game.ranking_pending() && waited < RANKING_TIMEOUT_TICKS {
        game.update(&TickInput::default());
        thread::sleep(Duration::from_millis(1));
        waited += 1;
    }
    for _ in 0..=MODE_COOLDOWN_TICKS {
        game.update(&TickInput::default());
    }
    game.update(&TickInput::press(DVec2::ZERO));

    if game.state().mode == GameMode::Ranking {
        for (i, entry) in game.state().ranking.iter().enumerate() {
            log::info!("#{} {} {}", i + 1, entry.player_id, entry.score);
        }
    } else {
        log::warn!("No ranking available");
    }
    log::info!("{} frame commands in the last frame", game.draw().len());
}

/// Press the fish, hold, then release along the next drag offset
fn scripted_input(ticks: u64) -> TickInput {
    // Nothing to shoot at until the lead-in is over and the first wave walks in
    let start = LEAD_IN_TICKS + SPAWN_INTERVAL_TICKS;
    if ticks < start {
        return TickInput::default();
    }

    let t = ticks - start;
    let phase = t % SHOT_INTERVAL_TICKS;
    let (dx, dy) = DRAGS[(t / SHOT_INTERVAL_TICKS) as usize % DRAGS.len()];
    let anchor = anchor_on_screen();
    let release = anchor + DVec2::new(dx, dy);

    match phase {
        0 => TickInput::press(anchor),
        p if p < HOLD_TICKS => TickInput::hold(anchor.lerp(release, p as f64 / HOLD_TICKS as f64)),
        p if p == HOLD_TICKS => TickInput::release(release),
        _ => TickInput::default(),
    }
}
