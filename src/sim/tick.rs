//! Fixed timestep simulation tick
//!
//! Core game loop that advances the round deterministically. Side effects
//! (sound cues, telemetry, score submission) are queued on `GameState::events`
//! for the session to carry out.

use glam::{DVec2, DVec3};

use super::aim::{bullet_from_release, hold_position, touches_fish};
use super::collision::resolve_hits;
use super::entities::SplashEffect;
use super::projection::to_screen;
use super::spawner::spawn_enemies;
use super::state::{GameEvent, GameMode, GameState};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::telemetry::{HEARTBEAT_TICKS, TelemetryEvent};

/// Splash thrown up by the fish when it shoots
const SHOT_SPLASH_SPEED: DVec2 = DVec2::new(5.0, 10.0);
/// Splash where a bullet hits the water
const BULLET_SPLASH_SPEED: DVec2 = DVec2::new(10.0, 10.0);
/// Splash where an enemy hits the water
const ENEMY_SPLASH_SPEED: DVec2 = DVec2::new(15.0, 15.0);

/// Normalized pointer input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// A press started this tick
    pub just_pressed: bool,
    /// A press ended this tick
    pub just_released: bool,
    /// A press is being held
    pub pressed: bool,
    /// Pointer position in screen coordinates
    pub pointer: DVec2,
}

impl TickInput {
    /// Press started at `pointer`
    pub fn press(pointer: DVec2) -> Self {
        Self {
            just_pressed: true,
            pressed: true,
            pointer,
            ..Default::default()
        }
    }

    /// Press held at `pointer`
    pub fn hold(pointer: DVec2) -> Self {
        Self {
            pressed: true,
            pointer,
            ..Default::default()
        }
    }

    /// Press ended at `pointer`
    pub fn release(pointer: DVec2) -> Self {
        Self {
            just_released: true,
            pointer,
            ..Default::default()
        }
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.mode_ticks += 1;
    state.pointer = input.pointer;

    if let Some(batch) = state.touch_log.record(state.mode_ticks, input) {
        state.report(TelemetryEvent::Touches(batch));
    }

    match state.mode {
        GameMode::Title => {
            if input.just_pressed {
                state.set_mode(GameMode::Playing);
                state.report(TelemetryEvent::StartGame);
                state.play(SoundCue::GameStart);
            }
        }

        GameMode::Playing => tick_playing(state, input),

        GameMode::GameOver => {
            if state.mode_ticks > MODE_COOLDOWN_TICKS && input.just_pressed {
                if state.ranking.is_empty() {
                    restart(state);
                } else {
                    state.set_mode(GameMode::Ranking);
                    state.play(SoundCue::Ranking);
                }
            }
        }

        GameMode::Ranking => {
            if state.ranking.is_empty()
                || (state.mode_ticks > MODE_COOLDOWN_TICKS && input.just_pressed)
            {
                restart(state);
            }
        }
    }
}

fn restart(state: &mut GameState) {
    state.initialize();
    state.play(SoundCue::BgmStop);
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    if state.mode_ticks % HEARTBEAT_TICKS == 0 {
        state.report(TelemetryEvent::Playing {
            ticks: state.mode_ticks,
            score: state.score,
        });
    }

    // Lead-in countdown, then the round timer
    if state.mode_ticks > LEAD_IN_TICKS {
        if state.time_ticks == 0 {
            state.play(SoundCue::TimeStart);
            state.play(SoundCue::BgmStart);
        }
        state.time_ticks += 1;
    }

    handle_aim(state, input);

    if state.mode_ticks % SPAWN_INTERVAL_TICKS == 0 {
        let arrivals = spawn_enemies(&mut state.rng);
        state.enemies.extend(arrivals);
    }

    state.fish.update();
    advance_bullets(state);
    advance_splashes(state);
    advance_enemies(state);
    advance_gains(state);

    let hits = resolve_hits(&mut state.bullets, &mut state.enemies, &mut state.gains);
    for hit in hits {
        state.score += hit.score;
        state.play(SoundCue::Hit);
    }

    if state.time_ticks >= FINISH_TIME_TICKS {
        finish_round(state);
    }
}

/// Press near the fish starts aiming; release fires
fn handle_aim(state: &mut GameState, input: &TickInput) {
    if state.timer_running() && input.just_pressed && touches_fish(input.pointer) {
        state.fish.aiming = true;
    }

    if state.fish.aiming && input.just_released {
        state.fish.aiming = false;

        let bullet = bullet_from_release(hold_position(input.pointer));
        state.bullets.push(bullet);
        state.play(SoundCue::Shoot);

        let burst = SplashEffect::burst(state.fish.mouth(), SHOT_SPLASH_SPEED, &mut state.rng);
        state.splashes.extend(burst);
    }
}

fn advance_bullets(state: &mut GameState) {
    let mut landed = Vec::new();
    state.bullets.retain_mut(|bullet| {
        bullet.update();
        if bullet.is_under_water() {
            landed.push(DVec3::new(bullet.pos.x, 0.0, bullet.pos.z));
            false
        } else {
            true
        }
    });

    for at in landed {
        let burst = SplashEffect::burst(at, BULLET_SPLASH_SPEED, &mut state.rng);
        state.splashes.extend(burst);
    }
}

fn advance_splashes(state: &mut GameState) {
    state.splashes.retain_mut(|splash| {
        splash.update();
        splash.is_alive()
    });
}

fn advance_enemies(state: &mut GameState) {
    let GameState {
        enemies,
        splashes,
        rng,
        events,
        ..
    } = state;

    // Bursts draw from the RNG in enemy order, interleaved with Dizzy decisions
    enemies.retain_mut(|enemy| {
        enemy.update(rng);

        if enemy.is_under_water() {
            let at = DVec3::new(enemy.pos.x, 0.0, enemy.pos.z);
            splashes.extend(SplashEffect::burst(at, ENEMY_SPLASH_SPEED, rng));
            events.push(GameEvent::Sound(SoundCue::Splash));
            return false;
        }

        on_screen(to_screen(enemy.pos).x)
    });
}

/// Horizontal visibility test for pruning enemies that walked off screen
#[inline]
fn on_screen(x: f64) -> bool {
    x > -ENEMY_ENTRY_MARGIN && x < SCREEN_WIDTH + ENEMY_ENTRY_MARGIN
}

fn advance_gains(state: &mut GameState) {
    state.gains.retain_mut(|gain| {
        gain.update();
        gain.is_alive()
    });
}

fn finish_round(state: &mut GameState) {
    log::info!("Round over, score {}", state.score);

    state.report(TelemetryEvent::GameOver { score: state.score });
    state.set_mode(GameMode::GameOver);
    state.play(SoundCue::GameOver);
    state.events.push(GameEvent::RoundFinished { score: state.score });
}
