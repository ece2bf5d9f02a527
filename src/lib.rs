//! Archerfish - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projection, physics, collisions, game modes)
//! - `render`: Draw-command composition for an external 2D surface
//! - `audio`: Sound cue routing
//! - `telemetry`: Structured play events and touch logging
//! - `ranking`: Score submission and background ranking fetch
//! - `game`: Session object wiring the simulation to its collaborators

pub mod audio;
pub mod game;
pub mod ranking;
pub mod render;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f64 = 640.0;
    pub const SCREEN_HEIGHT: f64 = 480.0;

    /// Camera focal length
    pub const CAMERA_F: f64 = 50.0;
    /// Camera height above the water line
    pub const CAMERA_HEIGHT: f64 = 120.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f64 = 0.5;

    /// The fish sits at the camera focal plane, right on the water line
    pub const FISH_X: f64 = 0.0;
    pub const FISH_Y: f64 = 0.0;
    pub const FISH_Z: f64 = CAMERA_F;
    /// Press radius around the fish that starts aiming (screen pixels)
    pub const TOUCHABLE_RADIUS: f64 = 50.0;

    pub const BULLET_RADIUS: f64 = 10.0;
    /// Depth velocity of every bullet
    pub const BULLET_VZ: f64 = 3.0;
    /// Bullet speed for a drag spanning the whole area below the fish
    pub const BULLET_MAX_SPEED: f64 = 40.0;

    pub const NORMAL_ENEMY_RADIUS: f64 = 40.0;
    pub const DIZZY_ENEMY_RADIUS: f64 = 35.0;
    pub const SHY_ENEMY_RADIUS: f64 = 30.0;

    /// Scaffold lanes (screen y), lowest first
    pub const NORMAL_LANE_Y: f64 = SCREEN_HEIGHT / 2.0 - 50.0;
    pub const DIZZY_LANE_Y: f64 = NORMAL_LANE_Y - 70.0;
    pub const SHY_LANE_Y: f64 = DIZZY_LANE_Y - 70.0;

    /// Depth of the scaffold
    pub const ENEMY_Z: f64 = 200.0;
    /// Enemies enter this far outside the screen edge
    pub const ENEMY_ENTRY_MARGIN: f64 = 50.0;

    /// Countdown before the round timer starts
    pub const LEAD_IN_TICKS: u64 = 3 * TICKS_PER_SECOND;
    /// Round length
    pub const FINISH_TIME_TICKS: u64 = 60 * TICKS_PER_SECOND;
    /// Minimum time in GameOver/Ranking before a press is accepted
    pub const MODE_COOLDOWN_TICKS: u64 = 60;

    /// Spawner cadence
    pub const SPAWN_INTERVAL_TICKS: u64 = 60;

    /// Particles per splash burst
    pub const SPLASH_BURST: usize = 5;
    /// Splash particles are dropped once this far below the water line
    pub const SPLASH_FLOOR_Y: f64 = 100.0;

    pub const GAIN_EFFECT_TICKS: u64 = 60;
    pub const GAIN_EFFECT_AMPLITUDE: f64 = 30.0;

    /// Fish sprite height; the mouth splash starts at its top edge
    pub const FISH_SPRITE_HEIGHT: f64 = 50.0;
}
