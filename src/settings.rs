//! Game settings and preferences
//!
//! Loaded from an optional JSON file, then overridden by environment variables:
//! - `GAME_RAND_SEED`: fixed round seed (0 or unparsable means wall clock)
//! - `GAME_PLAYER_ID`: player identity for telemetry and the leaderboard
//! - `GAME_LOGGING`: `1` enables telemetry

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::sim::SeedPolicy;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed every round with this value instead of the clock
    pub fixed_seed: Option<u64>,
    /// Stable player identity; generated when absent
    pub player_id: Option<String>,
    /// Send telemetry events
    pub telemetry: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixed_seed: None,
            player_id: None,
            telemetry: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Apply `GAME_*` environment overrides
    pub fn apply_env(mut self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok());
        self
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = var("GAME_RAND_SEED") {
            self.fixed_seed = seed.trim().parse::<u64>().ok().filter(|&s| s != 0);
        }
        if let Some(id) = var("GAME_PLAYER_ID").filter(|id| !id.is_empty()) {
            self.player_id = Some(id);
        }
        if let Some(flag) = var("GAME_LOGGING") {
            self.telemetry = flag == "1";
        }
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        match self.fixed_seed {
            Some(seed) => SeedPolicy::Fixed(seed),
            None => SeedPolicy::WallClock,
        }
    }

    /// Push the audio preferences into an audio manager
    pub fn configure_audio(&self, audio: &mut AudioManager) {
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_volume(self.sfx_volume);
        audio.set_music_volume(self.music_volume);
        audio.set_muted(self.muted);
    }
}
