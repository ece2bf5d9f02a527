//! Round state and game modes
//!
//! All state owned by a round lives here. It is rebuilt from scratch by
//! `GameState::initialize`, which is also the only place the RNG is reseeded.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Bullet, Enemy, Fish, GainEffect, Leaf, SplashEffect};
use super::spawner::layout_leaves;
use crate::audio::SoundCue;
use crate::ranking::RankingEntry;
use crate::telemetry::{TelemetryEvent, TouchLog};

/// Current game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Waiting for the first press
    Title,
    /// Round in progress (including the lead-in countdown)
    Playing,
    /// Round over, score shown
    GameOver,
    /// Leaderboard shown
    Ranking,
}

/// Where round seeds come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Every round uses this seed (tests, replays)
    Fixed(u64),
    /// Seed from the wall clock at round initialization
    WallClock,
}

impl SeedPolicy {
    pub fn next_seed(&self) -> u64 {
        match self {
            SeedPolicy::Fixed(seed) => *seed,
            SeedPolicy::WallClock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        }
    }
}

/// Side effects requested by the simulation, drained by the session after each tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Play a sound cue
    Sound(SoundCue),
    /// Emit a telemetry event
    Telemetry(TelemetryEvent),
    /// A new round was set up with this seed
    RoundInitialized { seed: u64 },
    /// The round timer ran out; submit this score and fetch the ranking
    RoundFinished { score: u32 },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed_policy: SeedPolicy,
    /// Seed of the current round
    pub seed: u64,
    /// Round RNG; every stochastic decision draws from it
    pub rng: Pcg32,
    pub mode: GameMode,
    /// Ticks since entering the current mode
    pub mode_ticks: u64,
    /// Latest pointer position (screen space)
    pub pointer: DVec2,
    /// Round timer; stays 0 during the lead-in
    pub time_ticks: u64,
    pub score: u32,
    /// Latest ranking received from the score service (empty if none)
    pub ranking: Vec<RankingEntry>,
    pub fish: Fish,
    pub bullets: Vec<Bullet>,
    pub splashes: Vec<SplashEffect>,
    pub enemies: Vec<Enemy>,
    pub gains: Vec<GainEffect>,
    pub leaves: Vec<Leaf>,
    pub touch_log: TouchLog,
    /// Pending side effects for the session
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state and initialize the first round
    pub fn new(seed_policy: SeedPolicy) -> Self {
        let seed = seed_policy.next_seed();
        let mut state = Self {
            seed_policy,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Title,
            mode_ticks: 0,
            pointer: DVec2::ZERO,
            time_ticks: 0,
            score: 0,
            ranking: Vec::new(),
            fish: Fish::default(),
            bullets: Vec::new(),
            splashes: Vec::new(),
            enemies: Vec::new(),
            gains: Vec::new(),
            leaves: Vec::new(),
            touch_log: TouchLog::default(),
            events: Vec::new(),
        };
        state.initialize();
        state
    }

    /// Reset everything for a new round and return to the title screen
    pub fn initialize(&mut self) {
        let seed = self.seed_policy.next_seed();
        log::info!("Initializing round with seed {}", seed);

        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.ranking.clear();
        self.fish = Fish::default();
        self.bullets.clear();
        self.splashes.clear();
        self.enemies.clear();
        self.gains.clear();
        self.time_ticks = 0;
        self.leaves = layout_leaves(&mut self.rng);

        self.events.push(GameEvent::RoundInitialized { seed });
        self.set_mode(GameMode::Title);
    }

    /// Enter a mode, restarting its tick counter
    pub fn set_mode(&mut self, mode: GameMode) {
        log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.mode_ticks = 0;
    }

    /// Queue a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    /// Queue a telemetry event
    pub fn report(&mut self, event: TelemetryEvent) {
        self.events.push(GameEvent::Telemetry(event));
    }

    /// Take all pending side effects
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Is the round timer running (lead-in finished)
    #[inline]
    pub fn timer_running(&self) -> bool {
        self.time_ticks > 0
    }

    /// Whole seconds left on the round timer, rounded up
    pub fn seconds_left(&self) -> u64 {
        use crate::consts::{FINISH_TIME_TICKS, TICKS_PER_SECOND};
        FINISH_TIME_TICKS
            .saturating_sub(self.time_ticks)
            .div_ceil(TICKS_PER_SECOND)
    }

    /// Whole seconds left in the lead-in countdown, rounded up
    pub fn lead_in_seconds_left(&self) -> u64 {
        use crate::consts::{LEAD_IN_TICKS, TICKS_PER_SECOND};
        LEAD_IN_TICKS
            .saturating_sub(self.mode_ticks)
            .div_ceil(TICKS_PER_SECOND)
    }
}
