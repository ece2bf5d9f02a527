//! Game session
//!
//! Owns the simulation state and carries out the side effects it queues: sound
//! cues go to the audio manager, telemetry is stamped and sent, and finished
//! rounds are submitted to the score service in the background.

use std::sync::Arc;

use rand::Rng;

use crate::audio::AudioManager;
use crate::ranking::{FetchState, RankingFetch, ScoreService};
use crate::render::{DrawCommand, compose};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Fixed simulation step (seconds)
pub const SIM_DT: f64 = 1.0 / crate::consts::TICKS_PER_SECOND as f64;
/// Cap on ticks per rendered frame, so a stalled host doesn't spiral
const MAX_SUBSTEPS: u32 = 8;
/// Longest frame delta accepted by `advance`
const MAX_FRAME_DT: f64 = 0.25;

/// Random identifier for players and plays
pub fn random_id(rng: &mut impl Rng) -> String {
    format!("{:016x}", rng.random::<u64>())
}

/// A running game with its collaborators
pub struct Game {
    settings: Settings,
    player_id: String,
    play_id: String,
    state: GameState,
    audio: AudioManager,
    telemetry: Box<dyn TelemetrySink>,
    scores: Arc<dyn ScoreService>,
    fetch: Option<RankingFetch>,
    accumulator: f64,
}

impl Game {
    pub fn new(
        settings: Settings,
        mut audio: AudioManager,
        telemetry: Box<dyn TelemetrySink>,
        scores: Arc<dyn ScoreService>,
    ) -> Self {
        settings.configure_audio(&mut audio);

        let mut rng = rand::rng();
        let player_id = settings
            .player_id
            .clone()
            .unwrap_or_else(|| random_id(&mut rng));
        log::info!("Player {}", player_id);

        let state = GameState::new(settings.seed_policy());
        let mut game = Self {
            settings,
            player_id,
            play_id: random_id(&mut rng),
            state,
            audio,
            telemetry,
            scores,
            fetch: None,
            accumulator: 0.0,
        };
        game.dispatch_events();
        game
    }

    /// Run exactly one simulation tick
    pub fn update(&mut self, input: &TickInput) {
        self.poll_ranking();
        tick(&mut self.state, input);
        self.dispatch_events();
    }

    /// Run as many fixed ticks as `dt` seconds of wall time cover.
    ///
    /// Press/release edges are only delivered to the first tick of the frame.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f64, input: &TickInput) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.update(&input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            input.just_pressed = false;
            input.just_released = false;
        }
        substeps
    }

    /// Draw commands for the current frame
    pub fn draw(&self) -> Vec<DrawCommand> {
        compose(&self.state, &self.player_id)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Identifier of the current round
    pub fn play_id(&self) -> &str {
        &self.play_id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A score submission is still in flight
    pub fn ranking_pending(&self) -> bool {
        self.fetch
            .as_ref()
            .is_some_and(|f| *f.state() == FetchState::Pending)
    }

    /// Copy a finished ranking fetch into the round state
    fn poll_ranking(&mut self) {
        let resolved = match self.fetch.as_mut().map(RankingFetch::poll) {
            None | Some(FetchState::Pending) => return,
            Some(FetchState::Ready(ranking)) => Some(ranking.clone()),
            Some(FetchState::Unavailable) => None,
        };
        self.fetch = None;
        if let Some(ranking) = resolved {
            self.state.ranking = ranking;
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(cue) => self.audio.play(cue),
                GameEvent::Telemetry(event) => self.send(&event),
                GameEvent::RoundInitialized { seed } => {
                    // A fetch for the previous round must not leak into this one
                    self.fetch = None;
                    self.play_id = random_id(&mut rand::rng());
                    self.send(&TelemetryEvent::Initialize { seed });
                }
                GameEvent::RoundFinished { score } => {
                    log::debug!("Submitting score {} for play {}", score, self.play_id);
                    self.fetch = Some(RankingFetch::spawn(
                        Arc::clone(&self.scores),
                        self.player_id.clone(),
                        self.play_id.clone(),
                        score,
                    ));
                }
            }
        }
    }

    fn send(&mut self, event: &TelemetryEvent) {
        if self.settings.telemetry {
            self.telemetry
                .send(event.stamped(&self.player_id, &self.play_id));
        }
    }
}
