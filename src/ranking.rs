//! Score submission and leaderboard
//!
//! At the end of a round the session submits the score and fetches the ranking on
//! a background thread. The result comes back through a single-slot channel that
//! is polled once per tick; a failed or missing result simply means no ranking.

use std::fmt;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;

/// Maximum number of entries the local board keeps
pub const MAX_RANKING_ENTRIES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub player_id: String,
    pub score: u32,
}

/// Score service failures. Never shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreServiceError {
    /// Service could not be reached or could not serve the request
    Unavailable {
        /// Human-readable cause (for logging).
        reason: String,
    },
}

impl fmt::Display for ScoreServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreServiceError::Unavailable { reason } => {
                write!(f, "score service unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for ScoreServiceError {}

/// Remote (or local) score storage
pub trait ScoreService: Send + Sync {
    fn submit(&self, player_id: &str, play_id: &str, score: u32) -> Result<(), ScoreServiceError>;

    /// Leaderboard, best first
    fn fetch_ranking(&self) -> Result<Vec<RankingEntry>, ScoreServiceError>;
}

/// In-memory leaderboard keeping the best `MAX_RANKING_ENTRIES` scores
#[derive(Debug, Default)]
pub struct LocalScoreBoard {
    entries: Mutex<Vec<RankingEntry>>,
}

impl LocalScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScoreService for LocalScoreBoard {
    fn submit(&self, player_id: &str, _play_id: &str, score: u32) -> Result<(), ScoreServiceError> {
        let mut entries = self.entries.lock().map_err(|_| ScoreServiceError::Unavailable {
            reason: "score board lock poisoned".into(),
        })?;

        // Sorted descending; equal scores keep submission order
        let pos = entries.iter().position(|e| score > e.score).unwrap_or(entries.len());
        entries.insert(
            pos,
            RankingEntry {
                player_id: player_id.to_string(),
                score,
            },
        );
        entries.truncate(MAX_RANKING_ENTRIES);
        Ok(())
    }

    fn fetch_ranking(&self) -> Result<Vec<RankingEntry>, ScoreServiceError> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .map_err(|_| ScoreServiceError::Unavailable {
                reason: "score board lock poisoned".into(),
            })
    }
}

/// Observable state of a background ranking fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Still running
    Pending,
    /// Ranking arrived
    Ready(Vec<RankingEntry>),
    /// Submission or fetch failed; no ranking this round
    Unavailable,
}

/// Handle to a fire-and-forget submit + fetch running on its own thread
#[derive(Debug)]
pub struct RankingFetch {
    rx: Receiver<Result<Vec<RankingEntry>, ScoreServiceError>>,
    state: FetchState,
}

impl RankingFetch {
    /// Submit `score` and then fetch the ranking, off the calling thread
    pub fn spawn(service: Arc<dyn ScoreService>, player_id: String, play_id: String, score: u32) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        thread::spawn(move || {
            let result = service
                .submit(&player_id, &play_id, score)
                .and_then(|()| service.fetch_ranking());
            // Receiver dropped means the round was reset; nobody cares anymore
            let _ = tx.send(result);
        });
        Self {
            rx,
            state: FetchState::Pending,
        }
    }

    /// Non-blocking check for the result. Once resolved the state is sticky.
    pub fn poll(&mut self) -> &FetchState {
        if self.state == FetchState::Pending {
            match self.rx.try_recv() {
                Ok(Ok(ranking)) => {
                    log::info!("Ranking received ({} entries)", ranking.len());
                    self.state = FetchState::Ready(ranking);
                }
                Ok(Err(err)) => {
                    log::warn!("Ranking unavailable: {}", err);
                    self.state = FetchState::Unavailable;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Ranking worker exited without a result");
                    self.state = FetchState::Unavailable;
                }
            }
        }
        &self.state
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }
}
