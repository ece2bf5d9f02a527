//! Play telemetry
//!
//! The simulation emits `TelemetryEvent`s; the session stamps them with the player
//! and play IDs and hands them to a `TelemetrySink`. Sinks are best-effort: the
//! simulation never waits on them.

use std::sync::mpsc::{self, Sender};
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::sim::TickInput;

/// Flush the touch buffer once it holds this many records...
pub const TOUCH_BUFFER_LIMIT: usize = 60;
/// ...or once this many ticks passed since the last record
pub const TOUCH_FLUSH_GAP_TICKS: u64 = 60;
/// Heartbeat cadence while playing
pub const HEARTBEAT_TICKS: u64 = 600;

/// One logged pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchRecord {
    pub ticks: u64,
    pub just_touched: bool,
    pub just_released: bool,
    pub x: i32,
    pub y: i32,
}

/// Structured events emitted by the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    Initialize { seed: u64 },
    StartGame,
    Playing { ticks: u64, score: u32 },
    GameOver { score: u32 },
    Touches(Vec<TouchRecord>),
}

impl TelemetryEvent {
    /// JSON payload for the wire, without the identity fields
    pub fn payload(&self) -> Value {
        match self {
            TelemetryEvent::Initialize { seed } => json!({ "action": "initialize", "seed": seed }),
            TelemetryEvent::StartGame => json!({ "action": "start_game" }),
            TelemetryEvent::Playing { ticks, score } => {
                json!({ "action": "playing", "ticks": ticks, "score": score })
            }
            TelemetryEvent::GameOver { score } => json!({ "action": "game_over", "score": score }),
            TelemetryEvent::Touches(touches) => json!({ "touches": touches }),
        }
    }

    /// Payload stamped with player and play IDs
    pub fn stamped(&self, player_id: &str, play_id: &str) -> Value {
        let mut payload = self.payload();
        if let Value::Object(map) = &mut payload {
            map.insert("player_id".into(), Value::from(player_id));
            map.insert("play_id".into(), Value::from(play_id));
        }
        payload
    }
}

/// Batches pointer samples into `touches` events
#[derive(Debug, Clone, Default)]
pub struct TouchLog {
    buffer: Vec<TouchRecord>,
}

impl TouchLog {
    /// Record this tick's pointer state; returns a batch when it is time to flush.
    ///
    /// A batch is flushed when it is full, when the last record is more than
    /// `TOUCH_FLUSH_GAP_TICKS` old, or when the mode tick counter went backwards
    /// (a mode change).
    pub fn record(&mut self, mode_ticks: u64, input: &TickInput) -> Option<Vec<TouchRecord>> {
        if input.pressed || input.just_released {
            self.buffer.push(TouchRecord {
                ticks: mode_ticks,
                just_touched: input.just_pressed,
                just_released: input.just_released,
                x: input.pointer.x.round() as i32,
                y: input.pointer.y.round() as i32,
            });
        }

        let last = self.buffer.last()?.ticks;
        let flush = self.buffer.len() >= TOUCH_BUFFER_LIMIT
            || last > mode_ticks
            || mode_ticks - last > TOUCH_FLUSH_GAP_TICKS;
        flush.then(|| std::mem::take(&mut self.buffer))
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Destination for telemetry payloads
pub trait TelemetrySink {
    fn send(&mut self, payload: Value);
}

/// Discards everything (telemetry disabled)
#[derive(Debug, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn send(&mut self, _payload: Value) {}
}

/// Writes payloads to the log as JSON lines
#[derive(Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn send(&mut self, payload: Value) {
        log::info!(target: "archerfish::telemetry", "{}", payload);
    }
}

/// Forwards payloads to another sink on a worker thread
pub struct BackgroundTelemetry {
    tx: Sender<Value>,
}

impl BackgroundTelemetry {
    pub fn spawn<S>(mut inner: S) -> Self
    where
        S: TelemetrySink + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Value>();
        thread::spawn(move || {
            for payload in rx {
                inner.send(payload);
            }
        });
        Self { tx }
    }
}

impl TelemetrySink for BackgroundTelemetry {
    fn send(&mut self, payload: Value) {
        // Worker gone means telemetry is gone; never block or fail the game over it
        if self.tx.send(payload).is_err() {
            log::debug!("Telemetry worker stopped, dropping payload");
        }
    }
}
