//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded round RNG only
//! - Stable iteration order (insertion order of every entity list)
//! - No rendering, audio, or network dependencies; side effects are queued as events

pub mod aim;
pub mod collision;
pub mod entities;
pub mod projection;
pub mod spawner;
pub mod state;
pub mod tick;

pub use aim::{Sight, bullet_from_release, hold_position, sight, touches_fish};
pub use collision::{Hit, resolve_hits, spheres_overlap};
pub use entities::{Bullet, Enemy, EnemyKind, Fish, GainEffect, Leaf, SplashEffect};
pub use projection::{anchor_on_screen, to_camera, to_screen};
pub use spawner::{SPAWN_RULES, SpawnRule, layout_leaves, spawn_enemies};
pub use state::{GameEvent, GameMode, GameState, SeedPolicy};
pub use tick::{TickInput, tick};
