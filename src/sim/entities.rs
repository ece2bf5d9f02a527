//! Entity types and their per-tick update rules
//!
//! Everything here lives in camera space except `GainEffect` and `Leaf`, which are
//! screen-space decorations.

use glam::{DVec2, DVec3};
use rand::Rng;

use crate::consts::*;

/// The player's fish: the fixed shooting anchor
#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub pos: DVec3,
    /// Ticks alive (drives the idle animation)
    pub ticks: u64,
    /// True between a press near the fish and the following release
    pub aiming: bool,
}

impl Default for Fish {
    fn default() -> Self {
        Self {
            pos: DVec3::new(FISH_X, FISH_Y, FISH_Z),
            ticks: 0,
            aiming: false,
        }
    }
}

impl Fish {
    pub fn update(&mut self) {
        self.ticks += 1;
    }

    /// Where the shot splash leaves the water: the top of the fish sprite
    pub fn mouth(&self) -> DVec3 {
        self.pos - DVec3::new(0.0, FISH_SPRITE_HEIGHT / 2.0, 0.0)
    }
}

/// A shot of water
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: DVec3,
    pub vel: DVec3,
    pub radius: f64,
    pub ticks: u64,
}

impl Bullet {
    pub fn new(pos: DVec3, vel: DVec3) -> Self {
        Self {
            pos,
            vel,
            radius: BULLET_RADIUS,
            ticks: 0,
        }
    }

    /// Semi-implicit Euler under gravity; depth velocity is constant
    pub fn update(&mut self) {
        self.ticks += 1;
        self.vel.y += GRAVITY;
        self.pos += self.vel;
    }

    /// Has the bullet dropped below the water line
    #[inline]
    pub fn is_under_water(&self) -> bool {
        self.pos.y > 0.0
    }
}

/// A single droplet of a splash burst; moves in x/y only
#[derive(Debug, Clone, PartialEq)]
pub struct SplashEffect {
    pub pos: DVec3,
    pub vel: DVec2,
    pub ticks: u64,
}

impl SplashEffect {
    pub fn new(pos: DVec3, vel: DVec2) -> Self {
        Self { pos, vel, ticks: 0 }
    }

    /// Burst of droplets thrown upward in random directions.
    ///
    /// Each droplet gets `vx = sx * cos(pi * u1)` and `vy = -sy * sin(pi * u2)`.
    pub fn burst(origin: DVec3, speed: DVec2, rng: &mut impl Rng) -> Vec<SplashEffect> {
        (0..SPLASH_BURST)
            .map(|_| {
                let vx = speed.x * (std::f64::consts::PI * rng.random::<f64>()).cos();
                let vy = -speed.y * (std::f64::consts::PI * rng.random::<f64>()).sin();
                SplashEffect::new(origin, DVec2::new(vx, vy))
            })
            .collect()
    }

    pub fn update(&mut self) {
        self.ticks += 1;
        self.vel.y += GRAVITY;
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.pos.y <= SPLASH_FLOOR_Y
    }
}

/// Enemy behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Walks straight across
    Normal,
    /// Randomly stops and resumes every second
    Dizzy,
    /// Stops after two seconds, then turns back
    Shy,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Dizzy, EnemyKind::Shy];

    pub fn radius(self) -> f64 {
        match self {
            EnemyKind::Normal => NORMAL_ENEMY_RADIUS,
            EnemyKind::Dizzy => DIZZY_ENEMY_RADIUS,
            EnemyKind::Shy => SHY_ENEMY_RADIUS,
        }
    }

    /// Score awarded for knocking this enemy into the water
    pub fn score(self) -> u32 {
        match self {
            EnemyKind::Normal => 1,
            EnemyKind::Dizzy => 3,
            EnemyKind::Shy => 5,
        }
    }

    /// Screen y of the scaffold lane this kind walks on
    pub fn lane_y(self) -> f64 {
        match self {
            EnemyKind::Normal => NORMAL_LANE_Y,
            EnemyKind::Dizzy => DIZZY_LANE_Y,
            EnemyKind::Shy => SHY_LANE_Y,
        }
    }
}

/// Dizzy enemies reconsider walking every this many ticks
pub const DIZZY_PERIOD_TICKS: u64 = 60;
/// Shy enemy stops at this age...
pub const SHY_STOP_TICK: u64 = 120;
/// ...and walks back out at this one
pub const SHY_TURN_TICK: u64 = 240;

/// A bug crossing the scaffold
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: DVec3,
    pub vel: DVec2,
    /// Spawn-time x velocity, restored after stalls
    pub home_vx: f64,
    pub radius: f64,
    /// Set once by a bullet; never cleared
    pub hit: bool,
    pub ticks: u64,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: DVec3, vx: f64) -> Self {
        Self {
            kind,
            pos,
            vel: DVec2::new(vx, 0.0),
            home_vx: vx,
            radius: kind.radius(),
            hit: false,
            ticks: 0,
        }
    }

    /// Advance one tick. The RNG is only consumed by Dizzy enemies on their period.
    pub fn update(&mut self, rng: &mut impl Rng) {
        self.ticks += 1;

        if self.hit {
            self.vel.y += GRAVITY;
            self.pos.y += self.vel.y;
            return;
        }

        match self.kind {
            EnemyKind::Normal => {}
            EnemyKind::Dizzy => {
                if self.ticks % DIZZY_PERIOD_TICKS == 0 && rng.random_bool(0.5) {
                    self.vel.x = if self.vel.x == 0.0 { self.home_vx } else { 0.0 };
                }
            }
            EnemyKind::Shy => {
                if self.ticks == SHY_STOP_TICK {
                    self.vel.x = 0.0;
                } else if self.ticks == SHY_TURN_TICK {
                    self.vel.x = -self.home_vx;
                }
            }
        }

        self.pos.x += self.vel.x;
    }

    #[inline]
    pub fn is_under_water(&self) -> bool {
        self.pos.y > 0.0
    }

    /// Facing right: moving right, or stalled after entering from the left
    pub fn faces_right(&self) -> bool {
        self.vel.x > 0.0 || (self.vel.x == 0.0 && self.home_vx > 0.0)
    }
}

/// Floating "+n" text shown where an enemy was hit
#[derive(Debug, Clone, PartialEq)]
pub struct GainEffect {
    /// Screen position; only y animates
    pub pos: DVec2,
    pub origin_y: f64,
    pub score: u32,
    pub ticks: u64,
}

impl GainEffect {
    pub fn new(pos: DVec2, score: u32) -> Self {
        Self {
            pos,
            origin_y: pos.y,
            score,
            ticks: 0,
        }
    }

    /// One up-and-down arc over the effect's lifetime
    pub fn update(&mut self) {
        self.ticks += 1;
        let phase = self.ticks as f64 / GAIN_EFFECT_TICKS as f64 * std::f64::consts::PI;
        self.pos.y = self.origin_y - GAIN_EFFECT_AMPLITUDE * phase.sin();
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.ticks < GAIN_EFFECT_TICKS
    }

    pub fn label(&self) -> String {
        format!("{:+}", self.score as i64)
    }
}

/// Scenery leaf on the scaffold (screen space, static)
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub pos: DVec2,
    pub scale: DVec2,
    pub rotation: f64,
}
