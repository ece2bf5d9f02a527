//! Drag-to-shoot aiming
//!
//! The player drags away from the fish like a slingshot; the bullet leaves in the
//! opposite direction with a speed proportional to the drag length.

use glam::{DVec2, DVec3};

use super::entities::Bullet;
use super::projection::{anchor_on_screen, to_screen};
use crate::consts::*;

/// Clamp a pointer position to the area the fish can be dragged to:
/// inside the screen and never above the fish.
pub fn hold_position(pointer: DVec2) -> DVec2 {
    let anchor = anchor_on_screen();
    DVec2::new(
        pointer.x.clamp(0.0, SCREEN_WIDTH),
        pointer.y.clamp(anchor.y, SCREEN_HEIGHT),
    )
}

/// Is a press close enough to the fish to start aiming
pub fn touches_fish(pointer: DVec2) -> bool {
    pointer.distance_squared(anchor_on_screen()) < TOUCHABLE_RADIUS * TOUCHABLE_RADIUS
}

/// Bullet fired by releasing the drag at `release` (already clamped).
///
/// Speed is `BULLET_MAX_SPEED * d / (screen bottom - anchor y)`, so a drag to the
/// bottom edge fires at full speed. A release exactly on the anchor has no direction
/// and fires with zero x/y velocity.
pub fn bullet_from_release(release: DVec2) -> Bullet {
    let anchor = anchor_on_screen();
    let delta = anchor - release;
    let d = delta.length();
    let speed = BULLET_MAX_SPEED * d / (SCREEN_HEIGHT - anchor.y);

    let dir = if d > 0.0 { delta / d } else { DVec2::ZERO };

    Bullet::new(
        DVec3::new(FISH_X, FISH_Y, FISH_Z),
        DVec3::new(speed * dir.x, speed * dir.y, BULLET_VZ),
    )
}

/// Predicted impact of a shot, for the aim-assist marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sight {
    /// Camera-space point where the shot reaches the scaffold or the water
    pub target: DVec3,
}

impl Sight {
    pub fn on_screen(&self) -> DVec2 {
        to_screen(self.target)
    }
}

/// Analytic trajectory of `bullet` ignoring enemies.
///
/// Uses the continuous ballistic curve `y(t) = y + vy*t + g/2*t^2` rather than
/// stepping the simulation, so the marker is an estimate of the discrete path.
pub fn sight(bullet: &Bullet) -> Sight {
    let p = bullet.pos;
    let v = bullet.vel;

    let t = (ENEMY_Z - p.z) / v.z;
    let y_at_lane = p.y + v.y * t + GRAVITY / 2.0 * t * t;
    if y_at_lane <= 0.0 {
        return Sight {
            target: DVec3::new(p.x + v.x * t, y_at_lane, ENEMY_Z),
        };
    }

    // Positive root of g/2*t^2 + vy*t + y = 0
    let discriminant = (v.y * v.y - 2.0 * GRAVITY * p.y).max(0.0);
    let t = (-v.y + discriminant.sqrt()) / GRAVITY;
    Sight {
        target: DVec3::new(p.x + v.x * t, 0.0, p.z + v.z * t),
    }
}
