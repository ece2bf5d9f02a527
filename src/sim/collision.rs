//! Bullet-vs-enemy collision and scoring
//!
//! Both shapes are spheres in camera space. The test is strict: touching spheres
//! (distance exactly equal to the radius sum) do not collide.

use glam::DVec3;

use super::entities::{Bullet, Enemy, GainEffect};
use super::projection::to_screen;

/// Sphere-sphere overlap test
#[inline]
pub fn spheres_overlap(a: DVec3, ra: f64, b: DVec3, rb: f64) -> bool {
    a.distance_squared(b) < (ra + rb) * (ra + rb)
}

/// A scoring event produced by `resolve_hits`
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub score: u32,
}

/// Resolve all bullet/enemy hits for this tick.
///
/// Bullets are tested in order against enemies in order; the first unhit enemy a
/// bullet overlaps is the one it hits (no nearest-hit tie-break). Hit enemies are
/// flagged, their bullets removed, and a gain effect pushed for each hit.
pub fn resolve_hits(
    bullets: &mut Vec<Bullet>,
    enemies: &mut [Enemy],
    gains: &mut Vec<GainEffect>,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    bullets.retain(|bullet| {
        let target = enemies
            .iter()
            .position(|e| !e.hit && spheres_overlap(e.pos, e.radius, bullet.pos, bullet.radius));

        match target {
            Some(index) => {
                let enemy = &mut enemies[index];
                enemy.hit = true;

                let score = enemy.kind.score();
                gains.push(GainEffect::new(to_screen(enemy.pos), score));
                hits.push(Hit { score });
                false
            }
            None => true,
        }
    });

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::EnemyKind;
    use glam::DVec2;

    fn enemy_at(kind: EnemyKind, pos: DVec3) -> Enemy {
        Enemy::new(kind, pos, 2.0)
    }

    fn bullet_at(pos: DVec3) -> Bullet {
        Bullet::new(pos, DVec3::new(0.0, 0.0, 3.0))
    }

    #[test]
    fn test_boundary_is_strict() {
        let center = DVec3::new(10.0, -80.0, 200.0);
        let r = 40.0 + 10.0;
        let eps = 1e-6;

        assert!(spheres_overlap(center, 40.0, center + DVec3::new(r - eps, 0.0, 0.0), 10.0));
        assert!(!spheres_overlap(center, 40.0, center + DVec3::new(r + eps, 0.0, 0.0), 10.0));
        assert!(!spheres_overlap(center, 40.0, center + DVec3::new(0.0, 0.0, r), 10.0));
    }

    #[test]
    fn test_identical_centers_collide() {
        let p = DVec3::new(0.0, -50.0, 200.0);
        assert!(spheres_overlap(p, 30.0, p, 10.0));
    }

    #[test]
    fn test_hit_scores_by_kind() {
        for kind in EnemyKind::ALL {
            let pos = DVec3::new(0.0, -60.0, 200.0);
            let mut enemies = vec![enemy_at(kind, pos)];
            let mut bullets = vec![bullet_at(pos)];
            let mut gains = Vec::new();

            let hits = resolve_hits(&mut bullets, &mut enemies, &mut gains);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].score, kind.score());
            assert!(enemies[0].hit);
            assert!(bullets.is_empty());
            assert_eq!(gains.len(), 1);
            assert_eq!(gains[0].score, kind.score());
            assert_eq!(gains[0].pos, to_screen(pos));
        }
    }

    #[test]
    fn test_first_enemy_in_order_wins() {
        // Bullet overlaps both; the second is closer but the first is listed first
        let bullet = bullet_at(DVec3::new(0.0, -60.0, 200.0));
        let mut enemies = vec![
            enemy_at(EnemyKind::Normal, DVec3::new(30.0, -60.0, 200.0)),
            enemy_at(EnemyKind::Shy, DVec3::new(1.0, -60.0, 200.0)),
        ];
        let mut bullets = vec![bullet];
        let mut gains = Vec::new();

        let hits = resolve_hits(&mut bullets, &mut enemies, &mut gains);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, EnemyKind::Normal.score());
        assert!(enemies[0].hit);
        assert!(!enemies[1].hit);
    }

    #[test]
    fn test_hit_enemy_is_excluded() {
        let pos = DVec3::new(0.0, -60.0, 200.0);
        let mut enemies = vec![enemy_at(EnemyKind::Dizzy, pos)];
        let mut bullets = vec![bullet_at(pos), bullet_at(pos)];
        let mut gains = Vec::new();

        let hits = resolve_hits(&mut bullets, &mut enemies, &mut gains);
        assert_eq!(hits.len(), 1);
        // Second bullet passes through the already-hit enemy
        assert_eq!(bullets.len(), 1);

        let again = resolve_hits(&mut bullets, &mut enemies, &mut gains);
        assert!(again.is_empty());
        assert_eq!(gains.len(), 1);
    }

    #[test]
    fn test_two_bullets_two_enemies() {
        let a = DVec3::new(-100.0, -60.0, 200.0);
        let b = DVec3::new(100.0, -60.0, 200.0);
        let mut enemies = vec![enemy_at(EnemyKind::Normal, a), enemy_at(EnemyKind::Dizzy, b)];
        let mut bullets = vec![bullet_at(b), bullet_at(a), bullet_at(DVec3::new(0.0, -60.0, 120.0))];
        let mut gains = Vec::new();

        let hits = resolve_hits(&mut bullets, &mut enemies, &mut gains);
        let total: u32 = hits.iter().map(|h| h.score).sum();
        assert_eq!(total, 4);
        assert_eq!(bullets.len(), 1);
        assert_eq!(gains[0].pos, to_screen(b));
        assert_ne!(gains[0].pos, DVec2::ZERO);
    }
}
