//! Enemy arrivals and scenery layout

use glam::{DVec2, DVec3};
use rand::Rng;
use rand_distr::StandardNormal;

use super::entities::{Enemy, EnemyKind, Leaf};
use super::projection::to_camera;
use crate::consts::*;

/// Per-kind arrival parameters
#[derive(Debug, Clone, Copy)]
pub struct SpawnRule {
    pub kind: EnemyKind,
    /// Chance to appear on each spawner pass
    pub probability: f64,
    /// Walking speed (camera units per tick)
    pub speed: f64,
}

/// Spawner rules, in draw order
pub const SPAWN_RULES: [SpawnRule; 3] = [
    SpawnRule {
        kind: EnemyKind::Normal,
        probability: 0.25,
        speed: 2.0,
    },
    SpawnRule {
        kind: EnemyKind::Dizzy,
        probability: 0.20,
        speed: 4.0,
    },
    SpawnRule {
        kind: EnemyKind::Shy,
        probability: 0.10,
        speed: 4.0,
    },
];

/// Build an enemy entering at screen x `x_in_screen` on its kind's lane
pub fn enemy_entering(kind: EnemyKind, x_in_screen: f64, speed: f64) -> Enemy {
    // Walk towards the interior
    let vx = if x_in_screen > 0.0 { -speed } else { speed };
    let cam = to_camera(DVec2::new(x_in_screen, kind.lane_y()), ENEMY_Z);
    Enemy::new(kind, DVec3::new(cam.x, cam.y, ENEMY_Z), vx)
}

/// One spawner pass: each kind independently rolls to appear.
///
/// Consumes exactly one RNG draw per kind, plus one side draw per arrival.
pub fn spawn_enemies(rng: &mut impl Rng) -> Vec<Enemy> {
    let mut arrivals = Vec::new();
    for rule in SPAWN_RULES {
        if rng.random::<f64>() < rule.probability {
            let x_in_screen = if rng.random_bool(0.5) {
                -ENEMY_ENTRY_MARGIN
            } else {
                SCREEN_WIDTH + ENEMY_ENTRY_MARGIN
            };
            arrivals.push(enemy_entering(rule.kind, x_in_screen, rule.speed));
        }
    }
    arrivals
}

/// Average spacing between leaves
const LEAF_SPACING: f64 = 100.0;
const LEAF_SPACING_JITTER: f64 = 20.0;
/// Leaves hang this far below the lane line
const LEAF_DROP: f64 = 13.0;
/// The top lane only has scaffold stubs this wide at each edge
pub const SHY_LANE_STUB: f64 = 90.0;

/// Scatter leaves along every lane, leaving the gap in the top scaffold bare
pub fn layout_leaves(rng: &mut impl Rng) -> Vec<Leaf> {
    let mut leaves = Vec::new();

    for kind in EnemyKind::ALL {
        let base_y = kind.lane_y();
        let mut x = -ENEMY_ENTRY_MARGIN;
        while x < SCREEN_WIDTH {
            x += LEAF_SPACING + gaussian(rng) * LEAF_SPACING_JITTER;
            if kind == EnemyKind::Shy && x > SHY_LANE_STUB && x < SCREEN_WIDTH - SHY_LANE_STUB {
                continue;
            }

            let y = base_y + LEAF_DROP + gaussian(rng);
            let scale_x = 1.0 + gaussian(rng) * 0.1;
            let mirror = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let scale_y = 1.0 + gaussian(rng) * 0.1;

            leaves.push(Leaf {
                pos: DVec2::new(x, y),
                scale: DVec2::new(scale_x * mirror, scale_y),
                rotation: 0.0,
            });
        }
    }

    leaves
}

#[inline]
fn gaussian(rng: &mut impl Rng) -> f64 {
    rng.sample(StandardNormal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projection::to_screen;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_walks_inward() {
        let left = enemy_entering(EnemyKind::Normal, -ENEMY_ENTRY_MARGIN, 2.0);
        assert_eq!(left.vel.x, 2.0);
        assert_eq!(left.home_vx, 2.0);

        let right = enemy_entering(EnemyKind::Dizzy, SCREEN_WIDTH + ENEMY_ENTRY_MARGIN, 4.0);
        assert_eq!(right.vel.x, -4.0);
        assert_eq!(right.pos.z, ENEMY_Z);
    }

    #[test]
    fn test_enemy_sits_on_lane() {
        for kind in EnemyKind::ALL {
            let e = enemy_entering(kind, -ENEMY_ENTRY_MARGIN, 2.0);
            let screen = to_screen(e.pos);
            assert!((screen.x + ENEMY_ENTRY_MARGIN).abs() < 1e-9);
            assert!((screen.y - kind.lane_y()).abs() < 1e-9);
            assert_eq!(e.radius, kind.radius());
        }
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let mut a = Pcg32::seed_from_u64(1234);
        let mut b = Pcg32::seed_from_u64(1234);
        for _ in 0..50 {
            assert_eq!(spawn_enemies(&mut a), spawn_enemies(&mut b));
        }
    }

    #[test]
    fn test_spawn_rates_roughly_match() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut counts = [0usize; 3];
        let passes = 20_000;
        for _ in 0..passes {
            for e in spawn_enemies(&mut rng) {
                let i = EnemyKind::ALL.iter().position(|&k| k == e.kind).unwrap();
                counts[i] += 1;
            }
        }
        for (rule, count) in SPAWN_RULES.iter().zip(counts) {
            let rate = count as f64 / passes as f64;
            assert!((rate - rule.probability).abs() < 0.02, "{:?}: {rate}", rule.kind);
        }
    }

    #[test]
    fn test_leaves_skip_top_gap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let leaves = layout_leaves(&mut rng);
        assert!(!leaves.is_empty());

        let top: Vec<_> = leaves
            .iter()
            .filter(|l| (l.pos.y - SHY_LANE_Y - LEAF_DROP).abs() < 10.0)
            .collect();
        for leaf in top {
            assert!(leaf.pos.x <= SHY_LANE_STUB || leaf.pos.x >= SCREEN_WIDTH - SHY_LANE_STUB);
        }
        for leaf in &leaves {
            assert!((leaf.scale.x.abs() - 1.0).abs() < 1.0);
            assert_eq!(leaf.rotation, 0.0);
        }
    }

    #[test]
    fn test_leaf_layout_is_deterministic() {
        let a = layout_leaves(&mut Pcg32::seed_from_u64(77));
        let b = layout_leaves(&mut Pcg32::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
