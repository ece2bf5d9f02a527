//! Perspective projection between camera space and screen space
//!
//! Camera space: X right, Y down towards the water line, Z depth (> 0).
//! Every draw call and every pointer-to-aim conversion goes through here.

use glam::{DVec2, DVec3};

use crate::consts::{CAMERA_F, CAMERA_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Project a camera-space point onto the screen
#[inline]
pub fn to_screen(camera: DVec3) -> DVec2 {
    let x = camera.x * CAMERA_F / camera.z;
    let y = (camera.y + CAMERA_HEIGHT) * CAMERA_F / camera.z;
    DVec2::new(x + SCREEN_WIDTH / 2.0, y + SCREEN_HEIGHT / 2.0)
}

/// Recover camera X/Y of a screen point, assuming it lies at depth `z`
#[inline]
pub fn to_camera(screen: DVec2, z: f64) -> DVec2 {
    let x = (screen.x - SCREEN_WIDTH / 2.0) * z / CAMERA_F;
    let y = (screen.y - SCREEN_HEIGHT / 2.0) * z / CAMERA_F - CAMERA_HEIGHT;
    DVec2::new(x, y)
}

/// Screen position of the fish (the fixed shooting anchor)
#[inline]
pub fn anchor_on_screen() -> DVec2 {
    use crate::consts::{FISH_X, FISH_Y, FISH_Z};
    to_screen(DVec3::new(FISH_X, FISH_Y, FISH_Z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ENEMY_Z, NORMAL_LANE_Y};
    use proptest::prelude::*;

    #[test]
    fn test_anchor_position() {
        let anchor = anchor_on_screen();
        assert_eq!(anchor, DVec2::new(320.0, 360.0));
    }

    #[test]
    fn test_screen_center_at_depth() {
        // The point straight ahead at camera height projects to the screen center
        let p = to_screen(DVec3::new(0.0, -CAMERA_HEIGHT, 123.0));
        assert!((p - DVec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)).length() < 1e-9);
    }

    #[test]
    fn test_lane_is_above_water() {
        let lane = to_camera(DVec2::new(0.0, NORMAL_LANE_Y), ENEMY_Z);
        assert!(lane.y < 0.0);
    }

    proptest! {
        #[test]
        fn round_trip(x in -2000.0f64..2000.0, y in -2000.0f64..2000.0, z in 0.5f64..5000.0) {
            let p = DVec3::new(x, y, z);
            let back = to_camera(to_screen(p), z);
            prop_assert!((back.x - x).abs() < 1e-6 * (1.0 + x.abs()));
            prop_assert!((back.y - y).abs() < 1e-6 * (1.0 + y.abs()));
        }
    }
}
