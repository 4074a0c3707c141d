//! Torus target hit detection
//!
//! The torus always faces the Y axis, so a pass-through is a crossing of the
//! target's y-plane close enough to its center. The test interpolates the
//! crossing point along the movement segment rather than sampling positions,
//! so fast balls can't tunnel through between ticks.

use glam::Vec3;

/// Did the segment old_pos → new_pos pass through the target ring?
pub fn check_hit(old_pos: Vec3, new_pos: Vec3, target_pos: Vec3, outer_radius: f32) -> bool {
    // No crossing if both endpoints are on the same side of the y-plane
    // (touching the plane without crossing counts as no hit)
    if (new_pos.y - target_pos.y) * (old_pos.y - target_pos.y) >= 0.0 {
        return false;
    }

    // Interpolate the point where the segment meets y == target.y
    let t = (target_pos.y - old_pos.y) / (new_pos.y - old_pos.y);
    let intersection = old_pos + (new_pos - old_pos) * t;

    // intersection.y == target.y, so this is a planar distance in x/z
    (intersection - target_pos).length() <= outer_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const R: f32 = 2.2;

    #[test]
    fn test_crossing_through_center_hits() {
        let target = Vec3::new(5.0, 10.0, 3.0);
        let old = Vec3::new(5.0, 8.0, 3.0);
        let new = Vec3::new(5.0, 12.0, 3.0);
        assert!(check_hit(old, new, target, R));
    }

    #[test]
    fn test_crossing_far_away_misses() {
        let target = Vec3::new(5.0, 10.0, 3.0);
        let old = Vec3::new(20.0, 8.0, 3.0);
        let new = Vec3::new(20.0, 12.0, 3.0);
        assert!(!check_hit(old, new, target, R));
    }

    #[test]
    fn test_crossing_just_inside_radius_hits() {
        let target = Vec3::new(0.0, 0.0, 0.0);
        let old = Vec3::new(R - 0.01, -1.0, 0.0);
        let new = Vec3::new(R - 0.01, 1.0, 0.0);
        assert!(check_hit(old, new, target, R));

        let old = Vec3::new(R + 0.01, -1.0, 0.0);
        let new = Vec3::new(R + 0.01, 1.0, 0.0);
        assert!(!check_hit(old, new, target, R));
    }

    #[test]
    fn test_same_side_no_crossing() {
        let target = Vec3::new(0.0, 10.0, 0.0);
        let old = Vec3::new(0.0, 8.0, 0.0);
        let new = Vec3::new(0.0, 9.9, 0.0);
        assert!(!check_hit(old, new, target, R));
    }

    #[test]
    fn test_endpoint_on_plane_is_not_a_crossing() {
        let target = Vec3::new(0.0, 10.0, 0.0);
        let old = Vec3::new(0.0, 10.0, 0.0);
        let new = Vec3::new(0.0, 12.0, 0.0);
        assert!(!check_hit(old, new, target, R));
    }

    #[test]
    fn test_diagonal_crossing_interpolates() {
        // Segment crosses the plane off-center in x/z; the interpolated point
        // at y == target.y decides the hit, not the endpoints
        let target = Vec3::new(0.0, 0.0, 0.0);
        let old = Vec3::new(-1.0, -1.0, -1.0);
        let new = Vec3::new(1.0, 1.0, 1.0);
        // Crossing point is the origin: dead center
        assert!(check_hit(old, new, target, 0.1));
    }

    proptest! {
        /// Swapping the segment endpoints never changes the verdict.
        #[test]
        fn prop_hit_symmetric_under_swap(
            ox in -50.0f32..50.0, oy in -50.0f32..50.0, oz in -50.0f32..50.0,
            nx in -50.0f32..50.0, ny in -50.0f32..50.0, nz in -50.0f32..50.0,
            ty in -50.0f32..50.0,
        ) {
            let old = Vec3::new(ox, oy, oz);
            let new = Vec3::new(nx, ny, nz);
            let target = Vec3::new(0.0, ty, 0.0);
            prop_assert_eq!(
                check_hit(old, new, target, R),
                check_hit(new, old, target, R)
            );
        }

        /// A vertical drop never crosses any y-plane it doesn't straddle.
        #[test]
        fn prop_vertical_drop_same_y_never_hits(
            x in -50.0f32..50.0, y in -50.0f32..50.0,
            z0 in 0.0f32..50.0, z1 in -50.0f32..0.0,
            ty in -50.0f32..50.0,
        ) {
            let old = Vec3::new(x, y, z0);
            let new = Vec3::new(x, y, z1);
            let target = Vec3::new(x, ty, 0.0);
            // old.y == new.y, so the same-side product is never negative
            prop_assert!(!check_hit(old, new, target, R));
        }
    }
}
