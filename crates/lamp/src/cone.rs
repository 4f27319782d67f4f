use core::f32::consts::{PI, TAU};

use bevy::math::Vec2;

/// Where the bulb sits inside the lamp, as a fraction of its size from the top-left corner.
pub const HEAD_ANCHOR: Vec2 = Vec2::new(0.63, 0.12);

pub fn head_position(lamp_top_left: Vec2, lamp_size: Vec2) -> Vec2 {
    Vec2::new(
        lamp_size.x.mul_add(HEAD_ANCHOR.x, lamp_top_left.x),
        lamp_size.y.mul_add(-HEAD_ANCHOR.y, lamp_top_left.y),
    )
}

/// Rotation in radians, in `(-PI, PI]`, turning the left-pointing cone toward `pointer`.
pub fn cone_rotation(head: Vec2, pointer: Vec2) -> f32 {
    let to_pointer = pointer - head;
    let rotation = to_pointer.y.atan2(to_pointer.x) - PI;
    if rotation <= -PI { rotation + TAU } else { rotation }
}

/// Light cone, relative to its apex at the lamp head, pointing left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightCone {
    pub apex: Vec2,
    pub upper: Vec2,
    pub lower: Vec2,
}

/// Cone long enough to reach `far_corner` whichever way it is turned.
pub fn light_cone(head: Vec2, far_corner: Vec2, half_angle: f32) -> LightCone {
    let reach = head.distance(far_corner);
    let spread = half_angle.tan() * reach;
    LightCone {
        apex: Vec2::ZERO,
        upper: Vec2::new(-reach, spread),
        lower: Vec2::new(-reach, -spread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec2, expected: Vec2, message: &str) {
        assert!(
            actual.abs_diff_eq(expected, 1e-4),
            "{message}: {actual} != {expected}"
        );
    }

    #[test]
    fn head_is_near_the_top_right() {
        let head = head_position(Vec2::new(-100.0, 200.0), Vec2::new(200.0, 400.0));
        assert_close(head, Vec2::new(26.0, 152.0), "head position");
    }

    #[test]
    fn pointer_straight_left_needs_no_rotation() {
        let rotation = cone_rotation(Vec2::ZERO, Vec2::new(-50.0, 0.0));
        assert!(rotation.abs() < 1e-6, "got {rotation}");
    }

    #[test]
    fn pointer_straight_right_flips_the_cone() {
        let rotation = cone_rotation(Vec2::ZERO, Vec2::new(50.0, 0.0));
        assert!((rotation - PI).abs() < 1e-6, "got {rotation}");
    }

    #[test]
    fn rotated_cone_points_at_the_pointer() {
        let head = Vec2::new(30.0, 180.0);
        for pointer in [
            Vec2::new(-400.0, -300.0),
            Vec2::new(500.0, -10.0),
            Vec2::new(31.0, 600.0),
            Vec2::new(-2.0, 179.0),
        ] {
            let rotation = cone_rotation(head, pointer);
            let axis = Vec2::from_angle(rotation).rotate(Vec2::NEG_X);
            assert_close(
                axis,
                (pointer - head).normalize(),
                "cone axis should follow the pointer",
            );
            assert!(
                rotation > -PI && rotation <= PI,
                "rotation {rotation} out of range"
            );
        }
    }

    #[test]
    fn cone_reaches_the_far_corner() {
        let cone = light_cone(Vec2::new(3.0, 4.0), Vec2::ZERO, 15f32.to_radians());

        assert_eq!(cone.apex, Vec2::ZERO, "cone is built around its apex");
        assert_close(
            cone.upper,
            Vec2::new(-5.0, 5.0 * 15f32.to_radians().tan()),
            "upper edge",
        );
        assert_close(
            cone.lower,
            Vec2::new(cone.upper.x, -cone.upper.y),
            "lower edge mirrors upper",
        );
    }
}
