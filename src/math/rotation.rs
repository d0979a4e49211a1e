use nalgebra::{Rotation3, Unit};

use super::{Point3, Vector3, TOLERANCE};

/// Rotates `point` about the axis through `center` with direction `axis`.
///
/// Positive angles follow the right-hand rule around `axis`.
#[must_use]
pub fn rotate_about_axis(point: &Point3, center: &Point3, axis: &Unit<Vector3>, angle: f64) -> Point3 {
    let rot = Rotation3::from_axis_angle(axis, angle);
    center + rot * (point - center)
}

/// Moves `point` radially onto the sphere of `radius` around `center`.
///
/// A point at the center is returned unchanged.
#[must_use]
pub fn project_onto_sphere(point: &Point3, center: &Point3, radius: f64) -> Point3 {
    let d = point - center;
    let len = d.norm();
    if len < TOLERANCE {
        *point
    } else {
        center + d * (radius / len)
    }
}

/// Outward unit direction of `point` from `center`, if they are distinct.
#[must_use]
pub fn radial_direction(point: &Point3, center: &Point3) -> Option<Vector3> {
    (point - center).try_normalize(TOLERANCE)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn quarter_turn_about_offset_axis() {
        let axis = Unit::new_normalize(Vector3::z());
        let rotated = rotate_about_axis(&p(2.0, 1.0, 5.0), &p(1.0, 1.0, 0.0), &axis, FRAC_PI_2);
        assert_relative_eq!(rotated, p(1.0, 2.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_keeps_distance_to_axis() {
        let axis = Unit::new_normalize(Vector3::new(1.0, 1.0, 0.0));
        let center = p(0.5, -0.5, 0.25);
        let point = p(1.0, 0.0, 1.0);
        let before = (point - center).cross(&axis).norm();
        let after = (rotate_about_axis(&point, &center, &axis, 1.1) - center)
            .cross(&axis)
            .norm();
        assert_relative_eq!(before, after, epsilon = 1e-12);
    }

    #[test]
    fn projection_lands_on_sphere() {
        let center = p(1.0, 2.0, 3.0);
        let q = project_onto_sphere(&p(4.0, -1.0, 3.5), &center, 0.25);
        assert_relative_eq!((q - center).norm(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn projection_of_center_is_identity() {
        let center = p(1.0, 2.0, 3.0);
        assert_eq!(project_onto_sphere(&center, &center, 0.5), center);
        assert!(radial_direction(&center, &center).is_none());
    }
}
