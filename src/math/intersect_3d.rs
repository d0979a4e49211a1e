use super::{Point3, Vector3, TOLERANCE};

/// Relationship between two lines in 3D.
#[derive(Debug)]
pub enum LinePairRelation {
    /// Closest point on the first line to the second, at parameter `t`
    /// along the first line. For coplanar lines this is the intersection.
    Point { point: Point3, t: f64 },
    /// Directions are parallel (cross product length² within tolerance).
    Parallel,
}

/// Intersects `o0 + t * d0` with `o1 + s * d1`.
///
/// Uses `c = d0 x d1` as the common perpendicular:
/// `t = (o1 - o0) . (d1 x c) / |c|²`.
#[must_use]
pub fn line_line_intersect(o0: &Point3, d0: &Vector3, o1: &Point3, d1: &Vector3) -> LinePairRelation {
    let cross = d0.cross(d1);
    let denom = cross.norm_squared();
    if denom <= TOLERANCE * TOLERANCE {
        return LinePairRelation::Parallel;
    }

    let t = (o1 - o0).dot(&d1.cross(&cross)) / denom;
    LinePairRelation::Point {
        point: o0 + d0 * t,
        t,
    }
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    nalgebra::center(a, b)
}
