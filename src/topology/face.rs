use crate::error::FaceError;
use crate::math::{polygon_normal, Point3, Vector3, TOLERANCE};

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a face in a [`Model`](super::Model).
    pub struct FaceId;
}

/// A planar convex polygon, wound counter-clockwise seen from outside.
///
/// The point list is cyclic: the edge leaving `points[i]` ends at
/// `points[(i + 1) % len]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Ordered vertex references.
    pub points: Vec<VertexId>,
}

impl Face {
    /// Creates a face from an ordered vertex list.
    #[must_use]
    pub fn new(points: Vec<VertexId>) -> Self {
        Self { points }
    }

    /// Number of points (and edges) of the face.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the face has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the cyclic successor of `index`.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.points.len()
    }

    /// Index of the cyclic predecessor of `index`.
    #[must_use]
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.points.len() - 1) % self.points.len()
    }

    /// Directed edges `(index, from, to)` in winding order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, VertexId, VertexId)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (i, self.points[i], self.points[(i + 1) % n]))
    }
}

/// Checks that a polygon is usable as a face and returns its unit normal.
///
/// Requires at least three points, a non-degenerate leading triangle, no
/// zero-length edges, every point on the plane of the leading triangle,
/// and the same turning direction at every corner. Collinear corners are
/// allowed.
///
/// # Errors
///
/// Returns the first [`FaceError`] the polygon violates.
pub fn validate_polygon(points: &[Point3]) -> Result<Vector3, FaceError> {
    let n = points.len();
    if n < 3 {
        return Err(FaceError::TooFewPoints { count: n });
    }

    for i in 0..n {
        if (points[(i + 1) % n] - points[i]).norm() < TOLERANCE {
            return Err(FaceError::Degenerate(format!("zero-length edge after point {i}")));
        }
    }

    let normal = polygon_normal(points)
        .ok_or_else(|| FaceError::Degenerate("first three points are collinear".into()))?;

    let scale = points
        .iter()
        .map(|p| (p - points[0]).norm())
        .fold(1.0_f64, f64::max);
    let plane_tolerance = 1e-9 * scale;
    for (index, p) in points.iter().enumerate() {
        let distance = (p - points[0]).dot(&normal);
        if distance.abs() > plane_tolerance {
            return Err(FaceError::NonPlanar { index, distance });
        }
    }

    for i in 0..n {
        let d0 = points[i] - points[(i + n - 1) % n];
        let d1 = points[(i + 1) % n] - points[i];
        if d0.cross(&d1).dot(&normal) < -plane_tolerance * d0.norm().max(d1.norm()) {
            return Err(FaceError::NonConvex { index: i });
        }
    }

    Ok(normal)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn square_is_valid() {
        let sq = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)];
        let normal = validate_polygon(&sq);
        assert!(normal.is_ok());
        if let Ok(n) = normal {
            assert_relative_eq!(n, Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn two_points_are_rejected() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        assert_eq!(validate_polygon(&pts), Err(FaceError::TooFewPoints { count: 2 }));
    }

    #[test]
    fn coincident_points_are_rejected() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        assert!(matches!(validate_polygon(&pts), Err(FaceError::Degenerate(_))));
    }

    #[test]
    fn warped_quad_is_rejected() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.2), p(0.0, 1.0, 0.0)];
        assert!(matches!(
            validate_polygon(&pts),
            Err(FaceError::NonPlanar { index: 3, .. })
        ));
    }

    #[test]
    fn reflex_corner_is_rejected() {
        // Arrow shape: the corner at (1, 0.5) points inward.
        let pts = [
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(1.0, 0.5, 0.0),
            p(2.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        assert_eq!(validate_polygon(&pts), Err(FaceError::NonConvex { index: 2 }));
    }

    #[test]
    fn collinear_middle_point_is_allowed() {
        let pts = [
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 1.0, 0.0),
        ];
        assert!(validate_polygon(&pts).is_ok());
    }

    #[test]
    fn edge_iteration_wraps_around() {
        let mut ids = slotmap::SlotMap::<VertexId, ()>::with_key();
        let a = ids.insert(());
        let b = ids.insert(());
        let c = ids.insert(());
        let face = Face::new(vec![a, b, c]);
        let edges: Vec<_> = face.edges().collect();
        assert_eq!(edges, vec![(0, a, b), (1, b, c), (2, c, a)]);
        assert_eq!(face.prev_index(0), 2);
        assert_eq!(face.next_index(2), 0);
    }
}
