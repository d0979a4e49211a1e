pub mod intersect_3d;
pub mod rotation;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix, used for the linear part of transforms.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Opaque white, the export default for uncolored vertices.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a color from its components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Interpolates linearly towards `other`; `t = 0` gives `self`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// Interior angle at `points[index]` of a closed polygon, in radians.
///
/// Measured between the unit vectors towards the cyclic predecessor and
/// successor. Returns `0.0` when either neighbor coincides with the point.
#[must_use]
pub fn vertex_angle(points: &[Point3], index: usize) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let prev = points[(index + n - 1) % n] - points[index];
    let next = points[(index + 1) % n] - points[index];
    if prev.norm_squared() < TOLERANCE * TOLERANCE || next.norm_squared() < TOLERANCE * TOLERANCE
    {
        return 0.0;
    }
    prev.angle(&next)
}

/// Unit normal of a polygon from its first three points,
/// `normalize((p1 - p0) x (p2 - p0))`.
///
/// Returns `None` if the polygon has fewer than three points or the first
/// three are collinear.
#[must_use]
pub fn polygon_normal(points: &[Point3]) -> Option<Vector3> {
    if points.len() < 3 {
        return None;
    }
    (points[1] - points[0])
        .cross(&(points[2] - points[0]))
        .try_normalize(TOLERANCE)
}
