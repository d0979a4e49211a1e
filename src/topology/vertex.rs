use crate::math::{Color, Point3, Vector3, TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a [`Model`](super::Model).
    pub struct VertexId;
}

/// A mesh vertex: position plus optional shading attributes.
///
/// Vertices are values; two vertices at the same position are still
/// distinct unless faces reference the same [`VertexId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// The 3D position of the vertex.
    pub position: Point3,
    /// Unit normal, if known.
    pub normal: Option<Vector3>,
    /// Vertex color, if any.
    pub color: Option<Color>,
}

impl Vertex {
    /// Creates a vertex at the given point without attributes.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            normal: None,
            color: None,
        }
    }

    /// Returns the vertex with its color set.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns the vertex with its normal set.
    #[must_use]
    pub fn with_normal(mut self, normal: Vector3) -> Self {
        self.normal = Some(normal);
        self
    }

    /// Interpolates between two vertices.
    ///
    /// Positions and colors are lerped; normals are lerped then normalized.
    /// An attribute present on only one side is copied from that side.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let color = match (a.color, b.color) {
            (Some(ca), Some(cb)) => Some(ca.lerp(&cb, t as f32)),
            (ca, cb) => ca.or(cb),
        };
        let normal = match (a.normal, b.normal) {
            (Some(na), Some(nb)) => Some(na.lerp(&nb, t).try_normalize(TOLERANCE).unwrap_or(na)),
            (na, nb) => na.or(nb),
        };
        Self {
            position: a.position + (b.position - a.position) * t,
            normal,
            color,
        }
    }
}
