mod tessellate_model;

pub use tessellate_model::FanTessellate;

use crate::math::{Color, Vector3};

/// Attribute values used for vertices that carry none of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeDefaults {
    /// Color for vertices without one.
    pub color: Color,
    /// Normal for vertices without one.
    pub normal: Vector3,
}

impl Default for AttributeDefaults {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            normal: Vector3::z(),
        }
    }
}

/// Non-indexed triangle soup: three entries per vertex in each buffer,
/// three vertices per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
    /// `x, y, z` per vertex.
    pub positions: Vec<f32>,
    /// `r, g, b` per vertex.
    pub colors: Vec<f32>,
    /// `x, y, z` per vertex.
    pub normals: Vec<f32>,
}

impl VertexBuffers {
    /// Number of vertices in the buffers.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the buffers.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }
}

/// A triangle mesh sharing vertices between faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Vertex colors.
    pub colors: Vec<[f32; 3]>,
    /// Vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}
