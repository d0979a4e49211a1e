use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::topology::{Face, Model, Vertex, VertexId};

use super::{AttributeDefaults, IndexedMesh, VertexBuffers};

/// Fan-triangulates every face of a model.
///
/// Face `[p0, .., pn]` becomes the triangles `(p0, p(i-1), pi)` for
/// `i = 2..n`, which is exact for the convex faces a model holds.
pub struct FanTessellate {
    defaults: AttributeDefaults,
}

impl FanTessellate {
    /// Creates a new `FanTessellate` operation.
    #[must_use]
    pub fn new(defaults: AttributeDefaults) -> Self {
        Self { defaults }
    }

    /// Executes the tessellation into flat attribute buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn execute(&self, model: &Model) -> Result<VertexBuffers> {
        let mut out = VertexBuffers::default();
        for (_, face) in model.faces() {
            for corner in fan(face) {
                let v = model.vertex(corner)?;
                let [px, py, pz] = position(v);
                let [cr, cg, cb] = self.color(v);
                let [nx, ny, nz] = self.normal(v);
                out.positions.extend([px, py, pz]);
                out.colors.extend([cr, cg, cb]);
                out.normals.extend([nx, ny, nz]);
            }
        }
        debug!(vertices = out.vertex_count(), "tessellated model");
        Ok(out)
    }

    /// Executes the tessellation into an indexed mesh.
    ///
    /// Vertices referenced by no face are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex, or the mesh
    /// has more vertices than a `u32` index can address.
    pub fn execute_indexed(&self, model: &Model) -> Result<IndexedMesh> {
        let mut mesh = IndexedMesh::default();
        let mut vertex_map: HashMap<VertexId, u32> = HashMap::new();

        for (_, face) in model.faces() {
            let corners: Vec<VertexId> = fan(face).collect();
            for tri in corners.chunks_exact(3) {
                let mut tri_indices = [0u32; 3];
                for (slot, &id) in tri_indices.iter_mut().zip(tri) {
                    if let Some(&idx) = vertex_map.get(&id) {
                        *slot = idx;
                        continue;
                    }
                    let v = model.vertex(id)?;
                    let new_idx = u32::try_from(mesh.positions.len()).map_err(|_| {
                        TessellationError::Failed("too many vertices for u32 indices".into())
                    })?;
                    mesh.positions.push(position(v));
                    mesh.colors.push(self.color(v));
                    mesh.normals.push(self.normal(v));
                    vertex_map.insert(id, new_idx);
                    *slot = new_idx;
                }
                mesh.indices.push(tri_indices);
            }
        }
        debug!(
            vertices = mesh.positions.len(),
            triangles = mesh.indices.len(),
            "tessellated indexed mesh"
        );
        Ok(mesh)
    }

    fn color(&self, v: &Vertex) -> [f32; 3] {
        let c = v.color.unwrap_or(self.defaults.color);
        [c.r, c.g, c.b]
    }

    #[allow(clippy::cast_possible_truncation)]
    fn normal(&self, v: &Vertex) -> [f32; 3] {
        let n = v.normal.unwrap_or(self.defaults.normal);
        [n.x as f32, n.y as f32, n.z as f32]
    }
}

#[allow(clippy::cast_possible_truncation)]
fn position(v: &Vertex) -> [f32; 3] {
    [v.position.x as f32, v.position.y as f32, v.position.z as f32]
}

/// Triangle corners of a face fan, three per triangle.
fn fan(face: &Face) -> impl Iterator<Item = VertexId> + '_ {
    (2..face.len()).flat_map(move |i| [face.points[0], face.points[i - 1], face.points[i]])
}
