use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::math::{polygon_normal, vertex_angle, Vector3, TOLERANCE};
use crate::topology::{Model, VertexId};

/// Assigns every referenced vertex the angle-weighted average of the
/// normals of the faces around it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeNormals;

impl ComputeNormals {
    /// Creates a new `ComputeNormals` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation, overwriting existing normals.
    ///
    /// Faces with a degenerate leading triangle contribute nothing. A
    /// vertex whose weights cancel out keeps its previous normal.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn execute(&self, model: &mut Model) -> Result<()> {
        let mut sums: HashMap<VertexId, Vector3> = HashMap::new();

        for (face_id, face) in model.faces() {
            let positions = model.face_positions(face_id)?;
            let Some(normal) = polygon_normal(&positions) else {
                continue;
            };
            for (index, &v) in face.points.iter().enumerate() {
                *sums.entry(v).or_insert_with(Vector3::zeros) +=
                    normal * vertex_angle(&positions, index);
            }
        }

        let mut updated = 0;
        for (id, vertex) in model.vertices_mut() {
            if let Some(normal) = sums.get(&id).and_then(|s| s.try_normalize(TOLERANCE)) {
                vertex.normal = Some(normal);
                updated += 1;
            }
        }
        debug!(vertices = updated, "computed normals");
        Ok(())
    }
}
