use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::{Matrix3, Matrix4, Point3, TOLERANCE};
use crate::topology::Model;

/// Applies an arbitrary 4x4 affine matrix to a model.
pub struct Transform {
    matrix: Matrix4,
}

impl Transform {
    /// Creates a new `Transform` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Executes the transformation, modifying the model in place.
    ///
    /// Positions go through the full matrix, normals through the inverse
    /// transpose of its linear part. A matrix that flips orientation also
    /// reverses every face so the winding stays counter-clockwise seen
    /// from outside.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the linear part of the
    /// matrix is singular.
    pub fn execute(&self, model: &mut Model) -> Result<()> {
        let linear: Matrix3 = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let det = linear.determinant();
        if det.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput("transform matrix is singular".into()).into());
        }
        let normal_matrix = linear
            .try_inverse()
            .ok_or_else(|| OperationError::InvalidInput("transform matrix is singular".into()))?
            .transpose();

        for (_, vertex) in model.vertices_mut() {
            vertex.position = transform_point(&self.matrix, &vertex.position);
            if let Some(normal) = vertex.normal {
                vertex.normal = (normal_matrix * normal).try_normalize(TOLERANCE).or(Some(normal));
            }
        }

        let flipped = det < 0.0;
        if flipped {
            for (_, face) in model.faces_mut() {
                // Keep the first point, reverse the rest.
                face.points[1..].reverse();
            }
        }
        debug!(flipped, "transformed model");
        Ok(())
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}
