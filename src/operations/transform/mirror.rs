use crate::error::{OperationError, Result};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};
use crate::topology::Model;

use super::Transform;

/// Mirrors a model across a plane defined by a point and normal.
pub struct Mirror {
    plane_origin: Point3,
    plane_normal: Vector3,
}

impl Mirror {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(plane_origin: Point3, plane_normal: Vector3) -> Self {
        Self {
            plane_origin,
            plane_normal,
        }
    }

    /// The reflection as a 4x4 affine matrix.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the plane normal has
    /// zero length.
    pub fn matrix(&self) -> Result<Matrix4> {
        let n = self
            .plane_normal
            .try_normalize(TOLERANCE)
            .ok_or_else(|| OperationError::InvalidInput("mirror plane normal is zero".into()))?;
        let linear = nalgebra::Matrix3::identity() - n * n.transpose() * 2.0;
        let offset = n * (2.0 * n.dot(&self.plane_origin.coords));

        let mut m = linear.to_homogeneous();
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&offset);
        Ok(m)
    }

    /// Executes the mirror, modifying the model in place.
    ///
    /// Face windings are reversed so the mirrored faces still point
    /// outward.
    ///
    /// # Errors
    ///
    /// Returns an error if the plane normal has zero length.
    pub fn execute(&self, model: &mut Model) -> Result<()> {
        Transform::new(self.matrix()?).execute(model)
    }
}
