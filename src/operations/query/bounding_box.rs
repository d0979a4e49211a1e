use crate::math::{Point3, Vector3};
use crate::topology::Model;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Edge lengths of the box.
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }
}

/// Computes the axis-aligned bounding box of the vertices a model's faces
/// reference.
pub struct BoundingBox;

impl BoundingBox {
    /// Executes the query. Returns `None` for a model without faces.
    #[must_use]
    pub fn execute(model: &Model) -> Option<Aabb> {
        let mut points = model
            .faces()
            .flat_map(|(_, f)| f.points.iter())
            .filter_map(|&id| model.vertex(id).ok())
            .map(|v| v.position);
        let first = points.next()?;
        Some(points.fold(Aabb { min: first, max: first }, |b, p| Aabb {
            min: b.min.inf(&p),
            max: b.max.sup(&p),
        }))
    }
}
