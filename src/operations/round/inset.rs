use slotmap::{SecondaryMap, SlotMap};
use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::math::intersect_3d::{line_line_intersect, midpoint, LinePairRelation};
use crate::math::Vector3;
use crate::topology::{FaceId, Model, Vertex, VertexId};

use super::analysis::Analysis;

/// The shrunk copy of one face.
#[derive(Debug, Clone)]
pub struct Cap {
    /// The original face this cap replaces.
    pub face: FaceId,
    /// Inset points, same count and order as the original face.
    pub points: Vec<VertexId>,
}

/// Output of the inset phase: a fresh vertex arena holding only the
/// inset points, and one cap per original face.
#[derive(Debug, Clone, Default)]
pub struct Caps {
    pub(crate) vertices: SlotMap<VertexId, Vertex>,
    pub(crate) caps: Vec<Cap>,
    index: SecondaryMap<FaceId, usize>,
}

impl Caps {
    /// The cap of an original face.
    #[must_use]
    pub fn cap(&self, face: FaceId) -> Option<&Cap> {
        self.index.get(face).map(|&i| &self.caps[i])
    }

    /// All caps in face order.
    #[must_use]
    pub fn caps(&self) -> &[Cap] {
        &self.caps
    }

    /// A vertex of the working arena.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }
}

/// Shrinks every face of `model` by the insets recorded in `analysis`.
///
/// Each point moves to the intersection of its two incident edges, each
/// offset inward by its edge's `delta` (zero for an unshared edge). When
/// the two edges are collinear the point moves to the midpoint of the two
/// offset points instead. With `compute_normals`, every cap point takes
/// the face's flat normal.
///
/// # Errors
///
/// Returns an error if a face or vertex is missing, or `analysis` lacks a
/// face normal.
pub fn inset_faces(model: &Model, analysis: &Analysis, compute_normals: bool) -> Result<Caps> {
    let mut out = Caps::default();

    for &face_id in &analysis.face_order {
        let face = model.face(face_id)?;
        let normal = analysis
            .face_normal(face_id)
            .ok_or_else(|| TopologyError::EntityNotFound("face normal".into()))?;
        let positions = model.face_positions(face_id)?;
        let n = positions.len();

        let directions: Vec<Vector3> = (0..n)
            .map(|i| (positions[(i + 1) % n] - positions[i]).normalize())
            .collect();

        let mut points = Vec::with_capacity(n);
        for (index, &original) in face.points.iter().enumerate() {
            let prev = (index + n - 1) % n;
            let d0 = directions[prev];
            let d1 = directions[index];
            let inward0 = normal.cross(&d0);
            let inward1 = normal.cross(&d1);

            let prev_delta = analysis
                .edge_entering(face_id, index, n)
                .map_or(0.0, |e| e.delta);
            let next_delta = analysis.edge_leaving(face_id, index).map_or(0.0, |e| e.delta);

            let p = positions[index];
            let o0 = p + inward0 * prev_delta;
            let o1 = p + inward1 * next_delta;

            let mut vertex = model.vertex(original)?.clone();
            vertex.position = match line_line_intersect(&o0, &d0, &o1, &d1) {
                LinePairRelation::Point { point, .. } => point,
                LinePairRelation::Parallel => midpoint(&o0, &o1),
            };
            if compute_normals {
                vertex.normal = Some(normal);
            }
            points.push(out.vertices.insert(vertex));
        }

        out.index.insert(face_id, out.caps.len());
        out.caps.push(Cap {
            face: face_id,
            points,
        });
    }

    debug!(caps = out.caps.len(), points = out.vertices.len(), "inset faces");
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point3;
    use crate::operations::round::analysis::RoundingEdge;
    use crate::topology::fixtures::{add_faces, add_points, single_triangle, unit_cube};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn cap_positions(caps: &Caps, face: FaceId) -> Vec<Point3> {
        caps.cap(face)
            .unwrap()
            .points
            .iter()
            .map(|&id| caps.vertex(id).unwrap().position)
            .collect()
    }

    #[test]
    fn cube_faces_shrink_by_radius() {
        let model = unit_cube();
        let analysis = Analysis::analyze(&model, 0.1).unwrap();
        let caps = inset_faces(&model, &analysis, false).unwrap();

        assert_eq!(caps.caps().len(), 6);
        assert_eq!(caps.vertices.len(), 24);
        for cap in caps.caps() {
            for pos in cap_positions(&caps, cap.face) {
                // Every cap point stays on its face plane, 0.1 from both
                // in-plane borders.
                let coords = [pos.x, pos.y, pos.z];
                let on_face = coords
                    .iter()
                    .filter(|c| c.abs() < 1e-12 || (**c - 1.0).abs() < 1e-12)
                    .count();
                let inset = coords
                    .iter()
                    .filter(|c| (**c - 0.1).abs() < 1e-12 || (**c - 0.9).abs() < 1e-12)
                    .count();
                assert_eq!(on_face + inset, 3, "unexpected cap point {pos:?}");
                assert!(on_face >= 1);
            }
        }
    }

    #[test]
    fn cap_points_take_the_flat_face_normal() {
        let model = unit_cube();
        let analysis = Analysis::analyze(&model, 0.1).unwrap();
        let caps = inset_faces(&model, &analysis, true).unwrap();

        for cap in caps.caps() {
            let normal = analysis.face_normal(cap.face).unwrap();
            for &id in &cap.points {
                assert_eq!(caps.vertex(id).unwrap().normal, Some(normal));
            }
        }
        // The source model is left untouched.
        assert!(model.vertices().all(|(_, v)| v.normal.is_none()));
    }

    #[test]
    fn unshared_edges_do_not_move() {
        let model = single_triangle();
        let analysis = Analysis::analyze(&model, 0.1).unwrap();
        let caps = inset_faces(&model, &analysis, false).unwrap();

        let (face, _) = model.faces().next().unwrap();
        let original = model.face_positions(face).unwrap();
        for (a, b) in cap_positions(&caps, face).iter().zip(&original) {
            assert_relative_eq!(*a, *b, epsilon = 1e-15);
        }
    }

    #[test]
    fn collinear_corner_uses_midpoint() {
        let mut model = Model::new();
        let ids = add_points(
            &mut model,
            &[
                p(0.0, 1.0, 0.0),
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(2.0, 0.0, 0.0),
                p(2.0, 1.0, 0.0),
                // Unrelated partner face that lends its sides to the edges.
                p(5.0, 5.0, 5.0),
                p(6.0, 5.0, 5.0),
                p(5.0, 6.0, 5.0),
            ],
        );
        let faces = add_faces(&mut model, &ids, &[&[0, 1, 2, 3, 4], &[5, 6, 7]]);
        let (flat, partner) = (faces[0], faces[1]);

        let mut analysis = Analysis::analyze(&model, 0.1).unwrap();
        assert!(analysis.edges().is_empty());
        for (side, partner_side, delta) in [(1, 0, 0.1), (2, 1, 0.3)] {
            analysis.insert_edge(RoundingEdge {
                f0: flat,
                f1: partner,
                f0i: side,
                f1i: partner_side,
                v0: ids[side],
                v1: ids[side + 1],
                angle: 0.0,
                delta,
            });
        }

        let caps = inset_faces(&model, &analysis, false).unwrap();
        let cap = cap_positions(&caps, flat);

        // (1, 0) sits between two parallel sides offset by 0.1 and 0.3.
        assert_relative_eq!(cap[2], p(1.0, 0.2, 0.0), epsilon = 1e-15);
        // (0, 0) meets an unshared side and a side offset by 0.1.
        assert_relative_eq!(cap[1], p(0.0, 0.1, 0.0), epsilon = 1e-15);
        // Points away from the offset sides stay put.
        assert_relative_eq!(cap[0], p(0.0, 1.0, 0.0), epsilon = 1e-15);
        assert_relative_eq!(cap[4], p(2.0, 1.0, 0.0), epsilon = 1e-15);
    }
}
