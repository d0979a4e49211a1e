use std::collections::HashMap;

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::error::{Result, TopologyError};
use crate::math::{vertex_angle, Vector3, TOLERANCE};
use crate::topology::{FaceId, Model, VertexId};

/// One edge shared by two faces, wound in opposite directions.
///
/// Face `f0` runs `v0 -> v1` from its local index `f0i`; face `f1` runs
/// `v1 -> v0` from its local index `f1i`. `f0` is the face inserted first.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundingEdge {
    pub f0: FaceId,
    pub f1: FaceId,
    pub f0i: usize,
    pub f1i: usize,
    pub v0: VertexId,
    pub v1: VertexId,
    /// Angle between the two face normals, in radians.
    pub angle: f64,
    /// In-plane inset that makes cap and fillet meet tangentially,
    /// `tan(angle / 2) * radius`.
    pub delta: f64,
}

/// Every place a vertex appears, with its angle-weighted normal.
#[derive(Debug, Clone)]
pub struct Corner {
    pub vertex: VertexId,
    /// `(face, local index)` occurrences in face order.
    pub occurrences: Vec<(FaceId, usize)>,
    /// Unit normal, the sum of incident face normals weighted by the
    /// interior angle at this vertex.
    pub normal: Vector3,
}

/// Face normals, corners and shared edges of a model.
///
/// Computed once per rounding pass; later phases never look at the
/// model's adjacency again.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub(crate) face_normals: SecondaryMap<FaceId, Vector3>,
    pub(crate) face_order: Vec<FaceId>,
    pub(crate) corners: Vec<Corner>,
    pub(crate) edges: Vec<RoundingEdge>,
    /// `(face, side)` -> index into `edges`, where side `i` is the edge
    /// leaving local point `i`.
    sides: HashMap<(FaceId, usize), usize>,
}

impl Analysis {
    /// Analyzes every face of `model` for a bevel of the given radius.
    ///
    /// # Errors
    ///
    /// Returns an error if a face has a degenerate normal or a directed
    /// edge is used by more than one face.
    pub fn analyze(model: &Model, radius: f64) -> Result<Self> {
        let mut analysis = Self::default();
        let mut rank: SecondaryMap<FaceId, usize> = SecondaryMap::new();
        let mut corner_index: HashMap<VertexId, usize> = HashMap::new();
        let mut directed: HashMap<(VertexId, VertexId), (FaceId, usize)> = HashMap::new();

        for (face_id, face) in model.faces() {
            rank.insert(face_id, analysis.face_order.len());
            analysis.face_order.push(face_id);
            analysis.face_normals.insert(face_id, model.face_normal(face_id)?);

            for (index, &v) in face.points.iter().enumerate() {
                let slot = *corner_index.entry(v).or_insert_with(|| {
                    analysis.corners.push(Corner {
                        vertex: v,
                        occurrences: Vec::new(),
                        normal: Vector3::zeros(),
                    });
                    analysis.corners.len() - 1
                });
                analysis.corners[slot].occurrences.push((face_id, index));
            }

            for (index, from, to) in face.edges() {
                if directed.insert((from, to), (face_id, index)).is_some() {
                    return Err(TopologyError::NonManifoldEdge.into());
                }
            }
        }

        for corner in &mut analysis.corners {
            let mut sum = Vector3::zeros();
            for &(face_id, index) in &corner.occurrences {
                let positions = model.face_positions(face_id)?;
                sum += analysis.face_normals[face_id] * vertex_angle(&positions, index);
            }
            corner.normal = sum
                .try_normalize(TOLERANCE)
                .unwrap_or_else(|| analysis.face_normals[corner.occurrences[0].0]);
        }

        let mut shared = Vec::new();
        for (rank_a, &face_a) in analysis.face_order.iter().enumerate() {
            let face = model.face(face_a)?;
            for (f0i, v0, v1) in face.edges() {
                let Some(&(face_b, f1i)) = directed.get(&(v1, v0)) else {
                    continue;
                };
                if face_b == face_a || rank[face_b] < rank_a {
                    continue;
                }
                let angle = analysis.face_normals[face_a].angle(&analysis.face_normals[face_b]);
                let delta = (angle / 2.0).tan() * radius;
                trace!(f0i, f1i, angle, delta, "shared edge");
                shared.push(RoundingEdge {
                    f0: face_a,
                    f1: face_b,
                    f0i,
                    f1i,
                    v0,
                    v1,
                    angle,
                    delta,
                });
            }
        }
        for edge in shared {
            analysis.insert_edge(edge);
        }

        debug!(
            faces = analysis.face_order.len(),
            corners = analysis.corners.len(),
            edges = analysis.edges.len(),
            "analyzed model"
        );
        Ok(analysis)
    }

    /// Registers an edge under both of its face sides.
    pub(crate) fn insert_edge(&mut self, edge: RoundingEdge) {
        let index = self.edges.len();
        self.sides.insert((edge.f0, edge.f0i), index);
        self.sides.insert((edge.f1, edge.f1i), index);
        self.edges.push(edge);
    }

    /// Shared edges in detection order.
    #[must_use]
    pub fn edges(&self) -> &[RoundingEdge] {
        &self.edges
    }

    /// Corners in order of first appearance.
    #[must_use]
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Outward unit normal of a face.
    #[must_use]
    pub fn face_normal(&self, face: FaceId) -> Option<Vector3> {
        self.face_normals.get(face).copied()
    }

    /// The shared edge leaving local point `index` of `face`, if any.
    #[must_use]
    pub fn edge_leaving(&self, face: FaceId, index: usize) -> Option<&RoundingEdge> {
        self.sides.get(&(face, index)).map(|&i| &self.edges[i])
    }

    /// The shared edge entering local point `index` of a face with `len`
    /// points, if any.
    #[must_use]
    pub fn edge_entering(&self, face: FaceId, index: usize, len: usize) -> Option<&RoundingEdge> {
        self.edge_leaving(face, (index + len - 1) % len)
    }
}
