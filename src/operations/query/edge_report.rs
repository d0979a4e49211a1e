use std::collections::{HashMap, HashSet};

use crate::error::TopologyError;
use crate::topology::{Model, VertexId};

/// Edge classification of a model.
///
/// Edges are undirected vertex pairs taken from the face windings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Edges used once in each direction.
    pub interior: usize,
    /// Edges used by a single face.
    pub boundary: usize,
    /// Edges used more than once in the same direction or by more than
    /// two faces.
    pub non_manifold: usize,
    /// Vertices referenced by at least one face.
    pub vertices: usize,
    /// Number of faces.
    pub faces: usize,
}

impl EdgeReport {
    /// Classifies every edge of `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn compute(model: &Model) -> Result<Self, TopologyError> {
        // (forward uses, backward uses) keyed by the ordered pair.
        let mut uses: HashMap<(VertexId, VertexId), (usize, usize)> = HashMap::new();
        let mut referenced: HashSet<VertexId> = HashSet::new();

        for (_, face) in model.faces() {
            for (_, from, to) in face.edges() {
                model.vertex(from)?;
                referenced.insert(from);
                if from < to {
                    uses.entry((from, to)).or_default().0 += 1;
                } else {
                    uses.entry((to, from)).or_default().1 += 1;
                }
            }
        }

        let mut report = Self {
            vertices: referenced.len(),
            faces: model.face_count(),
            ..Self::default()
        };
        for &(forward, backward) in uses.values() {
            match (forward, backward) {
                (1, 1) => report.interior += 1,
                (1, 0) | (0, 1) => report.boundary += 1,
                _ => report.non_manifold += 1,
            }
        }
        Ok(report)
    }

    /// Total number of distinct edges.
    #[must_use]
    pub fn edges(&self) -> usize {
        self.interior + self.boundary + self.non_manifold
    }

    /// Returns `true` if every edge is shared by exactly two faces with
    /// opposite windings.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.boundary == 0 && self.non_manifold == 0
    }

    /// `V - E + F` over the referenced vertices.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges() as i64 + self.faces as i64
    }
}
