pub mod face;
pub mod vertex;

#[cfg(test)]
pub(crate) mod fixtures;

pub use face::{validate_polygon, Face, FaceId};
pub use vertex::{Vertex, VertexId};

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::error::{FaceError, Result, TopologyError};
use crate::math::{polygon_normal, vertex_angle, Point3, Vector3};
use crate::operations::normals::ComputeNormals;
use crate::operations::query::EdgeReport;
use crate::operations::round::{Round, RoundReport};
use crate::tessellation::{AttributeDefaults, FanTessellate, IndexedMesh, VertexBuffers};

/// Arena that owns every vertex and face of a polygon mesh.
///
/// Faces reference vertices by [`VertexId`]. Two faces share an edge when
/// the same pair of ids appears in both, in opposite order.
#[derive(Debug, Clone, Default)]
pub struct Model {
    vertices: SlotMap<VertexId, Vertex>,
    faces: SlotMap<FaceId, Face>,
}

impl Model {
    /// Creates a new, empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        self.vertices.insert(vertex)
    }

    /// Returns a reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter()
    }

    pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = (VertexId, &mut Vertex)> {
        self.vertices.iter_mut()
    }

    /// Number of vertices in the model.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Face operations ---

    /// Adds a face over existing vertices.
    ///
    /// The points must be listed counter-clockwise as seen from outside and
    /// form a planar convex polygon.
    ///
    /// # Errors
    ///
    /// Returns a [`FaceError`] if a vertex is unknown or repeated, or the
    /// polygon fails [`validate_polygon`].
    pub fn add_face(&mut self, points: &[VertexId]) -> Result<FaceId> {
        let mut seen = HashSet::with_capacity(points.len());
        for (index, id) in points.iter().enumerate() {
            if !seen.insert(*id) {
                return Err(FaceError::RepeatedVertex { index }.into());
            }
        }
        let positions = points
            .iter()
            .map(|&id| {
                self.vertices
                    .get(id)
                    .map(|v| v.position)
                    .ok_or(FaceError::UnknownVertex)
            })
            .collect::<Result<Vec<_>, _>>()?;
        validate_polygon(&positions)?;

        Ok(self.faces.insert(Face::new(points.to_vec())))
    }

    /// Inserts the given vertices and a face over them in one step.
    ///
    /// The new vertices are not shared with any existing face.
    ///
    /// # Errors
    ///
    /// Same as [`Model::add_face`]. Nothing is inserted on failure.
    pub fn add_polygon(&mut self, vertices: Vec<Vertex>) -> Result<FaceId> {
        let positions: Vec<Point3> = vertices.iter().map(|v| v.position).collect();
        validate_polygon(&positions)?;
        let points = vertices.into_iter().map(|v| self.vertices.insert(v)).collect();
        Ok(self.faces.insert(Face::new(points)))
    }

    /// Inserts a face produced by an operation that guarantees its shape.
    pub(crate) fn insert_face_unchecked(&mut self, face: Face) -> FaceId {
        self.faces.insert(face)
    }

    /// Returns a reference to the face, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn face(&self, id: FaceId) -> Result<&Face, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Returns a mutable reference to the face, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the model.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut Face, TopologyError> {
        self.faces
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Iterates over all faces in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter()
    }

    pub(crate) fn faces_mut(&mut self) -> impl Iterator<Item = (FaceId, &mut Face)> {
        self.faces.iter_mut()
    }

    /// Number of faces in the model.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Positions of a face's points, in winding order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its vertices is missing.
    pub fn face_positions(&self, id: FaceId) -> Result<Vec<Point3>, TopologyError> {
        self.face(id)?
            .points
            .iter()
            .map(|&v| self.vertex(v).map(|v| v.position))
            .collect()
    }

    /// Outward unit normal of a face, from its first three points.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing or its leading triangle is
    /// degenerate.
    pub fn face_normal(&self, id: FaceId) -> Result<Vector3> {
        let positions = self.face_positions(id)?;
        polygon_normal(&positions)
            .ok_or_else(|| FaceError::Degenerate("first three points are collinear".into()).into())
    }

    /// Interior angle of a face at its local point `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its vertices is missing.
    pub fn vertex_angle(&self, id: FaceId, index: usize) -> Result<f64, TopologyError> {
        Ok(vertex_angle(&self.face_positions(id)?, index))
    }

    /// Drops every vertex that no face references.
    pub fn remove_unused_points(&mut self) {
        let used: HashSet<VertexId> = self
            .faces
            .values()
            .flat_map(|f| f.points.iter().copied())
            .collect();
        self.vertices.retain(|id, _| used.contains(&id));
    }

    /// Replaces the whole vertex arena. Faces must already point into it.
    pub(crate) fn replace_vertices(&mut self, vertices: SlotMap<VertexId, Vertex>) {
        self.vertices = vertices;
    }

    // --- Operations ---

    /// Bevels every shared edge and closed corner with the given radius,
    /// using the default segment counts.
    ///
    /// # Errors
    ///
    /// See [`Round::execute`].
    pub fn round(&mut self, radius: f64, compute_normals: bool) -> Result<RoundReport> {
        Round::new(radius).with_normals(compute_normals).execute(self)
    }

    /// Assigns angle-weighted normals to every referenced vertex.
    ///
    /// # Errors
    ///
    /// See [`ComputeNormals::execute`].
    pub fn compute_normals(&mut self) -> Result<()> {
        ComputeNormals::new().execute(self)
    }

    /// Flattens the faces into fan-triangulated attribute buffers.
    ///
    /// # Errors
    ///
    /// See [`FanTessellate::execute`].
    pub fn to_geometry(&self, defaults: &AttributeDefaults) -> Result<VertexBuffers> {
        FanTessellate::new(*defaults).execute(self)
    }

    /// Fan-triangulates the faces into an indexed mesh with shared vertices.
    ///
    /// # Errors
    ///
    /// See [`FanTessellate::execute_indexed`].
    pub fn to_indexed_mesh(&self, defaults: &AttributeDefaults) -> Result<IndexedMesh> {
        FanTessellate::new(*defaults).execute_indexed(self)
    }

    /// Classifies every edge of the model.
    ///
    /// # Errors
    ///
    /// See [`EdgeReport::compute`].
    pub fn edge_report(&self) -> Result<EdgeReport, TopologyError> {
        EdgeReport::compute(self)
    }
}
