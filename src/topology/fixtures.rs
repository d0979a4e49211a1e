//! Small meshes shared by the unit tests.

use crate::math::{Color, Point3};

use super::{FaceId, Model, Vertex, VertexId};

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// Adds one vertex per position.
pub(crate) fn add_points(model: &mut Model, points: &[Point3]) -> Vec<VertexId> {
    points
        .iter()
        .map(|&pos| model.add_vertex(Vertex::new(pos)))
        .collect()
}

/// Adds a face over `ids[i]` for each `i` in `order`.
#[allow(clippy::unwrap_used)]
pub(crate) fn add_faces(model: &mut Model, ids: &[VertexId], faces: &[&[usize]]) -> Vec<FaceId> {
    faces
        .iter()
        .map(|order| {
            let points: Vec<VertexId> = order.iter().map(|&i| ids[i]).collect();
            model.add_face(&points).unwrap()
        })
        .collect()
}

/// Closed unit cube `[0, 1]³`; vertex `i` sits at bits `(x, y, z) = (i & 1, i >> 1 & 1, i >> 2)`.
pub(crate) fn unit_cube() -> Model {
    let mut model = Model::new();
    let corners: Vec<Point3> = (0..8)
        .map(|i| p(f64::from(i & 1), f64::from((i >> 1) & 1), f64::from(i >> 2)))
        .collect();
    let ids = add_points(&mut model, &corners);
    add_faces(
        &mut model,
        &ids,
        &[
            &[0, 4, 6, 2], // x = 0
            &[1, 3, 7, 5], // x = 1
            &[0, 1, 5, 4], // y = 0
            &[2, 6, 7, 3], // y = 1
            &[0, 2, 3, 1], // z = 0
            &[4, 5, 7, 6], // z = 1
        ],
    );
    model
}

/// Regular tetrahedron inscribed in the cube `[-1, 1]³`.
pub(crate) fn regular_tetrahedron() -> Model {
    let mut model = Model::new();
    let ids = add_points(
        &mut model,
        &[
            p(1.0, 1.0, 1.0),
            p(1.0, -1.0, -1.0),
            p(-1.0, 1.0, -1.0),
            p(-1.0, -1.0, 1.0),
        ],
    );
    add_faces(&mut model, &ids, &[&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2]]);
    model
}

/// Orange vertices of the corner cubon: the cube corner `(-1, -1, -1)`,
/// its three axis neighbors, and the diagonal point `(-1/3, -1/3, -1/3)`.
fn corner_cubon_points(model: &mut Model) -> Vec<VertexId> {
    let orange = Color::new(1.0, 0.5, 0.0);
    [
        p(-1.0, -1.0, -1.0),
        p(0.0, -1.0, -1.0),
        p(-1.0, 0.0, -1.0),
        p(-1.0, -1.0, 0.0),
        p(-1.0 / 3.0, -1.0 / 3.0, -1.0 / 3.0),
    ]
    .iter()
    .map(|&pos| model.add_vertex(Vertex::new(pos).with_color(orange)))
    .collect()
}

/// Three triangles meeting at one cube corner, open along the far rim.
///
/// Returns the model and the shared corner vertex at `(-1, -1, -1)`.
pub(crate) fn corner_tripod() -> (Model, VertexId) {
    let mut model = Model::new();
    let mut ids = corner_cubon_points(&mut model);
    // The diagonal point is not part of the tripod.
    if let Some(diagonal) = ids.pop() {
        model.vertices.remove(diagonal);
    }
    add_faces(&mut model, &ids, &[&[2, 1, 0], &[3, 2, 0], &[1, 3, 0]]);
    (model, ids[0])
}

/// The closed corner cubon: the tripod plus three faces meeting on the
/// cube diagonal.
pub(crate) fn corner_cubon() -> Model {
    let mut model = Model::new();
    let ids = corner_cubon_points(&mut model);
    add_faces(
        &mut model,
        &ids,
        &[
            &[2, 1, 0],
            &[3, 2, 0],
            &[1, 3, 0],
            &[1, 2, 4],
            &[2, 3, 4],
            &[3, 1, 4],
        ],
    );
    model
}

/// A single free-standing triangle.
pub(crate) fn single_triangle() -> Model {
    let mut model = Model::new();
    let ids = add_points(&mut model, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)]);
    add_faces(&mut model, &ids, &[&[0, 1, 2]]);
    model
}
