//! Face layouts of the cubon shapes.
//!
//! Every layout is expressed in the tilted frame of the cube, with the
//! body diagonal along `z`. The `inters` points are the corners of the
//! inner third of the cube, moved into that frame by [`forward_basis`].

use bevel::math::{Color, Matrix3, Point3, Vector3};
use bevel::{Model, Result, Vertex, VertexId};

/// One cubon shape, as built before rounding.
pub struct Layout {
    pub name: &'static str,
    pub color: Color,
    pub points: Vec<Point3>,
    pub faces: Vec<Vec<usize>>,
}

impl Layout {
    /// Builds the layout into a fresh model with colored vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if a face is rejected by the model.
    pub fn build(&self) -> Result<Model> {
        let mut model = Model::new();
        let ids: Vec<VertexId> = self
            .points
            .iter()
            .map(|&p| model.add_vertex(Vertex::new(p).with_color(self.color)))
            .collect();
        for face in &self.faces {
            let points: Vec<VertexId> = face.iter().map(|&i| ids[i]).collect();
            model.add_face(&points)?;
        }
        Ok(model)
    }
}

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

fn normal(a: Point3, b: Point3, origin: Point3) -> Vector3 {
    (a - origin).cross(&(b - origin)).normalize()
}

/// Columns `nx, ny, nz` of the tilted frame.
pub fn forward_basis() -> Matrix3 {
    let nx = normal(p(1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(0.0, 1.0, 1.0));
    let ny = normal(p(-1.0, 1.0, -1.0), p(-1.0, -1.0, 1.0), p(1.0, 1.0, 0.0));
    let nz = nx.cross(&ny).normalize();
    Matrix3::from_columns(&[nx, ny, nz])
}

/// Corner `bits` (`xyz`, 0 = `-1/3`, 1 = `+1/3`) of the inner third.
fn inters(bits: u8) -> Point3 {
    let axis = |bit: u8| if bits & bit == 0 { -1.0 / 3.0 } else { 1.0 / 3.0 };
    let point = p(axis(0b100), axis(0b010), axis(0b001));
    Point3::from(forward_basis() * point.coords)
}

/// Every layout, one per distinct cubon shape.
pub fn all() -> Vec<Layout> {
    vec![corner(), edge(), face_center(), rim(), side()]
}

fn corner() -> Layout {
    Layout {
        name: "corner",
        color: Color::new(1.0, 0.5, 0.0),
        points: vec![
            p(-1.0, -1.0, -1.0),
            p(0.0, -1.0, -1.0),
            p(-1.0, 0.0, -1.0),
            p(-1.0, -1.0, 0.0),
            p(-1.0 / 3.0, -1.0 / 3.0, -1.0 / 3.0),
        ],
        faces: vec![
            vec![2, 1, 0],
            vec![3, 2, 0],
            vec![1, 3, 0],
            vec![1, 2, 4],
            vec![2, 3, 4],
            vec![3, 1, 4],
        ],
    }
}

fn edge() -> Layout {
    Layout {
        name: "edge",
        color: Color::new(1.0, 0.0, 0.0),
        points: vec![
            p(1.0, 0.0, 1.0),
            p(1.0 / 3.0, -1.0 / 3.0, 1.0),
            p(1.0, -1.0, 1.0),
            p(1.0, -1.0 / 3.0, 1.0 / 3.0),
            inters(0b111),
            inters(0b011),
            inters(0b101),
            inters(0b001),
        ],
        faces: vec![
            vec![1, 0, 4, 5],
            vec![2, 1, 5, 7],
            vec![3, 2, 7, 6],
            vec![0, 3, 6, 4],
            vec![0, 1, 2],
            vec![2, 3, 0],
        ],
    }
}

fn face_center() -> Layout {
    Layout {
        name: "face-center",
        color: Color::new(1.0, 1.0, 0.0),
        points: vec![
            p(-1.0 / 3.0, 1.0 / 3.0, 1.0),
            p(1.0 / 3.0, -1.0 / 3.0, 1.0),
            p(1.0, 0.0, 1.0),
            p(0.0, 1.0, 1.0),
            inters(0b011),
            inters(0b111),
        ],
        faces: vec![
            vec![0, 1, 2, 3],
            vec![0, 3, 5, 4],
            vec![2, 1, 4, 5],
            vec![1, 0, 4],
            vec![3, 2, 5],
        ],
    }
}

fn rim() -> Layout {
    Layout {
        name: "rim",
        color: Color::new(0.0, 1.0, 0.0),
        points: vec![
            p(1.0 / 3.0, -1.0 / 3.0, 1.0),
            p(-1.0 / 3.0, 1.0 / 3.0, 1.0),
            p(-1.0, -1.0, 1.0),
            inters(0b011),
        ],
        faces: vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 1, 3], vec![0, 2, 3]],
    }
}

fn side() -> Layout {
    Layout {
        name: "side",
        color: Color::new(0.0, 0.0, 1.0),
        points: vec![
            p(-1.0, -1.0, 1.0),
            p(-1.0, 1.0, 1.0),
            p(-1.0 / 3.0, 1.0 / 3.0, 1.0),
            p(-1.0, -1.0 / 3.0, 1.0 / 3.0),
            inters(0b010),
            inters(0b011),
        ],
        faces: vec![
            vec![0, 2, 1],
            vec![0, 1, 3],
            vec![2, 0, 5],
            vec![3, 1, 4],
            vec![1, 2, 5, 4],
            vec![0, 3, 4, 5],
        ],
    }
}
