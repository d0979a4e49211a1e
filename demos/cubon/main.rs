//! Cubon builder: rounds every distinct cubon shape and reports the
//! resulting meshes.
//!
//! Usage:
//! ```text
//! cargo run --example cubon                      # all shapes
//! cargo run --example cubon -- corner edge       # selected shapes
//! RUST_LOG=bevel=debug cargo run --example cubon # phase details
//! ```

mod layouts;

use bevel::math::{Matrix3, Matrix4};
use bevel::operations::query::BoundingBox;
use bevel::operations::transform::Transform;
use bevel::{AttributeDefaults, BevelError, Model, Round};
use tracing::{info, warn};

const RADIUS: f64 = 0.05;

fn main() -> Result<(), BevelError> {
    // Default: WARN for everything, INFO for bevel and this demo.
    // Override with RUST_LOG env var (e.g. RUST_LOG=bevel=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("cubon=info".parse().unwrap_or_default())
        .add_directive("bevel=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let wanted: Vec<String> = std::env::args().skip(1).collect();
    let to_cube = to_cube_frame()?;

    for layout in layouts::all() {
        if !wanted.is_empty() && !wanted.iter().any(|w| w == layout.name) {
            continue;
        }
        match process(&layout, &to_cube) {
            Ok(model) => report(layout.name, &model)?,
            Err(err) => warn!(cubon = layout.name, %err, "skipping cubon"),
        }
    }
    Ok(())
}

/// Builds, rounds and places one cubon, plus its mirrored twin on the
/// opposite side of the cube.
fn process(layout: &layouts::Layout, to_cube: &Matrix4) -> Result<Model, BevelError> {
    let mut model = layout.build()?;
    let rounded = Round::new(RADIUS).execute(&mut model)?;
    info!(
        cubon = layout.name,
        edges = rounded.edges,
        capped = rounded.capped_corners,
        "rounded"
    );

    let mut twin = model.clone();
    Transform::new(flip()).execute(&mut twin)?;
    report(&format!("{}-twin", layout.name), &twin)?;

    Transform::new(*to_cube).execute(&mut model)?;
    model.compute_normals()?;
    Ok(model)
}

fn report(name: &str, model: &Model) -> Result<(), BevelError> {
    let edges = model.edge_report()?;
    let buffers = model.to_geometry(&AttributeDefaults::default())?;
    let extent = BoundingBox::execute(model).map(|b| b.extent());
    info!(
        cubon = name,
        faces = model.face_count(),
        vertices = model.vertex_count(),
        triangles = buffers.triangle_count(),
        closed = edges.is_closed(),
        euler = edges.euler_characteristic(),
        ?extent,
        "mesh"
    );
    Ok(())
}

/// `(x, y, z) -> (-y, -x, -z)`: maps a cubon onto its twin.
fn flip() -> Matrix4 {
    Matrix3::new(0.0, -1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, -1.0).to_homogeneous()
}

/// Inverse of the tilted frame, back to cube axes.
fn to_cube_frame() -> Result<Matrix4, BevelError> {
    layouts::forward_basis()
        .try_inverse()
        .map(|m| m.to_homogeneous())
        .ok_or_else(|| {
            bevel::error::OperationError::InvalidInput("cube frame is singular".into()).into()
        })
}
