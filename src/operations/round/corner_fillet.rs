use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::{Result, TopologyError};
use crate::math::rotation::{project_onto_sphere, radial_direction};
use crate::math::Point3;
use crate::topology::{Face, Model, Vertex, VertexId};

use super::analysis::Analysis;
use super::edge_fillet::{Fillets, Rail};
use super::inset::Cap;
use super::{RoundParams, RoundReport};

/// The finished rounded mesh, not yet written back to the model.
#[derive(Debug, Clone)]
pub struct Rounded {
    vertices: SlotMap<VertexId, Vertex>,
    caps: Vec<Cap>,
    strips: Vec<Face>,
    corner_faces: Vec<Face>,
    report: RoundReport,
}

impl Rounded {
    /// Summary of what the pass produced.
    #[must_use]
    pub fn report(&self) -> &RoundReport {
        &self.report
    }

    /// Writes the rounded mesh into `model`.
    ///
    /// Every original face keeps its id and takes its cap's points. Fillet
    /// and corner faces are appended after them, and the vertex arena is
    /// replaced by the rounded one.
    ///
    /// # Errors
    ///
    /// Returns an error if a cap refers to a face that is no longer in the
    /// model. The model is left untouched in that case.
    pub fn commit(self, model: &mut Model) -> Result<RoundReport> {
        for cap in &self.caps {
            model.face(cap.face)?;
        }
        for cap in self.caps {
            model.face_mut(cap.face)?.points = cap.points;
        }
        model.replace_vertices(self.vertices);
        for face in self.strips.into_iter().chain(self.corner_faces) {
            model.insert_face_unchecked(face);
        }
        model.remove_unused_points();
        Ok(self.report)
    }
}

/// Samples points on one corner sphere.
struct Sphere {
    center: Point3,
    radius: f64,
    compute_normals: bool,
}

impl Sphere {
    /// Interpolates two vertices and pushes the result onto the sphere.
    fn sample(&self, a: &Vertex, b: &Vertex, t: f64) -> Vertex {
        let mut v = Vertex::lerp(a, b, t);
        v.position = project_onto_sphere(&v.position, &self.center, self.radius);
        if self.compute_normals || v.normal.is_some() {
            v.normal = radial_direction(&v.position, &self.center).or(v.normal);
        }
        v
    }
}

/// Closes every corner whose face fan is fully filleted with a spherical
/// patch.
///
/// Each rail at a corner gets a connector line from both of its ends to
/// the corner tip, and rings interpolated between the two connectors
/// shrink the rail one point at a time until the last ring fans into the
/// tip. Connectors are shared between neighboring rails, so the patch is
/// watertight. Corners with an open fan keep the strip ends open.
///
/// # Errors
///
/// Returns an error if a corner, rail point or center is missing.
#[allow(clippy::cast_precision_loss)]
pub fn stitch_corners(
    fillets: Fillets,
    analysis: &Analysis,
    model: &Model,
    radius: f64,
    params: &RoundParams,
) -> Result<Rounded> {
    let Fillets {
        caps,
        strips,
        rails,
        centers,
    } = fillets;
    let mut vertices = caps.vertices;
    let mut corner_faces = Vec::new();
    let mut capped = 0;
    let segments = params.corner_segments;

    for corner in analysis.corners() {
        let Some(corner_rails) = rails.get(&corner.vertex) else {
            continue;
        };
        if corner_rails.len() != corner.occurrences.len() {
            warn!(
                rails = corner_rails.len(),
                faces = corner.occurrences.len(),
                "corner fan is open, leaving it uncapped"
            );
            continue;
        }
        let center = *centers
            .get(&corner.vertex)
            .ok_or_else(|| TopologyError::EntityNotFound("corner center".into()))?;
        let sphere = Sphere {
            center,
            radius,
            compute_normals: params.compute_normals,
        };

        let mut tip = model.vertex(corner.vertex)?.clone();
        tip.position = center + corner.normal * radius;
        if params.compute_normals {
            tip.normal = Some(corner.normal);
        }
        let tip = vertices.insert(tip);

        let mut connectors: HashMap<VertexId, Vec<VertexId>> = HashMap::new();
        for rail in corner_rails {
            let (Some(start), Some(end)) = (rail.start(), rail.end()) else {
                continue;
            };
            let line0 = connector(&mut connectors, &mut vertices, &sphere, start, tip, segments)?;
            let line1 = connector(&mut connectors, &mut vertices, &sphere, end, tip, segments)?;
            stitch_sector(
                &mut vertices,
                &mut corner_faces,
                &sphere,
                rail,
                &line0,
                &line1,
                tip,
                segments,
            )?;
        }
        capped += 1;
    }

    let report = RoundReport {
        edges: analysis.edges().len(),
        corners: analysis.corners().len(),
        capped_corners: capped,
        fillet_faces: strips.len(),
        corner_faces: corner_faces.len(),
    };
    debug!(
        capped = report.capped_corners,
        faces = report.corner_faces,
        "stitched corners"
    );
    Ok(Rounded {
        vertices,
        caps: caps.caps,
        strips,
        corner_faces,
        report,
    })
}

/// The great-circle-like line from a rail end to the tip, built once per
/// rail end and shared by both sectors that meet there.
#[allow(clippy::cast_precision_loss)]
fn connector(
    cache: &mut HashMap<VertexId, Vec<VertexId>>,
    vertices: &mut SlotMap<VertexId, Vertex>,
    sphere: &Sphere,
    start: VertexId,
    tip: VertexId,
    segments: usize,
) -> Result<Vec<VertexId>> {
    if let Some(line) = cache.get(&start) {
        return Ok(line.clone());
    }
    let a = lookup(vertices, start)?.clone();
    let b = lookup(vertices, tip)?.clone();

    let mut line = vec![start];
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        line.push(vertices.insert(sphere.sample(&a, &b, t)));
    }
    line.push(tip);

    cache.insert(start, line.clone());
    Ok(line)
}

/// Fills the patch between one rail and its two connectors.
#[allow(clippy::cast_precision_loss, clippy::too_many_arguments)]
fn stitch_sector(
    vertices: &mut SlotMap<VertexId, Vertex>,
    faces: &mut Vec<Face>,
    sphere: &Sphere,
    rail: &Rail,
    line0: &[VertexId],
    line1: &[VertexId],
    tip: VertexId,
    segments: usize,
) -> Result<()> {
    let mut last = rail.points.clone();

    for i in 1..segments {
        if last.len() < 3 {
            break;
        }
        let m = last.len() - 1;
        let a = lookup(vertices, line0[i])?.clone();
        let b = lookup(vertices, line1[i])?.clone();

        let mut ring = Vec::with_capacity(m);
        ring.push(line0[i]);
        for j in 1..m - 1 {
            let t = j as f64 / (m - 1) as f64;
            ring.push(vertices.insert(sphere.sample(&a, &b, t)));
        }
        ring.push(line1[i]);

        for j in 0..m - 1 {
            faces.push(Face::new(vec![ring[j], ring[j + 1], last[j + 1], last[j]]));
        }
        faces.push(Face::new(vec![ring[m - 1], last[m], last[m - 1]]));
        last = ring;
    }

    for j in 1..last.len() {
        faces.push(Face::new(vec![last[j], last[j - 1], tip]));
    }
    Ok(())
}

fn lookup(vertices: &SlotMap<VertexId, Vertex>, id: VertexId) -> Result<&Vertex, TopologyError> {
    vertices
        .get(id)
        .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
}
