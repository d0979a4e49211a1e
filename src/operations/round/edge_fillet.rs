use std::collections::HashMap;

use nalgebra::{Rotation3, Unit};
use tracing::{debug, trace};

use crate::error::{Result, RoundError, TopologyError};
use crate::math::rotation::rotate_about_axis;
use crate::math::{Point3, TOLERANCE};
use crate::topology::{Face, Vertex, VertexId};

use super::analysis::Analysis;
use super::inset::Caps;
use super::RoundParams;

/// One boundary line of a fillet strip, seen from the corner it ends at.
///
/// The rail runs from a cap point of one face to a cap point of the other
/// face, both inset copies of the same original vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rail {
    pub points: Vec<VertexId>,
}

impl Rail {
    /// First point of the rail.
    #[must_use]
    pub fn start(&self) -> Option<VertexId> {
        self.points.first().copied()
    }

    /// Last point of the rail.
    #[must_use]
    pub fn end(&self) -> Option<VertexId> {
        self.points.last().copied()
    }
}

/// Output of the edge phase: the caps plus every fillet strip, and the
/// rails and circle centers each original vertex collected.
#[derive(Debug, Clone)]
pub struct Fillets {
    pub caps: Caps,
    /// Fillet quads, `edge_segments` per shared edge.
    pub strips: Vec<Face>,
    /// Rails ending at each original vertex, in edge order.
    pub rails: HashMap<VertexId, Vec<Rail>>,
    /// Fillet circle center per original vertex; the first edge recorded
    /// for a vertex wins.
    pub centers: HashMap<VertexId, Point3>,
}

/// Builds a cylindrical fillet strip for every shared edge.
///
/// For the edge `(f0, f1)` the strip sweeps the cap boundary of `f0`
/// about the fillet axis until it meets the cap boundary of `f1`. The
/// axis runs through `c0 = p0 - radius * n0` along the cap edge.
///
/// # Errors
///
/// Returns an error if a cap is missing or an inset edge has collapsed.
#[allow(clippy::cast_precision_loss)]
pub fn fillet_edges(
    caps: Caps,
    analysis: &Analysis,
    radius: f64,
    params: &RoundParams,
) -> Result<Fillets> {
    let mut fillets = Fillets {
        caps,
        strips: Vec::with_capacity(analysis.edges().len() * params.edge_segments),
        rails: HashMap::new(),
        centers: HashMap::new(),
    };
    let segments = params.edge_segments;

    for edge in analysis.edges() {
        let n0 = analysis
            .face_normal(edge.f0)
            .ok_or_else(|| TopologyError::EntityNotFound("face normal".into()))?;
        let cap0 = fillets
            .caps
            .cap(edge.f0)
            .ok_or_else(|| TopologyError::EntityNotFound("cap".into()))?;
        let cap1 = fillets
            .caps
            .cap(edge.f1)
            .ok_or_else(|| TopologyError::EntityNotFound("cap".into()))?;

        let id0 = cap0.points[edge.f0i];
        let id1 = cap0.points[(edge.f0i + 1) % cap0.points.len()];
        let id2 = cap1.points[edge.f1i];
        let id3 = cap1.points[(edge.f1i + 1) % cap1.points.len()];

        let p0 = vertex(&fillets.caps, id0)?.clone();
        let p1 = vertex(&fillets.caps, id1)?.clone();
        let p2 = vertex(&fillets.caps, id2)?.clone();
        let p3 = vertex(&fillets.caps, id3)?.clone();

        let c0 = p0.position - n0 * radius;
        let c1 = p1.position - n0 * radius;
        let axis = Unit::try_new(c1 - c0, TOLERANCE).ok_or(RoundError::CollapsedEdge)?;

        let mut line0 = vec![id0];
        let mut line1 = vec![id1];
        for i in 1..segments {
            let t = i as f64 / segments as f64;
            let theta = edge.angle * t;

            let mut np0 = Vertex::lerp(&p0, &p3, t);
            np0.position = rotate_about_axis(&p0.position, &c0, &axis, theta);
            let mut np1 = Vertex::lerp(&p1, &p2, t);
            np1.position = rotate_about_axis(&p1.position, &c0, &axis, theta);
            if params.compute_normals {
                let normal = Rotation3::from_axis_angle(&axis, theta) * n0;
                np0.normal = Some(normal);
                np1.normal = Some(normal);
            }

            line0.push(fillets.caps.vertices.insert(np0));
            line1.push(fillets.caps.vertices.insert(np1));
        }
        line0.push(id3);
        line1.push(id2);

        for i in 0..segments {
            fillets.strips.push(Face::new(vec![
                line0[i + 1],
                line1[i + 1],
                line1[i],
                line0[i],
            ]));
        }
        line1.reverse();

        trace!(angle = edge.angle, "filleted edge");
        fillets.centers.entry(edge.v0).or_insert(c0);
        fillets.centers.entry(edge.v1).or_insert(c1);
        fillets
            .rails
            .entry(edge.v0)
            .or_default()
            .push(Rail { points: line0 });
        fillets
            .rails
            .entry(edge.v1)
            .or_default()
            .push(Rail { points: line1 });
    }

    debug!(
        edges = analysis.edges().len(),
        strips = fillets.strips.len(),
        "filleted edges"
    );
    Ok(fillets)
}

fn vertex(caps: &Caps, id: VertexId) -> Result<&Vertex, TopologyError> {
    caps.vertex(id)
        .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector3;
    use crate::operations::round::inset::inset_faces;
    use crate::topology::fixtures::{corner_tripod, regular_tetrahedron, unit_cube};
    use crate::topology::Model;

    fn fillet(model: &Model, radius: f64, params: &RoundParams) -> (Analysis, Fillets) {
        let analysis = Analysis::analyze(model, radius).unwrap();
        let caps = inset_faces(model, &analysis, params.compute_normals).unwrap();
        let fillets = fillet_edges(caps, &analysis, radius, params).unwrap();
        (analysis, fillets)
    }

    fn position(fillets: &Fillets, id: VertexId) -> Point3 {
        fillets.caps.vertex(id).unwrap().position
    }

    fn distance_to_line(point: &Point3, origin: &Point3, direction: &Vector3) -> f64 {
        (point - origin).cross(&direction.normalize()).norm()
    }

    #[test]
    fn cube_strip_and_rail_counts() {
        let (_, fillets) = fillet(&unit_cube(), 0.1, &RoundParams::default());

        assert_eq!(fillets.strips.len(), 36);
        assert_eq!(fillets.caps.vertices.len(), 24 + 12 * 2 * 2);
        assert_eq!(fillets.rails.len(), 8);
        assert_eq!(fillets.centers.len(), 8);
        for rails in fillets.rails.values() {
            assert_eq!(rails.len(), 3);
            for rail in rails {
                assert_eq!(rail.points.len(), 4);
            }
        }
    }

    #[test]
    fn strip_points_lie_on_the_fillet_cylinder() {
        let radius = 0.1;
        for model in [unit_cube(), regular_tetrahedron()] {
            let (analysis, fillets) = fillet(&model, radius, &RoundParams::default());
            for (edge, strip) in analysis
                .edges()
                .iter()
                .zip(fillets.strips.chunks(RoundParams::default().edge_segments))
            {
                let n0 = analysis.face_normal(edge.f0).unwrap();
                let a = position(&fillets, strip[0].points[3]);
                let b = position(&fillets, strip[0].points[2]);
                let c0 = a - n0 * radius;
                let axis = b - a;
                for face in strip {
                    for &id in &face.points {
                        let d = distance_to_line(&position(&fillets, id), &c0, &axis);
                        assert_relative_eq!(d, radius, max_relative = 1e-6);
                    }
                }
            }
        }
    }

    #[test]
    fn sweep_ends_on_the_partner_cap() {
        let radius = 0.1;
        let model = unit_cube();
        let analysis = Analysis::analyze(&model, radius).unwrap();
        let caps = inset_faces(&model, &analysis, false).unwrap();

        // Rotating the f0 cap edge by the full dihedral angle lands on the
        // f1 cap edge.
        for edge in analysis.edges() {
            let n0 = analysis.face_normal(edge.f0).unwrap();
            let cap0 = caps.cap(edge.f0).unwrap();
            let cap1 = caps.cap(edge.f1).unwrap();
            let p0 = caps.vertex(cap0.points[edge.f0i]).unwrap().position;
            let p1 = caps
                .vertex(cap0.points[(edge.f0i + 1) % cap0.points.len()])
                .unwrap()
                .position;
            let p3 = caps
                .vertex(cap1.points[(edge.f1i + 1) % cap1.points.len()])
                .unwrap()
                .position;
            let c0 = p0 - n0 * radius;
            let axis = Unit::new_normalize(p1 - p0);
            let swept = rotate_about_axis(&p0, &c0, &axis, edge.angle);
            assert_relative_eq!(swept, p3, epsilon = 1e-12);
        }
    }

    #[test]
    fn rails_run_between_copies_of_their_corner() {
        let model = unit_cube();
        let (_, fillets) = fillet(&model, 0.1, &RoundParams::default());

        for (&corner, rails) in &fillets.rails {
            let original = model.vertex(corner).unwrap().position;
            for rail in rails {
                for id in [rail.start().unwrap(), rail.end().unwrap()] {
                    let d = (position(&fillets, id) - original).norm();
                    // A cap point sits 0.1 in along both in-plane axes.
                    assert_relative_eq!(d, 0.1 * 2.0_f64.sqrt(), epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn fillet_normals_follow_the_rotation() {
        let params = RoundParams {
            compute_normals: true,
            ..RoundParams::default()
        };
        let radius = 0.1;
        let (analysis, fillets) = fillet(&unit_cube(), radius, &params);

        for (edge, strip) in analysis.edges().iter().zip(fillets.strips.chunks(3)) {
            let n0 = analysis.face_normal(edge.f0).unwrap();
            let a = position(&fillets, strip[0].points[3]);
            let b = position(&fillets, strip[0].points[2]);
            let c0 = a - n0 * radius;
            let axis = (b - a).normalize();
            // Interior sweep points carry the cylinder's outward normal.
            let id = strip[0].points[0];
            let point = position(&fillets, id);
            let radial = (point - c0) - axis * (point - c0).dot(&axis);
            let normal = fillets.caps.vertex(id).unwrap().normal.unwrap();
            assert_relative_eq!(normal, radial.normalize(), epsilon = 1e-12);
        }
    }

    #[test]
    fn single_segment_strips_join_caps_directly() {
        let params = RoundParams {
            edge_segments: 1,
            corner_segments: 1,
            compute_normals: false,
        };
        let (model, _) = corner_tripod();
        let (_, fillets) = fillet(&model, 0.05, &params);

        assert_eq!(fillets.strips.len(), 3);
        assert_eq!(fillets.caps.vertices.len(), 9);
        for rails in fillets.rails.values() {
            for rail in rails {
                assert_eq!(rail.points.len(), 2);
            }
        }
    }
}
