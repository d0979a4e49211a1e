//! Rounding of a polyhedral model: face inset, edge fillets and
//! spherical corner patches.
//!
//! The pass runs as a chain of snapshots. [`Analysis`] reads the model
//! once, [`inset_faces`] builds the shrunk caps into a fresh vertex arena,
//! [`fillet_edges`] adds a cylindrical strip per shared edge, and
//! [`stitch_corners`] closes every fully filleted corner. Only the final
//! [`Rounded::commit`] touches the model.

pub mod analysis;
pub mod corner_fillet;
pub mod edge_fillet;
pub mod inset;

pub use analysis::{Analysis, Corner, RoundingEdge};
pub use corner_fillet::{stitch_corners, Rounded};
pub use edge_fillet::{fillet_edges, Fillets, Rail};
pub use inset::{inset_faces, Cap, Caps};

use tracing::{debug, debug_span};

use crate::error::{Result, RoundError};
use crate::topology::Model;

/// Segment counts and attribute options for a rounding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundParams {
    /// Quads per edge fillet.
    pub edge_segments: usize,
    /// Rings per corner patch, including the final fan.
    pub corner_segments: usize,
    /// Assign synthetic normals to every new point.
    pub compute_normals: bool,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            edge_segments: 3,
            corner_segments: 3,
            compute_normals: false,
        }
    }
}

impl RoundParams {
    /// Checks the segment counts.
    ///
    /// Each corner ring is one point shorter than the one before it, so a
    /// corner cannot have more segments than the rails feeding it.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::InvalidParameters`] when a count is out of
    /// range.
    pub fn validate(&self) -> Result<(), RoundError> {
        if self.edge_segments == 0 {
            return Err(RoundError::InvalidParameters(
                "edge_segments must be at least 1".into(),
            ));
        }
        if self.corner_segments == 0 || self.corner_segments > self.edge_segments {
            return Err(RoundError::InvalidParameters(format!(
                "corner_segments must be between 1 and edge_segments ({}), got {}",
                self.edge_segments, self.corner_segments
            )));
        }
        Ok(())
    }
}

/// What a rounding pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Shared edges that received a fillet.
    pub edges: usize,
    /// Distinct vertices of the input.
    pub corners: usize,
    /// Corners closed with a spherical patch.
    pub capped_corners: usize,
    /// Quads emitted by the edge fillets.
    pub fillet_faces: usize,
    /// Triangles and quads emitted by the corner patches.
    pub corner_faces: usize,
}

/// Rounds every shared edge and closed corner of a model.
pub struct Round {
    radius: f64,
    params: RoundParams,
}

impl Round {
    /// Creates a new `Round` operation with the default parameters.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            params: RoundParams::default(),
        }
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn with_params(mut self, params: RoundParams) -> Self {
        self.params = params;
        self
    }

    /// Turns synthetic normals on or off.
    #[must_use]
    pub fn with_normals(mut self, compute_normals: bool) -> Self {
        self.params.compute_normals = compute_normals;
        self
    }

    /// Executes the rounding, replacing the model's mesh in place.
    ///
    /// Original faces keep their ids and shrink to caps; new faces are
    /// appended. On error the model is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError`] for a bad radius or bad parameters, and a
    /// topology error if the model is non-manifold.
    pub fn execute(&self, model: &mut Model) -> Result<RoundReport> {
        self.params.validate()?;
        self.check_radius(model)?;

        let span = debug_span!("round", radius = self.radius);
        let _guard = span.enter();

        let analysis = Analysis::analyze(model, self.radius)?;
        let caps = inset_faces(model, &analysis, self.params.compute_normals)?;
        let fillets = fillet_edges(caps, &analysis, self.radius, &self.params)?;
        let rounded = stitch_corners(fillets, &analysis, model, self.radius, &self.params)?;
        let report = rounded.commit(model)?;

        debug!(
            faces = model.face_count(),
            vertices = model.vertex_count(),
            "rounded model"
        );
        Ok(report)
    }

    /// The radius must be positive and below half of every face edge.
    fn check_radius(&self, model: &Model) -> Result<(), RoundError> {
        let radius = self.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RoundError::InvalidRadius { radius });
        }

        let mut shortest = f64::INFINITY;
        for (id, face) in model.faces() {
            let Ok(positions) = model.face_positions(id) else {
                continue;
            };
            for (i, _, _) in face.edges() {
                let length = (positions[(i + 1) % positions.len()] - positions[i]).norm();
                shortest = shortest.min(length);
            }
        }
        let limit = shortest / 2.0;
        if radius >= limit {
            return Err(RoundError::RadiusTooLarge { radius, limit });
        }
        Ok(())
    }
}
