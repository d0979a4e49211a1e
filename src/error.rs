use thiserror::Error;

/// Top-level error type for the bevel engine.
#[derive(Debug, Error)]
pub enum BevelError {
    #[error(transparent)]
    Face(#[from] FaceError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Round(#[from] RoundError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// A polygon rejected when it is added to a model.
#[derive(Debug, Error, PartialEq)]
pub enum FaceError {
    #[error("a face needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("face references a vertex that is not in the model")]
    UnknownVertex,

    #[error("vertex at index {index} appears more than once in the face")]
    RepeatedVertex { index: usize },

    #[error("degenerate face: {0}")]
    Degenerate(String),

    #[error("point {index} lies {distance} off the face plane")]
    NonPlanar { index: usize, distance: f64 },

    #[error("face turns the wrong way at point {index} (not convex or inconsistently wound)")]
    NonConvex { index: usize },
}

/// Errors related to the model's connectivity.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("directed edge is used by more than one face (non-manifold or inconsistent winding)")]
    NonManifoldEdge,
}

/// Errors raised by the rounding pass before any geometry is touched.
#[derive(Debug, Error, PartialEq)]
pub enum RoundError {
    #[error("rounding radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f64 },

    #[error("rounding radius {radius} must be below {limit} (half the shortest edge)")]
    RadiusTooLarge { radius: f64, limit: f64 },

    #[error("invalid rounding parameters: {0}")]
    InvalidParameters(String),

    #[error("an inset edge collapsed to zero length")]
    CollapsedEdge,
}

/// Errors related to whole-model operations.
#[derive(Debug, Error, PartialEq)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to geometry export.
#[derive(Debug, Error, PartialEq)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`BevelError`].
pub type Result<T, E = BevelError> = std::result::Result<T, E>;
