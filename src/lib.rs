pub mod error;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{BevelError, Result};
pub use math::Color;
pub use operations::round::{Round, RoundParams, RoundReport};
pub use tessellation::{AttributeDefaults, IndexedMesh, VertexBuffers};
pub use topology::{Face, FaceId, Model, Vertex, VertexId};
