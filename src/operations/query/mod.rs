mod bounding_box;
mod edge_report;

pub use bounding_box::{Aabb, BoundingBox};
pub use edge_report::EdgeReport;
