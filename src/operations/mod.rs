pub mod normals;
pub mod query;
pub mod round;
pub mod transform;
