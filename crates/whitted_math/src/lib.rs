// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod aabb;
mod error;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use error::{GeometryError, GeometryResult};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, Vector, VectorExt};

/// Tolerance used by every geometric comparison in the tracer.
pub const EPSILON: f64 = 1e-6;
