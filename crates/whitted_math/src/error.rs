use thiserror::Error;

/// Degenerate geometry detected while building or querying a primitive.
///
/// These never mean "the ray missed"; a miss is `None`. They mean the
/// input data cannot produce a finite answer and would otherwise leak NaN.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("cannot normalize a vector of length {0:e}")]
    ZeroLength(f64),

    #[error("triangle system is singular (determinant {0:e})")]
    SingularSystem(f64),

    #[error("quadric leading coefficient vanishes (a = {0:e})")]
    ZeroLeadingCoefficient(f64),

    #[error("triangle vertices are collinear")]
    DegenerateTriangle,

    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f64),
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
