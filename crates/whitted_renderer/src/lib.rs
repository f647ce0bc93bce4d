//! Whitted-style recursive ray tracer.
//!
//! Primary rays come from a movable [`Camera`]; every hit is shaded with
//! the Phong model, hard shadows and mirror reflection up to a fixed depth.
//! Rendering fans out over disjoint column ranges with rayon.

pub mod camera;
pub mod columns;
pub mod renderer;
pub mod shading;

pub use camera::Camera;
pub use columns::{partition_columns, ColumnRange, ColumnResult};
pub use renderer::{render, ImageBuffer, RenderConfig, RenderError, BACKGROUND};
pub use shading::{is_occluded, shade, trace};
