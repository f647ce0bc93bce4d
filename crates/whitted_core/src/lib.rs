//! Whitted Core - Scene model for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Sphere`, `Triangle`, `Floor`, `Quadric`, gathered
//!   under the closed `Shape` enum
//! - **Scene objects**: `Object` (shape + base color + Phong coefficients)
//! - **Lights**: `PointLight` and `SpotLight` under `Light`
//! - **Scene context**: `Scene`, passed by reference to every query
//! - **Scene files**: the plain-text scene format and its loader
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::load_scene;
//!
//! let description = load_scene("scene.txt")?;
//! println!("Loaded {} objects, {} lights",
//!     description.scene.object_count(),
//!     description.scene.light_count());
//! ```

pub mod color;
pub mod floor;
pub mod light;
pub mod material;
pub mod object;
pub mod quadric;
pub mod scene;
pub mod scene_file;
pub mod sphere;
pub mod texture;
pub mod triangle;

// Re-export commonly used types
pub use color::Color;
pub use floor::Floor;
pub use light::{Light, PointLight, SpotLight};
pub use material::PhongCoefficients;
pub use object::{Object, Shape};
pub use quadric::Quadric;
pub use scene::Scene;
pub use scene_file::{load_scene, parse_scene, SceneDescription, SceneError};
pub use sphere::Sphere;
pub use texture::{SolidTexture, Texture, TextureSampler};
pub use triangle::Triangle;
