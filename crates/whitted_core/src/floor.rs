//! Checkered floor: a square patch of the z = 0 plane centered at the origin.

use whitted_math::{Aabb, Ray, Vector, EPSILON};

use crate::color::{Color, BLACK, WHITE};
use crate::texture::TextureSampler;

/// Number of texture repeats across the whole floor.
const TEXTURE_REPEAT: f64 = 10.0;

/// A `floor_width` × `floor_width` tiled floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    floor_width: f64,
    tile_width: f64,
    /// Lower-left corner, (-w/2, -w/2, 0)
    corner: Vector,
    extent: Aabb,
}

impl Floor {
    pub fn new(floor_width: f64, tile_width: f64) -> Self {
        let corner = Vector::new(-floor_width / 2.0, -floor_width / 2.0, 0.0);
        // Unbounded in z; the plane test already pins z.
        let extent = Aabb::from_corner(corner, Vector::new(floor_width, floor_width, 0.0));

        Self {
            floor_width,
            tile_width,
            corner,
            extent,
        }
    }

    pub fn floor_width(&self) -> f64 {
        self.floor_width
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    /// Plane hit restricted to the floor's square.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let n = self.normal();
        let denom = n.dot(ray.direction());
        if denom.abs() < EPSILON {
            return None;
        }

        let t = -n.dot(ray.origin() - self.corner) / denom;
        if t <= 0.0 || !self.extent.contains(ray.at(t)) {
            return None;
        }
        Some(t)
    }

    /// Always +z; shading flips it toward the viewer when needed.
    pub fn normal(&self) -> Vector {
        Vector::Z
    }

    /// Checker color, or a texture lookup when `texture` is given.
    pub fn color_at(&self, point: Vector, texture: Option<&dyn TextureSampler>) -> Color {
        let local = point - self.corner;

        match texture {
            Some(sampler) => {
                let u = (local.x / self.floor_width * TEXTURE_REPEAT).rem_euclid(1.0);
                let v = (local.y / self.floor_width * TEXTURE_REPEAT).rem_euclid(1.0);
                sampler.sample(u, v)
            }
            None => {
                let i = (local.x / self.tile_width).floor() as i64;
                let j = (local.y / self.tile_width).floor() as i64;
                if (i + j).rem_euclid(2) == 0 {
                    BLACK
                } else {
                    WHITE
                }
            }
        }
    }
}
