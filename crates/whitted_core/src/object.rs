//! Scene objects: a shape plus its surface description.

use whitted_math::{GeometryResult, Ray, Vector};

use crate::color::Color;
use crate::floor::Floor;
use crate::material::PhongCoefficients;
use crate::quadric::Quadric;
use crate::sphere::Sphere;
use crate::texture::TextureSampler;
use crate::triangle::Triangle;

/// The closed set of primitives the tracer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
    Floor(Floor),
    Quadric(Quadric),
}

impl Shape {
    /// Short name used in logs and scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Triangle(_) => "triangle",
            Shape::Floor(_) => "floor",
            Shape::Quadric(_) => "general",
        }
    }

    /// Ray parameter of the nearest usable hit.
    pub fn intersect(&self, ray: &Ray) -> GeometryResult<Option<f64>> {
        match self {
            Shape::Sphere(s) => Ok(s.intersect(ray)),
            Shape::Triangle(t) => t.intersect(ray),
            Shape::Floor(f) => Ok(f.intersect(ray)),
            Shape::Quadric(q) => q.intersect(ray),
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vector) -> GeometryResult<Vector> {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Triangle(t) => Ok(t.normal()),
            Shape::Floor(f) => Ok(f.normal()),
            Shape::Quadric(q) => q.normal_at(point),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Triangle> for Shape {
    fn from(t: Triangle) -> Self {
        Shape::Triangle(t)
    }
}

impl From<Floor> for Shape {
    fn from(f: Floor) -> Self {
        Shape::Floor(f)
    }
}

impl From<Quadric> for Shape {
    fn from(q: Quadric) -> Self {
        Shape::Quadric(q)
    }
}

/// A renderable object.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub shape: Shape,
    /// Base color; the floor ignores it in favor of its checker/texture
    pub color: Color,
    pub phong: PhongCoefficients,
}

impl Object {
    pub fn new(shape: impl Into<Shape>, color: Color, phong: PhongCoefficients) -> Self {
        Self {
            shape: shape.into(),
            color,
            phong,
        }
    }

    /// Hit distance, with geometry failures treated as a miss.
    ///
    /// A malformed primitive must not take the whole render down, so
    /// errors are logged at trace level and swallowed here.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self.shape.intersect(ray) {
            Ok(hit) => hit,
            Err(err) => {
                log::trace!("{} intersection failed: {}", self.shape.kind(), err);
                None
            }
        }
    }

    pub fn normal_at(&self, point: Vector) -> GeometryResult<Vector> {
        self.shape.normal_at(point)
    }

    /// Local surface color at `point`.
    ///
    /// `texture` is only consulted by the floor, and only when texture
    /// mode is active.
    pub fn color_at(&self, point: Vector, texture: Option<&dyn TextureSampler>) -> Color {
        match &self.shape {
            Shape::Floor(floor) => floor.color_at(point, texture),
            _ => self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    #[test]
    fn test_object_dispatch() {
        let sphere = Object::new(
            Sphere::new(Vector::ZERO, 1.0).unwrap(),
            Color::new(1.0, 0.0, 0.0),
            PhongCoefficients::ambient_only(),
        );
        let ray = Ray::new(Vector::new(0.0, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        assert_eq!(sphere.shape.kind(), "sphere");
        assert_eq!(sphere.intersect(&ray), Some(4.0));
        assert_eq!(sphere.color_at(Vector::Z, None), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_object_recovers_from_geometry_error() {
        let cylinder = Quadric::unbounded([1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0]);
        let object = Object::new(cylinder, WHITE, PhongCoefficients::default());
        let along_axis = Ray::new(Vector::new(0.5, 0.0, 10.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        assert!(object.shape.intersect(&along_axis).is_err());
        assert_eq!(object.intersect(&along_axis), None);
    }

    #[test]
    fn test_floor_ignores_base_color() {
        let floor = Object::new(Floor::new(100.0, 10.0), Color::new(0.3, 0.3, 0.9), PhongCoefficients::default());
        let color = floor.color_at(Vector::new(1.0, 1.0, 0.0), None);

        assert!(color == BLACK || color == WHITE);
    }
}
