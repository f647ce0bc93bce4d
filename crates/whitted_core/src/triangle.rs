//! Triangle primitive.
//!
//! Intersection solves the barycentric system with Cramer's rule.

use whitted_math::{DMat3, GeometryError, GeometryResult, Ray, Vector, VectorExt};

/// A triangle given by three explicit vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    a: Vector,
    b: Vector,
    c: Vector,
    /// (b - a) × (c - a), unit length
    normal: Vector,
}

impl Triangle {
    /// Create a new triangle. Collinear vertices are rejected.
    pub fn new(a: Vector, b: Vector, c: Vector) -> GeometryResult<Self> {
        let normal = (b - a)
            .cross(c - a)
            .normalize_checked()
            .map_err(|_| GeometryError::DegenerateTriangle)?;

        Ok(Self { a, b, c, normal })
    }

    pub fn vertices(&self) -> [Vector; 3] {
        [self.a, self.b, self.c]
    }

    /// Solve `o + t d = a + β(b - a) + γ(c - a)` for (β, γ, t).
    ///
    /// Hits must lie strictly inside the triangle: β > 0, γ > 0,
    /// β + γ < 1 and t > 0, so edges and vertices are misses. A singular
    /// system (ray parallel to the plane) is reported as an error.
    pub fn intersect(&self, ray: &Ray) -> GeometryResult<Option<f64>> {
        let ab = self.a - self.b;
        let ac = self.a - self.c;
        let ao = self.a - ray.origin();
        let d = ray.direction();

        let det = DMat3::from_cols(ab, ac, d).determinant();
        if det.abs() <= f64::EPSILON {
            return Err(GeometryError::SingularSystem(det));
        }

        let beta = DMat3::from_cols(ao, ac, d).determinant() / det;
        let gamma = DMat3::from_cols(ab, ao, d).determinant() / det;
        let t = DMat3::from_cols(ab, ac, ao).determinant() / det;

        if beta > 0.0 && gamma > 0.0 && beta + gamma < 1.0 && t > 0.0 {
            Ok(Some(t))
        } else {
            Ok(None)
        }
    }

    /// Face normal; the same everywhere on the triangle.
    pub fn normal(&self) -> Vector {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::new(
            Vector::new(-1.0, -1.0, -1.0),
            Vector::new(1.0, -1.0, -1.0),
            Vector::new(0.0, 1.0, -1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_hit() {
        let tri = xy_triangle();
        let ray = Ray::new(Vector::ZERO, Vector::new(0.0, 0.0, -1.0)).unwrap();

        let t = tri.intersect(&ray).unwrap().unwrap();
        assert!((t - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_miss_outside() {
        let tri = xy_triangle();
        let ray = Ray::new(Vector::new(5.0, 0.0, 0.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        assert_eq!(tri.intersect(&ray).unwrap(), None);
    }

    #[test]
    fn test_triangle_miss_behind() {
        let tri = xy_triangle();
        let ray = Ray::new(Vector::ZERO, Vector::new(0.0, 0.0, 1.0)).unwrap();

        assert_eq!(tri.intersect(&ray).unwrap(), None);
    }

    #[test]
    fn test_triangle_vertex_is_rejected() {
        let tri = xy_triangle();
        for vertex in tri.vertices() {
            let origin = Vector::new(vertex.x, vertex.y, 5.0);
            let ray = Ray::new(origin, Vector::new(0.0, 0.0, -1.0)).unwrap();
            assert_eq!(tri.intersect(&ray).unwrap(), None);
        }
    }

    #[test]
    fn test_triangle_barycentrics_of_hit() {
        let tri = xy_triangle();
        let target = Vector::new(0.2, -0.3, -1.0);
        let ray = Ray::new(Vector::new(3.0, 2.0, 4.0), target - Vector::new(3.0, 2.0, 4.0)).unwrap();

        let t = tri.intersect(&ray).unwrap().unwrap();
        assert!((ray.at(t) - target).length() < 1e-9);
    }

    #[test]
    fn test_triangle_parallel_ray_is_singular() {
        let tri = xy_triangle();
        let ray = Ray::new(Vector::new(0.0, 0.0, -1.0), Vector::X).unwrap();

        assert!(matches!(
            tri.intersect(&ray),
            Err(GeometryError::SingularSystem(_))
        ));
    }

    #[test]
    fn test_triangle_degenerate() {
        let result = Triangle::new(Vector::ZERO, Vector::X, Vector::X * 2.0);
        assert_eq!(result, Err(GeometryError::DegenerateTriangle));
    }

    #[test]
    fn test_triangle_normal() {
        let tri = xy_triangle();
        assert!((tri.normal() - Vector::Z).length() < 1e-12);
    }
}
