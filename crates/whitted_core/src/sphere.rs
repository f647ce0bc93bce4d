//! Sphere primitive.

use whitted_math::{GeometryError, GeometryResult, Ray, Vector, VectorExt};

/// A sphere given by center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vector,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Vector, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vector {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance along `ray` to the nearest non-negative root.
    ///
    /// With a unit direction the quadratic is `t² + b t + c = 0`, where
    /// `b = 2 d·(o - center)` and `c = |o - center|² - r²`. A ray starting
    /// inside the sphere only has one non-negative root, the exit point.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let l = ray.origin() - self.center;
        let b = 2.0 * ray.direction().dot(l);
        let c = l.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / 2.0;
        let far = (-b + sqrtd) / 2.0;

        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vector) -> GeometryResult<Vector> {
        (point - self.center).normalize_checked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at_origin() -> Sphere {
        Sphere::new(Vector::ZERO, 5.0).unwrap()
    }

    #[test]
    fn test_sphere_hit_through_center() {
        let sphere = unit_at_origin();
        let ray = Ray::new(Vector::new(0.0, 0.0, 20.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 15.0).abs() < 1e-9); // distance to center minus radius
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_at_origin();
        let ray = Ray::new(Vector::new(0.0, 10.0, 20.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = unit_at_origin();
        let ray = Ray::new(Vector::new(0.0, 0.0, 20.0), Vector::new(0.0, 0.0, 1.0)).unwrap();

        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn test_sphere_from_inside() {
        let sphere = unit_at_origin();
        let ray = Ray::new(Vector::new(0.0, 1.0, 0.0), Vector::X).unwrap();

        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 24.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = Sphere::new(Vector::new(1.0, 0.0, 0.0), 2.0).unwrap();
        let n = sphere.normal_at(Vector::new(1.0, 2.0, 0.0)).unwrap();
        assert!((n - Vector::Y).length() < 1e-12);
        assert!(sphere.normal_at(sphere.center()).is_err());
    }

    #[test]
    fn test_sphere_invalid_radius() {
        assert_eq!(
            Sphere::new(Vector::ZERO, 0.0),
            Err(GeometryError::InvalidRadius(0.0))
        );
        assert!(Sphere::new(Vector::ZERO, -1.0).is_err());
        assert!(Sphere::new(Vector::ZERO, f64::NAN).is_err());
    }
}
