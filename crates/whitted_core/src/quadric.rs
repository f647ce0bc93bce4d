//! General quadric surface, optionally clipped to an axis-aligned box.
//!
//! `Ax² + By² + Cz² + Dxy + Eyz + Fzx + Gx + Hy + Iz + J = 0`

use whitted_math::{Aabb, GeometryError, GeometryResult, Ray, Vector, VectorExt, EPSILON};

/// A second-degree surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadric {
    /// A through J, in equation order
    coefficients: [f64; 10],
    /// Reference corner of the clip box
    corner: Vector,
    /// Length, width and height of the clip box; 0 leaves an axis open
    dimensions: Vector,
    bounds: Aabb,
}

impl Quadric {
    pub fn new(coefficients: [f64; 10], corner: Vector, dimensions: Vector) -> Self {
        let bounds = Aabb::from_corner(corner, dimensions).expand(EPSILON);
        Self {
            coefficients,
            corner,
            dimensions,
            bounds,
        }
    }

    /// Unclipped surface.
    pub fn unbounded(coefficients: [f64; 10]) -> Self {
        Self::new(coefficients, Vector::ZERO, Vector::ZERO)
    }

    pub fn coefficients(&self) -> &[f64; 10] {
        &self.coefficients
    }

    pub fn corner(&self) -> Vector {
        self.corner
    }

    pub fn dimensions(&self) -> Vector {
        self.dimensions
    }

    /// Nearest positive root whose point lies inside the clip box.
    ///
    /// The smaller root is tried first; if it is behind the origin or
    /// clipped away, the larger one is used instead.
    pub fn intersect(&self, ray: &Ray) -> GeometryResult<Option<f64>> {
        let [a, b, c, d, e, f, g, h, i, j] = self.coefficients;
        let Vector { x: dx, y: dy, z: dz } = ray.direction();
        let Vector { x: x0, y: y0, z: z0 } = ray.origin();

        let qa = a * dx * dx + b * dy * dy + c * dz * dz + d * dx * dy + e * dy * dz + f * dz * dx;

        let qb = 2.0 * (a * x0 * dx + b * y0 * dy + c * z0 * dz)
            + d * (x0 * dy + y0 * dx)
            + e * (y0 * dz + z0 * dy)
            + f * (z0 * dx + x0 * dz)
            + g * dx
            + h * dy
            + i * dz;

        let qc = a * x0 * x0 + b * y0 * y0 + c * z0 * z0
            + d * x0 * y0
            + e * y0 * z0
            + f * z0 * x0
            + g * x0
            + h * y0
            + i * z0
            + j;

        // `qa` is quadratic in a unit direction, so only a vanishing value
        // relative to the second-order coefficients is degenerate
        let scale = [a, b, c, d, e, f].iter().fold(0.0_f64, |m, k| m.max(k.abs()));
        if qa.abs() <= f64::EPSILON * scale {
            return Err(GeometryError::ZeroLeadingCoefficient(qa));
        }

        let discriminant = qb * qb - 4.0 * qa * qc;
        if discriminant < 0.0 {
            return Ok(None);
        }

        let sqrtd = discriminant.sqrt();
        let r1 = (-qb - sqrtd) / (2.0 * qa);
        let r2 = (-qb + sqrtd) / (2.0 * qa);
        let (near, far) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };

        let accept = |t: f64| t > 0.0 && self.bounds.contains(ray.at(t));
        if accept(near) {
            Ok(Some(near))
        } else if accept(far) {
            Ok(Some(far))
        } else {
            Ok(None)
        }
    }

    /// Unit gradient of the implicit function at `point`.
    pub fn normal_at(&self, point: Vector) -> GeometryResult<Vector> {
        let [a, b, c, d, e, f, g, h, i, _] = self.coefficients;
        let Vector { x, y, z } = point;

        Vector::new(
            2.0 * a * x + d * y + f * z + g,
            2.0 * b * y + d * x + e * z + h,
            2.0 * c * z + e * y + f * x + i,
        )
        .normalize_checked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x² + y² + z² - 4 = 0
    fn sphere_r2() -> [f64; 10] {
        [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -4.0]
    }

    /// x² + y² - 1 = 0, a cylinder around the z axis
    fn cylinder_r1() -> [f64; 10] {
        [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0]
    }

    #[test]
    fn test_quadric_sphere_matches_analytic() {
        let q = Quadric::unbounded(sphere_r2());
        let ray = Ray::new(Vector::new(0.0, 0.0, 10.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        let t = q.intersect(&ray).unwrap().unwrap();
        assert!((t - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadric_miss() {
        let q = Quadric::unbounded(sphere_r2());
        let ray = Ray::new(Vector::new(5.0, 0.0, 10.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        assert_eq!(q.intersect(&ray).unwrap(), None);
    }

    #[test]
    fn test_quadric_clip_falls_back_to_far_root() {
        // Clip the sphere to z in [-2, 0]: the near root (z = 2) is cut away
        let q = Quadric::new(
            sphere_r2(),
            Vector::new(0.0, 0.0, -2.0),
            Vector::new(0.0, 0.0, 2.0),
        );
        let ray = Ray::new(Vector::new(0.0, 0.0, 10.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        let t = q.intersect(&ray).unwrap().unwrap();
        assert!((t - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadric_clipped_cylinder() {
        // Cylinder segment with height 5 starting at z = 0
        let q = Quadric::new(cylinder_r1(), Vector::ZERO, Vector::new(0.0, 0.0, 5.0));

        let inside = Ray::new(Vector::new(-10.0, 0.0, 2.0), Vector::X).unwrap();
        let t = q.intersect(&inside).unwrap().unwrap();
        assert!((t - 9.0).abs() < 1e-9);

        let above = Ray::new(Vector::new(-10.0, 0.0, 7.0), Vector::X).unwrap();
        assert_eq!(q.intersect(&above).unwrap(), None);
    }

    #[test]
    fn test_quadric_steep_ray_hits_cylinder_wall() {
        // x² + y² = 100, cut to 0 <= z <= 20
        let q = Quadric::new(
            [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -100.0],
            Vector::ZERO,
            Vector::new(0.0, 0.0, 20.0),
        );
        let ray = Ray::new(Vector::new(9.998, 0.0, 20.0), Vector::new(0.0005, 0.0, -1.0)).unwrap();

        let t = q.intersect(&ray).unwrap().unwrap();
        let hit = ray.at(t);
        assert!((hit.x - 10.0).abs() < 1e-6);
        assert!((hit.z - 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_quadric_zero_leading_coefficient() {
        // Ray along the cylinder axis: the quadratic degenerates
        let q = Quadric::unbounded(cylinder_r1());
        let ray = Ray::new(Vector::new(0.5, 0.0, 10.0), Vector::new(0.0, 0.0, -1.0)).unwrap();

        assert!(matches!(
            q.intersect(&ray),
            Err(GeometryError::ZeroLeadingCoefficient(_))
        ));
    }

    #[test]
    fn test_quadric_normal_is_gradient() {
        let q = Quadric::unbounded(cylinder_r1());
        let n = q.normal_at(Vector::new(0.0, 1.0, 3.0)).unwrap();
        assert!((n - Vector::Y).length() < 1e-12);

        // Gradient vanishes on the axis
        assert!(q.normal_at(Vector::new(0.0, 0.0, 3.0)).is_err());
    }
}
