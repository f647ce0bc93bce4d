use crate::{GeometryResult, Vector, VectorExt};

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized on construction, whatever magnitude the
/// caller passes, so `t` along the ray is always a true distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vector,
    direction: Vector,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has (near) zero length.
    pub fn new(origin: Vector, direction: Vector) -> GeometryResult<Self> {
        Ok(Self {
            origin,
            direction: direction.normalize_checked()?,
        })
    }

    /// Where the ray starts.
    #[inline]
    pub fn origin(&self) -> Vector {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Point at distance `t` from the origin.
    #[inline]
    pub fn at(&self, t: f64) -> Vector {
        self.origin + self.direction * t
    }

    /// Same ray with its origin pushed `distance` along the direction.
    pub fn nudged(&self, distance: f64) -> Self {
        Self {
            origin: self.at(distance),
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Vector::ZERO, Vector::new(0.0, 0.0, -10.0)).unwrap();
        assert_eq!(ray.direction(), Vector::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vector::ZERO, Vector::X * 3.0).unwrap();

        assert_eq!(ray.at(0.0), Vector::ZERO);
        assert_eq!(ray.at(1.0), Vector::X);
        assert_eq!(ray.at(2.0), Vector::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vector::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_zero_direction_fails() {
        assert!(Ray::new(Vector::ONE, Vector::ZERO).is_err());
    }

    #[test]
    fn test_ray_nudged() {
        let ray = Ray::new(Vector::new(1.0, 2.0, 3.0), Vector::Y).unwrap();
        let nudged = ray.nudged(0.5);

        assert_eq!(nudged.origin(), Vector::new(1.0, 2.5, 3.0));
        assert_eq!(nudged.direction(), ray.direction());
        // Source ray is untouched
        assert_eq!(ray.origin(), Vector::new(1.0, 2.0, 3.0));
    }
}
