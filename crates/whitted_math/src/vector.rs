//! Vector helpers on top of `glam::DVec3`.

use glam::DVec3;

use crate::{GeometryError, GeometryResult, EPSILON};

/// Double precision 3D vector used for points, directions and normals.
pub type Vector = DVec3;

/// Checked operations glam leaves to the caller.
pub trait VectorExt: Sized {
    /// Unit vector in the same direction.
    ///
    /// Fails when the magnitude is within `EPSILON` of zero instead of
    /// producing NaN components.
    fn normalize_checked(self) -> GeometryResult<Self>;

    /// Rotate around `axis` by `angle_deg` degrees (Rodrigues' formula).
    ///
    /// The axis does not need to be unit length, but it must not be zero.
    fn rotate_about(self, axis: Self, angle_deg: f64) -> GeometryResult<Self>;
}

impl VectorExt for DVec3 {
    fn normalize_checked(self) -> GeometryResult<Self> {
        let magnitude = self.length();
        if magnitude <= EPSILON {
            return Err(GeometryError::ZeroLength(magnitude));
        }
        Ok(self / magnitude)
    }

    fn rotate_about(self, axis: Self, angle_deg: f64) -> GeometryResult<Self> {
        let theta = angle_deg.to_radians();
        let k = axis.normalize_checked()?;
        let (sin, cos) = theta.sin_cos();

        Ok(self * cos + k.cross(self) * sin + k * k.dot(self) * (1.0 - cos))
    }
}

/// Mirror `incident` about the plane with unit normal `normal`.
///
/// `reflect(N, I) = I - 2(I·N)N`
#[inline]
pub fn reflect(normal: Vector, incident: Vector) -> Vector {
    incident - normal * (2.0 * incident.dot(normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector, b: Vector) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_normalize_checked() {
        let v = Vector::new(3.0, 0.0, 4.0).normalize_checked().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!(approx(v, Vector::new(0.6, 0.0, 0.8)));
    }

    #[test]
    fn test_normalize_zero_fails() {
        assert!(matches!(
            Vector::ZERO.normalize_checked(),
            Err(GeometryError::ZeroLength(_))
        ));
        assert!(Vector::splat(1e-8).normalize_checked().is_err());
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vector::X.rotate_about(Vector::Z, 90.0).unwrap();
        assert!(approx(v, Vector::Y));

        let back = v.rotate_about(Vector::Z, -90.0).unwrap();
        assert!(approx(back, Vector::X));
    }

    #[test]
    fn test_rotate_unnormalized_axis() {
        let v = Vector::Y.rotate_about(Vector::new(5.0, 0.0, 0.0), 90.0).unwrap();
        assert!(approx(v, Vector::Z));
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vector::new(1.0, -2.0, 0.5);
        let r = v.rotate_about(Vector::new(0.3, 0.2, 0.9), 37.0).unwrap();
        assert!((v.length() - r.length()).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_zero_axis_fails() {
        assert!(Vector::X.rotate_about(Vector::ZERO, 10.0).is_err());
    }

    #[test]
    fn test_reflect() {
        let i = Vector::new(1.0, -1.0, 0.0);
        let r = reflect(Vector::Y, i);
        assert!(approx(r, Vector::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_reflect_twice_is_identity() {
        let n = Vector::new(1.0, 2.0, -0.5).normalize();
        let i = Vector::new(-0.3, 0.7, 0.2);
        assert!(approx(reflect(n, reflect(n, i)), i));
    }
}
