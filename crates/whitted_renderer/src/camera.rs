//! Camera frame for primary ray generation.
//!
//! The camera is a position plus an orthonormal (look, up, right) frame
//! with `look × up = right`. Every mutating operation keeps the frame
//! orthonormal.

use whitted_math::{GeometryResult, Vector, VectorExt, EPSILON};

/// Eye position used when none is given.
pub const DEFAULT_EYE: Vector = Vector::new(125.0, -125.0, 125.0);

/// Default translation step in world units.
pub const DEFAULT_SPEED: f64 = 2.0;

/// Default rotation step in degrees.
pub const DEFAULT_ROTATION_SPEED: f64 = 0.5;

/// Movable, rotatable camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vector,
    look: Vector,
    up: Vector,
    right: Vector,

    /// Distance covered by one move step
    pub speed: f64,
    /// Degrees turned by one rotation step
    pub rotation_speed: f64,
}

impl Camera {
    /// Build a camera at `eye` looking at `center`.
    ///
    /// When the view direction is perpendicular to `up_hint` the hint
    /// becomes the up vector. Otherwise the right vector is taken level
    /// with the xy plane and up is derived from it. Fails if `eye` and
    /// `center` coincide or the view is straight along the z axis with a
    /// non-perpendicular hint.
    pub fn look_at(
        eye: Vector,
        center: Vector,
        up_hint: Vector,
        speed: f64,
        rotation_speed: f64,
    ) -> GeometryResult<Self> {
        let look = (center - eye).normalize_checked()?;

        let (up, right) = if look.dot(up_hint).abs() <= EPSILON {
            let up = up_hint.normalize_checked()?;
            (up, look.cross(up).normalize_checked()?)
        } else {
            let right = Vector::new(look.y, -look.x, 0.0).normalize_checked()?;
            (right.cross(look).normalize_checked()?, right)
        };

        Ok(Self {
            position: eye,
            look,
            up,
            right,
            speed,
            rotation_speed,
        })
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn look(&self) -> Vector {
        self.look
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn right(&self) -> Vector {
        self.right
    }

    pub fn move_forward(&mut self) {
        self.position += self.look * self.speed;
    }

    pub fn move_backward(&mut self) {
        self.position -= self.look * self.speed;
    }

    pub fn move_left(&mut self) {
        self.position -= self.right * self.speed;
    }

    pub fn move_right(&mut self) {
        self.position += self.right * self.speed;
    }

    pub fn move_up(&mut self) {
        self.position += self.up * self.speed;
    }

    pub fn move_down(&mut self) {
        self.position -= self.up * self.speed;
    }

    /// Yaw left around the up vector.
    pub fn look_left(&mut self) {
        self.yaw(self.rotation_speed);
    }

    pub fn look_right(&mut self) {
        self.yaw(-self.rotation_speed);
    }

    /// Pitch up around the right vector.
    pub fn look_up(&mut self) {
        self.pitch(self.rotation_speed);
    }

    pub fn look_down(&mut self) {
        self.pitch(-self.rotation_speed);
    }

    /// Roll around the look vector.
    pub fn tilt_clockwise(&mut self) {
        self.roll(self.rotation_speed);
    }

    pub fn tilt_counterclockwise(&mut self) {
        self.roll(-self.rotation_speed);
    }

    /// Rise one step along world z, pitching down so the origin stays at
    /// the same place in view.
    ///
    /// The pitch is the angle the eye sweeps as seen from the origin, found
    /// with the law of cosines. This only holds for a camera aimed at the
    /// world origin; it is not a general look-at.
    pub fn move_up_same_ref(&mut self) {
        self.shift_height_same_ref(self.speed);
    }

    /// Sink one step along world z, pitching up to keep the origin in view.
    pub fn move_down_same_ref(&mut self) {
        self.shift_height_same_ref(-self.speed);
    }

    fn shift_height_same_ref(&mut self, dz: f64) {
        let prev_len = self.position.length();
        self.position.z += dz;
        let new_len = self.position.length();

        if prev_len <= EPSILON || new_len <= EPSILON {
            log::debug!("Camera passed through the origin, keeping orientation");
            return;
        }

        let cos_angle = (prev_len * prev_len + new_len * new_len - dz * dz) / (2.0 * prev_len * new_len);
        let angle = cos_angle.clamp(-1.0, 1.0).acos().to_degrees();

        self.pitch(-angle.copysign(dz));
        self.right = self.look.cross(self.up).normalize_checked().unwrap_or(self.right);
    }

    fn yaw(&mut self, angle_deg: f64) {
        self.look = turn(self.look, self.up, angle_deg);
        self.right = turn(self.right, self.up, angle_deg);
    }

    fn pitch(&mut self, angle_deg: f64) {
        self.look = turn(self.look, self.right, angle_deg);
        self.up = turn(self.up, self.right, angle_deg);
    }

    fn roll(&mut self, angle_deg: f64) {
        self.right = turn(self.right, self.look, angle_deg);
        self.up = turn(self.up, self.look, angle_deg);
    }

    /// True if (look, up, right) are unit length and pairwise orthogonal
    /// within `tolerance`.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let unit = |v: Vector| (v.length() - 1.0).abs() <= tolerance;
        unit(self.look)
            && unit(self.up)
            && unit(self.right)
            && self.look.dot(self.up).abs() <= tolerance
            && self.look.dot(self.right).abs() <= tolerance
            && self.up.dot(self.right).abs() <= tolerance
    }
}

impl Default for Camera {
    /// Camera at [`DEFAULT_EYE`] aimed at the origin with +z up.
    fn default() -> Self {
        let look = Vector::new(-1.0, 1.0, -1.0) / 3f64.sqrt();
        let right = Vector::new(1.0, 1.0, 0.0) / 2f64.sqrt();

        Self {
            position: DEFAULT_EYE,
            look,
            up: right.cross(look),
            right,
            speed: DEFAULT_SPEED,
            rotation_speed: DEFAULT_ROTATION_SPEED,
        }
    }
}

/// Rotate a frame vector about another frame vector.
///
/// Frame vectors are unit length, so the axis never degenerates.
fn turn(v: Vector, axis: Vector, angle_deg: f64) -> Vector {
    v.rotate_about(axis, angle_deg).unwrap_or(v)
}
