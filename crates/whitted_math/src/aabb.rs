use crate::{Interval, Vector};

/// Axis-aligned box used to clip primitives to a finite extent.
///
/// Each axis is an independent interval; an axis set to
/// `Interval::UNIVERSE` does not constrain points at all.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Box starting at `corner` and extending by `extent` along each axis.
    ///
    /// A zero extent leaves that axis unbounded.
    pub fn from_corner(corner: Vector, extent: Vector) -> Self {
        let axis = |start: f64, len: f64| {
            if len == 0.0 {
                Interval::UNIVERSE
            } else {
                Interval::new(start.min(start + len), start.max(start + len))
            }
        };

        Self {
            x: axis(corner.x, extent.x),
            y: axis(corner.y, extent.y),
            z: axis(corner.z, extent.z),
        }
    }

    /// Grow every axis by `delta` on both sides.
    pub fn expand(&self, delta: f64) -> Aabb {
        Aabb::new(self.x.expand(delta), self.y.expand(delta), self.z.expand(delta))
    }

    /// True if the point lies inside or on the box.
    pub fn contains(&self, p: Vector) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }
}
