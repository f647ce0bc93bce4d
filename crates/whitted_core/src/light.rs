//! Light sources.

use whitted_math::{GeometryResult, Vector, VectorExt};

use crate::color::Color;

/// Light radiating equally in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Vector, color: Color) -> Self {
        Self { position, color }
    }
}

/// Light restricted to a cone around `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vector,
    pub color: Color,
    /// Unit axis of the cone
    direction: Vector,
    /// Half-angle of the cone in degrees
    cutoff_deg: f64,
}

impl SpotLight {
    /// Create a spot light. The direction must not be zero.
    pub fn new(position: Vector, color: Color, direction: Vector, cutoff_deg: f64) -> GeometryResult<Self> {
        Ok(Self {
            position,
            color,
            direction: direction.normalize_checked()?,
            cutoff_deg,
        })
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    pub fn cutoff_deg(&self) -> f64 {
        self.cutoff_deg
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    pub fn position(&self) -> Vector {
        match self {
            Light::Point(p) => p.position,
            Light::Spot(s) => s.position,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Point(p) => p.color,
            Light::Spot(s) => s.color,
        }
    }

    /// Intensity weight for light leaving along the unit vector `outgoing`.
    ///
    /// Point lights always give 1. Spot lights give `cos²(β)`, β being the
    /// angle to the cone axis, and `None` at or beyond the cutoff.
    pub fn falloff(&self, outgoing: Vector) -> Option<f64> {
        match self {
            Light::Point(_) => Some(1.0),
            Light::Spot(spot) => {
                let beta = outgoing.dot(spot.direction).clamp(-1.0, 1.0).acos();
                if beta.to_degrees() >= spot.cutoff_deg {
                    return None;
                }
                Some(beta.cos().powi(2))
            }
        }
    }
}

impl From<PointLight> for Light {
    fn from(p: PointLight) -> Self {
        Light::Point(p)
    }
}

impl From<SpotLight> for Light {
    fn from(s: SpotLight) -> Self {
        Light::Spot(s)
    }
}
