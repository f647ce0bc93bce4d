//! RGB color.
//!
//! Channels are unbounded while light is being accumulated; `clamp_color`
//! is applied exactly once, when a pixel is written.

use whitted_math::{DVec3, Interval};

/// Color type alias (RGB, nominally 0-1)
pub type Color = DVec3;

pub const BLACK: Color = Color::ZERO;
pub const WHITE: Color = Color::ONE;

/// Clamp every channel to [0, 1].
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Quantize a clamped color to 8-bit RGB.
pub fn to_rgb8(color: Color) -> [u8; 3] {
    let c = clamp_color(color) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8]
}
