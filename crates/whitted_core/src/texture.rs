//! Texture sampling for the floor.
//!
//! Decoding image files is the caller's business; this module only maps
//! normalized (u, v) coordinates to a color from pixels already in memory.

use crate::color::Color;

/// Maps normalized texture coordinates to a color.
///
/// Must be deterministic: the same (u, v) always yields the same color.
pub trait TextureSampler: Send + Sync {
    fn sample(&self, u: f64, v: f64) -> Color;
}

/// A single color everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidTexture {
    color: Color,
}

impl SolidTexture {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Gray used when texture mode is on but no texture was installed.
pub const FALLBACK_TEXTURE: SolidTexture = SolidTexture::new(Color::new(0.5, 0.5, 0.5));

impl TextureSampler for SolidTexture {
    fn sample(&self, _u: f64, _v: f64) -> Color {
        self.color
    }
}

/// An RGB8 image held in memory, sampled nearest-texel.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, row-major, top row first
    pixels: Vec<[u8; 3]>,
}

impl Texture {
    /// Create a texture from row-major RGB pixels.
    ///
    /// Returns `None` if the pixel count does not match the dimensions or
    /// the texture would be empty.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a texture from tightly packed RGB bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() % 3 != 0 {
            return None;
        }
        let pixels = bytes.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect();
        Self::new(width, height, pixels)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[(y * self.width + x) as usize]
    }
}

impl TextureSampler for Texture {
    /// (0, 0) is the bottom-left texel; coordinates are clamped to [0, 1].
    fn sample(&self, u: f64, v: f64) -> Color {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = (u * (self.width - 1) as f64) as u32;
        let y = ((1.0 - v) * (self.height - 1) as f64) as u32;

        let [r, g, b] = self.get_pixel(x, y);
        Color::new(r as f64, g as f64, b as f64) / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Texture {
        // top-left red, top-right green, bottom-left blue, bottom-right white
        Texture::new(
            2,
            2,
            vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]],
        )
        .unwrap()
    }

    #[test]
    fn test_solid_texture() {
        let tex = SolidTexture::new(Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.sample(0.3, 0.9), Color::new(1.0, 0.5, 0.0));
        assert_eq!(FALLBACK_TEXTURE.sample(0.0, 0.0), Color::splat(0.5));
    }

    #[test]
    fn test_texture_corners() {
        let tex = two_by_two();
        assert_eq!(tex.sample(0.0, 1.0), Color::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(1.0, 1.0), Color::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(0.0, 0.0), Color::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample(1.0, 0.0), Color::ONE);
    }

    #[test]
    fn test_texture_clamps_coordinates() {
        let tex = two_by_two();
        assert_eq!(tex.sample(-3.0, 7.0), tex.sample(0.0, 1.0));
    }

    #[test]
    fn test_texture_size_mismatch() {
        assert!(Texture::new(2, 2, vec![[0, 0, 0]; 3]).is_none());
        assert!(Texture::new(0, 0, Vec::new()).is_none());
        assert!(Texture::from_rgb_bytes(1, 1, &[1, 2]).is_none());
        assert!(Texture::from_rgb_bytes(1, 1, &[1, 2, 3]).is_some());
    }
}
