/// Phong response of a surface.
///
/// The four weights conventionally sum to at most 1, but nothing enforces
/// it; over-bright sums are clamped at pixel write time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhongCoefficients {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    /// Weight of the color seen along the mirror direction
    pub reflection: f64,
    /// Specular exponent
    pub shininess: u32,
}

impl PhongCoefficients {
    pub fn new(ambient: f64, diffuse: f64, specular: f64, reflection: f64, shininess: u32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            reflection,
            shininess,
        }
    }

    /// Purely ambient response: the surface shows its base color unlit.
    pub fn ambient_only() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 0)
    }

    /// Same coefficients with a different reflection weight.
    pub fn with_reflection(mut self, reflection: f64) -> Self {
        self.reflection = reflection;
        self
    }
}
