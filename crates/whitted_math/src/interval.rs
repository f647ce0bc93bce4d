/// A closed range of ray parameters or coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min <= x <= max`
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// `min < x < max`; used for open hit windows.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Expands the interval by delta on each side.
    pub fn expand(&self, delta: f64) -> Interval {
        Interval::new(self.min - delta, self.max + delta)
    }

    /// Unbounded on both sides.
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// The unit interval [0, 1], used to clamp color channels.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
