/// A closed range of scalars, used for ray parameters and box extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Grows the interval by `padding` on each side.
    pub fn pad(&self, padding: f32) -> Interval {
        Interval::new(self.min - padding, self.max + padding)
    }

    /// The color channel range.
    pub const UNIT: Interval = Interval::new(0.0, 1.0);

    /// Every non-negative ray parameter.
    pub const FORWARD: Interval = Interval::new(0.0, f32::INFINITY);
}
