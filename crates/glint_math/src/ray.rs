use crate::Vec3;

/// A ray in 3D space: `origin + t * direction` for `t >= 0`.
///
/// The direction is expected to be unit length. Constructors do not
/// normalize; callers do that once when they build the direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Copy of this ray with its origin nudged along `offset`.
    ///
    /// Used for secondary rays that must start just off a surface.
    #[inline]
    pub fn offset(&self, offset: Vec3) -> Self {
        Self::new(self.origin + offset, self.direction)
    }
}
