use crate::{Interval, Vec3};

/// Axis-aligned bounding box, one interval per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB centered on `center` with full edge lengths `size`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::from_points(center - half, center + half)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Edge lengths along each axis.
    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min(), Vec3::ZERO);
        assert_eq!(aabb.max(), Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));

        assert_eq!(aabb.min(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.extent(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_aabb_axis_interval() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(aabb.axis_interval(0).max, 1.0);
        assert_eq!(aabb.axis_interval(1).max, 2.0);
        assert_eq!(aabb.axis_interval(2).max, 3.0);
    }
}
