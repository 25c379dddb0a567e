//! Infinite planes and disks.

use std::sync::Arc;

use glint_core::Material;
use glint_math::{normalize, Ray, Vec3};

use crate::hittable::{Hittable, SurfaceHit};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Ray parameter of the hit with the plane through `point` with `normal`.
pub(crate) fn plane_distance(ray: &Ray, point: Vec3, normal: Vec3) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = (point - ray.origin).dot(normal) / denom;
    (t >= 0.0).then_some(t)
}

/// An infinite plane.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Arc<Material>,
}

impl Plane {
    /// Plane through `point`. The normal is normalized here.
    pub fn new(point: Vec3, normal: Vec3, material: Arc<Material>) -> Self {
        Self {
            point,
            normal: normalize(normal),
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let t = plane_distance(ray, self.point, self.normal)?;
        Some(SurfaceHit::new(ray, t, self.normal, None))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// A flat disk: a plane hit no further than `radius` from the center.
#[derive(Debug, Clone)]
pub struct Disk {
    plane: Plane,
    radius: f32,
}

impl Disk {
    pub fn new(center: Vec3, normal: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            plane: Plane::new(center, normal, material),
            radius,
        }
    }
}

impl Hittable for Disk {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let hit = self.plane.intersect(ray)?;
        // 3-D distance from the center
        if hit.point.distance(self.plane.point) > self.radius {
            return None;
        }
        Some(hit)
    }

    fn material(&self) -> &Material {
        self.plane.material()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(Vec3::ZERO, Vec3::Y, Arc::new(Material::default()))
    }

    #[test]
    fn test_plane_hit_from_above() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = floor().intersect(&ray).unwrap();

        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(hit.point.length() < 1e-5);
        assert_eq!(hit.texcoords, None);
    }

    #[test]
    fn test_plane_parallel_never_hits() {
        let plane = floor();
        for origin in [Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::new(3.0, -1.0, 2.0)] {
            assert!(plane.intersect(&Ray::new(origin, Vec3::X)).is_none());
            assert!(plane.intersect(&Ray::new(origin, Vec3::NEG_Z)).is_none());
        }
    }

    #[test]
    fn test_plane_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_normalizes_normal() {
        let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), Arc::new(Material::default()));
        assert_eq!(plane.normal(), Vec3::Y);
    }

    #[test]
    fn test_disk_radius() {
        let disk = Disk::new(Vec3::ZERO, Vec3::Y, 1.0, Arc::new(Material::default()));

        let inside = Ray::new(Vec3::new(0.5, 2.0, 0.0), Vec3::NEG_Y);
        assert!(disk.intersect(&inside).is_some());

        let outside = Ray::new(Vec3::new(1.5, 2.0, 0.0), Vec3::NEG_Y);
        assert!(disk.intersect(&outside).is_none());
    }
}
