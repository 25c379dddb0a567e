//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use glint_core::Material;
use glint_math::{normalize, Ray, Vec2, Vec3};

use crate::hittable::{Hittable, SurfaceHit};

/// Determinants smaller than this mean the ray is parallel to the triangle
/// (or the triangle is degenerate).
const DET_EPSILON: f32 = 1e-4;

/// Hits closer than this are rejected.
const T_EPSILON: f32 = 1e-4;

/// Möller-Trumbore against the triangle `(v0, v1, v2)`.
pub(crate) fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<SurfaceHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < DET_EPSILON {
        return None;
    }

    let f = 1.0 / det;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if !(0.0..=1.0).contains(&v) || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t <= T_EPSILON {
        return None;
    }

    let normal = normalize(edge1.cross(edge2));
    Some(SurfaceHit::new(ray, t, normal, Some(Vec2::new(1.0 - u, 1.0 - v))))
}

/// A single triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Vec3; 3],
    material: Arc<Material>,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<Material>) -> Self {
        Self {
            vertices: [v0, v1, v2],
            material,
        }
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let [v0, v1, v2] = self.vertices;
        intersect_triangle(ray, v0, v1, v2)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Arc::new(Material::default()),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::NEG_Z);

        let hit = tri.intersect(&ray).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.2, 0.2, 0.0)).length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);

        // texcoords are (1 - u, 1 - v), so u + v <= 1 becomes their sum >= 1
        let uv = hit.texcoords.unwrap();
        assert!((1.0 - uv.x) + (1.0 - uv.y) <= 1.0 + 1e-6);
        assert!((uv.x - 0.8).abs() < 1e-5);
        assert!((uv.y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_miss_outside_footprint() {
        let tri = unit_triangle();
        let outside = [
            Vec3::new(0.8, 0.8, 1.0),
            Vec3::new(-0.1, 0.5, 1.0),
            Vec3::new(0.5, -0.1, 1.0),
        ];
        for origin in outside {
            assert!(tri.intersect(&Ray::new(origin, Vec3::NEG_Z)).is_none());
        }
    }

    #[test]
    fn test_triangle_parallel_and_behind() {
        let tri = unit_triangle();
        assert!(tri.intersect(&Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::X)).is_none());
        assert!(tri.intersect(&Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::Z)).is_none());
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Arc::new(Material::default()));
        assert!(tri.intersect(&Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z)).is_none());
    }
}
