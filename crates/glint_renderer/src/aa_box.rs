//! Axis-aligned box built from its six bounding planes.

use std::sync::Arc;

use glint_core::Material;
use glint_math::{Aabb, Ray, Vec2, Vec3};

use crate::hittable::{Hittable, SurfaceHit};
use crate::plane::plane_distance;

/// Slack on the in-face bounds test.
const BOUNDS_EPSILON: f32 = 0.001;

/// An axis-aligned box.
#[derive(Debug, Clone)]
pub struct AaBox {
    bounds: Aabb,
    material: Arc<Material>,
}

impl AaBox {
    /// Box centered at `center` with edge lengths `size`.
    pub fn new(center: Vec3, size: Vec3, material: Arc<Material>) -> Self {
        Self {
            bounds: Aabb::from_center_size(center, size),
            material,
        }
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Texture coordinates on the face perpendicular to `axis`.
    fn face_texcoords(&self, point: Vec3, axis: usize) -> Vec2 {
        let (a, b) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        let min = self.bounds.min();
        let span = self.bounds.extent() + Vec3::splat(2.0 * BOUNDS_EPSILON);
        Vec2::new(
            (point[a] - min[a]) / span[a],
            (point[b] - min[b]) / span[b],
        )
    }
}

impl Hittable for AaBox {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let min = self.bounds.min();
        let max = self.bounds.max();
        let mut nearest: Option<SurfaceHit> = None;

        for axis in 0..3 {
            let others = [(axis + 1) % 3, (axis + 2) % 3];

            for (corner, sign) in [(min, -1.0), (max, 1.0)] {
                let mut normal = Vec3::ZERO;
                normal[axis] = sign;

                let Some(t) = plane_distance(ray, corner, normal) else {
                    continue;
                };
                if nearest.is_some_and(|hit| hit.distance <= t) {
                    continue;
                }

                let point = ray.at(t);
                let inside = others.iter().all(|&other| {
                    self.bounds
                        .axis_interval(other)
                        .pad(BOUNDS_EPSILON)
                        .contains(point[other])
                });
                if !inside {
                    continue;
                }

                let texcoords = self.face_texcoords(point, axis);
                nearest = Some(SurfaceHit::new(ray, t, normal, Some(texcoords)));
            }
        }

        nearest
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(center: Vec3) -> AaBox {
        AaBox::new(center, Vec3::ONE, Arc::new(Material::default()))
    }

    #[test]
    fn test_box_front_face() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let hit = b.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();

        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);

        // Center of a z face maps near (0.5, 0.5)
        let uv = hit.texcoords.unwrap();
        assert!((uv.x - 0.5).abs() < 1e-3);
        assert!((uv.y - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_box_side_faces() {
        let b = unit_box(Vec3::ZERO);

        let hit = b.intersect(&Ray::new(Vec3::new(5.0, 0.2, 0.1), Vec3::NEG_X)).unwrap();
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::X);

        let hit = b.intersect(&Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y)).unwrap();
        assert!((hit.distance - 2.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_box_miss() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        assert!(b.intersect(&Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z)).is_none());
        assert!(b.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }

    #[test]
    fn test_box_from_inside() {
        let b = unit_box(Vec3::ZERO);
        let hit = b.intersect(&Ray::new(Vec3::ZERO, Vec3::Y)).unwrap();
        assert!((hit.distance - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_box_texcoords_in_range() {
        let b = AaBox::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 3.0), Arc::new(Material::default()));
        let origins = [
            Vec3::new(0.9, 0.4, 10.0),
            Vec3::new(-0.9, -0.4, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ];
        for origin in origins {
            let uv = b.intersect(&Ray::new(origin, Vec3::NEG_Z)).unwrap().texcoords.unwrap();
            assert!((0.0..1.0).contains(&uv.x), "u = {}", uv.x);
            assert!((0.0..1.0).contains(&uv.y), "v = {}", uv.y);
        }
    }
}
