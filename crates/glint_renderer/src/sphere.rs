//! Sphere primitive.

use std::sync::Arc;

use glint_core::Material;
use glint_math::{equirect_uv, normalize, Ray, Vec3};

use crate::hittable::{Hittable, SurfaceHit};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Geometric solution: project the center onto the ray, then step back
    /// along it by the half chord.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let l = self.center - ray.origin;
        let tca = l.dot(ray.direction);
        let d2 = l.length_squared() - tca * tca;
        let r2 = self.radius * self.radius;
        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        let mut t = tca - thc;
        if t < 0.0 {
            t = tca + thc;
        }
        if t < 0.0 {
            return None;
        }

        let point = ray.at(t);
        let normal = normalize(point - self.center);

        Some(SurfaceHit {
            distance: t,
            point,
            normal,
            texcoords: Some(equirect_uv(normal)),
        })
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
