//! Recursive color evaluation.
//!
//! `trace` finds what a ray hits; `shade` turns that into a color, recursing
//! through `trace` for reflected and refracted rays until the depth cap.

use glint_core::{Color, MaterialKind};
use glint_math::{equirect_uv, fresnel, reflect, refract, total_internal_reflection, Ray, Vec3};

use crate::hittable::{Intercept, ShapeId};
use crate::light::Illuminate;
use crate::scene::Scene;

/// Offset applied to transparent secondary ray origins, along the normal.
const SURFACE_BIAS: f32 = 0.001;

/// Index of refraction outside every object.
const OUTSIDE_IOR: f32 = 1.0;

/// Evaluates colors against one scene snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Shader<'a> {
    scene: &'a Scene,
    max_depth: u32,
    viewer: Vec3,
}

/// Direct lighting at an intercept, split by term.
#[derive(Debug, Default, Clone, Copy)]
struct DirectLight {
    ambient: Color,
    diffuse: Color,
    specular: Color,
}

impl<'a> Shader<'a> {
    /// Shader using the scene's camera as viewer and its configured depth.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            max_depth: scene.config.max_depth,
            viewer: scene.camera.position,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Nearest hit along `ray`, ignoring `excluded`.
    ///
    /// Returns `None` without testing geometry once `depth` reaches the cap.
    pub fn trace(&self, ray: &Ray, excluded: Option<ShapeId>, depth: u32) -> Option<Intercept<'a>> {
        if depth >= self.max_depth {
            return None;
        }
        self.scene.closest_hit(ray, excluded)
    }

    /// Color seen along `direction`, given what `trace` returned.
    ///
    /// `None` means "no color": the ray escaped and there is no environment.
    pub fn shade(&self, hit: Option<&Intercept<'a>>, direction: Vec3, depth: u32) -> Option<Color> {
        let Some(hit) = hit else {
            return self.environment(direction);
        };

        let material = hit.material;
        let surface = material.surface_color(hit.texcoords);

        let light = match material.kind {
            MaterialKind::Opaque => {
                let direct = self.direct_light(hit, true);
                direct.ambient + direct.diffuse + direct.specular
            }
            MaterialKind::Reflective => {
                let direct = self.direct_light(hit, false);
                let mirrored = reflect(-direction, hit.normal);
                let reflected = self.follow(&Ray::new(hit.point, mirrored), Some(hit.shape), depth);
                direct.ambient + direct.specular + reflected
            }
            MaterialKind::Transparent => {
                let direct = self.direct_light(hit, false);
                direct.ambient + direct.specular + self.transmit(hit, direction, depth)
            }
        };

        let color = surface * light;
        Some(color.clamp(Vec3::ZERO, Vec3::ONE))
    }

    /// `trace` then `shade` one level deeper; black when nothing is seen.
    fn follow(&self, ray: &Ray, excluded: Option<ShapeId>, depth: u32) -> Color {
        let next = self.trace(ray, excluded, depth + 1);
        self.shade(next.as_ref(), ray.direction, depth + 1)
            .unwrap_or(Color::ZERO)
    }

    /// Fresnel-weighted reflection plus refraction through the surface.
    fn transmit(&self, hit: &Intercept<'a>, direction: Vec3, depth: u32) -> Color {
        let ior = hit.material.ior;
        let outside = direction.dot(hit.normal) < 0.0;
        let bias = hit.normal * SURFACE_BIAS;
        // Offsets toward the side the ray arrived from / continues into
        let (near_side, far_side) = if outside { (bias, -bias) } else { (-bias, bias) };

        let mirrored = reflect(-direction, hit.normal);
        let reflected = self.follow(&Ray::new(hit.point, mirrored).offset(near_side), None, depth);

        if total_internal_reflection(direction, hit.normal, OUTSIDE_IOR, ior) {
            return reflected;
        }

        let bent = refract(direction, hit.normal, OUTSIDE_IOR, ior);
        let refracted = self.follow(&Ray::new(hit.point, bent).offset(far_side), None, depth);

        let (kr, kt) = fresnel(direction, hit.normal, OUTSIDE_IOR, ior);
        reflected * kr + refracted * kt
    }

    /// Ambient plus every unshadowed light's terms at `hit`.
    fn direct_light(&self, hit: &Intercept<'a>, with_diffuse: bool) -> DirectLight {
        let mut direct = DirectLight::default();

        for light in &self.scene.lights {
            if light.is_ambient() {
                direct.ambient += light.base_color();
                continue;
            }
            // A point light sitting on the surface has no direction to light from
            let Some(to_light) = light.direction_from(hit.point) else {
                continue;
            };

            let shadow = Ray::new(hit.point, to_light);
            let range = light.shadow_range(hit.point);
            if self.scene.occluded(&shadow, Some(hit.shape), range) {
                continue;
            }

            if with_diffuse {
                direct.diffuse += light.diffuse_contribution(hit);
            }
            direct.specular += light.specular_contribution(hit, self.viewer);
        }

        direct
    }

    fn environment(&self, direction: Vec3) -> Option<Color> {
        let map = self.scene.environment.as_ref()?;
        Some(map.sample_clamped(equirect_uv(direction)))
    }
}
