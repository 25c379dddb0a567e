//! Hittable trait and intersection records.

use glint_core::Material;
use glint_math::{Ray, Vec2, Vec3};

/// Index of a shape in its scene's shape list.
pub type ShapeId = usize;

/// Geometry of a ray-surface intersection, before the scene attaches
/// the owning shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the hit, >= 0
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Unit surface normal (geometric, not flipped toward the ray)
    pub normal: Vec3,
    /// Texture coordinates, for shapes that define them
    pub texcoords: Option<Vec2>,
}

impl SurfaceHit {
    /// Build a hit at `distance` along `ray`.
    #[inline]
    pub fn new(ray: &Ray, distance: f32, normal: Vec3, texcoords: Option<Vec2>) -> Self {
        Self {
            distance,
            point: ray.at(distance),
            normal,
            texcoords,
        }
    }
}

/// Record of the nearest intersection in a scene.
///
/// Carries a non-owning back-reference to the shape that was hit.
#[derive(Debug, Clone, Copy)]
pub struct Intercept<'a> {
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub texcoords: Option<Vec2>,
    /// Which shape was hit
    pub shape: ShapeId,
    /// Material of the hit shape
    pub material: &'a Material,
}

impl<'a> Intercept<'a> {
    pub fn new(hit: SurfaceHit, shape: ShapeId, material: &'a Material) -> Self {
        Self {
            distance: hit.distance,
            point: hit.point,
            normal: hit.normal,
            texcoords: hit.texcoords,
            shape,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t >= 0`, if any.
    ///
    /// `ray.direction` is expected to be unit length.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit>;

    /// Material shared by every point of this object.
    fn material(&self) -> &Material;
}
