use std::f32::consts::PI;

use crate::{Vec2, Vec3};

/// Equirectangular (longitude/latitude) coordinates for a unit direction.
///
/// `u = atan2(z, x) / 2π + 0.5`, `v = acos(y) / π`. Used both for sphere
/// texture coordinates and for environment-map lookups.
pub fn equirect_uv(direction: Vec3) -> Vec2 {
    let u = direction.z.atan2(direction.x) / (2.0 * PI) + 0.5;
    let v = direction.y.clamp(-1.0, 1.0).acos() / PI;
    Vec2::new(u, v)
}
