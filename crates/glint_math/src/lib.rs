//! Glint math - vectors, rays and the optics helpers used by the tracer.
//!
//! Vector arithmetic (add, subtract, dot, cross, scale, length) comes straight
//! from glam; this crate adds the pieces glam does not provide.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod mapping;
pub mod optics;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use mapping::equirect_uv;
pub use optics::{fresnel, normalize, reflect, refract, total_internal_reflection};
pub use ray::Ray;
pub use transform::{model_matrix, rotation_matrix, scale_matrix, translation_matrix, Mat4Ext};
