// Model-matrix builders.
//
// Rotations are extrinsic XYZ Euler angles in radians, giving Rz * Ry * Rx.
// The model matrix is composed as T * R * S.

use glam::{Mat4, Vec3, Vec4};

/// Translation by `t`.
pub fn translation_matrix(t: Vec3) -> Mat4 {
    Mat4::from_translation(t)
}

/// Extrinsic rotation about x, then y, then z.
pub fn rotation_matrix(euler: Vec3) -> Mat4 {
    Mat4::from_rotation_z(euler.z) * Mat4::from_rotation_y(euler.y) * Mat4::from_rotation_x(euler.x)
}

/// Non-uniform scale.
pub fn scale_matrix(s: Vec3) -> Mat4 {
    Mat4::from_scale(s)
}

/// `T * R * S`.
pub fn model_matrix(translate: Vec3, rotate: Vec3, scale: Vec3) -> Mat4 {
    translation_matrix(translate) * rotation_matrix(rotate) * scale_matrix(scale)
}

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a point as homogeneous `(x, y, z, 1)` and divide by `w`.
    ///
    /// A zero `w` skips the division.
    fn transform_homogeneous(&self, point: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_homogeneous(&self, point: Vec3) -> Vec3 {
        let v = *self * Vec4::new(point.x, point.y, point.z, 1.0);
        if v.w == 0.0 {
            v.truncate()
        } else {
            v.truncate() / v.w
        }
    }
}
