//! Triangle meshes built from loaded OBJ data.

use std::sync::Arc;

use glint_core::{Material, MeshData};
use glint_math::{Mat4, Mat4Ext, Ray, Vec3};

use crate::hittable::{Hittable, SurfaceHit};
use crate::triangle::intersect_triangle;

/// A triangle soup in world space.
///
/// Vertices are transformed once when the mesh is built; intersection is a
/// linear scan over every triangle.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    triangles: Vec<[Vec3; 3]>,
    material: Arc<Material>,
}

impl TriangleMesh {
    /// Build from polygon data and a model matrix.
    ///
    /// Quads `(a, b, c, d)` become `(a, b, c)` and `(a, c, d)`. Faces with
    /// any other vertex count are skipped.
    pub fn new(data: &MeshData, model: Mat4, material: Arc<Material>) -> Self {
        let vertices: Vec<Vec3> = data
            .vertices
            .iter()
            .map(|&v| model.transform_homogeneous(v))
            .collect();
        let vertex = |index: u32| vertices.get(index as usize).copied();

        let mut triangles = Vec::with_capacity(data.triangle_count());
        for (face_index, face) in data.faces.iter().enumerate() {
            let corners: Option<Vec<Vec3>> = face.iter().map(|&i| vertex(i)).collect();
            match corners.as_deref() {
                Some(&[a, b, c]) => triangles.push([a, b, c]),
                Some(&[a, b, c, d]) => {
                    triangles.push([a, b, c]);
                    triangles.push([a, c, d]);
                }
                _ => log::warn!(
                    "Skipping mesh face {} ({} indices)",
                    face_index,
                    face.len()
                ),
            }
        }

        log::debug!("Built triangle mesh: {} triangles", triangles.len());

        Self { triangles, material }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Hittable for TriangleMesh {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.triangles
            .iter()
            .filter_map(|&[a, b, c]| intersect_triangle(ray, a, b, c))
            .min_by(|x, y| x.distance.total_cmp(&y.distance))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::model_matrix;
    use std::f32::consts::FRAC_PI_2;

    /// Unit quad in the XY plane plus a triangle further back.
    fn quad_and_triangle() -> MeshData {
        MeshData::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
                Vec3::new(-1.0, -1.0, -2.0),
                Vec3::new(1.0, -1.0, -2.0),
                Vec3::new(0.0, 1.0, -2.0),
            ],
            vec![vec![0, 1, 2, 3], vec![4, 5, 6]],
        )
        .unwrap()
    }

    #[test]
    fn test_quads_are_split() {
        let mesh = TriangleMesh::new(&quad_and_triangle(), Mat4::IDENTITY, Arc::new(Material::default()));
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn test_nearest_triangle_wins() {
        let mesh = TriangleMesh::new(&quad_and_triangle(), Mat4::IDENTITY, Arc::new(Material::default()));
        let hit = mesh.intersect(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)).unwrap();

        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!(hit.texcoords.is_some());

        // Both halves of the quad are covered
        for origin in [Vec3::new(0.9, -0.9, 5.0), Vec3::new(-0.9, 0.9, 5.0)] {
            assert!(mesh.intersect(&Ray::new(origin, Vec3::NEG_Z)).is_some());
        }
    }

    #[test]
    fn test_model_matrix_applied() {
        // Rotate the quad to face +X and push it out along X
        let model = model_matrix(
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, FRAC_PI_2, 0.0),
            Vec3::splat(2.0),
        );
        let mesh = TriangleMesh::new(&quad_and_triangle(), model, Arc::new(Material::default()));

        let hit = mesh.intersect(&Ray::new(Vec3::ZERO, Vec3::X)).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-4);

        // Scaled by two, so a ray 1.5 off axis still hits
        assert!(mesh.intersect(&Ray::new(Vec3::new(0.0, 1.5, 0.0), Vec3::X)).is_some());
        assert!(mesh.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());
    }
}
