//! OBJ mesh loading.
//!
//! The loader hands the renderer raw polygon faces (three or four vertex
//! indices each). Triangulation happens when the renderer builds its
//! triangle mesh, not here.

use std::io::{BufReader, Cursor};
use std::path::Path;

use glint_math::{Aabb, Vec3};
use thiserror::Error;

/// Errors that can occur during mesh loading.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No geometry found in OBJ data")]
    NoGeometry,

    #[error("Face {face} has {arity} vertices, only triangles and quads are supported")]
    UnsupportedFace { face: usize, arity: usize },

    #[error("Face {face} references vertex {index}, mesh has {count}")]
    IndexOutOfRange { face: usize, index: u32, count: usize },
}

pub type MeshResult<T> = Result<T, MeshError>;

/// Vertex positions plus polygon faces, as read from disk.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions
    pub vertices: Vec<Vec3>,

    /// Faces as 0-based vertex indices, three or four per face
    pub faces: Vec<Vec<u32>>,
}

impl MeshData {
    /// Create mesh data, validating face arity and indices.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Vec<u32>>) -> MeshResult<Self> {
        for (face_idx, face) in faces.iter().enumerate() {
            if !(3..=4).contains(&face.len()) {
                return Err(MeshError::UnsupportedFace {
                    face: face_idx,
                    arity: face.len(),
                });
            }
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    count: vertices.len(),
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    /// Load an OBJ file.
    pub fn load_obj(path: &Path) -> MeshResult<Self> {
        let (models, _materials) = tobj::load_obj(path, &Self::load_options())?;
        let mesh = Self::from_models(&models)?;

        log::debug!(
            "Loaded mesh {}: {} vertices, {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Parse OBJ text held in memory. Material libraries are ignored.
    pub fn parse_obj(source: &str) -> MeshResult<Self> {
        let mut reader = BufReader::new(Cursor::new(source.as_bytes()));
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_models(&models)
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: false,
            single_index: false,
            ..Default::default()
        }
    }

    /// Merge every model in the file into one vertex and face list.
    fn from_models(models: &[tobj::Model]) -> MeshResult<Self> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            let base = vertices.len() as u32;

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );

            // tobj leaves face_arities empty when every face is a triangle.
            if mesh.face_arities.is_empty() {
                faces.extend(
                    mesh.indices
                        .chunks(3)
                        .map(|face| face.iter().map(|i| i + base).collect::<Vec<_>>()),
                );
            } else {
                let mut next = 0usize;
                for &arity in &mesh.face_arities {
                    let end = next + arity as usize;
                    // Truncated index data shows up as a short face and fails validation
                    let face = mesh
                        .indices
                        .get(next..end)
                        .unwrap_or_default()
                        .iter()
                        .map(|i| i + base)
                        .collect();
                    faces.push(face);
                    next = end;
                }
            }
        }

        if vertices.is_empty() || faces.is_empty() {
            return Err(MeshError::NoGeometry);
        }

        Self::new(vertices, faces)
    }

    /// Axis-aligned bounds of the untransformed vertices.
    pub fn bounds(&self) -> Aabb {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for v in &self.vertices {
            min = min.min(*v);
            max = max.max(*v);
        }

        Aabb::from_points(min, max)
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles after splitting quads.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len() - 2).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_AND_TRIANGLE: &str = "\
# unit quad plus a triangle
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
f 1 2 3 4
f 1 2 5
";

    #[test]
    fn test_parse_obj_keeps_quads() {
        let mesh = MeshData::parse_obj(QUAD_AND_TRIANGLE).unwrap();

        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[0], vec![0, 1, 2, 3]);
        assert_eq!(mesh.faces[1], vec![0, 1, 4]);
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn test_parse_obj_triangles_only() {
        let mesh = MeshData::parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_empty_obj_is_an_error() {
        assert!(matches!(
            MeshData::parse_obj("# nothing here\n"),
            Err(MeshError::NoGeometry)
        ));
    }

    #[test]
    fn test_new_rejects_bad_faces() {
        let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::Y];

        assert!(matches!(
            MeshData::new(vertices.clone(), vec![vec![0, 1]]),
            Err(MeshError::UnsupportedFace { arity: 2, .. })
        ));
        assert!(matches!(
            MeshData::new(vertices, vec![vec![0, 1, 7]]),
            Err(MeshError::IndexOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn test_bounds_computation() {
        let mesh = MeshData::parse_obj(QUAD_AND_TRIANGLE).unwrap();
        let bounds = mesh.bounds();

        assert_eq!(bounds.min(), Vec3::ZERO);
        assert_eq!(bounds.max(), Vec3::ONE);
    }
}
