//! Scene construction from descriptions.
//!
//! Building runs in two passes: textures and materials first, then lights
//! and shapes, which look their materials up by name. Every record is
//! validated; the first bad one aborts the build.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_core::description::{
    load_description, CameraRecord, DescriptionError, LightRecord, MaterialRecord,
    SceneDescription, SettingsRecord, ShapeRecord,
};
use glint_core::mesh::MeshError;
use glint_core::texture::TextureError;
use glint_core::{Material, MeshData, Texture, TextureCache};
use glint_math::{model_matrix, Vec3};
use thiserror::Error;

use crate::aa_box::AaBox;
use crate::camera::Camera;
use crate::light::{AmbientLight, DirectionalLight, PointLight};
use crate::mesh::TriangleMesh;
use crate::plane::{Disk, Plane};
use crate::renderer::RenderConfig;
use crate::scene::Scene;
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error("{shape} references unknown material '{name}'")]
    UnknownMaterial { shape: String, name: String },

    #[error("Material '{material}' references unknown texture '{name}'")]
    UnknownTexture { material: String, name: String },

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("Failed to load mesh {path}: {source}")]
    Mesh {
        path: String,
        #[source]
        source: MeshError,
    },

    #[error("Invalid {what}: {reason}")]
    InvalidParameter { what: String, reason: String },
}

pub type BuildResult<T> = Result<T, BuildError>;

fn invalid(what: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::InvalidParameter {
        what: what.into(),
        reason: reason.into(),
    }
}

fn vec3(what: &str, value: [f32; 3]) -> BuildResult<Vec3> {
    let v = Vec3::from_array(value);
    if !v.is_finite() {
        return Err(invalid(what, format!("non-finite value {:?}", value)));
    }
    Ok(v)
}

fn direction(what: &str, value: [f32; 3]) -> BuildResult<Vec3> {
    let v = vec3(what, value)?;
    if v.length_squared() == 0.0 {
        return Err(invalid(what, "zero-length direction"));
    }
    Ok(v)
}

fn positive(what: &str, value: f32) -> BuildResult<f32> {
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(what, format!("expected a positive number, got {}", value)));
    }
    Ok(value)
}

fn non_negative(what: &str, value: f32) -> BuildResult<f32> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(invalid(what, format!("expected a non-negative number, got {}", value)));
    }
    Ok(value)
}

/// Turns scene descriptions into [`Scene`]s.
///
/// Textures and meshes are cached per path for the builder's lifetime, so
/// an asset referenced by several records is loaded once and shared.
pub struct SceneBuilder {
    base_dir: PathBuf,
    textures: TextureCache,
    meshes: HashMap<PathBuf, Arc<MeshData>>,
}

impl SceneBuilder {
    /// Builder resolving relative asset paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            textures: TextureCache::with_base_dir(base_dir.clone()),
            meshes: HashMap::new(),
            base_dir,
        }
    }

    /// Load a description file and build it, with assets resolved next to
    /// the file.
    pub fn from_file(path: &Path) -> BuildResult<Scene> {
        let description = load_description(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::new(base_dir).build(&description)
    }

    /// Register an already decoded texture under `path`.
    pub fn insert_texture(&mut self, path: impl Into<String>, texture: Texture) {
        self.textures.insert(path, texture);
    }

    /// Register already loaded mesh data under `path`.
    pub fn insert_mesh(&mut self, path: impl AsRef<Path>, mesh: MeshData) {
        let path = self.base_dir.join(path);
        self.meshes.insert(path, Arc::new(mesh));
    }

    /// Build a scene from `description`.
    pub fn build(&mut self, description: &SceneDescription) -> BuildResult<Scene> {
        let mut textures = HashMap::new();
        for record in &description.textures {
            let texture = self.textures.load(&record.path)?;
            textures.insert(record.name.as_str(), texture);
        }

        let mut materials = HashMap::new();
        for record in &description.materials {
            let material = Self::material(record, &textures)?;
            if materials.insert(record.name.as_str(), Arc::new(material)).is_some() {
                log::warn!("Material '{}' defined more than once, keeping the last", record.name);
            }
        }

        let mut scene = Scene::new();
        self.apply_settings(&description.settings, &mut scene)?;

        for record in &description.lights {
            Self::add_light(record, &mut scene)?;
        }

        for (index, record) in description.shapes.iter().enumerate() {
            let material = materials
                .get(record.material())
                .cloned()
                .ok_or_else(|| BuildError::UnknownMaterial {
                    shape: format!("{} #{}", record.kind_name(), index),
                    name: record.material().to_string(),
                })?;
            self.add_shape(record, material, &mut scene)?;
        }

        log::info!(
            "Built scene: {} shapes, {} lights, {} materials, {} textures",
            scene.shapes.len(),
            scene.lights.len(),
            materials.len(),
            textures.len()
        );

        Ok(scene)
    }

    fn material(
        record: &MaterialRecord,
        textures: &HashMap<&str, Arc<Texture>>,
    ) -> BuildResult<Material> {
        let what = |field: &str| format!("{} of material '{}'", field, record.name);

        let ks = non_negative(&what("ks"), record.ks)?;
        if ks > 1.0 {
            return Err(invalid(what("ks"), format!("{} is outside [0, 1]", ks)));
        }

        let mut material = Material::new(&record.name, vec3(&what("diffuse"), record.diffuse)?)
            .with_specular(non_negative(&what("specular exponent"), record.specular)?, ks)
            .with_kind(record.kind)
            .with_ior(positive(&what("ior"), record.ior)?);

        if let Some(name) = &record.texture {
            let texture = textures
                .get(name.as_str())
                .cloned()
                .ok_or_else(|| BuildError::UnknownTexture {
                    material: record.name.clone(),
                    name: name.clone(),
                })?;
            material = material.with_texture(texture);
        }

        Ok(material)
    }

    fn apply_settings(&mut self, settings: &SettingsRecord, scene: &mut Scene) -> BuildResult<()> {
        let mut config = RenderConfig::default();
        if let Some(max_depth) = settings.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(batch_size) = settings.batch_size {
            if batch_size == 0 {
                return Err(invalid("batch size", "must be at least 1"));
            }
            config.bucket_size = batch_size;
        }
        if let Some(mode) = settings.render_using {
            config.mode = mode;
        }
        scene.config = config;

        if let Some(color) = settings.clear_color {
            scene.clear_color = vec3("clear color", color)?;
        }
        if let Some(camera) = &settings.camera {
            scene.camera = Self::camera(camera)?;
        }
        if let Some(path) = &settings.environment {
            scene.environment = Some(self.textures.load(path)?);
        }

        Ok(())
    }

    fn camera(record: &CameraRecord) -> BuildResult<Camera> {
        let fov = positive("camera fov", record.fov)?;
        if fov >= 180.0 {
            return Err(invalid("camera fov", format!("{} must be below 180 degrees", fov)));
        }
        Ok(Camera::new()
            .with_position(vec3("camera position", record.position)?)
            .with_fov(fov)
            .with_near(positive("camera near plane", record.near)?))
    }

    fn add_light(record: &LightRecord, scene: &mut Scene) -> BuildResult<()> {
        match *record {
            LightRecord::Ambient { intensity, color } => {
                scene.add_light(AmbientLight::new(
                    non_negative("ambient intensity", intensity)?,
                    vec3("ambient color", color)?,
                ));
            }
            LightRecord::Directional {
                direction: dir,
                intensity,
                color,
            } => {
                scene.add_light(DirectionalLight::new(
                    direction("directional light direction", dir)?,
                    non_negative("directional intensity", intensity)?,
                    vec3("directional color", color)?,
                ));
            }
            LightRecord::Point {
                position,
                intensity,
                color,
            } => {
                scene.add_light(PointLight::new(
                    vec3("point light position", position)?,
                    non_negative("point intensity", intensity)?,
                    vec3("point color", color)?,
                ));
            }
        }
        Ok(())
    }

    fn add_shape(
        &mut self,
        record: &ShapeRecord,
        material: Arc<Material>,
        scene: &mut Scene,
    ) -> BuildResult<()> {
        match record {
            ShapeRecord::Sphere {
                position, radius, ..
            } => {
                scene.add_shape(Sphere::new(
                    vec3("sphere position", *position)?,
                    positive("sphere radius", *radius)?,
                    material,
                ));
            }
            ShapeRecord::Plane {
                position, normal, ..
            } => {
                scene.add_shape(Plane::new(
                    vec3("plane position", *position)?,
                    direction("plane normal", *normal)?,
                    material,
                ));
            }
            ShapeRecord::Disk {
                position,
                normal,
                radius,
                ..
            } => {
                scene.add_shape(Disk::new(
                    vec3("disk position", *position)?,
                    direction("disk normal", *normal)?,
                    positive("disk radius", *radius)?,
                    material,
                ));
            }
            ShapeRecord::Box { position, size, .. } => {
                scene.add_shape(AaBox::new(
                    vec3("box position", *position)?,
                    vec3("box size", *size)?,
                    material,
                ));
            }
            ShapeRecord::Triangle { vertices, .. } => {
                let [a, b, c] = *vertices;
                scene.add_shape(Triangle::new(
                    vec3("triangle vertex", a)?,
                    vec3("triangle vertex", b)?,
                    vec3("triangle vertex", c)?,
                    material,
                ));
            }
            ShapeRecord::Mesh {
                path,
                translate,
                rotate,
                scale,
                ..
            } => {
                let rotate = vec3("mesh rotation", *rotate)?;
                let model = model_matrix(
                    vec3("mesh translation", *translate)?,
                    Vec3::new(
                        rotate.x.to_radians(),
                        rotate.y.to_radians(),
                        rotate.z.to_radians(),
                    ),
                    vec3("mesh scale", *scale)?,
                );
                let data = self.mesh(path)?;
                scene.add_shape(TriangleMesh::new(&data, model, material));
            }
        }
        Ok(())
    }

    /// Mesh data for `path`, loading it on first use.
    fn mesh(&mut self, path: &str) -> BuildResult<Arc<MeshData>> {
        let full_path = self.base_dir.join(path);
        if let Some(mesh) = self.meshes.get(&full_path) {
            return Ok(Arc::clone(mesh));
        }

        let mesh = MeshData::load_obj(&full_path).map_err(|source| BuildError::Mesh {
            path: full_path.display().to_string(),
            source,
        })?;
        let mesh = Arc::new(mesh);
        self.meshes.insert(full_path, Arc::clone(&mesh));
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::shape::Shape;
    use glint_core::description::parse_description;
    use glint_core::{Color, ExecutionMode, MaterialKind};

    fn build(source: &str) -> BuildResult<Scene> {
        let description = parse_description(source)?;
        SceneBuilder::new(".").build(&description)
    }

    #[test]
    fn test_build_basic_scene() {
        let scene = build(
            "\
material red 1 0 0 16 0.2 OPAQUE None
material glass 1 1 1 64 0.3 TRANSPARENT None 1.5
sphere 0 0 -5 1 red
plane 0 -1 0 0 2 0 red
disk 0 3 -5 0 -1 0 1 glass
box 2 0 -5 1 1 1 glass
triangle -1 0 -3 1 0 -3 0 1 -3 red
ambient 0.1
directional 0 -1 -1 0.7
point 0 5 0 0.5
clear_color 0.1 0.2 0.3
batch_size 16
render_using sequential
max_depth 4
camera 0 1 3 45 0.5
",
        )
        .unwrap();

        assert_eq!(scene.shapes.len(), 5);
        assert_eq!(scene.lights.len(), 3);
        assert!(matches!(scene.shapes[0], Shape::Sphere(_)));
        assert!(matches!(scene.shapes[3], Shape::Box(_)));

        let glass = scene.shapes[2].material();
        assert_eq!(glass.kind, MaterialKind::Transparent);
        assert_eq!(glass.ior, 1.5);

        assert_eq!(scene.clear_color, Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.config.bucket_size, 16);
        assert_eq!(scene.config.mode, ExecutionMode::Sequential);
        assert_eq!(scene.config.max_depth, 4);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 1.0, 3.0));
        assert_eq!(scene.camera.fov, 45.0);
    }

    #[test]
    fn test_defaults_without_settings() {
        let scene = build("ambient 0.2").unwrap();
        assert_eq!(scene.config, RenderConfig::default());
        assert_eq!(scene.camera, Camera::default());
        assert!(scene.environment.is_none());
    }

    #[test]
    fn test_unknown_material() {
        let err = build("sphere 0 0 -5 1 nothing").unwrap_err();
        match err {
            BuildError::UnknownMaterial { name, .. } => assert_eq!(name, "nothing"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_texture() {
        let err = build("material m 1 1 1 1 0 OPAQUE checker").unwrap_err();
        assert!(matches!(err, BuildError::UnknownTexture { .. }));
    }

    #[test]
    fn test_missing_texture_file() {
        let err = build("texture sky /no/such/sky.png").unwrap_err();
        assert!(matches!(err, BuildError::Texture(_)));
    }

    #[test]
    fn test_registered_texture() {
        let description = parse_description(
            "\
texture checker checker.png
material floor 1 1 1 1 0 OPAQUE checker
plane 0 0 0 0 1 0 floor
environment sky.png
",
        )
        .unwrap();

        let mut builder = SceneBuilder::new(".");
        builder.insert_texture("checker.png", Texture::solid_color(Color::new(0.5, 0.5, 0.5)));
        builder.insert_texture("sky.png", Texture::solid_color(Color::ONE));
        let scene = builder.build(&description).unwrap();

        assert!(scene.shapes[0].material().texture.is_some());
        assert!(scene.environment.is_some());
    }

    #[test]
    fn test_invalid_parameters() {
        let cases = [
            "material m 1 1 1 1 1.5 OPAQUE None",
            "material m 1 1 1 -2 0.5 OPAQUE None",
            "material m 1 1 1 1 0.5 TRANSPARENT None 0",
            "material m 1 1 1 1 0 OPAQUE None\nsphere 0 0 0 -1 m",
            "material m 1 1 1 1 0 OPAQUE None\nplane 0 0 0 0 0 0 m",
            "directional 0 0 0 1",
            "ambient -0.5",
            "batch_size 0",
            "camera 0 0 0 180 0.1",
        ];
        for source in cases {
            let err = build(source).unwrap_err();
            assert!(
                matches!(err, BuildError::InvalidParameter { .. }),
                "{:?} gave {:?}",
                source,
                err
            );
        }
    }

    #[test]
    fn test_registered_mesh() {
        let description = parse_description(
            "\
material m 1 1 1 1 0 OPAQUE None
mesh quad.obj m 0 0 -4 0 0 0 2 2 2
",
        )
        .unwrap();

        let quad = MeshData::parse_obj(
            "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\nf 1 2 3 4\n",
        )
        .unwrap();

        let mut builder = SceneBuilder::new("assets");
        builder.insert_mesh("quad.obj", quad);
        let scene = builder.build(&description).unwrap();

        match &scene.shapes[0] {
            Shape::Mesh(mesh) => assert_eq!(mesh.triangle_count(), 2),
            other => panic!("expected mesh, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_assets_load_once() {
        let description = parse_description(
            "\
texture a checker.png
texture b checker.png
material first 1 1 1 1 0 OPAQUE a
material second 1 1 1 1 0 OPAQUE b
mesh models/pyramid.obj first
mesh models/pyramid.obj second 2 0 0
",
        )
        .unwrap();

        let scenes = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes");
        let mut builder = SceneBuilder::new(scenes);
        builder.insert_texture("checker.png", Texture::solid_color(Color::ONE));
        let scene = builder.build(&description).unwrap();

        let first = scene.shapes[0].material().texture.clone().unwrap();
        let second = scene.shapes[1].material().texture.clone().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builder.meshes.len(), 1);
    }

    #[test]
    fn test_missing_mesh_file() {
        let err = build("material m 1 1 1 1 0 OPAQUE None\nmesh /no/such.obj m").unwrap_err();
        assert!(matches!(err, BuildError::Mesh { .. }));
    }
}
