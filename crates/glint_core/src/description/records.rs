//! Record types produced by the scene description loaders.

use serde::{Deserialize, Serialize};

use crate::material::MaterialKind;

fn white() -> [f32; 3] {
    [1.0; 3]
}

fn one() -> f32 {
    1.0
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

/// How a render pass walks the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Row-major scan on the calling thread.
    Sequential,
    /// Square buckets rendered on the worker pool.
    #[default]
    #[serde(alias = "batches")]
    Batched,
}

/// A light definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightRecord {
    Ambient {
        intensity: f32,
        #[serde(default = "white")]
        color: [f32; 3],
    },
    Directional {
        direction: [f32; 3],
        intensity: f32,
        #[serde(default = "white")]
        color: [f32; 3],
    },
    Point {
        position: [f32; 3],
        intensity: f32,
        #[serde(default = "white")]
        color: [f32; 3],
    },
}

/// A shape definition. `material` names a [`MaterialRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeRecord {
    Sphere {
        position: [f32; 3],
        radius: f32,
        material: String,
    },
    Plane {
        position: [f32; 3],
        normal: [f32; 3],
        material: String,
    },
    Disk {
        position: [f32; 3],
        normal: [f32; 3],
        radius: f32,
        material: String,
    },
    Box {
        position: [f32; 3],
        size: [f32; 3],
        material: String,
    },
    Triangle {
        vertices: [[f32; 3]; 3],
        material: String,
    },
    /// An OBJ file placed with translate, rotate (degrees, XYZ) and scale.
    Mesh {
        path: String,
        #[serde(default)]
        translate: [f32; 3],
        #[serde(default)]
        rotate: [f32; 3],
        #[serde(default = "unit_scale")]
        scale: [f32; 3],
        material: String,
    },
}

impl ShapeRecord {
    /// Name of the material this shape references.
    pub fn material(&self) -> &str {
        match self {
            ShapeRecord::Sphere { material, .. }
            | ShapeRecord::Plane { material, .. }
            | ShapeRecord::Disk { material, .. }
            | ShapeRecord::Box { material, .. }
            | ShapeRecord::Triangle { material, .. }
            | ShapeRecord::Mesh { material, .. } => material,
        }
    }

    /// Short variant name for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeRecord::Sphere { .. } => "sphere",
            ShapeRecord::Plane { .. } => "plane",
            ShapeRecord::Disk { .. } => "disk",
            ShapeRecord::Box { .. } => "box",
            ShapeRecord::Triangle { .. } => "triangle",
            ShapeRecord::Mesh { .. } => "mesh",
        }
    }
}

/// A named material definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    #[serde(default = "white")]
    pub diffuse: [f32; 3],
    #[serde(default = "one")]
    pub specular: f32,
    #[serde(default)]
    pub ks: f32,
    #[serde(default)]
    pub kind: MaterialKind,
    /// Name of a [`TextureRecord`]
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default = "one")]
    pub ior: f32,
}

/// A named texture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRecord {
    pub name: String,
    pub path: String,
}

/// Camera placement. The camera always looks down -Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    #[serde(default)]
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
}

/// Global settings. Unset fields keep the renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsRecord {
    pub clear_color: Option<[f32; 3]>,
    pub batch_size: Option<u32>,
    pub render_using: Option<ExecutionMode>,
    pub max_depth: Option<u32>,
    /// Equirectangular environment image
    pub environment: Option<String>,
    pub camera: Option<CameraRecord>,
}

/// Everything a scene file declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub lights: Vec<LightRecord>,
    pub shapes: Vec<ShapeRecord>,
    pub materials: Vec<MaterialRecord>,
    pub textures: Vec<TextureRecord>,
    pub settings: SettingsRecord,
}
