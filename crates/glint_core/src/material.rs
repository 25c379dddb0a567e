//! Surface materials.
//!
//! A material is a plain parameter bag shared by reference between shapes.
//! How it is lit is decided by its `MaterialKind`, not by a subtype.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use glint_math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::texture::Texture;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How the shading evaluator treats a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Diffuse and specular direct lighting with hard shadows.
    #[default]
    Opaque,
    /// Mirror reflection plus specular highlights.
    Reflective,
    /// Fresnel-weighted reflection and refraction.
    Transparent,
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialKind::Opaque => "OPAQUE",
            MaterialKind::Reflective => "REFLECTIVE",
            MaterialKind::Transparent => "TRANSPARENT",
        };
        f.write_str(name)
    }
}

impl FromStr for MaterialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPAQUE" => Ok(MaterialKind::Opaque),
            "REFLECTIVE" => Ok(MaterialKind::Reflective),
            "TRANSPARENT" => Ok(MaterialKind::Transparent),
            _ => Err(format!("unknown material type '{s}'")),
        }
    }
}

/// A surface material.
///
/// Channel values of `diffuse` are not range-checked here.
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name, as referenced by shapes in the scene description
    pub name: String,

    /// Diffuse color (RGB)
    pub diffuse: Color,

    /// Specular (Phong) exponent, >= 0
    pub specular: f32,

    /// Blend between diffuse and specular / reflective contribution, in [0, 1]
    pub ks: f32,

    /// Lighting model
    pub kind: MaterialKind,

    /// Optional diffuse texture, modulates `diffuse`
    pub texture: Option<Arc<Texture>>,

    /// Index of refraction, > 0
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: Color::ONE,
            specular: 1.0,
            ks: 0.0,
            kind: MaterialKind::Opaque,
            texture: None,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Create a new opaque material with just a name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// Set the specular exponent and `ks` blend.
    pub fn with_specular(mut self, specular: f32, ks: f32) -> Self {
        self.specular = specular;
        self.ks = ks;
        self
    }

    /// Set the lighting model.
    pub fn with_kind(mut self, kind: MaterialKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the diffuse texture.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Set the index of refraction.
    pub fn with_ior(mut self, ior: f32) -> Self {
        self.ior = ior;
        self
    }

    /// Base surface color at the given texture coordinates.
    ///
    /// The diffuse color is modulated by the texture when both a texture and
    /// in-range coordinates are available.
    pub fn surface_color(&self, texcoords: Option<Vec2>) -> Color {
        match (&self.texture, texcoords) {
            (Some(texture), Some(uv)) => match texture.sample(uv) {
                Some(texel) => self.diffuse * texel,
                None => self.diffuse,
            },
            _ => self.diffuse,
        }
    }
}
