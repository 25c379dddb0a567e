//! Texture loading and caching for materials and the environment map.
//!
//! Textures are stored as float RGB in display space, exactly as the image
//! file encodes them; the renderer does no color management.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_math::Vec2;
use thiserror::Error;

use crate::material::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, row-major, first row at the top of the image
    pub pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Decode an in-memory image.
    pub fn from_image(image: &image::DynamicImage, path: impl Into<String>) -> TextureResult<Self> {
        let path = path.into();
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path));
        }

        let pixels = rgb
            .pixels()
            .map(|p| Color::new(p[0] as f32 / 255.0, p[1] as f32 / 255.0, p[2] as f32 / 255.0))
            .collect();

        Ok(Self::new(width, height, pixels, path))
    }

    /// Load a texture from an image file.
    pub fn load(path: &Path) -> TextureResult<Self> {
        let display = path.to_string_lossy().to_string();
        let image = image::open(path).map_err(|source| TextureError::Load {
            path: display.clone(),
            source,
        })?;
        Self::from_image(&image, display)
    }

    /// Get pixel at integer coordinates, clamped to the image bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }

    /// Nearest-texel lookup at normalized coordinates, (0, 0) top-left.
    ///
    /// Returns `None` when either coordinate falls outside `[0, 1]` or is
    /// NaN. A coordinate of exactly 1 maps to the last texel.
    pub fn sample(&self, uv: Vec2) -> Option<Color> {
        if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
            return None;
        }
        Some(self.sample_clamped(uv))
    }

    /// Like [`Texture::sample`], but clamps instead of rejecting.
    pub fn sample_clamped(&self, uv: Vec2) -> Color {
        let x = (uv.x.max(0.0) * self.width as f32) as u32;
        let y = (uv.y.max(0.0) * self.height as f32) as u32;
        self.get_pixel(x, y)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and cached for reuse.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(Texture::load(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Register an already decoded texture under `path`.
    pub fn insert(&mut self, path: impl Into<String>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(path.into(), texture.clone());
        texture
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}
