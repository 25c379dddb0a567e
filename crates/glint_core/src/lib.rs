//! Glint Core - materials, assets and scene descriptions.
//!
//! This crate provides the inputs the renderer consumes:
//!
//! - **Materials**: `Material`, `MaterialKind`
//! - **Assets**: image `Texture`s with a path cache, OBJ `MeshData`
//! - **Scene descriptions**: typed records loaded from the line format or JSON
//!
//! # Example
//!
//! ```ignore
//! use glint_core::description::load_description;
//!
//! let description = load_description("scenes/spheres.txt")?;
//! println!("{} shapes, {} lights",
//!     description.shapes.len(),
//!     description.lights.len());
//! ```

pub mod description;
pub mod material;
pub mod mesh;
pub mod texture;

// Re-export commonly used types
pub use description::{load_description, parse_description, ExecutionMode, SceneDescription};
pub use material::{Color, Material, MaterialKind};
pub use mesh::MeshData;
pub use texture::{Texture, TextureCache};
