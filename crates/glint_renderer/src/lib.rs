//! Glint Renderer - CPU Whitted-style ray tracing
//!
//! Recursive ray tracer over a linear list of analytic shapes and triangle
//! meshes: direct lighting with hard shadows, mirror reflection,
//! Fresnel-weighted refraction and an optional environment map.
//!
//! # Example
//!
//! ```ignore
//! use glint_renderer::{CancelToken, ImageBuffer, Renderer, SceneStore};
//!
//! let store = SceneStore::default();
//! store.reload_from("scenes/spheres.txt")?;
//!
//! let renderer = Renderer::new(None)?;
//! let mut image = ImageBuffer::new(512, 512);
//! let stats = renderer.render(&store.snapshot(), &mut image, &CancelToken::new())?;
//! ```

mod aa_box;
mod bucket;
mod builder;
mod camera;
mod hittable;
mod light;
mod mesh;
mod plane;
mod renderer;
mod scene;
mod shading;
mod shape;
mod sphere;
mod surface;
mod triangle;

pub use aa_box::AaBox;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use builder::{BuildError, BuildResult, SceneBuilder};
pub use camera::{Camera, Projection, Viewport};
pub use hittable::{Hittable, Intercept, ShapeId, SurfaceHit};
pub use light::{AmbientLight, DirectionalLight, Illuminate, Light, PointLight};
pub use mesh::TriangleMesh;
pub use plane::{Disk, Plane};
pub use renderer::{
    render_pixel, CancelToken, RenderConfig, RenderError, RenderResult, RenderStats, Renderer,
    MAX_RECURSION_DEPTH,
};
pub use scene::{Scene, SceneStore};
pub use shading::Shader;
pub use shape::Shape;
pub use sphere::Sphere;
pub use surface::{color_to_rgba, ImageBuffer, Surface};
pub use triangle::Triangle;

/// Re-export common types from the lower crates
pub use glint_core::{Color, ExecutionMode, Material, MaterialKind};
pub use glint_math::{Ray, Vec3};
