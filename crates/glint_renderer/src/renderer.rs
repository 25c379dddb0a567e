//! Render driver.
//!
//! Walks the viewport either row by row on the calling thread or as
//! buckets on a fixed-size rayon pool, and writes colors into a [`Surface`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use glint_core::{Color, ExecutionMode};
use rayon::prelude::*;
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Projection;
use crate::scene::Scene;
use crate::shading::Shader;
use crate::surface::Surface;

/// Default cap on trace depth.
pub const MAX_RECURSION_DEPTH: u32 = 3;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum trace depth, primary rays are depth 0
    pub max_depth: u32,
    /// Edge length of square buckets in batched mode
    pub bucket_size: u32,
    /// Sequential scan or parallel buckets
    pub mode: ExecutionMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_RECURSION_DEPTH,
            bucket_size: DEFAULT_BUCKET_SIZE,
            mode: ExecutionMode::Batched,
        }
    }
}

/// Errors that end a render pass early.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render cancelled")]
    Cancelled,

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Cooperative cancellation flag shared between a pass and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Summary of a finished pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStats {
    /// Pixels that received a color (the rest keep the clear color)
    pub pixels_written: usize,
    /// Buckets rendered; 0 in sequential mode
    pub buckets: usize,
    pub elapsed: Duration,
    pub scene_version: u64,
    pub mode: ExecutionMode,
}

/// Trace and shade the primary ray through pixel `(x, y)`.
pub fn render_pixel(projection: &Projection, shader: &Shader<'_>, x: u32, y: u32) -> Option<Color> {
    let ray = projection.ray_through(x, y);
    let hit = shader.trace(&ray, None, 0);
    shader.shade(hit.as_ref(), ray.direction, 0)
}

/// Drives render passes on a worker pool built once up front.
#[derive(Debug)]
pub struct Renderer {
    pool: rayon::ThreadPool,
}

impl Renderer {
    /// Renderer with `threads` workers, or rayon's default count.
    pub fn new(threads: Option<usize>) -> RenderResult<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new()
            .thread_name(|i| format!("glint-worker-{}", i));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        log::debug!("Render pool ready with {} threads", pool.current_num_threads());
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Clear `surface` and render `scene` into it.
    ///
    /// The scene's config picks the mode. Cancellation is checked before
    /// each row (sequential) or bucket (batched).
    pub fn render(
        &self,
        scene: &Scene,
        surface: &mut dyn Surface,
        cancel: &CancelToken,
    ) -> RenderResult<RenderStats> {
        let start = Instant::now();
        let config = scene.config;
        let projection = scene.camera.projection(surface.width(), surface.height());
        let shader = Shader::new(scene);

        log::info!(
            "Rendering {}x{} viewport, {:?} mode, max depth {}",
            projection.viewport.width,
            projection.viewport.height,
            config.mode,
            config.max_depth
        );

        surface.clear(scene.clear_color);

        let (pixels_written, buckets) = match config.mode {
            ExecutionMode::Sequential => {
                (self.render_sequential(&projection, &shader, surface, cancel)?, 0)
            }
            ExecutionMode::Batched => {
                self.render_batched(&projection, &shader, config.bucket_size, surface, cancel)?
            }
        };

        let stats = RenderStats {
            pixels_written,
            buckets,
            elapsed: start.elapsed(),
            scene_version: scene.version,
            mode: config.mode,
        };
        log::info!(
            "Render finished in {:.2?}: {} pixels written",
            stats.elapsed,
            stats.pixels_written
        );
        Ok(stats)
    }

    fn render_sequential(
        &self,
        projection: &Projection,
        shader: &Shader<'_>,
        surface: &mut dyn Surface,
        cancel: &CancelToken,
    ) -> RenderResult<usize> {
        let vp = projection.viewport;
        let mut written = 0;

        for y in vp.y..vp.y + vp.height {
            if cancel.is_cancelled() {
                log::info!("Render cancelled at row {}", y);
                return Err(RenderError::Cancelled);
            }
            for x in vp.x..vp.x + vp.width {
                if let Some(color) = render_pixel(projection, shader, x, y) {
                    surface.set_pixel(x, y, color);
                    written += 1;
                }
            }
        }

        Ok(written)
    }

    fn render_batched(
        &self,
        projection: &Projection,
        shader: &Shader<'_>,
        bucket_size: u32,
        surface: &mut dyn Surface,
        cancel: &CancelToken,
    ) -> RenderResult<(usize, usize)> {
        let buckets = generate_buckets(projection.viewport, bucket_size);
        log::debug!("Dispatching {} buckets of {} px", buckets.len(), bucket_size);

        // Single join: every bucket finishes before any pixel is written
        let results: Vec<BucketResult> = self.pool.install(|| {
            buckets
                .par_iter()
                .filter_map(|bucket| {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    let pixels = render_bucket(bucket, projection, shader);
                    Some(BucketResult::new(*bucket, pixels))
                })
                .collect()
        });

        if cancel.is_cancelled() {
            log::info!(
                "Render cancelled, discarding {} of {} buckets",
                results.len(),
                buckets.len()
            );
            return Err(RenderError::Cancelled);
        }

        let mut written = 0;
        for result in &results {
            for (x, y, color) in result.iter_pixels() {
                if let Some(color) = color {
                    surface.set_pixel(x, y, color);
                    written += 1;
                }
            }
        }

        Ok((written, results.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::light::{AmbientLight, DirectionalLight};
    use crate::sphere::Sphere;
    use crate::surface::ImageBuffer;
    use glint_core::{Material, MaterialKind};
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const CLEAR: Color = Color::new(0.25, 0.25, 0.25);

    fn sphere_scene(mode: ExecutionMode) -> Scene {
        let mut scene = Scene::new();
        let material = Material::new("red", Color::new(1.0, 0.2, 0.2)).with_specular(32.0, 0.3);
        scene.add_shape(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Arc::new(material)));
        scene.add_light(AmbientLight::new(0.1, Color::ONE));
        scene.add_light(DirectionalLight::new(Vec3::new(0.0, -1.0, -1.0), 0.7, Color::ONE));
        scene.clear_color = CLEAR;
        scene.camera = Camera::new();
        scene.config = RenderConfig {
            mode,
            bucket_size: 8,
            ..RenderConfig::default()
        };
        scene
    }

    #[test]
    fn test_render_config_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.bucket_size, 64);
        assert_eq!(config.mode, ExecutionMode::Batched);
    }

    #[test]
    fn test_center_pixel_hits_sphere() {
        let renderer = Renderer::new(Some(2)).unwrap();
        let scene = sphere_scene(ExecutionMode::Batched);
        let mut image = ImageBuffer::new(33, 33);

        let stats = renderer.render(&scene, &mut image, &CancelToken::new()).unwrap();
        assert!(stats.pixels_written > 0);
        assert!(stats.buckets > 0);

        let center = image.get(16, 16).unwrap();
        let corner = image.get(0, 0).unwrap();
        assert_ne!(center, CLEAR);
        assert_eq!(corner, CLEAR);

        // A ray that misses the sphere shades to nothing
        let projection = scene.camera.projection(33, 33);
        let shader = Shader::new(&scene);
        assert_eq!(render_pixel(&projection, &shader, 0, 0), None);
        assert!(center.x > 0.1);
    }

    #[test]
    fn test_modes_agree() {
        let renderer = Renderer::new(Some(3)).unwrap();
        let mut sequential = ImageBuffer::new(40, 30);
        let mut batched = ImageBuffer::new(40, 30);

        let a = renderer
            .render(&sphere_scene(ExecutionMode::Sequential), &mut sequential, &CancelToken::new())
            .unwrap();
        let b = renderer
            .render(&sphere_scene(ExecutionMode::Batched), &mut batched, &CancelToken::new())
            .unwrap();

        assert_eq!(a.pixels_written, b.pixels_written);
        assert_eq!(a.buckets, 0);
        assert_eq!(sequential, batched);
    }

    #[test]
    fn test_random_bucket_sizes_match_sequential() {
        let renderer = Renderer::new(Some(2)).unwrap();
        let mut reference = ImageBuffer::new(23, 17);
        renderer
            .render(&sphere_scene(ExecutionMode::Sequential), &mut reference, &CancelToken::new())
            .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let mut scene = sphere_scene(ExecutionMode::Batched);
            scene.config.bucket_size = rng.gen_range(1..30);

            let mut image = ImageBuffer::new(23, 17);
            renderer.render(&scene, &mut image, &CancelToken::new()).unwrap();
            assert_eq!(image, reference, "bucket size {}", scene.config.bucket_size);
        }
    }

    #[test]
    fn test_cancelled_pass() {
        let renderer = Renderer::new(Some(2)).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        for mode in [ExecutionMode::Sequential, ExecutionMode::Batched] {
            let mut image = ImageBuffer::new(16, 16);
            let result = renderer.render(&sphere_scene(mode), &mut image, &cancel);
            assert!(matches!(result, Err(RenderError::Cancelled)));
            // Nothing beyond the clear made it to the surface
            assert!(image.pixels.iter().all(|&p| p == CLEAR));
        }
    }

    #[test]
    fn test_mirror_scene_renders() {
        let renderer = Renderer::new(Some(2)).unwrap();
        let mut scene = sphere_scene(ExecutionMode::Batched);
        let mirror = Arc::new(
            Material::new("mirror", Color::ONE)
                .with_specular(50.0, 0.5)
                .with_kind(MaterialKind::Reflective),
        );
        scene.add_shape(Sphere::new(Vec3::new(2.5, 0.0, -5.0), 1.0, mirror.clone()));
        scene.add_shape(Sphere::new(Vec3::new(-2.5, 0.0, -5.0), 1.0, mirror));

        let mut image = ImageBuffer::new(24, 24);
        renderer.render(&scene, &mut image, &CancelToken::new()).unwrap();
        assert!(image.pixels.iter().all(|p| p.is_finite()));
    }
}
