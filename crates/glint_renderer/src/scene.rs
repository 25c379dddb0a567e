//! Scene snapshots and atomic reload.
//!
//! A [`Scene`] is immutable once built. Renders hold an `Arc<Scene>` for
//! the whole pass; [`SceneStore`] swaps in a new snapshot between passes.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use glint_core::{Color, Texture};
use glint_math::{Interval, Ray};

use crate::builder::{BuildResult, SceneBuilder};
use crate::camera::Camera;
use crate::hittable::{Hittable, Intercept, ShapeId};
use crate::light::Light;
use crate::renderer::RenderConfig;
use crate::shape::Shape;

/// Everything a render pass reads.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub shapes: Vec<Shape>,
    pub lights: Vec<Light>,
    /// Equirectangular map sampled by rays that escape the scene
    pub environment: Option<Arc<Texture>>,
    /// Color the surface is cleared to before a pass
    pub clear_color: Color,
    pub camera: Camera,
    pub config: RenderConfig,
    /// Set by [`SceneStore::publish`]; 0 for unpublished scenes
    pub version: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape, returning its id.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ShapeId {
        self.shapes.push(shape.into());
        self.shapes.len() - 1
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    /// Nearest intersection over every shape except `excluded`.
    pub fn closest_hit(&self, ray: &Ray, excluded: Option<ShapeId>) -> Option<Intercept<'_>> {
        let mut closest: Option<Intercept<'_>> = None;

        for (id, shape) in self.shapes.iter().enumerate() {
            if Some(id) == excluded {
                continue;
            }
            let Some(hit) = shape.intersect(ray) else {
                continue;
            };
            if closest.map_or(true, |c| hit.distance < c.distance) {
                closest = Some(Intercept::new(hit, id, shape.material()));
            }
        }

        closest
    }

    /// Whether anything but `excluded` lies along the ray strictly inside
    /// `range`.
    pub fn occluded(&self, ray: &Ray, excluded: Option<ShapeId>, range: Interval) -> bool {
        self.shapes.iter().enumerate().any(|(id, shape)| {
            Some(id) != excluded
                && shape
                    .intersect(ray)
                    .is_some_and(|hit| range.surrounds(hit.distance))
        })
    }
}

/// Holder of the current scene snapshot.
///
/// Readers take a cheap `Arc` clone; writers replace the whole scene at
/// once, so a pass never observes a partially reloaded scene.
#[derive(Debug, Default)]
pub struct SceneStore {
    current: RwLock<Arc<Scene>>,
    version: AtomicU64,
}

impl SceneStore {
    /// Store that starts out holding `scene` as version 1.
    pub fn new(scene: Scene) -> Self {
        let store = Self::default();
        store.publish(scene);
        store
    }

    /// The scene renders should use right now.
    pub fn snapshot(&self) -> Arc<Scene> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the current scene, returning the version it was given.
    pub fn publish(&self, mut scene: Scene) -> u64 {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        scene.version = version;

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(scene);

        log::debug!("Published scene version {}", version);
        version
    }

    /// Build a scene from a description file and publish it.
    ///
    /// The current snapshot is left untouched if building fails.
    pub fn reload_from(&self, path: impl AsRef<Path>) -> BuildResult<u64> {
        let scene = SceneBuilder::from_file(path.as_ref())?;
        Ok(self.publish(scene))
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
