//! Pinhole camera and pixel-to-ray projection.
//!
//! The camera sits at `position` looking down -Z with +Y up. Pixel
//! coordinates have their origin at the bottom-left of the viewport.

use glint_math::{normalize, Ray, Vec3};

/// Pixel rectangle rendered into, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// The part of this viewport that lies on a `width` x `height` surface.
    pub fn clipped(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Camera for generating primary rays.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Distance to the near plane
    pub near: f32,
    /// Explicit viewport; the whole surface when `None`
    pub viewport: Option<Viewport>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            fov: 60.0,
            near: 0.1,
            viewport: None,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_near(mut self, near: f32) -> Self {
        self.near = near;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Fix the projection for a `width` x `height` surface.
    pub fn projection(&self, width: u32, height: u32) -> Projection {
        let viewport = self
            .viewport
            .unwrap_or(Viewport::new(0, 0, width, height))
            .clipped(width, height);

        let top = (self.fov.to_radians() / 2.0).tan() * self.near;
        let aspect = if viewport.height > 0 {
            viewport.width as f32 / viewport.height as f32
        } else {
            1.0
        };

        Projection {
            origin: self.position,
            viewport,
            top,
            right: top * aspect,
            near: self.near,
        }
    }
}

/// A camera resolved against a concrete viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub origin: Vec3,
    pub viewport: Viewport,
    /// Half-height of the near plane
    pub top: f32,
    /// Half-width of the near plane
    pub right: f32,
    pub near: f32,
}

impl Projection {
    /// Primary ray through the center of pixel `(x, y)`.
    pub fn ray_through(&self, x: u32, y: u32) -> Ray {
        let vp = &self.viewport;
        let ndc_x = (x as f32 + 0.5 - vp.x as f32) / vp.width as f32 * 2.0 - 1.0;
        let ndc_y = (y as f32 + 0.5 - vp.y as f32) / vp.height as f32 * 2.0 - 1.0;

        let direction = normalize(Vec3::new(ndc_x * self.right, ndc_y * self.top, -self.near));
        Ray::new(self.origin, direction)
    }
}
