//! Bucket-based tile rendering.
//!
//! Divides the viewport into square tiles (buckets) that are rendered
//! independently and in parallel using rayon.

use glint_core::Color;

use crate::camera::{Projection, Viewport};
use crate::renderer::render_pixel;
use crate::shading::Shader;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the bucket's bottom-left corner
    pub x: u32,
    /// Y coordinate of the bucket's bottom-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Split a viewport into buckets, sorted in spiral order from its center.
///
/// Edge buckets are cropped so no bucket extends past the viewport.
pub fn generate_buckets(viewport: Viewport, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < viewport.height {
        let mut x = 0;
        while x < viewport.width {
            let bw = bucket_size.min(viewport.width - x);
            let bh = bucket_size.min(viewport.height - y);
            buckets.push(Bucket::new(viewport.x + x, viewport.y + y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, &viewport);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the viewport center.
fn sort_spiral(buckets: &mut [Bucket], viewport: &Viewport) {
    let center_x = viewport.x as f32 + viewport.width as f32 / 2.0;
    let center_y = viewport.y as f32 + viewport.height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket, bottom row first.
/// `None` marks pixels that received no color and keep the clear color.
pub fn render_bucket(bucket: &Bucket, projection: &Projection, shader: &Shader<'_>) -> Vec<Option<Color>> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;
            pixels.push(render_pixel(projection, shader, x, y));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Option<Color>>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Option<Color>>) -> Self {
        Self { bucket, pixels }
    }

    /// Pixels paired with their image coordinates.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (u32, u32, Option<Color>)> + '_ {
        let bucket = self.bucket;
        self.pixels.iter().enumerate().map(move |(i, &color)| {
            let i = i as u32;
            (bucket.x + i % bucket.width, bucket.y + i / bucket.width, color)
        })
    }
}
