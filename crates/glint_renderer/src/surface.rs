//! Output surfaces.

use glint_core::Color;

/// Something a render pass can write pixels into.
///
/// Coordinates have their origin at the bottom-left; colors are linear
/// floats, nominally in `[0, 1]`.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fill every pixel with `color`.
    fn clear(&mut self, color: Color);

    /// Write one pixel. Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Simple in-memory image, stored top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Storage index of bottom-left-origin `(x, y)`.
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.height - 1 - y;
        Some(row as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at bottom-left-origin `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Convert to RGBA bytes, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

impl Surface for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }
}

/// Convert a color to 8-bit RGBA. No gamma is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, 255]
}
