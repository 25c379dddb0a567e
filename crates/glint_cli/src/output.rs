//! PNG export of rendered images.

use std::path::Path;

use anyhow::{Context, Result};
use glint_renderer::ImageBuffer;
use log::debug;

/// Save a rendered image as 8-bit RGBA PNG. Colors are clamped, not
/// tone mapped.
pub fn save_image_as_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba8())
        .context("Image buffer size does not match its dimensions")?;

    rgba.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Wrote {}x{} PNG to {}", image.width, image.height, path.display());
    Ok(())
}
