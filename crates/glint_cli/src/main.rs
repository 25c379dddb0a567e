use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod logger;
mod output;

use cli::Args;
use glint_renderer::{CancelToken, ImageBuffer, Renderer, SceneBuilder, SceneStore};
use logger::init_logger;
use output::save_image_as_png;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let load_start = Instant::now();
    let mut scene = SceneBuilder::from_file(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    args.apply_to(&mut scene.config);
    info!(
        "Loaded {} in {:.2?}: {} shapes, {} lights",
        args.scene.display(),
        load_start.elapsed(),
        scene.shapes.len(),
        scene.lights.len()
    );

    let store = SceneStore::default();
    store.publish(scene);
    let snapshot = store.snapshot();

    let renderer = Renderer::new(args.threads).context("Failed to start render workers")?;
    info!(
        "Rendering {}x{} on {} threads (bucket size {}, max depth {})",
        args.width,
        args.height,
        renderer.threads(),
        snapshot.config.bucket_size,
        snapshot.config.max_depth
    );

    let mut image = ImageBuffer::new(args.width, args.height);
    let stats = renderer
        .render(&snapshot, &mut image, &CancelToken::new())
        .context("Render failed")?;

    info!(
        "Scene v{} rendered in {:.2?} ({:?}, {} buckets, {} pixels shaded)",
        stats.scene_version, stats.elapsed, stats.mode, stats.buckets, stats.pixels_written
    );

    save_image_as_png(&image, &args.output)?;
    info!("Saved {}", args.output.display());

    Ok(())
}
