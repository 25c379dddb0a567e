use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::ExecutionMode;
use glint_renderer::RenderConfig;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Execution mode as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Sequential,
    #[value(alias = "batches")]
    Batched,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Sequential => ExecutionMode::Sequential,
            Mode::Batched => ExecutionMode::Batched,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "A recursive CPU ray tracer", version)]
pub struct Args {
    /// Scene description (.txt line format or .json)
    pub scene: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "glint.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "512")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "512")]
    pub height: u32,

    /// Execution mode, overrides the scene's render_using
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Bucket edge length in pixels, overrides the scene's batch_size
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub batch_size: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Maximum trace depth, overrides the scene's max_depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of the scene's settings.
    pub fn apply_to(&self, config: &mut RenderConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(batch_size) = self.batch_size {
            config.bucket_size = batch_size;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["glint", "scene.txt"]).unwrap();
        assert_eq!(args.scene, PathBuf::from("scene.txt"));
        assert_eq!(args.output, PathBuf::from("glint.png"));
        assert_eq!((args.width, args.height), (512, 512));
        assert!(args.mode.is_none());

        let mut config = RenderConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "glint",
            "scene.json",
            "--mode",
            "sequential",
            "--batch-size",
            "16",
            "--max-depth",
            "5",
            "-j",
            "4",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let mut config = RenderConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.mode, ExecutionMode::Sequential);
        assert_eq!(config.bucket_size, 16);
        assert_eq!(config.max_depth, 5);
        assert_eq!(args.threads, Some(4));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        assert!(Args::try_parse_from(["glint", "s.txt", "--batch-size", "0"]).is_err());
    }

    #[test]
    fn test_batches_alias() {
        let args = Args::try_parse_from(["glint", "s.txt", "--mode", "batches"]).unwrap();
        assert_eq!(args.mode, Some(Mode::Batched));
    }
}
