//! Scene descriptions.
//!
//! A scene description is the logical list of records (lights, shapes,
//! materials, textures, global settings) the renderer's scene builder turns
//! into a renderable scene. Two syntaxes are accepted:
//!
//! - the line format (`.txt`, anything not `.json`), one record per line
//! - JSON (`.json`), the serde form of [`SceneDescription`]
//!
//! # Example
//!
//! ```ignore
//! use glint_core::description::parse_description;
//!
//! let description = parse_description("\
//!     material red 1 0 0 16 0.1 OPAQUE None
//!     sphere 0 0 -5 1 red
//!     ambient 0.1
//! ")?;
//! ```

mod parser;
mod records;

use std::path::Path;

use thiserror::Error;

pub use parser::parse_description;
pub use records::*;

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown record '{keyword}' at line {line}")]
    UnknownRecord { line: usize, keyword: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for description operations.
pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// Load a scene description, choosing the syntax from the file extension.
pub fn load_description(path: impl AsRef<Path>) -> DescriptionResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| DescriptionError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let description = if is_json {
        serde_json::from_str(&content)?
    } else {
        parse_description(&content)?
    };

    log::info!(
        "Read scene description {}: {} shapes, {} lights, {} materials",
        path.display(),
        description.shapes.len(),
        description.lights.len(),
        description.materials.len()
    );

    Ok(description)
}
