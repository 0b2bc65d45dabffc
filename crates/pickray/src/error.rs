//! Error types for the fallible edges of the kernel.
//!
//! Intersection queries themselves never fail; these cover turning untyped
//! input (vertex lists, scene files) into kernel types.

use std::path::PathBuf;
use thiserror::Error;

/// A vertex list that does not describe a supported polygon.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonError {
    /// Only triangles (3) and quads (4) are supported.
    #[error("unsupported polygon vertex count {0} (expected 3 or 4)")]
    UnsupportedVertexCount(usize),
}

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Reading the scene file failed.
    #[error("failed to read scene {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Malformed JSON scene.
    #[error("invalid JSON scene: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML scene.
    #[error("invalid TOML scene: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension names no known scene format.
    #[error("unknown scene format for {} (expected .json or .toml)", .0.display())]
    UnknownFormat(PathBuf),

    /// A primitive carries an unusable vertex list.
    #[error("primitive `{name}`: {source}")]
    Polygon {
        /// Name of the offending primitive.
        name: String,
        /// What was wrong with it.
        source: PolygonError,
    },
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
