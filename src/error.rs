//! Error types for the engine boundary and the caller-side file helpers.
use std::path::PathBuf;
use thiserror::Error;

/// Rejected detection configuration. Raised before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sensitivity must lie in [0, 1], got {0}")]
    SensitivityOutOfRange(f32),

    #[error("min_area_px must be positive, got {0}")]
    NonPositiveMinArea(i64),

    #[error("unknown pipeline type '{0}' (expected subsea, cross_country or general)")]
    UnknownPipelineType(String),
}

/// Failures of the file helpers in [`crate::image::io`] and [`crate::config`].
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode or encode image '{path}': {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to build image buffer for '{path}'")]
    Buffer { path: PathBuf },
}
