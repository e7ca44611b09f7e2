//! Error types for imsight-render

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering or exporting
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid figure dimensions
    #[error("Invalid dimensions: {width}x{height} (must be positive and within limits)")]
    InvalidDimensions { width: u32, height: u32 },

    /// Presentation config could not be parsed or serialized
    #[error("Invalid presentation config: {0}")]
    Config(String),

    /// CSV export error
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export error
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a chart to disk failed
    #[error("Cannot write to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<toml::de::Error> for RenderError {
    fn from(err: toml::de::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for RenderError {
    fn from(err: toml::ser::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Largest accepted figure side, in pixels
    pub const MAX_DIMENSION: u32 = 16384;

    /// Validate figure dimensions
    pub fn validate_dimensions(width: u32, height: u32) -> RenderResult<()> {
        const MIN_DIMENSION: u32 = 1;

        if width < MIN_DIMENSION
            || height < MIN_DIMENSION
            || width > MAX_DIMENSION
            || height > MAX_DIMENSION
        {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(())
    }
}
