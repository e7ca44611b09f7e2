//! Error types for imsight-core

use thiserror::Error;

use imsight_frame::FrameError;
use imsight_render::RenderError;
use imsight_stats::StatsError;

/// Main error type for imsight operations
#[derive(Error, Debug)]
pub enum ImsightError {
    /// Dataset construction or lookup errors
    #[error("Dataset error: {0}")]
    Frame(#[from] FrameError),

    /// Binning, summarizing or aggregation errors
    #[error("Computation failed: {0}")]
    Stats(#[from] StatsError),

    /// Table, chart or export errors
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImsightError {
    /// Whether the error names a column absent from the dataset
    pub fn is_column_not_found(&self) -> bool {
        matches!(
            self,
            ImsightError::Frame(FrameError::ColumnNotFound(_))
                | ImsightError::Stats(StatsError::ColumnNotFound(_))
        )
    }
}

/// Result type alias for imsight operations
pub type ImsightResult<T> = Result<T, ImsightError>;
