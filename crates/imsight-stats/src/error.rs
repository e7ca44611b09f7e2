//! Error types for imsight-stats

use imsight_frame::{ColumnType, FrameError};
use thiserror::Error;

/// Errors raised by the summarizer and the aggregator
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid binning: {0}")]
    InvalidBinning(String),

    #[error("Unknown aggregation: {0}")]
    UnknownAggregation(String),

    #[error("Duplicate metric '{metric}' for column '{column}'")]
    DuplicateMetric { column: String, metric: String },

    #[error("Type mismatch for column '{column}': expected {expected}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: ColumnType,
    },

    #[error("Flag column '{column}' holds non-binary value {value}")]
    NonBinaryFlag { column: String, value: f64 },

    #[error("Frame error: {0}")]
    Frame(FrameError),
}

impl From<FrameError> for StatsError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::ColumnNotFound(name) => StatsError::ColumnNotFound(name),
            FrameError::TypeMismatch {
                column,
                expected,
                actual,
            } => StatsError::TypeMismatch {
                column,
                expected,
                actual,
            },
            other => StatsError::Frame(other),
        }
    }
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_column_not_found_maps_through() {
        let err: StatsError = FrameError::ColumnNotFound("age".to_string()).into();
        assert_eq!(err, StatsError::ColumnNotFound("age".to_string()));
    }

    #[test]
    fn test_other_frame_errors_are_wrapped() {
        let err: StatsError = FrameError::EmptyGroupKeys.into();
        assert_eq!(err, StatsError::Frame(FrameError::EmptyGroupKeys));
        assert!(err.to_string().contains("at least one key"));
    }

    #[test]
    fn test_error_display() {
        let err = StatsError::NonBinaryFlag {
            column: "flag".to_string(),
            value: 2.0,
        };
        assert!(err.to_string().contains("non-binary value 2"));
    }
}
