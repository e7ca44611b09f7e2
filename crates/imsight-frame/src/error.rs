//! Error types for imsight-frame

use thiserror::Error;

use crate::schema::ColumnType;

/// Errors raised while building or reading a [`Frame`](crate::Frame)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Length mismatch for column '{column}': expected {expected} rows, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Type mismatch for column '{column}': expected {expected}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: ColumnType,
    },

    #[error("Group-by requires at least one key column")]
    EmptyGroupKeys,
}

/// Result type for frame operations
pub type FrameResult<T> = Result<T, FrameError>;
