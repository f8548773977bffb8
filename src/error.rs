//! Error types for grid partitioning.

use std::fmt;

/// Errors that can occur while validating an input matrix.
///
/// Both conditions are detected during the initial scan, before any expansion
/// starts, so a partition either runs to completion or never begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The matrix is not square or disagrees with the declared size.
    ShapeMismatch {
        declared: usize,
        rows: usize,
        cols: usize,
    },

    /// A cell holds a value outside `-1` (obstacle), `0` (empty) and the
    /// positive seed weights.
    InvalidCellValue { x: i32, y: i32, value: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ShapeMismatch {
                declared,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "shape mismatch: declared size {} but got {} rows of {} columns",
                    declared, rows, cols
                )
            }
            GridError::InvalidCellValue { x, y, value } => {
                write!(f, "invalid cell value {} at ({}, {})", value, x, y)
            }
        }
    }
}

impl std::error::Error for GridError {}
