//! Error type shared across the crate.
//!
//! Structural problems (shape mismatches, unusable axes, bad cells) abort the
//! whole operation before any partial result exists. Advisory conditions
//! (zero-guarded divisions, extrapolation) are *not* errors; they travel as
//! [`crate::domain::Warning`] values alongside successful results.

use thiserror::Error;

/// Errors produced while validating, fitting, or exporting a map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// An axis length disagrees with the table dimension it indexes.
    #[error("shape mismatch: {axis} axis has {expected} values but table has {actual} {axis}s")]
    ShapeMismatch {
        /// `"row"` or `"column"`.
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A non-empty cell could not be coerced to a number.
    ///
    /// Row/column are zero-based positions in the table body, not file lines.
    #[error("invalid cell value '{text}' at row {row}, column {col}")]
    InvalidCellValue { row: usize, col: usize, text: String },

    /// An axis is not strictly monotonic (or is too short to index anything).
    #[error("axis is not strictly monotonic: {context}")]
    NonMonotonicAxis { context: String },

    /// Fewer than 2 distinct axis points: fitting is undefined.
    #[error("insufficient samples to fit: {distinct} distinct axis point(s), need at least 2")]
    InsufficientSamples { distinct: usize },

    /// A column is entirely empty, so gap filling has nothing to propagate.
    #[error("column {col} has no usable values")]
    EmptyColumn { col: usize },

    /// File or parse problems in the CLI shim.
    #[error("{0}")]
    Io(String),
}

impl MapError {
    /// Process exit code for the `tq` binary.
    ///
    /// 2 = input/I/O, 3 = validation, 4 = fit.
    pub fn exit_code(&self) -> u8 {
        match self {
            MapError::Io(_) => 2,
            MapError::ShapeMismatch { .. }
            | MapError::InvalidCellValue { .. }
            | MapError::NonMonotonicAxis { .. }
            | MapError::EmptyColumn { .. } => 3,
            MapError::InsufficientSamples { .. } => 4,
        }
    }
}
