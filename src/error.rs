//! Error types for CSR assembly.

use thiserror::Error;

/// Result type alias using [`AssemblyError`].
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Errors that can occur while assembling or refreshing a matrix.
///
/// Every operation validates its input before touching the matrix, so
/// an error never leaves a partially mutated structure behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// An input sequence does not have the length fixed at construction.
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Which input sequence was wrong.
        what: &'static str,
        /// The triplet count the matrix was built for.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A triplet's row index lies outside the matrix.
    #[error("triplet {position} has row {row}, but the matrix has {n_rows} rows")]
    RowOutOfBounds {
        /// Position of the offending triplet.
        position: usize,
        /// The row index supplied.
        row: usize,
        /// Number of rows in the matrix.
        n_rows: usize,
    },

    /// A triplet's column index lies outside the matrix.
    #[error("triplet {position} has column {col}, but the matrix has {n_cols} columns")]
    ColumnOutOfBounds {
        /// Position of the offending triplet.
        position: usize,
        /// The column index supplied.
        col: usize,
        /// Number of columns in the matrix.
        n_cols: usize,
    },

    /// Values were supplied before any triplet pattern was compressed.
    #[error("matrix has not been compressed yet")]
    NotAssembled,

    /// A refresh triplet does not match the compressed pattern.
    #[error("triplet {position} does not match the compressed pattern")]
    PatternMismatch {
        /// Position of the first mismatching triplet.
        position: usize,
    },

    /// The row histogram does not add up to the triplet count.
    #[error("row counts sum to {actual}, expected {expected} triplets")]
    Inconsistent {
        /// The triplet count.
        expected: usize,
        /// The prefix-sum total.
        actual: usize,
    },
}

impl AssemblyError {
    /// Create a length mismatch error.
    pub fn length(what: &'static str, expected: usize, actual: usize) -> Self {
        AssemblyError::LengthMismatch {
            what,
            expected,
            actual,
        }
    }
}
