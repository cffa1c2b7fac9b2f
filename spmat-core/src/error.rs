//! Error types for sparse matrix operations

/// Errors that can occur during sparse matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpmatError {
    /// No entry is stored at the requested position
    OutOfBoundsOrMissing {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
    },
    /// Dense operand length does not match the matrix
    DimensionMismatch {
        /// Length required by the matrix
        expected: usize,
        /// Length actually supplied
        found: usize,
    },
    /// An internal storage invariant does not hold
    ///
    /// This always indicates a bug in a store or converter and must not be
    /// recovered from.
    InvariantViolation(&'static str),
    /// CSR arrays handed to [`crate::CsrMatrix::from_parts`] are malformed
    InvalidCsr(&'static str),
}

impl SpmatError {
    /// Whether the caller may reasonably recover from this error
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpmatError::OutOfBoundsOrMissing { .. } | SpmatError::InvalidCsr(_)
        )
    }
}

impl core::fmt::Display for SpmatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SpmatError::OutOfBoundsOrMissing { row, col } => {
                write!(f, "No entry stored at ({row}, {col})")
            }
            SpmatError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected length {expected}, found {found}")
            }
            SpmatError::InvariantViolation(msg) => write!(f, "Invariant violation: {msg}"),
            SpmatError::InvalidCsr(msg) => write!(f, "Invalid CSR arrays: {msg}"),
        }
    }
}

impl core::error::Error for SpmatError {}

/// Result type for sparse matrix operations
pub type Result<T> = core::result::Result<T, SpmatError>;
