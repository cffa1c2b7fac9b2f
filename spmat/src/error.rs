//! Error type for the std layer
//!
//! Wraps [`SpmatError`] from the core together with the I/O and
//! serialization failures that only exist outside it.

use spmat_core::SpmatError;
use thiserror::Error;

/// Result type for the std layer
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors produced by export, fixture and harness operations
#[derive(Error, Debug)]
pub enum LabError {
    /// Failure reported by the core engine
    #[error("matrix error: {0}")]
    Matrix(#[from] SpmatError),

    /// Writing an export or dump failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Formatting the text dump failed
    #[error("formatting error")]
    Fmt(#[from] std::fmt::Error),

    /// A fixture check did not hold
    #[error("check failed: {0}")]
    Check(String),
}

impl LabError {
    /// Whether the failure came from a caller-side mistake in a core call
    ///
    /// I/O, encoding and fixture failures are never recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LabError::Matrix(err) => err.is_recoverable(),
            _ => false,
        }
    }
}
