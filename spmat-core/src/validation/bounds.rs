//! Dense operand length validation

use crate::{Result, SpmatError};

/// Validate that a dense operand has the length a matrix requires
///
/// Used by every `vmult` implementation before touching `x`.
#[inline]
pub const fn validate_vector_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(SpmatError::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Validate that an index fits below an exclusive bound
///
/// Used when checking externally supplied index arrays; internal lookups
/// rely on the stores instead.
#[inline]
pub const fn validate_index_fits(index: usize, bound: usize) -> Result<()> {
    if index >= bound {
        return Err(SpmatError::InvalidCsr("index exceeds declared dimension"));
    }
    Ok(())
}
