//! Structural validation of CSR arrays
//!
//! These checks back [`crate::CsrMatrix::from_parts`] and the converter's
//! self-checks.

use super::bounds::validate_index_fits;
use crate::{Result, SpmatError};

/// Validate a row offset array for `nrows` rows and `nnz` entries
///
/// The array must have `nrows + 1` elements, start at 0, end at `nnz`
/// and never decrease.
pub fn validate_row_offsets(row_offsets: &[usize], nrows: usize, nnz: usize) -> Result<()> {
    if row_offsets.len() != nrows + 1 {
        return Err(SpmatError::InvalidCsr("row_offsets length must be nrows + 1"));
    }
    if row_offsets[0] != 0 {
        return Err(SpmatError::InvalidCsr("row_offsets first element must be 0"));
    }
    if row_offsets[nrows] != nnz {
        return Err(SpmatError::InvalidCsr("row_offsets last element must equal nnz"));
    }
    if row_offsets.windows(2).any(|w| w[0] > w[1]) {
        return Err(SpmatError::InvalidCsr("row_offsets must be non-decreasing"));
    }
    Ok(())
}

/// Validate column indices against already validated row offsets
///
/// Every column must be below `ncols` and columns must be strictly
/// increasing within each row.
pub fn validate_column_indices(
    row_offsets: &[usize],
    column_indices: &[usize],
    ncols: usize,
) -> Result<()> {
    for w in row_offsets.windows(2) {
        let row = &column_indices[w[0]..w[1]];
        for &j in row {
            validate_index_fits(j, ncols)?;
        }
        if row.windows(2).any(|p| p[0] >= p[1]) {
            return Err(SpmatError::InvalidCsr(
                "column indices must be strictly increasing within each row",
            ));
        }
    }
    Ok(())
}

/// Validate that every column index is below `ncols`
pub fn validate_column_bounds(column_indices: &[usize], ncols: usize) -> Result<()> {
    column_indices
        .iter()
        .try_for_each(|&j| validate_index_fits(j, ncols))
}

/// Validate the full set of CSR parts
pub fn validate_csr_parts(
    nrows: usize,
    ncols: usize,
    row_offsets: &[usize],
    column_indices: &[usize],
    nvalues: usize,
) -> Result<()> {
    if column_indices.len() != nvalues {
        return Err(SpmatError::InvalidCsr(
            "column_indices and values must have equal length",
        ));
    }
    validate_row_offsets(row_offsets, nrows, nvalues)?;
    validate_column_indices(row_offsets, column_indices, ncols)
}
