//! AIJ (triplet array) format

use alloc::vec::Vec;

use super::csr::CsrMatrix;

/// Matrix as three parallel arrays of equal length
///
/// Entries appear row-major with columns ascending, the same order as the
/// CSR export they are expanded from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AijMatrix<T> {
    /// Number of rows
    pub nrows: usize,
    /// Number of columns
    pub ncols: usize,
    /// Value of each stored entry
    pub values: Vec<T>,
    /// Row index of each stored entry
    pub row_indices: Vec<usize>,
    /// Column index of each stored entry
    pub column_indices: Vec<usize>,
}

impl<T> AijMatrix<T> {
    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterate over `(row, col, &value)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.row_indices
            .iter()
            .zip(&self.column_indices)
            .zip(&self.values)
            .map(|((&i, &j), v)| (i, j, v))
    }
}

impl<T> From<CsrMatrix<T>> for AijMatrix<T> {
    /// Expand row offsets into one row index per entry
    fn from(csr: CsrMatrix<T>) -> Self {
        let (nrows, ncols) = csr.shape();
        let (row_offsets, column_indices, values) = csr.into_parts();
        let mut row_indices = Vec::with_capacity(values.len());
        for (i, w) in row_offsets.windows(2).enumerate() {
            row_indices.extend(core::iter::repeat(i).take(w[1] - w[0]));
        }
        Self {
            nrows,
            ncols,
            values,
            row_indices,
            column_indices,
        }
    }
}
