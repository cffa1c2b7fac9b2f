//! Compressed Sparse Row format definitions and operations

use alloc::vec;
use alloc::vec::Vec;

use crate::traits::MatrixElement;
use crate::validation::{
    validate_column_bounds, validate_csr_parts, validate_row_offsets, validate_vector_len,
};
use crate::{Result, SpmatError};

/// Compressed Sparse Row (CSR) matrix
///
/// # Layout
///
/// For a matrix with `m` rows and `nnz` stored entries:
/// - `row_offsets` has length `m + 1`, starts at 0 and ends at `nnz`
/// - `column_indices` and `values` each have length `nnz`
/// - Row `i` spans `row_offsets[i]..row_offsets[i + 1]`, columns ascending
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsrMatrix<T> {
    /// Number of rows
    pub nrows: usize,
    /// Number of columns
    pub ncols: usize,
    /// Start of each row in `column_indices`/`values`, plus the final `nnz`
    pub row_offsets: Vec<usize>,
    /// Column index of each stored entry
    pub column_indices: Vec<usize>,
    /// Value of each stored entry
    pub values: Vec<T>,
}

impl<T> CsrMatrix<T> {
    /// Build from raw parts, optionally validating the layout
    ///
    /// Array lengths, row offsets and column bounds are always verified, so
    /// every accessor is panic-free on the result. With `check` disabled
    /// the caller vouches that columns are strictly increasing within each
    /// row; lookups through [`CsrMatrix::get`] rely on it.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        row_offsets: Vec<usize>,
        column_indices: Vec<usize>,
        values: Vec<T>,
        check: bool,
    ) -> Result<Self> {
        if check {
            validate_csr_parts(nrows, ncols, &row_offsets, &column_indices, values.len())?;
        } else {
            if column_indices.len() != values.len() {
                return Err(SpmatError::InvalidCsr(
                    "column_indices and values must have equal length",
                ));
            }
            validate_row_offsets(&row_offsets, nrows, values.len())?;
            validate_column_bounds(&column_indices, ncols)?;
        }
        Ok(Self::from_parts_unchecked(
            nrows,
            ncols,
            row_offsets,
            column_indices,
            values,
        ))
    }

    pub(crate) const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        row_offsets: Vec<usize>,
        column_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        Self {
            nrows,
            ncols,
            row_offsets,
            column_indices,
            values,
        }
    }

    /// Matrix dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Columns and values of row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows`.
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        let span = self.row_offsets[i]..self.row_offsets[i + 1];
        (&self.column_indices[span.clone()], &self.values[span])
    }

    /// Stored value at `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> Result<&T> {
        if i >= self.nrows {
            return Err(SpmatError::OutOfBoundsOrMissing { row: i, col: j });
        }
        let (cols, vals) = self.row(i);
        cols.binary_search(&j)
            .map(|k| &vals[k])
            .map_err(|_| SpmatError::OutOfBoundsOrMissing { row: i, col: j })
    }

    /// Iterate over `(row, col, &value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        (0..self.nrows).flat_map(move |i| {
            let (cols, vals) = self.row(i);
            cols.iter().zip(vals).map(move |(&j, v)| (i, j, v))
        })
    }

    /// Split into `(row_offsets, column_indices, values)`
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_offsets, self.column_indices, self.values)
    }
}

impl<T: MatrixElement> CsrMatrix<T> {
    /// Dense product `y = A x`
    pub fn vmult(&self, x: &[T]) -> Result<Vec<T>> {
        validate_vector_len(self.ncols, x.len())?;
        let mut y = vec![T::zero(); self.nrows];
        for (i, yi) in y.iter_mut().enumerate() {
            let (cols, vals) = self.row(i);
            let mut sum = T::zero();
            for (&j, &v) in cols.iter().zip(vals) {
                sum += v * x[j];
            }
            *yi = sum;
        }
        Ok(y)
    }

    /// Expand into a dense row-major array, absent entries set to zero
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        let mut dense = vec![vec![T::zero(); self.ncols]; self.nrows];
        for (i, j, &v) in self.iter() {
            dense[i][j] = v;
        }
        dense
    }
}

impl<T: bytemuck::Pod> CsrMatrix<T> {
    /// Borrow the three arrays as raw bytes
    ///
    /// Returns `(values, column_indices, row_offsets)` in native endianness,
    /// ready to hand to an external solver or partitioner.
    pub fn as_byte_parts(&self) -> (&[u8], &[u8], &[u8]) {
        (
            bytemuck::cast_slice(&self.values),
            bytemuck::cast_slice(&self.column_indices),
            bytemuck::cast_slice(&self.row_offsets),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsrMatrix<f64> {
        // [1 0 2]
        // [0 3 0]
        CsrMatrix::from_parts(2, 3, vec![0, 2, 3], vec![0, 2, 1], vec![1.0, 2.0, 3.0], true)
            .unwrap()
    }

    #[test]
    fn test_from_parts_ok() {
        let csr = sample();
        assert_eq!(csr.nnz(), 3);
        assert_eq!(csr.shape(), (2, 3));
    }

    #[test]
    fn test_from_parts_rejects_unsorted_row() {
        let err = CsrMatrix::from_parts(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 2.0], true)
            .unwrap_err();
        assert!(matches!(err, SpmatError::InvalidCsr(_)));
    }

    #[test]
    fn test_unchecked_rejects_bad_offsets() {
        // Final offset past nnz
        let err = CsrMatrix::from_parts(1, 1, vec![0, 5], vec![0], vec![1.0], false).unwrap_err();
        assert!(matches!(err, SpmatError::InvalidCsr(_)));

        // Decreasing offsets
        let err = CsrMatrix::from_parts(2, 2, vec![0, 2, 1], vec![0], vec![1.0], false);
        assert!(err.is_err());

        // Column past ncols
        let err = CsrMatrix::from_parts(1, 2, vec![0, 1], vec![2], vec![1.0], false);
        assert!(err.is_err());
    }

    #[test]
    fn test_unchecked_accepts_unsorted_row() {
        let csr = CsrMatrix::from_parts(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 2.0], false)
            .unwrap();
        assert_eq!(csr.vmult(&[1.0, 1.0, 1.0]).unwrap(), vec![3.0]);
        assert_eq!(csr.to_dense(), vec![vec![2.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_unchecked_still_checks_lengths() {
        let err = CsrMatrix::from_parts(2, 3, vec![0, 1], vec![0], vec![1.0], false).unwrap_err();
        assert!(matches!(err, SpmatError::InvalidCsr(_)));
    }

    #[test]
    fn test_get() {
        let csr = sample();
        assert_eq!(csr.get(0, 2), Ok(&2.0));
        assert_eq!(csr.get(1, 1), Ok(&3.0));
        assert_eq!(
            csr.get(1, 0),
            Err(SpmatError::OutOfBoundsOrMissing { row: 1, col: 0 })
        );
        assert!(csr.get(5, 0).is_err());
    }

    #[test]
    fn test_vmult_and_dense() {
        let csr = sample();
        assert_eq!(csr.vmult(&[1.0, 1.0, 1.0]).unwrap(), vec![3.0, 3.0]);
        assert!(csr.vmult(&[1.0]).is_err());
        assert_eq!(
            csr.to_dense(),
            vec![vec![1.0, 0.0, 2.0], vec![0.0, 3.0, 0.0]]
        );
    }

    #[test]
    fn test_byte_parts() {
        let csr = sample();
        let (values, cols, offsets) = csr.as_byte_parts();
        assert_eq!(values.len(), 3 * core::mem::size_of::<f64>());
        assert_eq!(cols.len(), 3 * core::mem::size_of::<usize>());
        assert_eq!(offsets.len(), 3 * core::mem::size_of::<usize>());
    }
}
