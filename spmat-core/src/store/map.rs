//! Row-map store: one associative container per row

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::AddAssign;

use crate::traits::{MatrixElement, MatrixOperations, RowMap, SparseMatrix};
use crate::validation::validate_vector_len;
use crate::{Result, SpmatError};

/// Map-backed row store with ordered rows (`BTreeMap`)
pub type OrderedMapMatrix<T> = MapMatrix<T, BTreeMap<usize, T>>;

/// Map-backed row store with hashed rows (`hashbrown::HashMap`)
///
/// Amortized O(1) row lookups at the cost of column order; rows are sorted
/// on demand when an ordered view is required.
#[cfg(feature = "hashbrown")]
pub type UnorderedMapMatrix<T> = MapMatrix<T, hashbrown::HashMap<usize, T>>;

/// Row-oriented sparse matrix, one `M` container per row
///
/// Writing to row `i` grows the row sequence to `i + 1`; rows in between
/// exist but stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMatrix<T, M> {
    rows: Vec<M>,
    ncols: usize,
    nnz: usize,
    _element: PhantomData<T>,
}

impl<T, M: RowMap<T>> Default for MapMatrix<T, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M: RowMap<T>> MapMatrix<T, M> {
    /// Create an empty matrix
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            ncols: 0,
            nnz: 0,
            _element: PhantomData,
        }
    }

    /// Create a matrix with `nrows` empty rows
    ///
    /// The row count is fixed up front; later writes beyond it still grow
    /// the matrix.
    pub fn with_rows(nrows: usize) -> Self {
        let mut matrix = Self::new();
        matrix.resize_rows(nrows);
        matrix
    }

    /// Grow the row sequence to at least `nrows` rows
    ///
    /// Never shrinks: stored entries are not discarded.
    pub fn resize_rows(&mut self, nrows: usize) {
        if self.rows.len() < nrows {
            self.rows.resize_with(nrows, M::default);
        }
    }

    /// Read-only access to row `i`, if it exists
    pub fn row(&self, i: usize) -> Option<&M> {
        self.rows.get(i)
    }

    /// All rows in index order
    pub fn rows(&self) -> &[M] {
        &self.rows
    }

    /// Recompute `nnz` and `ncols` from the stored rows
    ///
    /// Returns the recomputed `(nnz, ncols)`. Useful after pre-sizing with
    /// [`MapMatrix::with_rows`] when the column count should reflect only
    /// what was actually stored.
    pub fn finalize(&mut self) -> (usize, usize) {
        self.nnz = self.rows.iter().map(|r| r.len()).sum();
        self.ncols = self
            .rows
            .iter()
            .filter_map(|r| r.max_col())
            .max()
            .map_or(0, |j| j + 1);
        (self.nnz, self.ncols)
    }

    /// Check that the cached bookkeeping matches the stored rows
    pub fn check_bookkeeping(&self) -> Result<()> {
        let nnz: usize = self.rows.iter().map(|r| r.len()).sum();
        if nnz != self.nnz {
            return Err(SpmatError::InvariantViolation("cached nnz differs from stored rows"));
        }
        let widest = self.rows.iter().filter_map(|r| r.max_col()).max();
        if widest.is_some_and(|j| j >= self.ncols) {
            return Err(SpmatError::InvariantViolation("stored column exceeds ncols"));
        }
        Ok(())
    }

    fn entry_mut(&mut self, i: usize, j: usize) -> &mut T
    where
        T: MatrixElement,
    {
        self.resize_rows(i + 1);
        let (value, inserted) = self.rows[i].get_or_insert(j, T::zero());
        if inserted {
            self.nnz += 1;
            self.ncols = self.ncols.max(j + 1);
        }
        value
    }
}

impl<T: MatrixElement, M: RowMap<T>> SparseMatrix for MapMatrix<T, M> {
    type Element = T;

    #[inline]
    fn nrows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn nnz(&self) -> usize {
        self.nnz
    }

    fn get(&self, row: usize, col: usize) -> Result<&T> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SpmatError::OutOfBoundsOrMissing { row, col })
    }

    fn entry(&mut self, row: usize, col: usize) -> &mut T {
        self.entry_mut(row, col)
    }

    fn vmult(&self, x: &[T]) -> Result<Vec<T>> {
        validate_vector_len(self.ncols, x.len())?;
        let mut y = vec![T::zero(); self.rows.len()];
        for (yi, row) in y.iter_mut().zip(&self.rows) {
            for (j, &v) in row.iter() {
                *yi += v * x[j];
            }
        }
        Ok(y)
    }

    fn for_each_entry<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, T),
    {
        for (i, row) in self.rows.iter().enumerate() {
            if M::ORDERED {
                for (j, &v) in row.iter() {
                    f(i, j, v);
                }
            } else {
                for (j, v) in row.sorted_entries() {
                    f(i, j, v);
                }
            }
        }
    }
}

impl<T: MatrixElement, M: RowMap<T>> MatrixOperations for MapMatrix<T, M> {
    fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        self.rows
            .get(row)
            .map(|r| r.sorted_entries())
            .unwrap_or_default()
    }

    fn row_nnz(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.len())
    }
}

impl<T: MatrixElement, M: RowMap<T>> AddAssign<&MapMatrix<T, M>> for MapMatrix<T, M> {
    /// Entry-wise sum; entries present only in `other` are allocated here
    fn add_assign(&mut self, other: &MapMatrix<T, M>) {
        self.resize_rows(other.nrows());
        for (i, row) in other.rows.iter().enumerate() {
            for (j, &v) in row.iter() {
                *self.entry_mut(i, j) += v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn test_write_grows_dimensions() {
        let mut m = OrderedMapMatrix::<f64>::new();
        m.set(3, 1, 2.0);
        assert_eq!(m.dimensions(), (4, 2));
        assert_eq!(m.nnz(), 1);
        // Rows 0..3 exist but are empty
        assert_eq!(m.row(0).map(|r| r.len()), Some(0));
        assert_eq!(m.get(3, 1), Ok(&2.0));
    }

    #[test]
    fn test_rewrite_does_not_double_count() {
        let mut m = OrderedMapMatrix::<i64>::new();
        m.set(0, 0, 1);
        m.set(0, 0, 5);
        *m.entry(0, 0) += 1;
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 0), Ok(&6));
    }

    #[test]
    fn test_zero_is_counted() {
        let mut m = OrderedMapMatrix::<f64>::new();
        m.set(1, 1, 0.0);
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(1, 1), Ok(&0.0));
    }

    #[test]
    fn test_missing_read_fails() {
        let mut m = OrderedMapMatrix::<f64>::new();
        m.set(0, 0, 1.0);
        assert_eq!(
            m.get(0, 1),
            Err(SpmatError::OutOfBoundsOrMissing { row: 0, col: 1 })
        );
        assert_eq!(
            m.get(9, 9),
            Err(SpmatError::OutOfBoundsOrMissing { row: 9, col: 9 })
        );
    }

    #[test]
    fn test_vmult_dimension_mismatch() {
        let mut m = OrderedMapMatrix::<f64>::new();
        m.set(0, 2, 1.0);
        assert_eq!(
            m.vmult(&[1.0, 2.0]),
            Err(SpmatError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(m.vmult(&[1.0, 2.0, 3.0]), Ok(vec![3.0]));
    }

    #[test]
    fn test_with_rows_and_finalize() {
        let mut m = OrderedMapMatrix::<f64>::with_rows(4);
        assert_eq!(m.dimensions(), (4, 0));
        m.set(1, 2, 1.0);
        m.set(2, 0, 1.0);
        assert_eq!(m.finalize(), (2, 3));
        assert_eq!(m.nrows(), 4);
        assert!(m.check_bookkeeping().is_ok());
        // The trailing empty row contributes nothing
        assert_eq!(m.vmult(&[1.0, 1.0, 1.0]), Ok(vec![0.0, 1.0, 1.0, 0.0]));
    }

    #[test]
    fn test_add_assign_allocates_union() {
        let mut a = OrderedMapMatrix::<i32>::new();
        a.set(0, 0, 1);
        a.set(1, 1, 2);
        let mut b = OrderedMapMatrix::<i32>::new();
        b.set(1, 1, 3);
        b.set(2, 0, 4);

        a += &b;
        assert_eq!(a.nnz(), 3);
        assert_eq!(a.dimensions(), (3, 2));
        assert_eq!(a.get(1, 1), Ok(&5));
        assert_eq!(a.get(2, 0), Ok(&4));
        assert!(a.check_bookkeeping().is_ok());
    }

    #[cfg(feature = "hashbrown")]
    #[test]
    fn test_unordered_print_is_sorted() {
        let mut m = UnorderedMapMatrix::<i32>::new();
        for j in [7usize, 3, 5, 0] {
            m.set(0, j, j as i32);
        }
        let mut out = String::new();
        m.print(&mut out).unwrap();
        assert_eq!(out, "nrows: 1 | ncols: 8 | nnz: 4\n0,0,0\n0,3,3\n0,5,5\n0,7,7\n");
        assert_eq!(m.row_entries(0)[1], (3, 3));
    }
}
