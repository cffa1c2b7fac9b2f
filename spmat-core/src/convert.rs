//! Conversion between stores and compressed formats
//!
//! CSR export counts entries per row, prefix-sums the counts into row
//! offsets and then fills columns and values row by row with columns
//! ascending. Inputs without a natural column order are sorted per row
//! during the fill.

use alloc::vec;
use alloc::vec::Vec;

use crate::format::{AijMatrix, CsrMatrix};
use crate::store::{CooMatrix, MapMatrix, RowSpan, SortedCooMatrix, Triplet};
use crate::traits::{CooOrdering, MatrixElement, MatrixOperations, RowMap, SparseMatrix};
use crate::{Result, SpmatError};

/// Stores that can export a CSR snapshot
pub trait ToCsr {
    /// Element type of the exported arrays
    type Element;

    /// Build the CSR arrays
    fn to_csr(&self) -> Result<CsrMatrix<Self::Element>>;

    /// Build the AIJ triplet arrays
    fn to_aij(&self) -> Result<AijMatrix<Self::Element>> {
        self.to_csr().map(AijMatrix::from)
    }
}

/// Export any store to CSR
pub fn to_csr<S: ToCsr>(store: &S) -> Result<CsrMatrix<S::Element>> {
    store.to_csr()
}

/// Export any store to AIJ
pub fn to_aij<S: ToCsr>(store: &S) -> Result<AijMatrix<S::Element>> {
    store.to_aij()
}

/// Flatten a row-addressable store into a sorted coordinate store
///
/// Rows are visited in order through the public row contract, so the
/// result is sorted by construction. The returned store carries a per-row
/// [`RowSpan`] index covering every source row.
pub fn to_coordinate<S>(store: &S) -> SortedCooMatrix<S::Element>
where
    S: MatrixOperations,
{
    let nrows = store.nrows();
    let mut entries = Vec::with_capacity(store.nnz());
    let mut index = Vec::with_capacity(nrows);
    for i in 0..nrows {
        let start = entries.len();
        entries.extend(
            store
                .row_entries(i)
                .into_iter()
                .map(|(col, value)| Triplet { row: i, col, value }),
        );
        index.push(RowSpan {
            start,
            len: entries.len() - start,
        });
    }
    CooMatrix::from_sorted_parts(nrows, store.ncols(), entries, Some(index))
}

impl<T: MatrixElement, M: RowMap<T>> ToCsr for MapMatrix<T, M> {
    type Element = T;

    fn to_csr(&self) -> Result<CsrMatrix<T>> {
        let nrows = self.nrows();
        let mut row_offsets = Vec::with_capacity(nrows + 1);
        row_offsets.push(0);
        let mut nnz = 0;
        for row in self.rows() {
            nnz += row.len();
            row_offsets.push(nnz);
        }
        if nnz != self.nnz() {
            return Err(SpmatError::InvariantViolation(
                "map store nnz differs from stored rows",
            ));
        }

        let mut column_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for row in self.rows() {
            if M::ORDERED {
                for (j, &v) in row.iter() {
                    column_indices.push(j);
                    values.push(v);
                }
            } else {
                for (j, v) in row.sorted_entries() {
                    column_indices.push(j);
                    values.push(v);
                }
            }
        }

        Ok(CsrMatrix::from_parts_unchecked(
            nrows,
            self.ncols(),
            row_offsets,
            column_indices,
            values,
        ))
    }
}

impl<T: MatrixElement, P: CooOrdering> ToCsr for CooMatrix<T, P> {
    type Element = T;

    fn to_csr(&self) -> Result<CsrMatrix<T>> {
        if P::SORTED && !self.is_sorted() {
            return Err(SpmatError::InvariantViolation(
                "sorted coordinate store is out of order",
            ));
        }
        let nrows = self.nrows();
        let entries = self.entries();
        let nnz = entries.len();

        // Count per row
        let mut row_offsets = vec![0usize; nrows + 1];
        for e in entries {
            row_offsets[e.row + 1] += 1;
        }
        for i in 0..nrows {
            row_offsets[i + 1] += row_offsets[i];
        }

        // Scatter into row slots, keeping storage order within a row
        let mut next = row_offsets[..nrows].to_vec();
        let mut column_indices = vec![0usize; nnz];
        let mut values = vec![T::zero(); nnz];
        for e in entries {
            let dst = next[e.row];
            next[e.row] += 1;
            column_indices[dst] = e.col;
            values[dst] = e.value;
        }

        if !P::SORTED {
            let mut pairs: Vec<(usize, T)> = Vec::new();
            for w in row_offsets.windows(2) {
                let (start, end) = (w[0], w[1]);
                if end - start < 2 {
                    continue;
                }
                pairs.clear();
                pairs.extend((start..end).map(|k| (column_indices[k], values[k])));
                pairs.sort_unstable_by_key(|&(j, _)| j);
                for (k, (j, v)) in (start..end).zip(pairs.iter().copied()) {
                    column_indices[k] = j;
                    values[k] = v;
                }
            }
        }

        Ok(CsrMatrix::from_parts_unchecked(
            nrows,
            self.ncols(),
            row_offsets,
            column_indices,
            values,
        ))
    }
}

impl<T> From<CsrMatrix<T>> for SortedCooMatrix<T> {
    /// Expand CSR into a sorted coordinate store with a row index
    fn from(csr: CsrMatrix<T>) -> Self {
        let (nrows, ncols) = csr.shape();
        let (row_offsets, column_indices, values) = csr.into_parts();
        let mut entries = Vec::with_capacity(values.len());
        let mut index = Vec::with_capacity(nrows);
        let mut cols = column_indices.into_iter();
        let mut vals = values.into_iter();
        for (i, w) in row_offsets.windows(2).enumerate() {
            let len = w[1] - w[0];
            index.push(RowSpan { start: w[0], len });
            for (col, value) in cols.by_ref().zip(vals.by_ref()).take(len) {
                entries.push(Triplet { row: i, col, value });
            }
        }
        CooMatrix::from_sorted_parts(nrows, ncols, entries, Some(index))
    }
}
