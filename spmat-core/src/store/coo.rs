//! Coordinate store: a flat list of (row, column, value) triples

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::traits::{CooOrdering, MatrixElement, MatrixOperations, Sorted, SparseMatrix, Unsorted};
use crate::validation::validate_vector_len;
use crate::{Result, SpmatError};

/// Coordinate store kept in (row, column) order
pub type SortedCooMatrix<T> = CooMatrix<T, Sorted>;

/// Coordinate store kept in insertion order
pub type UnsortedCooMatrix<T> = CooMatrix<T, Unsorted>;

/// One stored entry of a coordinate store
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triplet<T> {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
    /// Stored value
    pub value: T,
}

impl<T> Triplet<T> {
    /// Lexicographic sort key
    #[inline]
    pub const fn key(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Location of one row inside a coordinate store built from row data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSpan {
    /// Offset of the row's first triple
    pub start: usize,
    /// Number of triples in the row
    pub len: usize,
}

/// Sparse matrix stored as a single sequence of triples
///
/// The ordering policy `P` decides the lookup algorithm: [`Sorted`] keeps the
/// triples strictly ascending by (row, column) and binary searches,
/// [`Unsorted`] appends and scans.
///
/// A store produced from row data (see [`crate::convert::to_coordinate`])
/// carries a per-row [`RowSpan`] index so lookups jump straight to the row.
/// Inserting any new entry shifts offsets, so it discards the index; updating
/// existing entries keeps it.
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix<T, P> {
    entries: Vec<Triplet<T>>,
    nrows: usize,
    ncols: usize,
    row_index: Option<Vec<RowSpan>>,
    _ordering: PhantomData<P>,
}

impl<T, P: CooOrdering> Default for CooMatrix<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: CooOrdering> CooMatrix<T, P> {
    /// Create an empty matrix
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            nrows: 0,
            ncols: 0,
            row_index: None,
            _ordering: PhantomData,
        }
    }

    /// Stored triples in storage order
    pub fn entries(&self) -> &[Triplet<T>] {
        &self.entries
    }

    /// Per-row offset index, if still valid
    pub fn row_index(&self) -> Option<&[RowSpan]> {
        self.row_index.as_deref()
    }

    /// Whether stored triples are strictly ascending by (row, column)
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].key() < w[1].key())
    }

    /// Verify ordering, bookkeeping and row index consistency
    ///
    /// A failure means a store or converter bug, never bad caller input.
    pub fn check_invariants(&self) -> Result<()> {
        if P::SORTED && !self.is_sorted() {
            return Err(SpmatError::InvariantViolation(
                "sorted coordinate store is out of order",
            ));
        }
        if !P::SORTED {
            let mut keys: Vec<(usize, usize)> = self.entries.iter().map(|e| e.key()).collect();
            keys.sort_unstable();
            if keys.windows(2).any(|w| w[0] == w[1]) {
                return Err(SpmatError::InvariantViolation(
                    "coordinate store holds a duplicate entry",
                ));
            }
        }
        if self
            .entries
            .iter()
            .any(|e| e.row >= self.nrows || e.col >= self.ncols)
        {
            return Err(SpmatError::InvariantViolation(
                "stored triple lies outside the tracked dimensions",
            ));
        }
        if let Some(index) = &self.row_index {
            for (i, span) in index.iter().enumerate() {
                let window = self.entries.get(span.start..span.start + span.len);
                if !window.is_some_and(|w| w.iter().all(|e| e.row == i)) {
                    return Err(SpmatError::InvariantViolation(
                        "row index does not match stored triples",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Assemble a sorted store from parts produced by a converter
    pub(crate) fn from_sorted_parts(
        nrows: usize,
        ncols: usize,
        entries: Vec<Triplet<T>>,
        row_index: Option<Vec<RowSpan>>,
    ) -> Self {
        Self {
            entries,
            nrows,
            ncols,
            row_index,
            _ordering: PhantomData,
        }
    }

    /// Locate `(i, j)`: `Ok(position)` if stored, otherwise `Err(insert_at)`
    fn find(&self, i: usize, j: usize) -> core::result::Result<usize, usize> {
        if let Some(span) = self.row_index.as_ref().and_then(|index| index.get(i)) {
            let window = &self.entries[span.start..span.start + span.len];
            let hit = if P::SORTED {
                window.binary_search_by_key(&j, |e| e.col).ok()
            } else {
                window.iter().position(|e| e.col == j)
            };
            if let Some(k) = hit {
                return Ok(span.start + k);
            }
        }

        if P::SORTED {
            let pos = self.entries.partition_point(|e| e.key() < (i, j));
            match self.entries.get(pos) {
                Some(e) if e.key() == (i, j) => Ok(pos),
                _ => Err(pos),
            }
        } else {
            self.entries
                .iter()
                .position(|e| e.key() == (i, j))
                .ok_or(self.entries.len())
        }
    }

    /// Positions of all triples in (row, column) order
    fn sorted_positions(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        if !P::SORTED {
            order.sort_unstable_by_key(|&k| self.entries[k].key());
        }
        order
    }
}

impl<T: MatrixElement> CooMatrix<T, Unsorted> {
    /// Reorder into a sorted store
    pub fn into_sorted(mut self) -> SortedCooMatrix<T> {
        self.entries.sort_unstable_by_key(Triplet::key);
        CooMatrix::from_sorted_parts(self.nrows, self.ncols, self.entries, None)
    }
}

impl<T: MatrixElement, P: CooOrdering> SparseMatrix for CooMatrix<T, P> {
    type Element = T;

    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn nnz(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, row: usize, col: usize) -> Result<&T> {
        self.find(row, col)
            .map(|pos| &self.entries[pos].value)
            .map_err(|_| SpmatError::OutOfBoundsOrMissing { row, col })
    }

    fn entry(&mut self, row: usize, col: usize) -> &mut T {
        let pos = match self.find(row, col) {
            Ok(pos) => pos,
            Err(pos) => {
                let triplet = Triplet {
                    row,
                    col,
                    value: T::zero(),
                };
                if P::SORTED {
                    self.entries.insert(pos, triplet);
                } else {
                    self.entries.push(triplet);
                }
                self.row_index = None;
                self.nrows = self.nrows.max(row + 1);
                self.ncols = self.ncols.max(col + 1);
                pos
            }
        };
        &mut self.entries[pos].value
    }

    fn vmult(&self, x: &[T]) -> Result<Vec<T>> {
        validate_vector_len(self.ncols, x.len())?;
        let mut y = vec![T::zero(); self.nrows];
        for e in &self.entries {
            y[e.row] += e.value * x[e.col];
        }
        Ok(y)
    }

    fn for_each_entry<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, T),
    {
        if P::SORTED {
            for e in &self.entries {
                f(e.row, e.col, e.value);
            }
        } else {
            for k in self.sorted_positions() {
                let e = &self.entries[k];
                f(e.row, e.col, e.value);
            }
        }
    }
}

impl<T: MatrixElement, P: CooOrdering> MatrixOperations for CooMatrix<T, P> {
    fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        if let Some(span) = self.row_index.as_ref().and_then(|index| index.get(row)) {
            return self.entries[span.start..span.start + span.len]
                .iter()
                .map(|e| (e.col, e.value))
                .collect();
        }
        if P::SORTED {
            let start = self.entries.partition_point(|e| e.row < row);
            let end = self.entries.partition_point(|e| e.row <= row);
            self.entries[start..end]
                .iter()
                .map(|e| (e.col, e.value))
                .collect()
        } else {
            let mut found: Vec<(usize, T)> = self
                .entries
                .iter()
                .filter(|e| e.row == row)
                .map(|e| (e.col, e.value))
                .collect();
            found.sort_unstable_by_key(|&(j, _)| j);
            found
        }
    }
}

impl<T: MatrixElement, P: CooOrdering> Extend<(usize, usize, T)> for CooMatrix<T, P> {
    fn extend<I: IntoIterator<Item = (usize, usize, T)>>(&mut self, iter: I) {
        for (i, j, v) in iter {
            self.set(i, j, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn test_sorted_insert_keeps_order() {
        let mut m = SortedCooMatrix::<f64>::new();
        m.extend([(2, 1, 1.0), (0, 3, 2.0), (2, 0, 3.0), (0, 1, 4.0), (1, 1, 5.0)]);
        let keys: Vec<(usize, usize)> = m.entries().iter().map(Triplet::key).collect();
        assert_eq!(keys, vec![(0, 1), (0, 3), (1, 1), (2, 0), (2, 1)]);
        assert!(m.check_invariants().is_ok());
        assert_eq!(m.dimensions(), (3, 4));
    }

    #[test]
    fn test_unsorted_appends() {
        let mut m = UnsortedCooMatrix::<i32>::new();
        m.extend([(1, 1, 1), (0, 0, 2), (1, 1, 7)]);
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.entries()[0].key(), (1, 1));
        assert_eq!(m.get(1, 1), Ok(&7));
        assert!(!m.is_sorted());
        assert!(m.check_invariants().is_ok());
    }

    #[test]
    fn test_unsorted_duplicate_is_violation() {
        let mut m = UnsortedCooMatrix::<i32>::new();
        m.extend([(1, 1, 1), (0, 0, 2), (0, 1, 3)]);
        assert!(m.check_invariants().is_ok());
        m.entries.push(Triplet {
            row: 1,
            col: 1,
            value: 9,
        });
        assert_eq!(
            m.check_invariants(),
            Err(SpmatError::InvariantViolation(
                "coordinate store holds a duplicate entry"
            ))
        );
    }

    #[test]
    fn test_missing_read_fails_for_both_policies() {
        let mut sorted = SortedCooMatrix::<f64>::new();
        sorted.set(1, 1, 1.0);
        let mut unsorted = UnsortedCooMatrix::<f64>::new();
        unsorted.set(1, 1, 1.0);
        let expected = Err(SpmatError::OutOfBoundsOrMissing { row: 0, col: 1 });
        assert_eq!(sorted.get(0, 1), expected);
        assert_eq!(unsorted.get(0, 1), expected);
        // A lower bound past the end is also a miss
        assert!(sorted.get(5, 5).is_err());
    }

    #[test]
    fn test_vmult_result_has_nrows() {
        let mut m = SortedCooMatrix::<f64>::new();
        m.set(0, 2, 2.0);
        m.set(3, 0, 1.0);
        assert_eq!(m.vmult(&[1.0, 0.0, 1.0]), Ok(vec![2.0, 0.0, 0.0, 1.0]));
        assert!(m.vmult(&[1.0; 4]).is_err());
    }

    #[test]
    fn test_unsorted_print_is_ordered() {
        let mut m = UnsortedCooMatrix::<i32>::new();
        m.extend([(1, 0, 3), (0, 1, 2), (0, 0, 1)]);
        let mut out = String::new();
        m.print(&mut out).unwrap();
        assert_eq!(out, "nrows: 2 | ncols: 2 | nnz: 3\n0,0,1\n0,1,2\n1,0,3\n");
    }

    #[test]
    fn test_row_entries_and_into_sorted() {
        let mut m = UnsortedCooMatrix::<i32>::new();
        m.extend([(1, 4, 1), (0, 0, 2), (1, 2, 3)]);
        assert_eq!(m.row_entries(1), vec![(2, 3), (4, 1)]);
        assert_eq!(m.row_nnz(2), 0);

        let sorted = m.into_sorted();
        assert!(sorted.is_sorted());
        assert_eq!(sorted.row_entries(1), vec![(2, 3), (4, 1)]);
        assert_eq!(sorted.get(1, 4), Ok(&1));
    }
}
