//! Core matrix abstraction traits
//!
//! This module defines the access contract shared by every sparse matrix
//! store. Stores decide how entries are laid out; the contract fixes how
//! they are counted, read, written and multiplied.

use alloc::vec::Vec;
use core::fmt;

use super::element::MatrixElement;
use crate::error::Result;

/// Uniform access contract for sparse matrices
///
/// Dimensions grow with writes: `nrows()` and `ncols()` are one past the
/// largest row and column index ever written, unless a store was pre-sized.
/// `nnz()` counts stored entries regardless of their value, so writing an
/// explicit zero still counts.
///
/// Reads and multiplies perform no bounds checks beyond what each store's
/// lookup naturally enforces. Callers are trusted to stay within the declared
/// shape on hot paths.
pub trait SparseMatrix {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Number of rows
    fn nrows(&self) -> usize;

    /// Number of columns
    fn ncols(&self) -> usize;

    /// Number of stored entries
    fn nnz(&self) -> usize;

    /// Matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Stored value at `(row, col)`
    ///
    /// Fails with [`crate::SpmatError::OutOfBoundsOrMissing`] when nothing is
    /// stored there; no default is synthesized.
    fn get(&self, row: usize, col: usize) -> Result<&Self::Element>;

    /// Mutable handle to the value at `(row, col)`
    ///
    /// Creates the entry, initialized to [`MatrixElement::zero`], if it does
    /// not exist yet and updates the bookkeeping.
    fn entry(&mut self, row: usize, col: usize) -> &mut Self::Element;

    /// Store `value` at `(row, col)`
    fn set(&mut self, row: usize, col: usize, value: Self::Element) {
        *self.entry(row, col) = value;
    }

    /// Dense product `y = A x`
    ///
    /// `x` must have exactly `ncols()` entries; the result has `nrows()`.
    fn vmult(&self, x: &[Self::Element]) -> Result<Vec<Self::Element>>;

    /// Visit every stored entry, rows ascending then columns ascending
    fn for_each_entry<F>(&self, f: F)
    where
        F: FnMut(usize, usize, Self::Element);

    /// Write a deterministic dump of the stored entries
    ///
    /// A header line with the dimensions is followed by one `row,col,value`
    /// line per entry, in row-then-column order.
    fn print<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(
            out,
            "nrows: {} | ncols: {} | nnz: {}",
            self.nrows(),
            self.ncols(),
            self.nnz()
        )?;
        let mut status = Ok(());
        self.for_each_entry(|i, j, v| {
            if status.is_ok() {
                status = writeln!(out, "{i},{j},{v}");
            }
        });
        status
    }
}

/// Extension trait for row-level access
pub trait MatrixOperations: SparseMatrix {
    /// All stored `(column, value)` pairs of a row, columns ascending
    ///
    /// Rows that were never written yield an empty vector.
    fn row_entries(&self, row: usize) -> Vec<(usize, Self::Element)>;

    /// Number of stored entries in a row
    fn row_nnz(&self, row: usize) -> usize {
        self.row_entries(row).len()
    }
}
