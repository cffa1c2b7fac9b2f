//! Storage-agnostic matrix façade
//!
//! [`Matrix`] owns exactly one store, picked at construction time by a
//! [`StorageKind`]. Dispatch is a `match` over the variants, so every
//! operation runs the monomorphized store code.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::convert::{to_coordinate, ToCsr};
use crate::format::CsrMatrix;
use crate::store::{OrderedMapMatrix, SortedCooMatrix, UnsortedCooMatrix};
#[cfg(feature = "hashbrown")]
use crate::store::UnorderedMapMatrix;
use crate::traits::{MatrixElement, MatrixOperations, SparseMatrix};
use crate::Result;

/// Available store variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StorageKind {
    /// Per-row `BTreeMap`
    OrderedMap,
    /// Per-row `hashbrown::HashMap`
    #[cfg(feature = "hashbrown")]
    UnorderedMap,
    /// Triples kept in (row, column) order
    SortedCoo,
    /// Triples in insertion order
    UnsortedCoo,
}

impl StorageKind {
    /// Every variant compiled into this build
    pub const ALL: &'static [StorageKind] = &[
        StorageKind::OrderedMap,
        #[cfg(feature = "hashbrown")]
        StorageKind::UnorderedMap,
        StorageKind::SortedCoo,
        StorageKind::UnsortedCoo,
    ];

    /// Stable name used for parsing and display
    pub const fn name(self) -> &'static str {
        match self {
            StorageKind::OrderedMap => "ordered-map",
            #[cfg(feature = "hashbrown")]
            StorageKind::UnorderedMap => "unordered-map",
            StorageKind::SortedCoo => "sorted-coo",
            StorageKind::UnsortedCoo => "unsorted-coo",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a storage name is not recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStorageKind;

impl fmt::Display for UnknownStorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown storage kind, expected one of: ")?;
        for (k, kind) in StorageKind::ALL.iter().enumerate() {
            if k > 0 {
                f.write_str(", ")?;
            }
            f.write_str(kind.name())?;
        }
        Ok(())
    }
}

impl core::error::Error for UnknownStorageKind {}

impl FromStr for StorageKind {
    type Err = UnknownStorageKind;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        StorageKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or(UnknownStorageKind)
    }
}

/// Sparse matrix over one of the [`StorageKind`] stores
#[derive(Debug, Clone, PartialEq)]
pub enum Matrix<T> {
    /// Row-map store with ordered rows
    OrderedMap(OrderedMapMatrix<T>),
    /// Row-map store with hashed rows
    #[cfg(feature = "hashbrown")]
    UnorderedMap(UnorderedMapMatrix<T>),
    /// Sorted coordinate store
    SortedCoo(SortedCooMatrix<T>),
    /// Unsorted coordinate store
    UnsortedCoo(UnsortedCooMatrix<T>),
}

macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            Matrix::OrderedMap($m) => $body,
            #[cfg(feature = "hashbrown")]
            Matrix::UnorderedMap($m) => $body,
            Matrix::SortedCoo($m) => $body,
            Matrix::UnsortedCoo($m) => $body,
        }
    };
}

impl<T: MatrixElement> Matrix<T> {
    /// Create an empty matrix backed by `kind`
    pub fn new(kind: StorageKind) -> Self {
        match kind {
            StorageKind::OrderedMap => Matrix::OrderedMap(OrderedMapMatrix::new()),
            #[cfg(feature = "hashbrown")]
            StorageKind::UnorderedMap => Matrix::UnorderedMap(UnorderedMapMatrix::new()),
            StorageKind::SortedCoo => Matrix::SortedCoo(SortedCooMatrix::new()),
            StorageKind::UnsortedCoo => Matrix::UnsortedCoo(UnsortedCooMatrix::new()),
        }
    }

    /// Which store backs this matrix
    pub const fn kind(&self) -> StorageKind {
        match self {
            Matrix::OrderedMap(_) => StorageKind::OrderedMap,
            #[cfg(feature = "hashbrown")]
            Matrix::UnorderedMap(_) => StorageKind::UnorderedMap,
            Matrix::SortedCoo(_) => StorageKind::SortedCoo,
            Matrix::UnsortedCoo(_) => StorageKind::UnsortedCoo,
        }
    }

    /// Sorted coordinate copy of the stored entries, with a row index
    pub fn to_coordinate(&self) -> SortedCooMatrix<T> {
        dispatch!(self, m => to_coordinate(m))
    }
}

impl<T: MatrixElement> SparseMatrix for Matrix<T> {
    type Element = T;

    fn nrows(&self) -> usize {
        dispatch!(self, m => m.nrows())
    }

    fn ncols(&self) -> usize {
        dispatch!(self, m => m.ncols())
    }

    fn nnz(&self) -> usize {
        dispatch!(self, m => m.nnz())
    }

    fn get(&self, row: usize, col: usize) -> Result<&T> {
        dispatch!(self, m => m.get(row, col))
    }

    fn entry(&mut self, row: usize, col: usize) -> &mut T {
        dispatch!(self, m => m.entry(row, col))
    }

    fn vmult(&self, x: &[T]) -> Result<Vec<T>> {
        dispatch!(self, m => m.vmult(x))
    }

    fn for_each_entry<F>(&self, f: F)
    where
        F: FnMut(usize, usize, T),
    {
        dispatch!(self, m => m.for_each_entry(f))
    }
}

impl<T: MatrixElement> MatrixOperations for Matrix<T> {
    fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        dispatch!(self, m => m.row_entries(row))
    }
}

impl<T: MatrixElement> ToCsr for Matrix<T> {
    type Element = T;

    fn to_csr(&self) -> Result<CsrMatrix<T>> {
        dispatch!(self, m => m.to_csr())
    }
}

impl<T: MatrixElement> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}
