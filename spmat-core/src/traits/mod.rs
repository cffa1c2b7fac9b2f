//! Abstract interfaces for sparse matrix stores
//!
//! The element constraint, the access contract and the storage policies
//! every store is generic over.

pub mod element;
pub mod matrix;
pub mod storage;

pub use element::MatrixElement;
pub use matrix::{MatrixOperations, SparseMatrix};
pub use storage::{CooOrdering, RowMap, Sorted, Unsorted};
