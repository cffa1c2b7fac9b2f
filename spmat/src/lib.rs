//! spmat - Sparse Matrix Engine with Parallel Multiply and CSR Export
//!
//! This library builds on `spmat-core` with everything that needs `std`:
//! row-parallel multiplies on rayon, CSR handoff as JSON or raw bytes,
//! the canonical tridiagonal fixture and a store comparison harness.
//!
//! ## Architecture
//!
//! - **spmat-core**: stores, access contract, conversions and validation (no_std, no I/O)
//! - **spmat**: parallel execution, export, fixtures and timing on top of it
//!
//! ## Quick Start
//!
//! ```rust
//! use spmat::{Matrix, SparseMatrix, StorageKind, ToCsr};
//!
//! fn example() -> Result<(), spmat::SpmatError> {
//!     let mut a = Matrix::<f64>::new(StorageKind::SortedCoo);
//!     a.set(0, 0, 1.0);
//!     a.set(1, 1, 1.0);
//!
//!     assert_eq!(a.vmult(&[2.0, 3.0])?, vec![2.0, 3.0]);
//!     let csr = a.to_csr()?;
//!     assert_eq!(csr.row_offsets, vec![0, 1, 2]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

// Re-export core abstractions and stores
pub use spmat_core::{
    // Core traits
    CooOrdering, MatrixElement, MatrixOperations, RowMap, SparseMatrix, ToCsr,
    // Stores and façade
    CooMatrix, MapMatrix, Matrix, OrderedMapMatrix, SortedCooMatrix, StorageKind,
    Triplet, UnorderedMapMatrix, UnsortedCooMatrix,
    // Export formats and conversions
    AijMatrix, CsrMatrix, to_aij, to_coordinate, to_csr,
    // Error handling
    SpmatError,
};

pub mod bench;
pub mod config;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod parallel;

pub use bench::{run_all, run_store, StoreReport};
pub use config::{BenchConfig, ParallelConfig};
pub use error::{LabError, Result};
pub use parallel::{par_vmult, par_vmult_csr, par_vmult_rows};
