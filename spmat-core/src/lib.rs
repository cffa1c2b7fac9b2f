#![no_std]

//! spmat-core - Sparse Matrix Stores and Conversions
//!
//! This crate provides the storage-agnostic access contract for sparse
//! matrices, the map-backed and coordinate-backed stores implementing it,
//! and lossless conversion into CSR and AIJ arrays.
//!
//! Everything here is single-threaded, synchronous and allocation-only:
//! no I/O, no logging, no process termination. Errors surface to the
//! immediate caller as [`SpmatError`].

extern crate alloc;

pub mod convert;
pub mod error;
pub mod facade;
pub mod format;
pub mod store;
pub mod traits;
pub mod validation;

pub use convert::{to_aij, to_coordinate, to_csr, ToCsr};
pub use error::*;
pub use facade::{Matrix, StorageKind, UnknownStorageKind};
pub use format::{AijMatrix, CsrMatrix};
pub use store::*;
pub use traits::*;
