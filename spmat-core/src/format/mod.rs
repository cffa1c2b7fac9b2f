//! Compressed export formats
//!
//! Derived, independently owned snapshots of a matrix's stored entries.
//! Neither format keeps a reference to the store it was built from.

pub mod aij;
pub mod csr;

pub use aij::AijMatrix;
pub use csr::CsrMatrix;
