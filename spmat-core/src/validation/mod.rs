//! Validation utilities for dense operands and compressed arrays
//!
//! Pure functions with no allocation; every check reports through
//! [`crate::SpmatError`].

pub mod bounds;
pub mod csr;

pub use bounds::{validate_index_fits, validate_vector_len};
pub use csr::{
    validate_column_bounds, validate_column_indices, validate_csr_parts, validate_row_offsets,
};
