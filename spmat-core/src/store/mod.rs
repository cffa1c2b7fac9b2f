//! Element stores
//!
//! Two storage families behind the same [`crate::SparseMatrix`] contract:
//! map-backed rows and coordinate triples.

pub mod coo;
pub mod map;

pub use coo::{CooMatrix, RowSpan, SortedCooMatrix, Triplet, UnsortedCooMatrix};
#[cfg(feature = "hashbrown")]
pub use map::UnorderedMapMatrix;
pub use map::{MapMatrix, OrderedMapMatrix};
