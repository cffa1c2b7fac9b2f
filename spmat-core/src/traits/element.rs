//! Matrix element type constraints
//!
//! This module defines the trait that constrains what types can be
//! stored as entries of a sparse matrix.

use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Mul};

/// Trait for types that can be stored as matrix elements
///
/// All matrix element types must be:
/// - Copy: entries are handed out by value during conversion
/// - PartialEq: stored values can be compared in checks
/// - Display: entries appear in the textual dump
/// - closed under `+` and `*` so that `vmult` can accumulate row sums
pub trait MatrixElement:
    Copy + PartialEq + Debug + Display + Add<Output = Self> + AddAssign + Mul<Output = Self>
{
    /// Additive identity; value of a freshly created entry
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Convert from f64 for generic construction
    ///
    /// Used by fixtures and tests that build matrices without knowing the
    /// exact element type.
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for generic comparisons
    fn to_f64(self) -> f64;
}

macro_rules! impl_matrix_element {
    ($($ty:ty => $zero:expr, $one:expr);* $(;)?) => {
        $(
            impl MatrixElement for $ty {
                #[inline]
                fn zero() -> Self {
                    $zero
                }

                #[inline]
                fn one() -> Self {
                    $one
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_matrix_element! {
    f32 => 0.0, 1.0;
    f64 => 0.0, 1.0;
    i32 => 0, 1;
    i64 => 0, 1;
    u32 => 0, 1;
    u64 => 0, 1;
}
