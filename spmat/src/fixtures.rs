//! Canonical test fixtures
//!
//! The tridiagonal matrix with `-2` on the diagonal and `1` on both
//! off-diagonals, multiplied by `[0, 1, ..., n-1]`, gives `1` in the first
//! entry, `-n` in the last and zero elsewhere.

use spmat_core::{MatrixElement, SparseMatrix};

use crate::error::{LabError, Result};

/// Fill `m` with the `n x n` tridiagonal fixture
///
/// Rows are written out of order and every entry is written twice, so the
/// fill also exercises growth from the last row and repeated writes.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn fill_tridiagonal<M: SparseMatrix>(m: &mut M, n: usize) {
    assert!(n >= 2, "tridiagonal fixture needs at least 2 rows");
    let one = M::Element::one();
    let minus_two = M::Element::from_f64(-2.0);

    m.set(n - 1, n - 2, one);
    m.set(n - 1, n - 1, minus_two);
    for i in (1..n - 1).rev() {
        m.set(i, i - 1, one);
        m.set(i, i, minus_two);
        m.set(i, i + 1, one);
    }
    m.set(0, 0, minus_two);
    m.set(0, 1, one);

    // Second pass in natural order must not add entries
    m.set(0, 0, minus_two);
    m.set(0, 1, one);
    for i in 1..n - 1 {
        m.set(i, i - 1, one);
        m.set(i, i, minus_two);
        m.set(i, i + 1, one);
    }
    m.set(n - 1, n - 2, one);
    m.set(n - 1, n - 1, minus_two);
}

/// Verify that `m` holds exactly the `n x n` tridiagonal fixture
pub fn check_tridiagonal<M: SparseMatrix>(m: &M, n: usize) -> Result<()> {
    if m.dimensions() != (n, n) || m.nnz() != tridiagonal_nnz(n) {
        return Err(LabError::Check(format!(
            "expected {n}x{n} with nnz {}, found {}x{} with nnz {}",
            tridiagonal_nnz(n),
            m.nrows(),
            m.ncols(),
            m.nnz()
        )));
    }
    let one = M::Element::one();
    let minus_two = M::Element::from_f64(-2.0);
    for i in 0..n {
        let mut expected = vec![(i, minus_two)];
        if i > 0 {
            expected.push((i - 1, one));
        }
        if i + 1 < n {
            expected.push((i + 1, one));
        }
        for (j, v) in expected {
            if *m.get(i, j)? != v {
                return Err(LabError::Check(format!("wrong value stored at ({i}, {j})")));
            }
        }
    }
    Ok(())
}

/// Number of stored entries of the `n x n` tridiagonal fixture
pub const fn tridiagonal_nnz(n: usize) -> usize {
    3 * n - 2
}

/// The vector `[0, 1, ..., n-1]`
pub fn iota<T: MatrixElement>(n: usize) -> Vec<T> {
    (0..n).map(|k| T::from_f64(k as f64)).collect()
}

/// Expected product of the tridiagonal fixture with [`iota`]
pub fn tridiagonal_iota_product<T: MatrixElement>(n: usize) -> Vec<T> {
    let mut y = vec![T::zero(); n];
    y[0] = T::one();
    y[n - 1] = T::from_f64(-(n as f64));
    y
}

/// Largest absolute componentwise difference between two vectors
///
/// Vectors of different length compare as infinitely far apart.
pub fn max_abs_diff<T: MatrixElement>(a: &[T], b: &[T]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x.to_f64() - y.to_f64()).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spmat_core::{Matrix, StorageKind};

    #[test]
    fn test_fixture_all_kinds() {
        for &kind in StorageKind::ALL {
            let mut m = Matrix::<f64>::new(kind);
            fill_tridiagonal(&mut m, 5);
            check_tridiagonal(&m, 5).unwrap();
            assert_eq!(m.nnz(), 13);
            assert_eq!(
                m.vmult(&iota(5)).unwrap(),
                tridiagonal_iota_product::<f64>(5)
            );
        }
    }

    #[test]
    fn test_check_detects_wrong_value() {
        let mut m = Matrix::<i32>::new(StorageKind::OrderedMap);
        fill_tridiagonal(&mut m, 4);
        m.set(2, 2, 7);
        assert!(matches!(check_tridiagonal(&m, 4), Err(LabError::Check(_))));
    }

    #[test]
    fn test_max_abs_diff() {
        assert_eq!(max_abs_diff(&[1i32, 2, 3], &[1, 5, 3]), 3.0);
        assert_eq!(max_abs_diff::<f64>(&[], &[]), 0.0);
        assert!(max_abs_diff(&[1.0f64], &[1.0, 2.0]).is_infinite());
    }

    #[test]
    fn test_expected_product() {
        assert_eq!(tridiagonal_iota_product::<f64>(5), vec![1.0, 0.0, 0.0, 0.0, -5.0]);
    }
}
