//! Row-parallel dense multiply
//!
//! Every output entry `y[i]` depends only on row `i`, so rows are split
//! across rayon tasks with no shared writes. The matrix must not be mutated
//! while a multiply is running; borrowing it immutably enforces that.

use rayon::prelude::*;
use spmat_core::validation::validate_vector_len;
use spmat_core::{CsrMatrix, MapMatrix, Matrix, MatrixElement, Result, RowMap, SparseMatrix, ToCsr};

use crate::config::ParallelConfig;

/// `y = A x` over a CSR export, rows split across threads
pub fn par_vmult_csr<T>(a: &CsrMatrix<T>, x: &[T], config: &ParallelConfig) -> Result<Vec<T>>
where
    T: MatrixElement + Send + Sync,
{
    validate_vector_len(a.ncols, x.len())?;
    if !config.should_split(a.nrows) {
        return a.vmult(x);
    }

    let mut y = vec![T::zero(); a.nrows];
    y.par_iter_mut()
        .enumerate()
        .with_min_len(config.min_rows_per_task)
        .for_each(|(i, yi)| {
            let (cols, vals) = a.row(i);
            let mut sum = T::zero();
            for (&j, &v) in cols.iter().zip(vals) {
                sum += v * x[j];
            }
            *yi = sum;
        });
    Ok(y)
}

/// `y = A x` over a map-backed store, rows split across threads
pub fn par_vmult_rows<T, M>(a: &MapMatrix<T, M>, x: &[T], config: &ParallelConfig) -> Result<Vec<T>>
where
    T: MatrixElement + Send + Sync,
    M: RowMap<T> + Sync,
{
    validate_vector_len(a.ncols(), x.len())?;
    if !config.should_split(a.nrows()) {
        return a.vmult(x);
    }

    let mut y = vec![T::zero(); a.nrows()];
    y.par_iter_mut()
        .zip(a.rows().par_iter())
        .with_min_len(config.min_rows_per_task)
        .for_each(|(yi, row)| {
            let mut sum = T::zero();
            for (j, &v) in row.iter() {
                sum += v * x[j];
            }
            *yi = sum;
        });
    Ok(y)
}

/// `y = A x` over any façade store
///
/// Map-backed stores are multiplied in place. Coordinate stores interleave
/// rows, so they are exported to CSR first.
pub fn par_vmult<T>(a: &Matrix<T>, x: &[T], config: &ParallelConfig) -> Result<Vec<T>>
where
    T: MatrixElement + Send + Sync,
{
    match a {
        Matrix::OrderedMap(m) => par_vmult_rows(m, x, config),
        Matrix::UnorderedMap(m) => par_vmult_rows(m, x, config),
        Matrix::SortedCoo(_) | Matrix::UnsortedCoo(_) => {
            validate_vector_len(a.ncols(), x.len())?;
            par_vmult_csr(&a.to_csr()?, x, config)
        }
    }
}
