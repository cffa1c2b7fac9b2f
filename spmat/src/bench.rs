//! Store comparison harness
//!
//! Fills the tridiagonal fixture into each configured store, times the
//! insertion and the multiply, and checks both results.

use std::time::{Duration, Instant};

use spmat_core::{Matrix, SparseMatrix, StorageKind, ToCsr};
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::error::{LabError, Result};
use crate::fixtures::{
    check_tridiagonal, fill_tridiagonal, iota, max_abs_diff, tridiagonal_iota_product,
};
use crate::parallel::par_vmult_csr;

/// Outcome of one store's run
#[derive(Debug, Clone, PartialEq)]
pub struct StoreReport {
    /// Store that was measured
    pub kind: StorageKind,
    /// Time spent filling the fixture
    pub insert: Duration,
    /// Time spent in `vmult`
    pub vmult: Duration,
    /// Time spent in the row-parallel multiply of the CSR export, if run
    pub par_vmult: Option<Duration>,
    /// Whether the stored entries and dimensions match the fixture
    pub fill_ok: bool,
    /// Whether the product matches the expected vector
    pub vmult_ok: bool,
    /// Whether the row-parallel product matches, if run
    pub par_vmult_ok: Option<bool>,
}

impl StoreReport {
    /// Whether every check passed
    pub fn passed(&self) -> bool {
        self.fill_ok && self.vmult_ok && self.par_vmult_ok.unwrap_or(true)
    }
}

/// Run `f` and return its result with the elapsed wall time
pub fn timeit<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Measure one store
///
/// Returns the filled matrix alongside the report so callers can print or
/// export it.
pub fn run_store(kind: StorageKind, config: &BenchConfig) -> Result<(Matrix<f64>, StoreReport)> {
    let n = config.size;
    if n < 2 {
        return Err(LabError::Check(format!("fixture size must be at least 2, got {n}")));
    }

    let mut matrix = Matrix::<f64>::new(kind);
    let ((), insert) = timeit(|| fill_tridiagonal(&mut matrix, n));
    let fill_ok = match check_tridiagonal(&matrix, n) {
        Ok(()) => true,
        Err(err) => {
            warn!(store = %kind, %err, "fixture check failed");
            false
        }
    };

    let x = iota::<f64>(n);
    let expected = tridiagonal_iota_product::<f64>(n);
    let (y, vmult) = timeit(|| matrix.vmult(&x));
    let y = y?;
    let vmult_ok = y == expected;
    if !vmult_ok {
        warn!(
            store = %kind,
            residual = max_abs_diff(&y, &expected),
            "product differs from expected"
        );
    }

    let (par_vmult, par_vmult_ok) = if config.parallel {
        let csr = matrix.to_csr()?;
        let (y, elapsed) = timeit(|| par_vmult_csr(&csr, &x, &config.parallel_config));
        let y = y?;
        let ok = y == expected;
        if !ok {
            warn!(
                store = %kind,
                residual = max_abs_diff(&y, &expected),
                "parallel product differs from expected"
            );
        }
        (Some(elapsed), Some(ok))
    } else {
        (None, None)
    };

    let report = StoreReport {
        kind,
        insert,
        vmult,
        par_vmult,
        fill_ok,
        vmult_ok,
        par_vmult_ok,
    };
    info!(
        store = %kind,
        size = n,
        insert_us = insert.as_micros() as u64,
        vmult_us = vmult.as_micros() as u64,
        passed = report.passed(),
        "store measured"
    );
    Ok((matrix, report))
}

/// Measure every configured store in order
pub fn run_all(config: &BenchConfig) -> Result<Vec<StoreReport>> {
    config
        .kinds
        .iter()
        .map(|&kind| run_store(kind, config).map(|(_, report)| report))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_passes() {
        let config = BenchConfig::with_size(50).with_parallel(true);
        let reports = run_all(&config).unwrap();
        assert_eq!(reports.len(), StorageKind::ALL.len());
        for report in &reports {
            assert!(report.passed(), "{:?}", report.kind);
            assert!(report.par_vmult.is_some());
            assert_eq!(report.par_vmult_ok, Some(true));
        }
    }

    #[test]
    fn test_sequential_run_skips_parallel_check() {
        let config = BenchConfig::with_size(10);
        let (_, report) = run_store(StorageKind::SortedCoo, &config).unwrap();
        assert_eq!(report.par_vmult_ok, None);
        assert!(report.passed());
    }

    #[test]
    fn test_failed_parallel_product_fails_report() {
        let report = StoreReport {
            kind: StorageKind::OrderedMap,
            insert: Duration::ZERO,
            vmult: Duration::ZERO,
            par_vmult: Some(Duration::ZERO),
            fill_ok: true,
            vmult_ok: true,
            par_vmult_ok: Some(false),
        };
        assert!(!report.passed());
    }

    #[test]
    fn test_rejects_tiny_fixture() {
        let config = BenchConfig::with_size(1);
        assert!(matches!(
            run_store(StorageKind::OrderedMap, &config),
            Err(LabError::Check(_))
        ));
    }
}
