//! Configuration for the parallel multiply and the timing harness

use spmat_core::StorageKind;

/// Granularity of the row-parallel multiply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum number of rows handed to one rayon task
    pub min_rows_per_task: usize,
    /// Below this many rows the multiply runs sequentially
    pub sequential_below: usize,
}

impl ParallelConfig {
    /// Set the minimum rows per task
    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows.max(1);
        self
    }

    /// Set the sequential cutover
    pub fn with_sequential_below(mut self, rows: usize) -> Self {
        self.sequential_below = rows;
        self
    }

    /// Whether a matrix with `nrows` rows should be split across threads
    pub fn should_split(&self, nrows: usize) -> bool {
        nrows >= self.sequential_below && rayon::current_num_threads() > 1
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_rows_per_task: 1024,
            sequential_below: 4096,
        }
    }
}

/// Settings for one run of the store comparison harness
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Dimension of the tridiagonal fixture
    pub size: usize,
    /// Stores to compare, in order
    pub kinds: Vec<StorageKind>,
    /// Also time the row-parallel multiply on the CSR export
    pub parallel: bool,
    /// Parallel multiply settings
    pub parallel_config: ParallelConfig,
}

impl BenchConfig {
    /// Create config for a fixture of dimension `size`
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Restrict the run to the given stores
    pub fn with_kinds(mut self, kinds: Vec<StorageKind>) -> Self {
        if !kinds.is_empty() {
            self.kinds = kinds;
        }
        self
    }

    /// Toggle timing of the parallel multiply
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set parallel multiply settings
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.parallel_config = config;
        self
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: 20_000,
            kinds: StorageKind::ALL.to_vec(),
            parallel: false,
            parallel_config: ParallelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_config_builder() {
        let config = BenchConfig::with_size(5)
            .with_kinds(vec![StorageKind::SortedCoo])
            .with_parallel(true);
        assert_eq!(config.size, 5);
        assert_eq!(config.kinds, vec![StorageKind::SortedCoo]);
        assert!(config.parallel);
    }

    #[test]
    fn test_empty_kinds_keep_default() {
        let config = BenchConfig::with_size(5).with_kinds(Vec::new());
        assert_eq!(config.kinds, StorageKind::ALL.to_vec());
    }

    #[test]
    fn test_min_rows_never_zero() {
        let config = ParallelConfig::default().with_min_rows_per_task(0);
        assert_eq!(config.min_rows_per_task, 1);
    }
}
