//! Configuration and system parameters for CSR assembly

/// How the per-row column lookup is done during deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Compare each slot against the survivors already compacted in its row
    LinearScan,
    /// Sort a row-local permutation by column and merge equal runs
    SortMerge,
    /// Linear scan for short rows, sort-merge for wide ones
    Adaptive,
}

/// System parameters for performance tuning
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of threads to use for parallel refresh
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

/// Configuration for CSR assembly
#[derive(Debug, Clone)]
pub struct AssemblyConfig {
    /// System parameters for performance tuning
    pub system_params: SystemParameters,

    /// Lookup used to find repeated columns within a row
    pub dedup_strategy: DedupStrategy,

    /// Widest row handled by linear scan under [`DedupStrategy::Adaptive`]
    pub linear_scan_max_width: usize,

    /// Below this many triplets `par_update` runs sequentially
    pub parallel_update_min_triplets: usize,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            system_params: SystemParameters::default(),
            dedup_strategy: DedupStrategy::Adaptive,
            linear_scan_max_width: 32,
            parallel_update_min_triplets: 1 << 16,
        }
    }
}

impl AssemblyConfig {
    /// Use the given deduplication strategy
    pub fn with_dedup_strategy(mut self, strategy: DedupStrategy) -> Self {
        self.dedup_strategy = strategy;
        self
    }

    /// Set the widest row handled by linear scan
    pub fn with_linear_scan_max_width(mut self, width: usize) -> Self {
        self.linear_scan_max_width = width;
        self
    }

    /// Set the triplet count at which `par_update` goes parallel
    pub fn with_parallel_update_min_triplets(mut self, n: usize) -> Self {
        self.parallel_update_min_triplets = n;
        self
    }

    /// Set the number of threads used by parallel refresh
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.system_params.n_threads = n_threads.max(1);
        self
    }

    /// Resolve the strategy for a row of the given width
    pub fn strategy_for_width(&self, width: usize) -> DedupStrategy {
        match self.dedup_strategy {
            DedupStrategy::Adaptive if width <= self.linear_scan_max_width => {
                DedupStrategy::LinearScan
            }
            DedupStrategy::Adaptive => DedupStrategy::SortMerge,
            fixed => fixed,
        }
    }
}
