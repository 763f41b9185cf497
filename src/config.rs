// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{HashKind, Strategy};

/// Default table sizes (primes)
pub const DEFAULT_TABLE_SIZES: [u32; 3] = [200_003, 2_000_003, 20_000_027];

/// Default dataset sizes
pub const DEFAULT_DATA_SIZES: [usize; 3] = [100_000, 1_000_000, 10_000_000];

/// Default dataset seed
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of an experiment sweep
///
/// Every combination of table size, strategy, hash function and dataset size
/// is measured once per repetition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Table sizes `m`, should be prime for double hashing
    #[doc(hidden)]
    pub table_sizes: Vec<u32>,

    /// Dataset sizes `n`
    #[doc(hidden)]
    pub data_sizes: Vec<usize>,

    /// Collision resolution strategies
    #[doc(hidden)]
    pub strategies: Vec<Strategy>,

    /// Primary hash functions
    #[doc(hidden)]
    pub hashes: Vec<HashKind>,

    /// Number of repetitions
    #[doc(hidden)]
    pub repeats: usize,

    /// Dataset seed
    #[doc(hidden)]
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            table_sizes: DEFAULT_TABLE_SIZES.to_vec(),
            data_sizes: DEFAULT_DATA_SIZES.to_vec(),
            strategies: Strategy::ALL.to_vec(),
            hashes: HashKind::CLASSIC.to_vec(),
            repeats: 1,
            seed: DEFAULT_SEED,
        }
    }
}

impl ExperimentConfig {
    /// Initializes a new config with the full default sweep.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows the sweep to the smallest table and dataset size.
    #[must_use]
    pub fn quick(mut self) -> Self {
        self.table_sizes = vec![DEFAULT_TABLE_SIZES[0]];
        self.data_sizes = vec![DEFAULT_DATA_SIZES[0]];
        self
    }

    /// Sets the table sizes.
    ///
    /// Open addressing runs are skipped for dataset sizes that do not fit
    /// into the table. Double hashing expects prime sizes.
    #[must_use]
    pub fn table_sizes(mut self, sizes: Vec<u32>) -> Self {
        self.table_sizes = sizes;
        self
    }

    /// Sets the dataset sizes.
    #[must_use]
    pub fn data_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.data_sizes = sizes;
        self
    }

    /// Sets the strategies to measure.
    #[must_use]
    pub fn strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Sets the primary hash functions to measure.
    #[must_use]
    pub fn hashes(mut self, hashes: Vec<HashKind>) -> Self {
        self.hashes = hashes;
        self
    }

    /// Sets the number of repetitions.
    ///
    /// At least one repetition is always run.
    ///
    /// Defaults to 1.
    #[must_use]
    pub fn repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats.max(1);
        self
    }

    /// Sets the dataset seed.
    ///
    /// Defaults to 42.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
