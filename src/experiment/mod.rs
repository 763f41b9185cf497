// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Experiment harness that sweeps table sizes, strategies and hash functions.
//!
//! Every run builds a fresh table, inserts a random dataset, looks every key
//! up again and reports timing, memory and structure metrics as
//! [`Measurement`]s into a [`Sink`].

mod sink;
mod summary;

pub use sink::{CsvSink, Sink, CSV_HEADER};
pub use summary::{Stats, Summary, SummaryKey};

use crate::{AnyTable, ExperimentConfig, Error, HashKind, HashTable, Key, Strategy, MAX_CODE};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Generates `n` random codes in `0..=999_999_999`.
///
/// The same `n` and `seed` always produce the same dataset.
/// Codes may repeat.
#[must_use]
pub fn dataset(n: usize, seed: u64) -> Vec<Key> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(n as u64));
    (0..n).map(|_| rng.random_range(0..=MAX_CODE)).collect()
}

/// Phase of a run a measurement belongs to
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Filling the table
    Insert,

    /// Looking up every inserted key
    Search,

    /// Chain lengths
    Structure,

    /// Gaps between occupied slots
    Gaps,
}

impl Phase {
    /// Returns the phase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Search => "search",
            Self::Structure => "structure",
            Self::Gaps => "gaps",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Measured value
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    /// Counts, sizes and durations
    Int(u64),

    /// Averages
    Float(f64),
}

impl Value {
    /// Returns the value as float.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "only used for aggregation, where a loss of precision is fine"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),

            // NOTE: Debug keeps the decimal point for whole numbers (0.0)
            Self::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// A single measured metric of a run
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Run ID, one per (repetition, table size, strategy, hash function)
    pub run_id: usize,

    /// Strategy of the measured table
    pub table: Strategy,

    /// Table size
    pub m: u32,

    /// Hash function name, `<hash>+dh` for double hashing
    pub hash_name: String,

    /// Dataset size
    pub n: usize,

    /// Phase
    pub phase: Phase,

    /// Metric name
    pub metric: &'static str,

    /// Value
    pub value: Value,
}

/// Identifies a single table run
struct Run<'a> {
    run_id: usize,
    table: Strategy,
    m: u32,
    hash_name: &'a str,
    n: usize,
}

impl Run<'_> {
    fn emit<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        phase: Phase,
        metric: &'static str,
        value: Value,
    ) -> crate::Result<()> {
        sink.record(&Measurement {
            run_id: self.run_id,
            table: self.table,
            m: self.m,
            hash_name: self.hash_name.into(),
            n: self.n,
            phase,
            metric,
            value,
        })
    }
}

fn nanos(duration: Duration) -> Value {
    Value::Int(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
}

/// Runs an experiment sweep
pub struct Runner {
    config: ExperimentConfig,
}

impl Runner {
    /// Creates a runner for the given sweep.
    #[must_use]
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    /// Returns the sweep configuration.
    #[must_use]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Runs every combination of the sweep, and returns the number of
    /// measured table runs.
    ///
    /// Open addressing is skipped for datasets that do not fit into the table.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a table can not be built, a key can not be
    /// inserted or found again, or the sink fails.
    pub fn run<S: Sink + ?Sized>(&self, sink: &mut S) -> crate::Result<usize> {
        let config = &self.config;
        let mut run_id = 0;
        let mut runs = 0;

        for rep in 0..config.repeats {
            log::info!("Repetition {}/{}", rep + 1, config.repeats);

            for &m in &config.table_sizes {
                for &strategy in &config.strategies {
                    for &hash in &config.hashes {
                        for &n in &config.data_sizes {
                            if strategy.is_open_addressing() && n >= m as usize {
                                log::debug!("[{strategy}][{hash}] skipping n={n} >= m={m}");
                                continue;
                            }

                            self.measure(sink, run_id, strategy, hash, m, n)?;
                            runs += 1;
                        }

                        run_id += 1;
                    }
                }
            }
        }

        sink.finish()?;

        Ok(runs)
    }

    fn measure<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        run_id: usize,
        strategy: Strategy,
        hash: HashKind,
        m: u32,
        n: usize,
    ) -> crate::Result<()> {
        let hash_name = match strategy {
            Strategy::DoubleHashing => format!("{hash}+dh"),
            Strategy::Chaining | Strategy::LinearProbing => hash.to_string(),
        };

        #[expect(clippy::cast_precision_loss, reason = "only used for logging")]
        let load = n as f64 / f64::from(m);
        log::info!("[{strategy}][{hash_name}] m={m}, n={n} (load={load:.3})");

        let data = dataset(n, self.config.seed);

        let run = Run {
            run_id,
            table: strategy,
            m,
            hash_name: &hash_name,
            n,
        };

        let mut table = AnyTable::build(strategy, hash, m, n)?;
        table.clear_metrics();

        let progress_step = (n / 10).max(1);

        let start = Instant::now();
        for (idx, &key) in data.iter().enumerate() {
            table.insert(key)?;

            if (idx + 1) % progress_step == 0 {
                log::debug!("  insert {}/{n}", idx + 1);
            }
        }
        let insert_time = start.elapsed();

        run.emit(sink, Phase::Insert, "time_ns", nanos(insert_time))?;
        run.emit(
            sink,
            Phase::Insert,
            "collisions",
            Value::Int(table.collisions()),
        )?;
        run.emit(
            sink,
            Phase::Insert,
            "memory_bytes",
            Value::Int(table.memory_bytes() as u64),
        )?;

        let start = Instant::now();
        for &key in &data {
            if !table.contains(key) {
                return Err(Error::LookupMiss(key));
            }
        }
        let search_time = start.elapsed();

        run.emit(sink, Phase::Search, "time_ns", nanos(search_time))?;

        if strategy == Strategy::Chaining {
            let [top1, top2, top3] = table.top_chain_lengths();
            run.emit(sink, Phase::Structure, "chain_top1", Value::Int(top1 as u64))?;
            run.emit(sink, Phase::Structure, "chain_top2", Value::Int(top2 as u64))?;
            run.emit(sink, Phase::Structure, "chain_top3", Value::Int(top3 as u64))?;
        }

        let gaps = table.gap_stats();
        run.emit(sink, Phase::Gaps, "min", Value::Int(gaps.min as u64))?;
        run.emit(sink, Phase::Gaps, "avg", Value::Float(gaps.avg))?;
        run.emit(sink, Phase::Gaps, "max", Value::Int(gaps.max as u64))?;

        log::info!(
            "[{strategy}][{hash_name}] {} collisions, inserted in {insert_time:?}, searched in {search_time:?}",
            table.collisions(),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn experiment_dataset_deterministic() {
        let a = dataset(1_000, 42);
        let b = dataset(1_000, 42);
        let c = dataset(1_000, 43);

        assert_eq!(1_000, a.len());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|&k| (0..=MAX_CODE).contains(&k)));
    }

    #[test]
    fn experiment_dataset_seeded_by_size() {
        // different sizes use different seeds, so one is no prefix of the other
        let small = dataset(100, 42);
        let large = dataset(200, 42);
        assert_ne!(&small[..], &large[..100]);
    }

    #[test]
    fn experiment_value_display() {
        assert_eq!("17", Value::Int(17).to_string());
        assert_eq!("0.0", Value::Float(0.0).to_string());
        assert_eq!("2.5", Value::Float(2.5).to_string());
    }

    #[test]
    fn experiment_run_small() -> crate::Result<()> {
        let config = ExperimentConfig::new()
            .table_sizes(vec![101, 1_009])
            .data_sizes(vec![50, 500])
            .seed(7);

        let mut measurements = Vec::<Measurement>::new();
        let runs = Runner::new(config).run(&mut measurements)?;

        // chaining: 2 sizes * 3 hashes * 2 datasets
        // open addressing: (1 + 2) fitting datasets * 3 hashes, twice
        assert_eq!(12 + 18, runs);

        let chained = measurements
            .iter()
            .filter(|x| x.table == Strategy::Chaining)
            .filter(|x| x.phase == Phase::Insert && x.metric == "collisions")
            .count();
        assert_eq!(12, chained);

        assert!(measurements
            .iter()
            .filter(|x| x.table == Strategy::DoubleHashing)
            .all(|x| x.hash_name.ends_with("+dh")));

        assert!(measurements
            .iter()
            .filter(|x| x.table.is_open_addressing())
            .all(|x| x.n < x.m as usize && x.phase != Phase::Structure));

        // run IDs are assigned per (m, strategy, hash)
        let max_run_id = measurements.iter().map(|x| x.run_id).max();
        assert_eq!(Some(2 * 3 * 3 - 1), max_run_id);

        Ok(())
    }

    #[test]
    fn experiment_collisions_match_direct_use() -> crate::Result<()> {
        let config = ExperimentConfig::new()
            .table_sizes(vec![97])
            .data_sizes(vec![60])
            .strategies(vec![Strategy::LinearProbing])
            .hashes(vec![HashKind::Mod]);

        let mut measurements = Vec::<Measurement>::new();
        Runner::new(config).run(&mut measurements)?;

        let mut table = AnyTable::build(Strategy::LinearProbing, HashKind::Mod, 97, 60)?;
        for key in dataset(60, 42) {
            table.insert(key)?;
        }

        let collisions = measurements
            .iter()
            .find(|x| x.metric == "collisions")
            .map(|x| x.value);
        assert_eq!(Some(Value::Int(table.collisions())), collisions);

        Ok(())
    }
}
