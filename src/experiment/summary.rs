// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{Measurement, Phase, Sink};
use crate::Strategy;
use std::{collections::BTreeMap, io::Write};

/// Groups measurements of the same combination across repetitions
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SummaryKey {
    /// Strategy
    pub table: Strategy,

    /// Table size
    pub m: u32,

    /// Hash function name
    pub hash_name: String,

    /// Dataset size
    pub n: usize,

    /// Phase
    pub phase: Phase,

    /// Metric name
    pub metric: &'static str,
}

/// Aggregated values of a metric
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stats {
    /// Number of values
    pub count: usize,

    /// Mean
    pub mean: f64,

    /// Smallest value
    pub min: f64,

    /// Largest value
    pub max: f64,

    /// Sum of squared differences from the mean (Welford)
    m2: f64,
}

impl Stats {
    fn new(value: f64) -> Self {
        Self {
            count: 1,
            mean: value,
            min: value,
            max: value,
            m2: 0.0,
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "repetition counts are small")]
    fn push(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);

        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Sample standard deviation, 0 for a single value.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "repetition counts are small")]
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).sqrt()
    }
}

/// Aggregates measurements per combination (mean, standard deviation,
/// min, max, count)
#[derive(Debug, Default)]
pub struct Summary {
    groups: BTreeMap<SummaryKey, Stats>,
}

impl Summary {
    /// Header line of the summary CSV
    pub const CSV_HEADER: &'static str =
        "table_type,table_m,hash_name,data_n,phase,metric,mean,std,min,max,count";

    /// Creates an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the aggregated values of a combination.
    #[must_use]
    pub fn get(&self, key: &SummaryKey) -> Option<&Stats> {
        self.groups.get(key)
    }

    /// Iterates over all combinations, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&SummaryKey, &Stats)> {
        self.groups.iter()
    }

    /// Writes the summary as CSV.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> crate::Result<()> {
        writeln!(writer, "{}", Self::CSV_HEADER)?;

        for (key, stats) in &self.groups {
            writeln!(
                writer,
                "{},{},{},{},{},{},{:?},{:?},{:?},{:?},{}",
                key.table,
                key.m,
                key.hash_name,
                key.n,
                key.phase,
                key.metric,
                stats.mean,
                stats.std_dev(),
                stats.min,
                stats.max,
                stats.count,
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Sink for Summary {
    fn record(&mut self, x: &Measurement) -> crate::Result<()> {
        let key = SummaryKey {
            table: x.table,
            m: x.m,
            hash_name: x.hash_name.clone(),
            n: x.n,
            phase: x.phase,
            metric: x.metric,
        };

        let value = x.value.as_f64();

        self.groups
            .entry(key)
            .and_modify(|stats| stats.push(value))
            .or_insert_with(|| Stats::new(value));

        Ok(())
    }
}
