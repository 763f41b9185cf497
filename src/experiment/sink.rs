// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::Measurement;
use std::io::Write;

/// Header line of the measurement CSV
pub const CSV_HEADER: &str = "run_id,table_type,table_m,hash_name,data_n,phase,metric,value";

/// Receives measurements of an experiment
pub trait Sink {
    /// Records a single measurement.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    fn record(&mut self, measurement: &Measurement) -> crate::Result<()>;

    /// Called once after the last measurement of an experiment.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    fn finish(&mut self) -> crate::Result<()> {
        Ok(())
    }
}

impl Sink for Vec<Measurement> {
    fn record(&mut self, measurement: &Measurement) -> crate::Result<()> {
        self.push(measurement.clone());
        Ok(())
    }
}

impl<A: Sink, B: Sink> Sink for (A, B) {
    fn record(&mut self, measurement: &Measurement) -> crate::Result<()> {
        self.0.record(measurement)?;
        self.1.record(measurement)
    }

    fn finish(&mut self) -> crate::Result<()> {
        self.0.finish()?;
        self.1.finish()
    }
}

/// Writes measurements as CSV lines, one per measurement
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    /// Writes the CSV header and returns the sink.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn new(mut writer: W) -> crate::Result<Self> {
        writeln!(writer, "{CSV_HEADER}")?;
        Ok(Self { writer })
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for CsvSink<W> {
    fn record(&mut self, x: &Measurement) -> crate::Result<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{},{},{},{}",
            x.run_id, x.table, x.m, x.hash_name, x.n, x.phase, x.metric, x.value,
        )?;
        Ok(())
    }

    fn finish(&mut self) -> crate::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
