// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Spacing between occupied slots of a table.
//!
//! A gap is the number of empty slots strictly between two consecutive
//! occupied slots. Open addressing tables also count the run of empty slots
//! that wraps around the end of the array, because their probe sequences
//! wrap as well; bucket arrays of chained tables do not.

/// Whether the empty run around the end of the array counts as a gap
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Wraparound {
    /// Only gaps between consecutive occupied slots
    Linear,

    /// Also the gap from the last occupied slot around to the first one
    Wrap,
}

/// Min/avg/max gap between occupied slots
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GapStats {
    /// Smallest gap
    pub min: usize,

    /// Mean gap
    pub avg: f64,

    /// Largest gap
    pub max: usize,
}

impl GapStats {
    /// Measures the gaps between `positions` in an array of `size` slots.
    ///
    /// `positions` need to be ascending and smaller than `size`.
    ///
    /// If fewer than two gaps can be measured, all fields are zero.
    #[must_use]
    pub fn from_positions<I: IntoIterator<Item = usize>>(
        positions: I,
        size: usize,
        wraparound: Wraparound,
    ) -> Self {
        let mut acc = Accumulator::default();

        let mut first = None;
        let mut prev: Option<usize> = None;

        for pos in positions {
            debug_assert!(pos < size, "position out of bounds");

            if let Some(prev) = prev {
                debug_assert!(pos > prev, "positions should be ascending");
                acc.push(pos - prev - 1);
            } else {
                first = Some(pos);
            }

            prev = Some(pos);
        }

        if wraparound == Wraparound::Wrap {
            if let (Some(first), Some(last)) = (first, prev) {
                if first != last {
                    acc.push((size - 1 - last) + first);
                }
            }
        }

        acc.finish()
    }
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    sum: u64,
    min: usize,
    max: usize,
}

impl Accumulator {
    fn push(&mut self, gap: usize) {
        if self.count == 0 {
            self.min = gap;
        } else {
            self.min = self.min.min(gap);
        }

        self.max = self.max.max(gap);
        self.sum += gap as u64;
        self.count += 1;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "gap sums are bounded by the table size, which is far below 2^52"
    )]
    fn finish(self) -> GapStats {
        if self.count == 0 {
            return GapStats::default();
        }

        GapStats {
            min: self.min,
            avg: self.sum as f64 / self.count as f64,
            max: self.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn gap_stats_empty() {
        let stats = GapStats::from_positions([], 10, Wraparound::Wrap);
        assert_eq!(GapStats::default(), stats);
    }

    #[test]
    fn gap_stats_single_position() {
        for wraparound in [Wraparound::Linear, Wraparound::Wrap] {
            let stats = GapStats::from_positions([4], 10, wraparound);
            assert_eq!(0, stats.min);
            assert!(stats.avg.abs() < f64::EPSILON);
            assert_eq!(0, stats.max);
        }
    }

    #[test]
    fn gap_stats_linear() {
        // gaps: 1, 0, 4
        let stats = GapStats::from_positions([1, 3, 4, 9], 10, Wraparound::Linear);
        assert_eq!(0, stats.min);
        assert!((stats.avg - 5.0 / 3.0).abs() < 1e-9);
        assert_eq!(4, stats.max);
    }

    #[test]
    fn gap_stats_wrap() {
        // gaps: 1, 0, 4, wrap gap (10 - 1 - 9) + 1 = 1
        let stats = GapStats::from_positions([1, 3, 4, 9], 10, Wraparound::Wrap);
        assert_eq!(0, stats.min);
        assert!((stats.avg - 6.0 / 4.0).abs() < 1e-9);
        assert_eq!(4, stats.max);
    }

    #[test]
    fn gap_stats_wrap_dominates() {
        // linear gap: 1, wrap gap (20 - 1 - 5) + 3 = 17
        let stats = GapStats::from_positions([3, 5], 20, Wraparound::Wrap);
        assert_eq!(1, stats.min);
        assert!((stats.avg - 9.0).abs() < f64::EPSILON);
        assert_eq!(17, stats.max);
    }

    #[test]
    fn gap_stats_full_array() {
        let stats = GapStats::from_positions(0..8, 8, Wraparound::Wrap);
        assert_eq!(GapStats::default(), stats);
    }
}
