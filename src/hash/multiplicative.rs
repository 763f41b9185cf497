// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{fold, HashFunction};
use crate::{Error, Key};

/// Fractional part of the golden ratio, `(sqrt(5) - 1) / 2`
pub const GOLDEN_RATIO_FRACTION: f64 = 0.618_033_988_749_894_9;

/// Knuth's multiplication method: `floor(m * frac(|k| * A))`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Multiplicative {
    m: u32,
}

impl Multiplicative {
    /// Binds the function to a table of size `m`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableSize`] if `m` is 0.
    pub fn new(m: u32) -> crate::Result<Self> {
        if m == 0 {
            return Err(Error::InvalidTableSize(m));
        }
        Ok(Self { m })
    }
}

/// Scales a fraction in `[0, 1)` to `[0, m)`.
///
/// `m * frac` may round up to `m` for fractions right below 1.0,
/// so the result is clamped to the last slot.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "frac is in [0, 1), so the product is in [0, m]"
)]
fn scale(m: u32, frac: f64) -> u32 {
    let idx = (f64::from(m) * frac).floor() as u32;
    idx.min(m - 1)
}

impl HashFunction for Multiplicative {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn table_size(&self) -> u32 {
        self.m
    }

    fn index(&self, key: Key) -> usize {
        let frac = (f64::from(fold(key)) * GOLDEN_RATIO_FRACTION).fract();
        scale(self.m, frac) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn multiplicative_known_values() -> crate::Result<()> {
        let hash = Multiplicative::new(1_000)?;

        assert_eq!(0, hash.index(0));
        assert_eq!(618, hash.index(1));
        assert_eq!(180, hash.index(10));
        assert_eq!(743, hash.index(123_456_789));
        assert_eq!(131, hash.index(999_999_999));
        assert_eq!(hash.index(10), hash.index(-10));

        Ok(())
    }

    #[test]
    fn multiplicative_scale_clamps() {
        let below_one = 1.0 - f64::EPSILON / 2.0;

        for m in [1, 2, 7, 200_003, u32::MAX] {
            assert!(scale(m, below_one) < m);
            assert_eq!(m - 1, scale(m, 1.0));
            assert_eq!(0, scale(m, 0.0));
        }
    }
}
