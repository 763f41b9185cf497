// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{fold, HashFunction};
use crate::{Error, Key};

/// Xorshift scramble of the raw 32-bit key, folded and reduced `mod m`
///
/// Decorrelates the low bits from patterns in the input before the division.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MixModulo {
    m: u32,
}

impl MixModulo {
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

/// Scrambles the bit pattern of a key.
///
/// Works on `u32`, so the right shift is logical (no sign extension).
fn scramble(key: Key) -> Key {
    let mut x = key.cast_unsigned();
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    x.cast_signed()
}

impl HashFunction for MixModulo {
    fn name(&self) -> &'static str {
        "mix"
    }

    fn table_size(&self) -> u32 {
        self.m
    }

    fn index(&self, key: Key) -> usize {
        (fold(scramble(key)) % self.m) as usize
    }
}
