// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{fold, HashFunction};
use crate::{Error, Key};

/// XXH3 of the folded key (little endian bytes), reduced `mod m`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Xxh3Modulo {
    m: u32,
}

impl Xxh3Modulo {
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

impl HashFunction for Xxh3Modulo {
    fn name(&self) -> &'static str {
        "xxh3"
    }

    fn table_size(&self) -> u32 {
        self.m
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "result of mod m fits into u32"
    )]
    fn index(&self, key: Key) -> usize {
        let hash = xxhash_rust::xxh3::xxh3_64(&fold(key).to_le_bytes());
        (hash % u64::from(self.m)) as usize
    }
}
