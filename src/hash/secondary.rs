// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{fold, HashFunction};
use crate::{Error, Key};

/// Step function for double hashing: `1 + (|k| mod (m - 1))`
///
/// Never returns 0, so a probe sequence always moves. The step is only
/// guaranteed to reach every slot if `m` is prime.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DoubleHashSecondary {
    m: u32,
}

impl DoubleHashSecondary {
    /// Binds the function to a table of size `m`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableSize`] if `m` is smaller than 2.
    pub fn new(m: u32) -> crate::Result<Self> {
        if m < 2 {
            return Err(Error::InvalidTableSize(m));
        }
        Ok(Self { m })
    }
}

impl HashFunction for DoubleHashSecondary {
    fn name(&self) -> &'static str {
        "dh"
    }

    fn table_size(&self) -> u32 {
        self.m
    }

    fn index(&self, key: Key) -> usize {
        (1 + fold(key) % (self.m - 1)) as usize
    }
}
