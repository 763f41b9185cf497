// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{fold, HashFunction};
use crate::{Error, Key};

/// Division method: `|k| mod m`
///
/// Spreads keys well only if `m` does not share structure with the keys,
/// so `m` should be prime.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Modulo {
    m: u32,
}

impl Modulo {
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

impl HashFunction for Modulo {
    fn name(&self) -> &'static str {
        "mod"
    }

    fn table_size(&self) -> u32 {
        self.m
    }

    fn index(&self, key: Key) -> usize {
        (fold(key) % self.m) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn modulo_simple() -> crate::Result<()> {
        let hash = Modulo::new(7)?;

        for key in [10, 17, 24, 3] {
            assert_eq!(3, hash.index(key));
        }
        assert_eq!(3, hash.index(-10));
        assert_eq!(0, hash.index(0));

        // 2^31 = 7 * 306_783_378 + 2
        assert_eq!(2, hash.index(i32::MIN));

        Ok(())
    }
}
