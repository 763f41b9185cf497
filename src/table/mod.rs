// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Fixed-size hash tables with different collision resolution strategies.
//!
//! All tables store raw [`Key`]s, never resize and do not support deletion.
//! Each table counts collisions while inserting: one per chain node passed
//! (separate chaining) or one per occupied slot probed (open addressing).

mod chaining;
mod double;
mod linear;
mod slots;

pub use chaining::ChainedTable;
pub use double::DoubleHashingTable;
pub use linear::LinearProbingTable;

use crate::{
    hash::{AnyHash, DoubleHashSecondary, HashKind},
    Error, GapStats, Key,
};
use enum_dispatch::enum_dispatch;
use std::str::FromStr;

/// Collision resolution strategy
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// Separate chaining, see [`ChainedTable`]
    Chaining,

    /// Open addressing with unit steps, see [`LinearProbingTable`]
    LinearProbing,

    /// Open addressing with a per-key step, see [`DoubleHashingTable`]
    DoubleHashing,
}

impl Strategy {
    /// All strategies, in sweep order.
    pub const ALL: [Self; 3] = [Self::Chaining, Self::LinearProbing, Self::DoubleHashing];

    /// Returns the table type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chaining => "chaining",
            Self::LinearProbing => "linear",
            Self::DoubleHashing => "doublehash",
        }
    }

    /// Returns `true` for strategies that store keys in the slot array itself.
    #[must_use]
    pub fn is_open_addressing(self) -> bool {
        !matches!(self, Self::Chaining)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chain" | "chaining" => Ok(Self::Chaining),
            "lin" | "linear" => Ok(Self::LinearProbing),
            "double" | "doublehash" => Ok(Self::DoubleHashing),
            _ => Err(Error::UnknownStrategy(s.into())),
        }
    }
}

/// Generic table API
#[enum_dispatch]
pub trait HashTable {
    /// Returns the collision resolution strategy of the table.
    fn strategy(&self) -> Strategy;

    /// Inserts a key.
    ///
    /// Duplicate keys are stored again, there is no deduplication.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the table has no room left for the key.
    /// A failed insert leaves the table (including its metrics) unchanged.
    fn insert(&mut self, key: Key) -> crate::Result<()>;

    /// Returns `true` if the key was inserted before.
    fn contains(&self, key: Key) -> bool;

    /// Returns the number of collisions since construction or the last
    /// call to [`HashTable::clear_metrics`].
    fn collisions(&self) -> u64;

    /// Resets the collision counter, keeping all stored keys.
    fn clear_metrics(&mut self);

    /// Returns the number of stored keys.
    fn len(&self) -> usize;

    /// Returns `true` if no key was stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the size `m` of the slot (or bucket) array.
    fn table_size(&self) -> usize;

    /// Returns the number of non-empty slots (or buckets).
    fn occupied_slots(&self) -> usize;

    /// Returns the indexes of the non-empty slots (or buckets), ascending.
    fn occupied_indices(&self) -> Vec<usize>;

    /// Gap statistics over the slot (or bucket) array.
    fn gap_stats(&self) -> GapStats;

    /// Returns the three longest chain lengths, descending.
    ///
    /// Open addressing tables have no chains and return `[0, 0, 0]`.
    fn top_chain_lengths(&self) -> [usize; 3] {
        [0; 3]
    }

    /// Returns the heap memory held by the table, in bytes.
    fn memory_bytes(&self) -> usize;
}

/// May be any of the three tables, with runtime selected hash functions
#[enum_dispatch(HashTable)]
pub enum AnyTable {
    /// See [`ChainedTable`]
    Chained(ChainedTable<AnyHash>),

    /// See [`LinearProbingTable`]
    Linear(LinearProbingTable<AnyHash>),

    /// See [`DoubleHashingTable`]
    Double(DoubleHashingTable<AnyHash, DoubleHashSecondary>),
}

impl AnyTable {
    /// Builds an empty table of size `m`.
    ///
    /// `expected_items` is the node capacity of a chained table; open
    /// addressing tables can hold at most `m` keys regardless.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `m` is too small for the hash functions,
    /// or `expected_items` can not be addressed.
    pub fn build(
        strategy: Strategy,
        hash: HashKind,
        m: u32,
        expected_items: usize,
    ) -> crate::Result<Self> {
        let primary = hash.build(m)?;

        Ok(match strategy {
            Strategy::Chaining => ChainedTable::new(primary, expected_items)?.into(),
            Strategy::LinearProbing => LinearProbingTable::new(primary).into(),
            Strategy::DoubleHashing => {
                DoubleHashingTable::new(primary, DoubleHashSecondary::new(m)?)?.into()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn strategy_parse() -> crate::Result<()> {
        assert_eq!(Strategy::Chaining, "chain".parse()?);
        assert_eq!(Strategy::Chaining, "chaining".parse()?);
        assert_eq!(Strategy::LinearProbing, "lin".parse()?);
        assert_eq!(Strategy::LinearProbing, "Linear".parse()?);
        assert_eq!(Strategy::DoubleHashing, "double".parse()?);
        assert_eq!(Strategy::DoubleHashing, "doublehash".parse()?);
        assert!(matches!(
            "cuckoo".parse::<Strategy>(),
            Err(Error::UnknownStrategy(_))
        ));
        Ok(())
    }

    #[test]
    fn strategy_names() {
        assert_eq!("chaining", Strategy::Chaining.to_string());
        assert_eq!("linear", Strategy::LinearProbing.to_string());
        assert_eq!("doublehash", Strategy::DoubleHashing.to_string());
        assert!(!Strategy::Chaining.is_open_addressing());
        assert!(Strategy::DoubleHashing.is_open_addressing());
    }

    #[test]
    fn any_table_build() -> crate::Result<()> {
        for strategy in Strategy::ALL {
            let mut table = AnyTable::build(strategy, HashKind::Mod, 11, 8)?;
            assert_eq!(strategy, table.strategy());
            assert_eq!(11, table.table_size());
            assert!(table.is_empty());

            for key in [0, 11, 22, 5] {
                table.insert(key)?;
            }

            assert_eq!(4, table.len());
            assert!(table.contains(22));
            assert!(!table.contains(33));

            // 0, 11 and 22 share slot 0, double hashing steps away from it
            let expected = match strategy {
                Strategy::Chaining | Strategy::LinearProbing => 3,
                Strategy::DoubleHashing => 2,
            };
            assert_eq!(expected, table.collisions());
        }

        Ok(())
    }

    #[test]
    fn any_table_build_rejects_tiny_double() {
        assert!(matches!(
            AnyTable::build(Strategy::DoubleHashing, HashKind::Mod, 1, 1),
            Err(Error::InvalidTableSize(1))
        ));
    }
}
