// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{HashTable, Strategy};
use crate::{
    gap::{GapStats, Wraparound},
    hash::HashFunction,
    Error, Key,
};

/// Marks the end of a chain, or an empty bucket
const NIL: u32 = u32::MAX;

/// Separate chaining over flat arrays
///
/// Nodes are not allocated individually. They live in a node arena of fixed
/// capacity (`keys` + `next`), addressed by `u32` handles:
///
/// - `heads[bucket]` is the first node of the bucket's chain, or `NIL`
/// - `next[node]` is the following node in the same chain, or `NIL`
/// - `keys[node]` is the stored key
///
/// New nodes are pushed to the front of their chain, so an insert is O(1)
/// apart from counting the collisions.
pub struct ChainedTable<H: HashFunction> {
    hash: H,
    heads: Box<[u32]>,
    next: Box<[u32]>,
    keys: Box<[Key]>,

    /// Number of nodes handed out so far
    node_count: u32,

    collisions: u64,
}

/// Iterates over the node handles of a single chain
struct Chain<'a> {
    next: &'a [u32],
    cursor: u32,
}

impl Iterator for Chain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }

        let idx = self.cursor as usize;
        self.cursor = self.next.get(idx).copied().unwrap_or(NIL);
        Some(idx)
    }
}

impl<H: HashFunction> ChainedTable<H> {
    /// Creates an empty table with `hash.table_size()` buckets and room
    /// for `capacity` keys.
    ///
    /// The capacity is independent of the number of buckets, and should be
    /// the number of keys that will be inserted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if the capacity can not be
    /// addressed with `u32` node handles.
    pub fn new(hash: H, capacity: usize) -> crate::Result<Self> {
        let Some(capacity) = u32::try_from(capacity).ok().filter(|&c| c < NIL) else {
            return Err(Error::InvalidCapacity(capacity));
        };

        let bucket_count = hash.table_size() as usize;
        let capacity = capacity as usize;

        Ok(Self {
            hash,
            heads: vec![NIL; bucket_count].into_boxed_slice(),
            next: vec![NIL; capacity].into_boxed_slice(),
            keys: vec![0; capacity].into_boxed_slice(),
            node_count: 0,
            collisions: 0,
        })
    }

    /// Returns the hash function.
    pub fn hash_function(&self) -> &H {
        &self.hash
    }

    /// Returns the maximum number of keys the table can hold.
    #[must_use]
    pub fn node_capacity(&self) -> usize {
        self.keys.len()
    }

    fn chain(&self, head: u32) -> Chain<'_> {
        Chain {
            next: &self.next,
            cursor: head,
        }
    }

    fn head(&self, bucket: usize) -> u32 {
        self.heads.get(bucket).copied().unwrap_or(NIL)
    }

    fn occupied_buckets(&self) -> impl Iterator<Item = usize> + '_ {
        self.heads
            .iter()
            .enumerate()
            .filter(|(_, head)| **head != NIL)
            .map(|(bucket, _)| bucket)
    }

    /// Returns the lengths of the three longest chains, descending.
    ///
    /// Missing entries are 0 if fewer than three buckets are in use.
    ///
    /// Walks every chain, so this is O(m + n).
    #[must_use]
    pub fn top_chain_lengths(&self) -> [usize; 3] {
        let (mut a, mut b, mut c) = (0, 0, 0);

        for &head in &*self.heads {
            let len = self.chain(head).count();

            if len > a {
                c = b;
                b = a;
                a = len;
            } else if len > b {
                c = b;
                b = len;
            } else if len > c {
                c = len;
            }
        }

        [a, b, c]
    }

    /// Measures the number of empty buckets between consecutive non-empty
    /// buckets.
    ///
    /// Bucket arrays have no probe sequence, so the gaps do not wrap around.
    #[must_use]
    pub fn bucket_gap_stats(&self) -> GapStats {
        GapStats::from_positions(
            self.occupied_buckets(),
            self.heads.len(),
            Wraparound::Linear,
        )
    }
}

impl<H: HashFunction> HashTable for ChainedTable<H> {
    fn strategy(&self) -> Strategy {
        Strategy::Chaining
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "hash functions return indexes below m, and the node index was checked against the capacity"
    )]
    fn insert(&mut self, key: Key) -> crate::Result<()> {
        let idx = self.node_count as usize;

        if idx >= self.keys.len() {
            return Err(Error::CapacityExhausted(self.keys.len()));
        }

        let bucket = self.hash.index(key);
        let head = self.heads[bucket];

        // Every node already in the chain is one collision
        let chain_len = self.chain(head).count();

        self.keys[idx] = key;
        self.next[idx] = head;
        self.heads[bucket] = self.node_count;
        self.node_count += 1;
        self.collisions += chain_len as u64;

        Ok(())
    }

    fn contains(&self, key: Key) -> bool {
        let head = self.head(self.hash.index(key));

        self.chain(head)
            .any(|idx| self.keys.get(idx).is_some_and(|&k| k == key))
    }

    fn collisions(&self) -> u64 {
        self.collisions
    }

    fn clear_metrics(&mut self) {
        self.collisions = 0;
    }

    fn len(&self) -> usize {
        self.node_count as usize
    }

    fn table_size(&self) -> usize {
        self.heads.len()
    }

    fn occupied_slots(&self) -> usize {
        self.occupied_buckets().count()
    }

    fn occupied_indices(&self) -> Vec<usize> {
        self.occupied_buckets().collect()
    }

    fn gap_stats(&self) -> GapStats {
        self.bucket_gap_stats()
    }

    fn top_chain_lengths(&self) -> [usize; 3] {
        Self::top_chain_lengths(self)
    }

    fn memory_bytes(&self) -> usize {
        std::mem::size_of_val::<[u32]>(&self.heads)
            + std::mem::size_of_val::<[u32]>(&self.next)
            + std::mem::size_of_val::<[Key]>(&self.keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Modulo;
    use test_log::test;

    #[test]
    fn chaining_single_bucket_scenario() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(7)?, 4)?;

        for key in [10, 17, 24, 3] {
            table.insert(key)?;
        }

        assert_eq!([4, 0, 0], table.top_chain_lengths());
        assert_eq!(6, table.collisions());
        assert_eq!(vec![3], table.occupied_indices());

        for key in [10, 17, 24, 3] {
            assert!(table.contains(key));
        }
        assert!(!table.contains(31));
        assert!(!table.contains(4));

        Ok(())
    }

    #[test]
    fn chaining_same_bucket_collisions() -> crate::Result<()> {
        let n: u64 = 100;
        let m = 101;

        let mut table = ChainedTable::new(Modulo::new(m)?, n as usize)?;

        for i in 0..n {
            table.insert(i32::try_from(i).expect("should fit") * m.cast_signed())?;
        }

        assert_eq!(n * (n - 1) / 2, table.collisions());
        assert_eq!([100, 0, 0], table.top_chain_lengths());

        Ok(())
    }

    #[test]
    fn chaining_capacity_exhausted() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(5)?, 2)?;

        table.insert(1)?;
        table.insert(6)?;

        assert!(matches!(table.insert(11), Err(Error::CapacityExhausted(2))));

        // Failed insert must not leave anything behind
        assert_eq!(2, table.len());
        assert_eq!(1, table.collisions());
        assert!(!table.contains(11));
        assert_eq!([2, 0, 0], table.top_chain_lengths());

        // ... and the table stays usable for lookups
        assert!(table.contains(1));
        assert!(table.contains(6));

        Ok(())
    }

    #[test]
    fn chaining_zero_capacity() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(5)?, 0)?;
        assert!(matches!(table.insert(1), Err(Error::CapacityExhausted(0))));
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn chaining_invalid_capacity() -> crate::Result<()> {
        assert!(matches!(
            ChainedTable::new(Modulo::new(5)?, u32::MAX as usize),
            Err(Error::InvalidCapacity(_))
        ));
        Ok(())
    }

    #[test]
    fn chaining_clear_metrics_keeps_keys() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(3)?, 11)?;

        for key in 0..10 {
            table.insert(key)?;
        }
        assert!(table.collisions() > 0);

        table.clear_metrics();
        assert_eq!(0, table.collisions());
        assert_eq!(10, table.len());
        assert!((0..10).all(|key| table.contains(key)));

        // bucket 1 already holds 1, 4 and 7
        table.insert(10)?;
        assert_eq!(3, table.collisions());

        Ok(())
    }

    #[test]
    fn chaining_top_chain_lengths_order() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(10)?, 16)?;

        // bucket 1: 1, bucket 2: 3, bucket 5: 2, bucket 7: 3
        for key in [2, 12, 22, 5, 15, 1, 7, 17, 27] {
            table.insert(key)?;
        }

        assert_eq!([3, 3, 2], table.top_chain_lengths());
        assert_eq!(4, table.occupied_slots());

        Ok(())
    }

    #[test]
    fn chaining_top_chain_lengths_sparse() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(10)?, 4)?;
        assert_eq!([0, 0, 0], table.top_chain_lengths());

        table.insert(4)?;
        table.insert(14)?;
        assert_eq!([2, 0, 0], table.top_chain_lengths());

        table.insert(9)?;
        assert_eq!([2, 1, 0], table.top_chain_lengths());

        Ok(())
    }

    #[test]
    fn chaining_bucket_gaps_do_not_wrap() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(10)?, 8)?;

        // buckets 1, 4, 8; gaps 2 and 3; chain length does not matter
        for key in [1, 4, 14, 24, 8] {
            table.insert(key)?;
        }

        let stats = table.bucket_gap_stats();
        assert_eq!(2, stats.min);
        assert!((stats.avg - 2.5).abs() < f64::EPSILON);
        assert_eq!(3, stats.max);
        assert_eq!(stats, table.gap_stats());

        Ok(())
    }

    #[test]
    fn chaining_gaps_single_bucket() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(10)?, 3)?;

        table.insert(5)?;
        table.insert(15)?;

        assert_eq!(GapStats::default(), table.bucket_gap_stats());

        Ok(())
    }

    #[test]
    fn chaining_stores_zero_key() -> crate::Result<()> {
        let mut table = ChainedTable::new(Modulo::new(7)?, 1)?;
        assert!(!table.contains(0));

        table.insert(0)?;
        assert!(table.contains(0));

        Ok(())
    }

    #[test]
    fn chaining_memory() -> crate::Result<()> {
        let table = ChainedTable::new(Modulo::new(10)?, 20)?;
        assert_eq!(10 * 4 + 20 * 4 + 20 * 4, table.memory_bytes());
        assert_eq!(20, table.node_capacity());
        Ok(())
    }
}
