// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{slots::Slots, HashTable, Strategy};
use crate::{hash::HashFunction, Error, GapStats, Key};

/// Open addressing with linear probing
///
/// A key is placed in the first empty slot of `h(k), h(k) + 1, ...`
/// (wrapping around at `m`).
pub struct LinearProbingTable<H: HashFunction> {
    hash: H,
    slots: Slots,
    collisions: u64,
}

impl<H: HashFunction> LinearProbingTable<H> {
    /// Creates an empty table with `hash.table_size()` slots.
    pub fn new(hash: H) -> Self {
        let slots = Slots::with_size(hash.table_size() as usize);

        Self {
            hash,
            slots,
            collisions: 0,
        }
    }

    /// Returns the hash function.
    pub fn hash_function(&self) -> &H {
        &self.hash
    }
}

impl<H: HashFunction> HashTable for LinearProbingTable<H> {
    fn strategy(&self) -> Strategy {
        Strategy::LinearProbing
    }

    fn insert(&mut self, key: Key) -> crate::Result<()> {
        let m = self.slots.size();

        if self.slots.is_full() {
            return Err(Error::TableFull(m));
        }

        let start = self.hash.index(key);
        let mut pos = start;
        let mut probes = 0;

        while self.slots.is_occupied(pos) {
            probes += 1;
            pos = (pos + 1) % m;

            if pos == start {
                return Err(Error::TableFull(m));
            }
        }

        self.slots.fill(pos, key);
        self.collisions += probes;

        Ok(())
    }

    fn contains(&self, key: Key) -> bool {
        let m = self.slots.size();

        let start = self.hash.index(key);
        let mut pos = start;

        while let Some(stored) = self.slots.get(pos) {
            if stored == key {
                return true;
            }

            pos = (pos + 1) % m;

            // Saturated table, every slot was checked
            if pos == start {
                break;
            }
        }

        false
    }

    fn collisions(&self) -> u64 {
        self.collisions
    }

    fn clear_metrics(&mut self) {
        self.collisions = 0;
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn table_size(&self) -> usize {
        self.slots.size()
    }

    fn occupied_slots(&self) -> usize {
        self.slots.len()
    }

    fn occupied_indices(&self) -> Vec<usize> {
        self.slots.occupied_positions().collect()
    }

    fn gap_stats(&self) -> GapStats {
        self.slots.gap_stats()
    }

    fn memory_bytes(&self) -> usize {
        self.slots.heap_size()
    }
}
