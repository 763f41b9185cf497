// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{slots::Slots, HashTable, Strategy};
use crate::{hash::HashFunction, Error, GapStats, Key};

/// Open addressing with double hashing
///
/// The probe sequence of a key is `(h1(k) + i * h2(k)) mod m`.
///
/// The step function must never return 0, and the sequence only visits
/// every slot if the step is coprime to `m`, which is the case for all
/// steps if `m` is prime. Choosing a prime `m` is up to the caller.
pub struct DoubleHashingTable<H1: HashFunction, H2: HashFunction> {
    primary: H1,
    step: H2,
    slots: Slots,
    collisions: u64,
}

impl<H1: HashFunction, H2: HashFunction> DoubleHashingTable<H1, H2> {
    /// Creates an empty table with `primary.table_size()` slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableSize`] if both functions are bound
    /// to different table sizes.
    pub fn new(primary: H1, step: H2) -> crate::Result<Self> {
        if primary.table_size() != step.table_size() {
            return Err(Error::InvalidTableSize(step.table_size()));
        }

        let slots = Slots::with_size(primary.table_size() as usize);

        Ok(Self {
            primary,
            step,
            slots,
            collisions: 0,
        })
    }

    /// Returns the primary (placement) hash function.
    pub fn hash_function(&self) -> &H1 {
        &self.primary
    }

    /// Returns the step hash function.
    pub fn step_function(&self) -> &H2 {
        &self.step
    }

    /// Upper bound of probes for a single key.
    ///
    /// A probe sequence does not necessarily return to its start slot
    /// (if `gcd(step, m) != 1` it cycles over a subset of slots), so
    /// probing is bounded by count instead.
    fn max_probes(&self) -> usize {
        self.slots.size() + 1
    }
}

impl<H1: HashFunction, H2: HashFunction> HashTable for DoubleHashingTable<H1, H2> {
    fn strategy(&self) -> Strategy {
        Strategy::DoubleHashing
    }

    fn insert(&mut self, key: Key) -> crate::Result<()> {
        let m = self.slots.size();

        if self.slots.is_full() {
            return Err(Error::TableFull(m));
        }

        let step = self.step.index(key);
        let mut pos = self.primary.index(key);
        let mut probes = 0;

        while self.slots.is_occupied(pos) {
            probes += 1;

            if probes > self.max_probes() {
                return Err(Error::ProbeExhausted(key));
            }

            pos = (pos + step) % m;
        }

        self.slots.fill(pos, key);
        self.collisions += probes as u64;

        Ok(())
    }

    fn contains(&self, key: Key) -> bool {
        let m = self.slots.size();

        let step = self.step.index(key);
        let mut pos = self.primary.index(key);
        let mut probes = 0;

        while let Some(stored) = self.slots.get(pos) {
            if stored == key {
                return true;
            }

            probes += 1;

            if probes > self.max_probes() {
                break;
            }

            pos = (pos + step) % m;
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
