// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    bit_array::BitArray,
    gap::{GapStats, Wraparound},
    Key,
};

/// Slot array of an open addressing table
///
/// Keys live in a flat array, occupancy is tracked in a separate bit array
/// because 0 is a valid key.
pub struct Slots {
    keys: Box<[Key]>,
    occupied: BitArray,
}

impl Slots {
    /// Creates `size` empty slots.
    pub fn with_size(size: usize) -> Self {
        Self {
            keys: vec![0; size].into_boxed_slice(),
            occupied: BitArray::with_len(size),
        }
    }

    /// Number of slots (`m`).
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied.count_ones()
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.size()
    }

    pub fn is_occupied(&self, pos: usize) -> bool {
        self.occupied.get(pos)
    }

    /// Returns the key stored at `pos`, if the slot is occupied.
    pub fn get(&self, pos: usize) -> Option<Key> {
        if self.occupied.get(pos) {
            self.keys.get(pos).copied()
        } else {
            None
        }
    }

    /// Stores a key in an empty slot.
    ///
    /// Occupied slots are never overwritten.
    pub fn fill(&mut self, pos: usize, key: Key) {
        debug_assert!(!self.is_occupied(pos), "slot {pos} is already occupied");

        if let Some(slot) = self.keys.get_mut(pos) {
            if self.occupied.enable(pos) {
                *slot = key;
            }
        }
    }

    /// Occupied positions, ascending.
    pub fn occupied_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.occupied.iter_ones()
    }

    pub fn gap_stats(&self) -> GapStats {
        GapStats::from_positions(self.occupied_positions(), self.size(), Wraparound::Wrap)
    }

    /// Heap memory used by the slot array and the occupancy map, in bytes.
    pub fn heap_size(&self) -> usize {
        std::mem::size_of_val::<[Key]>(&self.keys) + self.occupied.heap_size()
    }
}
