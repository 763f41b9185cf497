// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

const BIT_MASK: u8 = 0b1000_0000_u8;

/// Gets a bit from the byte.
fn get_bit(byte: u8, idx: usize) -> bool {
    let bit_mask = BIT_MASK >> idx;
    let masked = byte & bit_mask;
    masked > 0
}

/// Enables the given bit in the byte.
fn enable_bit(byte: u8, idx: usize) -> u8 {
    let bit_mask = BIT_MASK >> idx;
    byte | bit_mask
}

/// Fixed-size bit array, used as occupancy map of a slot array
///
/// Bits can only be enabled, never cleared, as tables do not support deletion.
#[derive(Debug, Eq, PartialEq)]
pub struct BitArray {
    bytes: Box<[u8]>,

    /// Number of addressable bits
    len: usize,

    /// Number of enabled bits
    ones: usize,
}

impl BitArray {
    /// Creates a new bit array that can address `len` bits, all disabled.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        let vec = vec![0; len.div_ceil(8)];

        Self {
            bytes: vec.into_boxed_slice(),
            len,
            ones: 0,
        }
    }

    /// Returns the number of addressable bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bit can be addressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of enabled bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.ones
    }

    /// Returns the size of the backing storage in bytes.
    #[must_use]
    pub fn heap_size(&self) -> usize {
        self.bytes.len()
    }

    /// Sets the i-th bit to `true`.
    ///
    /// Returns `false` if the bit was already set or is out of bounds.
    pub fn enable(&mut self, idx: usize) -> bool {
        if idx >= self.len {
            return false;
        }

        let Some(byte) = self.bytes.get_mut(idx / 8) else {
            return false;
        };

        let bit_idx = idx % 8;

        if get_bit(*byte, bit_idx) {
            return false;
        }

        *byte = enable_bit(*byte, bit_idx);
        self.ones += 1;

        true
    }

    /// Gets the i-th bit.
    ///
    /// Out of bounds bits are reported as `false`.
    #[must_use]
    pub fn get(&self, idx: usize) -> bool {
        if idx >= self.len {
            return false;
        }

        self.bytes
            .get(idx / 8)
            .is_some_and(|&byte| get_bit(byte, idx % 8))
    }

    /// Iterates over the positions of all enabled bits, in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bytes
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte != 0)
            .flat_map(|(byte_idx, &byte)| {
                (0..8)
                    .filter(move |&bit_idx| get_bit(byte, bit_idx))
                    .map(move |bit_idx| byte_idx * 8 + bit_idx)
            })
    }
}
