// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::Key;

/// Represents errors that can occur while building or filling a table
#[derive(Debug)]
pub enum Error {
    /// Code is outside of `0..=999_999_999`
    InvalidCode(i64),

    /// Table size is too small for the hash function,
    /// or primary and step function disagree on the size
    InvalidTableSize(u32),

    /// Node capacity can not be addressed by a node handle
    InvalidCapacity(usize),

    /// All nodes of a chained table are in use (capacity)
    CapacityExhausted(usize),

    /// No empty slot left in an open addressing table (table size)
    TableFull(usize),

    /// The probe sequence of the key only visits occupied slots
    ProbeExhausted(Key),

    /// Unknown hash function name
    UnknownHashFunction(String),

    /// Unknown collision resolution strategy name
    UnknownStrategy(String),

    /// An inserted key could not be found again
    LookupMiss(Key),

    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CollisionTablesError: {self:?}")
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
