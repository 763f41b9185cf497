// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Integer hash functions, each bound to a table size `m`.
//!
//! A hash function maps any [`Key`] to a slot index in `[0, m)`.
//! Negative keys are folded to their magnitude first, using
//! [`i32::unsigned_abs`], so `i32::MIN` folds to `2^31` instead of
//! overflowing back to itself.

mod mix;
mod modulo;
mod multiplicative;
mod secondary;
mod xxh3;

pub use mix::MixModulo;
pub use modulo::Modulo;
pub use multiplicative::{Multiplicative, GOLDEN_RATIO_FRACTION};
pub use secondary::DoubleHashSecondary;
pub use xxh3::Xxh3Modulo;

use crate::{Error, Key};
use enum_dispatch::enum_dispatch;
use std::str::FromStr;

/// Maps keys to slot indexes of a table with a fixed size
#[enum_dispatch]
pub trait HashFunction {
    /// Gets the short hash function name (e.g. "mod").
    fn name(&self) -> &'static str;

    /// Returns the table size `m` the function is bound to.
    fn table_size(&self) -> u32;

    /// Hashes a key to an index in `[0, m)`.
    fn index(&self, key: Key) -> usize;
}

/// Folds a key to its magnitude.
#[must_use]
pub(crate) fn fold(key: Key) -> u32 {
    key.unsigned_abs()
}

/// May be any of the hash functions of this crate
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[enum_dispatch(HashFunction)]
pub enum AnyHash {
    /// See [`Modulo`]
    Modulo(Modulo),

    /// See [`Multiplicative`]
    Multiplicative(Multiplicative),

    /// See [`MixModulo`]
    MixModulo(MixModulo),

    /// See [`Xxh3Modulo`]
    Xxh3Modulo(Xxh3Modulo),

    /// See [`DoubleHashSecondary`]
    DoubleHashSecondary(DoubleHashSecondary),
}

/// Names a primary (placement) hash function
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HashKind {
    /// `|k| mod m`
    Mod,

    /// Knuth's multiplicative method
    Mul,

    /// Xorshift scramble, then `mod m`
    Mix,

    /// XXH3, then `mod m`
    Xxh3,
}

impl HashKind {
    /// The classic functions, in sweep order.
    pub const CLASSIC: [Self; 3] = [Self::Mod, Self::Mul, Self::Mix];

    /// Returns the short name, which is also what [`HashFunction::name`] returns.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mod => "mod",
            Self::Mul => "mul",
            Self::Mix => "mix",
            Self::Xxh3 => "xxh3",
        }
    }

    /// Builds the hash function for a table of size `m`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableSize`] if `m` is 0.
    pub fn build(self, m: u32) -> crate::Result<AnyHash> {
        Ok(match self {
            Self::Mod => Modulo::new(m)?.into(),
            Self::Mul => Multiplicative::new(m)?.into(),
            Self::Mix => MixModulo::new(m)?.into(),
            Self::Xxh3 => Xxh3Modulo::new(m)?.into(),
        })
    }
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HashKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mod" | "modulo" => Ok(Self::Mod),
            "mul" | "multiplicative" => Ok(Self::Mul),
            "mix" => Ok(Self::Mix),
            "xxh3" => Ok(Self::Xxh3),
            _ => Err(Error::UnknownHashFunction(s.into())),
        }
    }
}
