// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Instrumented hash tables for comparing collision resolution strategies.
//!
//! ##### About
//!
//! This crate implements three classic ways to resolve hash collisions over a
//! fixed-size array:
//!
//! - [`ChainedTable`]: separate chaining, with the linked lists built over flat
//!   arrays instead of per-node allocations
//! - [`LinearProbingTable`]: open addressing with unit steps
//! - [`DoubleHashingTable`]: open addressing with a per-key step size
//!
//! Each table is parameterized by a [`HashFunction`] bound to the table size,
//! and exposes the structural metrics needed to compare them: collisions
//! during insertion, gaps between occupied slots and (for chaining) the
//! longest chains.
//!
//! Keys are codes of up to 9 decimal digits, see [`Record`].
//! Tables never resize and do not support deletion.
//!
//! ```
//! use collision_tables::{hash::Modulo, ChainedTable, HashTable};
//!
//! let mut table = ChainedTable::new(Modulo::new(7)?, 4)?;
//!
//! for key in [10, 17, 24, 3] {
//!     table.insert(key)?;
//! }
//!
//! assert!(table.contains(17));
//! assert_eq!(6, table.collisions());
//! assert_eq!([4, 0, 0], table.top_chain_lengths());
//! #
//! # Ok::<(), collision_tables::Error>(())
//! ```
//!
//! With the `experiment` feature (enabled by default), the [`experiment`]
//! module can sweep table sizes, strategies and hash functions over random
//! datasets and write the measurements as CSV.

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod bit_array;

/// Experiment configuration
#[cfg(feature = "experiment")]
pub mod config;

mod error;

#[cfg(feature = "experiment")]
pub mod experiment;

pub mod gap;
pub mod hash;
mod record;
pub mod table;

/// Key stored in the tables, a code in `0..=999_999_999`
///
/// Hash functions accept any `i32` and fold negative keys to their magnitude.
pub type Key = i32;

pub use {
    error::{Error, Result},
    gap::GapStats,
    hash::{AnyHash, HashFunction, HashKind},
    record::{Record, CODE_WIDTH, MAX_CODE},
    table::{AnyTable, ChainedTable, DoubleHashingTable, HashTable, LinearProbingTable, Strategy},
};

#[cfg(feature = "experiment")]
pub use config::ExperimentConfig;
