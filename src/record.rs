// Copyright (c) 2025-present, collision-tables
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{Error, Key};
use std::str::FromStr;

/// Largest valid code (9 digits)
pub const MAX_CODE: Key = 999_999_999;

/// Width of the canonical textual form
pub const CODE_WIDTH: usize = 9;

/// A validated code of up to 9 decimal digits
///
/// Tables store the raw [`Key`], a record is the checked value
/// handed in at the boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record(Key);

impl Record {
    /// Creates a new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCode`] if the value is not in `0..=999_999_999`.
    pub fn new(value: i64) -> crate::Result<Self> {
        if !(0..=i64::from(MAX_CODE)).contains(&value) {
            return Err(Error::InvalidCode(value));
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "range was checked above, so the code fits into an i32"
        )]
        Ok(Self(value as Key))
    }

    /// Returns the code.
    #[must_use]
    pub fn value(&self) -> Key {
        self.0
    }

    /// Returns the code zero-padded to 9 digits.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{:0width$}", self.0, width = CODE_WIDTH)
    }
}

impl TryFrom<i64> for Record {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Record> for Key {
    fn from(value: Record) -> Self {
        value.0
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$}", self.0, width = CODE_WIDTH)
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidCode(-1))?;

        Self::new(value)
    }
}
