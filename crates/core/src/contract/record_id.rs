//! Record identifiers
//!
//! Ids are allocated from a monotonically increasing counter and never
//! reused, even after the record is deleted. Adapters usually receive ids
//! as path segments, so parsing is part of the contract: a malformed id is
//! an `InvalidInput` error, never a `NotFound`.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable integer identifier of a record within its store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw id
    #[inline]
    pub const fn new(id: u64) -> Self {
        RecordId(id)
    }

    /// Raw numeric value
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(RecordId)
            .map_err(|_| Error::invalid_input(format!("invalid id format: {:?}", s)))
    }
}
