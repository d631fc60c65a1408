//! Versioned record metadata
//!
//! Every stored entity embeds a [`RecordMeta`] and implements [`Record`].
//! The metadata is owned by the storage and concurrency layers: domain code
//! changes its own fields and leaves `id`, `version` and the timestamps to
//! [`RecordMeta::advance`].

use crate::contract::{RecordId, Timestamp, Version};
use serde::{Deserialize, Serialize};

/// Identity, version and timestamps of a record
///
/// ## Invariants
///
/// - `id` never changes after creation
/// - `version` starts at 1 and grows by exactly 1 per mutation
/// - `created_at` never changes; `updated_at >= created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    /// Stable identifier
    pub id: RecordId,
    /// Current version
    pub version: Version,
    /// Creation time
    pub created_at: Timestamp,
    /// Time of the last committed mutation
    pub updated_at: Timestamp,
}

impl RecordMeta {
    /// Metadata for a freshly created record
    pub fn new(id: RecordId, now: Timestamp) -> Self {
        RecordMeta {
            id,
            version: Version::INITIAL,
            created_at: now,
            updated_at: now,
        }
    }

    /// Metadata for the next committed version
    ///
    /// `updated_at` never moves backwards even if the wall clock does.
    /// Returns `None` if the version counter is exhausted.
    pub fn advance(&self, now: Timestamp) -> Option<Self> {
        Some(RecordMeta {
            id: self.id,
            version: self.version.next()?,
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        })
    }
}

/// A versioned entity held by a record store
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    /// Borrow the metadata
    fn meta(&self) -> &RecordMeta;

    /// Mutably borrow the metadata
    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Record id
    fn id(&self) -> RecordId {
        self.meta().id
    }

    /// Current version
    fn version(&self) -> Version {
        self.meta().version
    }
}
