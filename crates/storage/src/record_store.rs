//! RecordStore: in-memory owner of versioned records
//!
//! This module implements the authoritative record collection using:
//! - `BTreeMap<RecordId, T>` so iteration follows id (and thus insertion) order
//! - `parking_lot::RwLock` for thread-safe access
//! - A shared [`IdAllocator`] for monotonically increasing ids
//!
//! # Design Notes
//!
//! - **Copies out, never references**: every read returns owned clones, so
//!   callers cannot mutate store state except through [`RecordStore::replace`].
//! - **Snapshots**: `list` clones the matching records under one read lock;
//!   later mutations never leak into an in-flight listing.
//! - **No resurrection**: `replace` fails with `NotFound` for a removed id
//!   instead of re-inserting it.
//! - **Single-key atomicity only**: each call is indivisible, but multi-step
//!   read-check-write sequences must be serialized by the caller holding the
//!   key lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use keyguard_core::{Error, Record, RecordId, RecordMeta, Result, Timestamp};

use crate::allocator::IdAllocator;

/// Generic owner of a collection of versioned records keyed by id
#[derive(Debug)]
pub struct RecordStore<T> {
    /// Committed records, ordered by id
    records: RwLock<BTreeMap<RecordId, T>>,
    /// Id counter (possibly shared with other stores)
    ids: Arc<IdAllocator>,
}

impl<T: Record> RecordStore<T> {
    /// Create an empty store with its own id counter starting at 0
    pub fn new() -> Self {
        Self::with_allocator(Arc::new(IdAllocator::new()))
    }

    /// Create an empty store drawing ids from `ids`
    pub fn with_allocator(ids: Arc<IdAllocator>) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            ids,
        }
    }

    /// Allocate an id, build the record, store it and return a copy
    ///
    /// The factory receives fresh metadata (next id, version 1, both
    /// timestamps set to now). Whatever metadata the factory leaves on the
    /// record is overwritten with that fresh metadata before storing.
    ///
    /// The id is allocated under the write lock so ids enter the map in
    /// allocation order.
    pub fn insert<F>(&self, factory: F) -> T
    where
        F: FnOnce(RecordMeta) -> T,
    {
        let mut records = self.records.write();
        let meta = RecordMeta::new(self.ids.allocate(), Timestamp::now());
        let mut record = factory(meta);
        *record.meta_mut() = meta;
        records.insert(meta.id, record.clone());

        trace!(target: "keyguard::storage", entity = T::ENTITY, id = %meta.id, "record inserted");
        record
    }

    /// Copy of the current record for `id`
    pub fn get(&self, id: RecordId) -> Result<T> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(T::ENTITY, id))
    }

    /// Whether `id` is currently stored
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.read().contains_key(&id)
    }

    /// Snapshot of every record, in insertion order
    pub fn list(&self) -> Vec<T> {
        self.records.read().values().cloned().collect()
    }

    /// Snapshot of the records matching `predicate`, in insertion order
    pub fn list_where<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records
            .read()
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Atomically overwrite the stored record for `id`
    ///
    /// Callers must hold the key lock for `id`. Fails with `NotFound` if the
    /// record was removed in the meantime, and with `Internal` if the new
    /// record carries a different id.
    pub fn replace(&self, id: RecordId, record: T) -> Result<()> {
        if record.id() != id {
            return Err(Error::internal(format!(
                "replacement for {} {} carries id {}",
                T::ENTITY,
                id,
                record.id()
            )));
        }

        let mut records = self.records.write();
        let slot = records
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))?;
        *slot = record;

        trace!(target: "keyguard::storage", entity = T::ENTITY, id = %id, "record replaced");
        Ok(())
    }

    /// Remove the record for `id`, returning it
    pub fn remove(&self, id: RecordId) -> Result<T> {
        let removed = self
            .records
            .write()
            .remove(&id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))?;

        trace!(target: "keyguard::storage", entity = T::ENTITY, id = %id, "record removed");
        Ok(removed)
    }

    /// Remove every record matching `predicate`, returning the removed ones
    ///
    /// Each record is either kept whole or removed whole; the sweep runs
    /// under a single write lock.
    pub fn remove_where<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let mut records = self.records.write();
        let doomed: Vec<RecordId> = records
            .iter()
            .filter(|(_, record)| predicate(record))
            .map(|(id, _)| *id)
            .collect();

        let removed: Vec<T> = doomed
            .iter()
            .filter_map(|id| records.remove(id))
            .collect();

        trace!(target: "keyguard::storage", entity = T::ENTITY, count = removed.len(), "records swept");
        removed
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// The id the next insert will receive
    pub fn next_id(&self) -> RecordId {
        self.ids.peek()
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
