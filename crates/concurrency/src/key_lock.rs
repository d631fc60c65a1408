//! Per-key mutual exclusion
//!
//! `KeyLock` keeps a table of record ids that currently have a mutation in
//! flight. Acquisition is a non-blocking try-lock: a contended key yields
//! `None` immediately instead of queueing, so callers can surface a fast,
//! retriable conflict.
//!
//! ## Release discipline
//!
//! A successful [`KeyLock::try_acquire`] returns a [`KeyGuard`]. Dropping
//! the guard releases the key, which covers every exit path: normal return,
//! early `?` return, and panic unwind.
//!
//! Every acquisition stamps the table entry with a fresh generation token.
//! A guard only removes the entry carrying its own token, so a guard that
//! outlives a forced [`KeyLock::release`] can never free a lock somebody
//! else has since taken.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use keyguard_core::RecordId;
use tracing::{debug, trace};

/// Table of currently locked record ids
///
/// Keys are sharded by `DashMap`, so acquiring or releasing one id never
/// blocks on unrelated ids beyond a brief shard lock.
#[derive(Debug, Default)]
pub struct KeyLock {
    /// Locked id -> generation token of the holder
    held: DashMap<RecordId, u64>,
    /// Source of generation tokens
    generation: AtomicU64,
}

impl KeyLock {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to lock `id` without blocking
    ///
    /// Returns `None` if another holder currently owns the key.
    pub fn try_acquire(&self, id: RecordId) -> Option<KeyGuard<'_>> {
        let token = self.generation.fetch_add(1, Ordering::Relaxed);

        match self.held.entry(id) {
            Entry::Occupied(_) => {
                debug!(target: "keyguard::lock", id = %id, "key lock contended");
                None
            }
            Entry::Vacant(slot) => {
                slot.insert(token);
                trace!(target: "keyguard::lock", id = %id, token, "key lock acquired");
                Some(KeyGuard {
                    lock: self,
                    id,
                    token,
                })
            }
        }
    }

    /// Force-release `id` regardless of holder
    ///
    /// Idempotent: releasing an unlocked id is a no-op. Returns whether an
    /// entry was removed. Prefer dropping the [`KeyGuard`].
    pub fn release(&self, id: RecordId) -> bool {
        self.held.remove(&id).is_some()
    }

    /// Whether `id` is currently locked
    pub fn is_locked(&self, id: RecordId) -> bool {
        self.held.contains_key(&id)
    }

    /// Number of ids currently locked
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    fn release_token(&self, id: RecordId, token: u64) -> bool {
        let released = self
            .held
            .remove_if(&id, |_, holder| *holder == token)
            .is_some();
        trace!(target: "keyguard::lock", id = %id, token, released, "key lock released");
        released
    }
}

/// Scoped ownership of one key; releases on drop
#[must_use = "the key is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct KeyGuard<'a> {
    lock: &'a KeyLock,
    id: RecordId,
    token: u64,
}

impl KeyGuard<'_> {
    /// The locked id
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Release explicitly
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.lock.release_token(self.id, self.token);
    }
}
