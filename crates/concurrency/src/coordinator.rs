//! Mutation coordinator: the guarded read-check-write pipeline
//!
//! Every single-record mutation runs the same sequence:
//!
//! ```text
//! 1. try_acquire(id)       - Conflict if another mutation holds the key
//! 2. hook.on_locked(id)    - optional observer (tests park threads here)
//! 3. store.get(id)         - NotFound if the record is gone
//! 4. version_guard.check   - Conflict on a stale expected version
//! 5. apply(&current)       - caller computes the new domain state
//! 6. advance metadata      - version + 1, updated_at = now
//! 7. store.replace(id, ..) - commit point
//! 8. release(id)           - always, on every exit path
//! ```
//!
//! Steps 2-7 run inside `catch_unwind`. A panic there is converted into an
//! `Internal` error after the key guard has been dropped, so a faulting
//! mutation can never leak its lock.
//!
//! Only one id is ever locked per call, so the coordinator cannot deadlock.
//!
//! # Memory Ordering
//!
//! Metric counters use Relaxed ordering. They are observational only and do
//! not synchronize any other memory.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use keyguard_core::{Error, ErrorKind, Record, RecordId, Result, Timestamp, Version};
use keyguard_storage::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::key_lock::KeyLock;
use crate::version_guard::{VersionGuard, VersionPolicy};

/// Observer invoked inside the critical section
///
/// Runs while the key lock is held and before the record is read. Tests use
/// it to park a mutator mid-flight and deterministically exercise
/// interleavings.
pub trait MutationHook: Send + Sync {
    /// Called right after the key lock for `id` has been acquired
    fn on_locked(&self, id: RecordId);
}

impl<F> MutationHook for F
where
    F: Fn(RecordId) + Send + Sync,
{
    fn on_locked(&self, id: RecordId) {
        self(id)
    }
}

/// Point-in-time copy of the coordinator's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationMetrics {
    /// Mutations that reached the commit point
    pub committed: u64,
    /// Rejected because the key lock was held
    pub lock_conflicts: u64,
    /// Rejected by the version guard
    pub version_conflicts: u64,
    /// Target record did not exist
    pub not_found: u64,
    /// Rejected as invalid input inside the critical section
    pub invalid_input: u64,
    /// Unexpected faults converted to `Internal`
    pub internal_faults: u64,
}

#[derive(Debug, Default)]
struct Counters {
    committed: AtomicU64,
    lock_conflicts: AtomicU64,
    version_conflicts: AtomicU64,
    not_found: AtomicU64,
    invalid_input: AtomicU64,
    internal_faults: AtomicU64,
}

/// Runs guarded single-record mutations against a [`RecordStore`]
///
/// One coordinator serves one store; its lock table is keyed by that
/// store's ids.
pub struct MutationCoordinator {
    locks: KeyLock,
    guard: VersionGuard,
    hook: Option<Arc<dyn MutationHook>>,
    counters: Counters,
}

impl MutationCoordinator {
    /// Create a coordinator with the given version policy
    pub fn new(policy: VersionPolicy) -> Self {
        Self {
            locks: KeyLock::new(),
            guard: VersionGuard::new(policy),
            hook: None,
            counters: Counters::default(),
        }
    }

    /// Install a hook that runs inside every critical section
    pub fn with_hook(mut self, hook: Arc<dyn MutationHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// The per-key lock table
    pub fn locks(&self) -> &KeyLock {
        &self.locks
    }

    /// Active version policy
    pub fn policy(&self) -> VersionPolicy {
        self.guard.policy()
    }

    /// Snapshot the counters
    pub fn metrics(&self) -> MutationMetrics {
        let c = &self.counters;
        MutationMetrics {
            committed: c.committed.load(Ordering::Relaxed),
            lock_conflicts: c.lock_conflicts.load(Ordering::Relaxed),
            version_conflicts: c.version_conflicts.load(Ordering::Relaxed),
            not_found: c.not_found.load(Ordering::Relaxed),
            invalid_input: c.invalid_input.load(Ordering::Relaxed),
            internal_faults: c.internal_faults.load(Ordering::Relaxed),
        }
    }

    /// Lock `id`, check `expected`, apply `apply` and commit
    ///
    /// `apply` receives a copy of the current record and returns the new
    /// domain state. Its metadata is replaced with the advanced metadata of
    /// `current`, so `apply` cannot break the versioning invariants.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the key is locked or `expected` is stale
    /// - `NotFound` if the record does not exist
    /// - `InvalidInput` if the policy demands an expected version, or `apply` rejects
    /// - `Internal` on any panic or unexpected fault in the critical section
    pub fn mutate<T, F>(
        &self,
        store: &RecordStore<T>,
        id: RecordId,
        expected: Option<Version>,
        apply: F,
    ) -> Result<T>
    where
        T: Record,
        F: FnOnce(&T) -> Result<T>,
    {
        let key = match self.locks.try_acquire(id) {
            Some(key) => key,
            None => {
                self.counters.lock_conflicts.fetch_add(1, Ordering::Relaxed);
                return Err(Error::key_locked(id));
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.critical_section(store, id, expected, apply)
        }));

        // Release before anything is surfaced to the caller
        drop(key);

        let result = outcome.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            warn!(
                target: "keyguard::lock",
                entity = T::ENTITY,
                id = %id,
                panic = %message,
                "fault inside critical section, lock released"
            );
            Err(Error::internal(format!(
                "unexpected fault while modifying {} {}: {}",
                T::ENTITY,
                id,
                message
            )))
        });

        self.record_outcome(&result);
        result
    }

    fn critical_section<T, F>(
        &self,
        store: &RecordStore<T>,
        id: RecordId,
        expected: Option<Version>,
        apply: F,
    ) -> Result<T>
    where
        T: Record,
        F: FnOnce(&T) -> Result<T>,
    {
        if let Some(hook) = &self.hook {
            hook.on_locked(id);
        }

        let current = store.get(id)?;
        self.guard.check(id, current.version(), expected)?;

        let mut next = apply(&current)?;
        *next.meta_mut() = current.meta().advance(Timestamp::now()).ok_or_else(|| {
            Error::internal(format!("version counter exhausted for {} {}", T::ENTITY, id))
        })?;

        store.replace(id, next.clone())?;

        debug!(
            target: "keyguard::lock",
            entity = T::ENTITY,
            id = %id,
            version = %next.version(),
            "mutation committed"
        );
        Ok(next)
    }

    fn record_outcome<T>(&self, result: &Result<T>) {
        let counter = match result {
            Ok(_) => &self.counters.committed,
            Err(Error::Conflict { .. }) => &self.counters.version_conflicts,
            Err(e) => match e.kind() {
                ErrorKind::NotFound => &self.counters.not_found,
                ErrorKind::InvalidInput => &self.counters.invalid_input,
                _ => &self.counters.internal_faults,
            },
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for MutationCoordinator {
    fn default() -> Self {
        Self::new(VersionPolicy::default())
    }
}

impl std::fmt::Debug for MutationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationCoordinator")
            .field("locks", &self.locks)
            .field("guard", &self.guard)
            .field("hook", &self.hook.is_some())
            .field("metrics", &self.metrics())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "(non-string panic)".to_string()
    }
}
