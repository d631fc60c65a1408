//! UserService: user profiles with guarded updates
//!
//! Same shape as the task service without the completion flag. `update`
//! runs through the mutation coordinator; `delete` does not take the key
//! lock, so an in-flight update of a concurrently deleted user ends in
//! `NotFound` and still releases its lock.

use std::sync::Arc;

use keyguard_concurrency::{MutationCoordinator, MutationMetrics, VersionPolicy};
use keyguard_core::{RecordId, Result, User, UserProfile, Version};
use keyguard_storage::RecordStore;
use tracing::{debug, info};

/// User operations over an owned store and coordinator
#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<RecordStore<User>>,
    coordinator: Arc<MutationCoordinator>,
}

impl UserService {
    /// Create a service with an empty store
    pub fn new(policy: VersionPolicy) -> Self {
        Self::from_parts(
            Arc::new(RecordStore::new()),
            Arc::new(MutationCoordinator::new(policy)),
        )
    }

    /// Assemble a service from injected state
    ///
    /// Key locks are keyed by id alone, so `coordinator` must not be shared
    /// with a service over another record type. Sharing it would make
    /// record 0 here contend with record 0 of tasks.
    pub fn from_parts(store: Arc<RecordStore<User>>, coordinator: Arc<MutationCoordinator>) -> Self {
        Self { store, coordinator }
    }

    /// Create a user
    ///
    /// # Errors
    ///
    /// `InvalidInput` if name or email is empty.
    pub fn create(&self, profile: UserProfile) -> Result<User> {
        profile.validate()?;

        let user = self.store.insert(|meta| User::new(meta, profile));
        info!(target: "keyguard::engine", id = %user.meta.id, "user created");
        Ok(user)
    }

    /// Fetch one user
    pub fn get(&self, id: RecordId) -> Result<User> {
        self.store.get(id)
    }

    /// Snapshot of all users in insertion order
    pub fn list(&self) -> Vec<User> {
        self.store.list()
    }

    /// Replace the profile under the key lock
    ///
    /// Field validation runs inside the critical section, after the record
    /// is known to exist, so a missing user reports `NotFound` even when the
    /// payload is also invalid.
    ///
    /// # Errors
    ///
    /// - `Conflict` on lock contention or a stale `expected` version
    /// - `NotFound` if the user does not exist
    /// - `InvalidInput` if a field is empty, or the strict policy needs `expected`
    /// - `Internal` on an unexpected fault (the lock is still released)
    pub fn update(
        &self,
        id: RecordId,
        profile: UserProfile,
        expected: Option<Version>,
    ) -> Result<User> {
        let user = self
            .coordinator
            .mutate(&self.store, id, expected, move |current: &User| {
                profile.validate()?;
                Ok(current.with_profile(profile))
            })?;

        debug!(
            target: "keyguard::engine",
            id = %id,
            version = %user.meta.version,
            "user updated"
        );
        Ok(user)
    }

    /// Remove a user
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub fn delete(&self, id: RecordId) -> Result<()> {
        self.store.remove(id)?;
        info!(target: "keyguard::engine", id = %id, "user deleted");
        Ok(())
    }

    /// Insert each profile in order, stopping at the first invalid one
    pub fn seed<I>(&self, profiles: I) -> Result<Vec<User>>
    where
        I: IntoIterator<Item = UserProfile>,
    {
        profiles
            .into_iter()
            .map(|profile| self.create(profile))
            .collect()
    }

    /// Number of stored users
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Mutation counters
    pub fn metrics(&self) -> MutationMetrics {
        self.coordinator.metrics()
    }

    /// Underlying coordinator
    pub fn coordinator(&self) -> &MutationCoordinator {
        &self.coordinator
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new(VersionPolicy::default())
    }
}
