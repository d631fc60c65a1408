//! TaskService: to-do items with guarded toggling
//!
//! ## API
//!
//! - `create`, `get`, `list`: plain store access
//! - `toggle`: lock -> version check -> flip `completed` -> commit -> unlock
//! - `delete_completed`: sweep of every completed task
//!
//! `delete_completed` does not take key locks. A toggle racing with it sees
//! the task either before or after removal (surfacing `NotFound` in the
//! latter case) but never a half-written record.

use std::sync::Arc;

use keyguard_concurrency::{MutationCoordinator, MutationMetrics, VersionPolicy};
use keyguard_core::{RecordId, Result, Task, Version};
use keyguard_storage::RecordStore;
use tracing::{debug, info};

/// Task operations over an owned store and coordinator
///
/// Cloning is cheap and clones share state.
///
/// ## Example
///
/// ```
/// use keyguard_engine::TaskService;
/// use keyguard_core::Version;
///
/// let tasks = TaskService::default();
/// let task = tasks.create("buy milk").unwrap();
/// let done = tasks.toggle(task.meta.id, Some(Version::INITIAL)).unwrap();
/// assert!(done.completed);
/// ```
#[derive(Debug, Clone)]
pub struct TaskService {
    store: Arc<RecordStore<Task>>,
    coordinator: Arc<MutationCoordinator>,
}

impl TaskService {
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
    /// record 0 here contend with record 0 of users.
    pub fn from_parts(store: Arc<RecordStore<Task>>, coordinator: Arc<MutationCoordinator>) -> Self {
        Self { store, coordinator }
    }

    /// Create an incomplete task
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `title` is empty.
    pub fn create(&self, title: impl Into<String>) -> Result<Task> {
        let title = title.into();
        Task::validate_title(&title)?;

        let task = self.store.insert(|meta| Task::new(meta, title));
        info!(target: "keyguard::engine", id = %task.meta.id, "task created");
        Ok(task)
    }

    /// Fetch one task
    pub fn get(&self, id: RecordId) -> Result<Task> {
        self.store.get(id)
    }

    /// Snapshot of tasks, optionally filtered by exact `completed` match
    ///
    /// Results come back in insertion order.
    pub fn list(&self, completed: Option<bool>) -> Vec<Task> {
        match completed {
            Some(flag) => self.store.list_where(|task| task.completed == flag),
            None => self.store.list(),
        }
    }

    /// Flip `completed` under the key lock
    ///
    /// # Errors
    ///
    /// - `Conflict` if another mutation holds the task or `expected` is stale
    /// - `NotFound` if the task does not exist
    /// - `InvalidInput` if the strict policy is active and `expected` is `None`
    /// - `Internal` on an unexpected fault (the lock is still released)
    pub fn toggle(&self, id: RecordId, expected: Option<Version>) -> Result<Task> {
        let task = self
            .coordinator
            .mutate(&self.store, id, expected, |current: &Task| Ok(current.toggled()))?;

        debug!(
            target: "keyguard::engine",
            id = %id,
            version = %task.meta.version,
            completed = task.completed,
            "task toggled"
        );
        Ok(task)
    }

    /// Remove every completed task, returning how many were removed
    pub fn delete_completed(&self) -> usize {
        let removed = self.store.remove_where(|task| task.completed).len();
        info!(target: "keyguard::engine", removed, "completed tasks deleted");
        removed
    }

    /// Number of stored tasks
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

impl Default for TaskService {
    fn default() -> Self {
        Self::new(VersionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyguard_core::{ConflictReason, Error, ErrorKind};

    #[test]
    fn test_create_returns_version_one_incomplete() {
        let tasks = TaskService::default();
        let task = tasks.create("buy milk").unwrap();
        assert_eq!(task.meta.id, RecordId::new(0));
        assert_eq!(task.title, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.meta.version, Version::INITIAL);
    }

    #[test]
    fn test_create_empty_title_rejected() {
        let tasks = TaskService::default();
        let err = tasks.create("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(tasks.count(), 0);
    }

    #[test]
    fn test_toggle_scenario() {
        let tasks = TaskService::default();
        tasks.create("buy milk").unwrap();
        let id = RecordId::new(0);

        let toggled = tasks.toggle(id, None).unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.meta.version, Version::new(2));

        let err = tasks.toggle(id, Some(Version::new(1))).unwrap_err();
        assert!(matches!(
            err,
            Error::Conflict {
                reason: ConflictReason::VersionMismatch { .. }
            }
        ));

        let stored = tasks.get(id).unwrap();
        assert_eq!(stored.meta.version, Version::new(2));
        assert!(stored.completed);
    }

    #[test]
    fn test_toggle_missing_is_not_found() {
        let tasks = TaskService::default();
        let err = tasks.toggle(RecordId::new(3), None).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(tasks.coordinator().locks().held_count(), 0);
    }

    #[test]
    fn test_toggle_preserves_created_at() {
        let tasks = TaskService::default();
        let task = tasks.create("x").unwrap();
        let toggled = tasks.toggle(task.meta.id, None).unwrap();
        assert_eq!(toggled.meta.created_at, task.meta.created_at);
        assert!(toggled.meta.updated_at >= task.meta.updated_at);
    }

    #[test]
    fn test_list_filter_exact_subset_in_order() {
        let tasks = TaskService::default();
        for title in ["a", "b", "c", "d"] {
            tasks.create(title).unwrap();
        }
        tasks.toggle(RecordId::new(1), None).unwrap();
        tasks.toggle(RecordId::new(3), None).unwrap();

        let done: Vec<_> = tasks.list(Some(true)).into_iter().map(|t| t.title).collect();
        let open: Vec<_> = tasks.list(Some(false)).into_iter().map(|t| t.title).collect();
        assert_eq!(done, vec!["b", "d"]);
        assert_eq!(open, vec!["a", "c"]);
        assert_eq!(tasks.list(None).len(), 4);
    }

    #[test]
    fn test_delete_completed_removes_only_completed() {
        let tasks = TaskService::default();
        tasks.create("done").unwrap();
        tasks.create("open").unwrap();
        tasks.toggle(RecordId::new(0), None).unwrap();

        assert_eq!(tasks.delete_completed(), 1);
        let remaining = tasks.list(None);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "open");
        assert!(tasks.get(RecordId::new(0)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_ids_not_reused_after_delete_completed() {
        let tasks = TaskService::default();
        tasks.create("a").unwrap();
        tasks.toggle(RecordId::new(0), None).unwrap();
        tasks.delete_completed();
        let next = tasks.create("b").unwrap();
        assert_eq!(next.meta.id, RecordId::new(1));
    }

    #[test]
    fn test_clones_share_state() {
        let tasks = TaskService::default();
        let other = tasks.clone();
        tasks.create("shared").unwrap();
        assert_eq!(other.count(), 1);
    }

    #[test]
    fn test_metrics_track_outcomes() {
        let tasks = TaskService::default();
        tasks.create("a").unwrap();
        tasks.toggle(RecordId::new(0), None).unwrap();
        let _ = tasks.toggle(RecordId::new(0), Some(Version::new(1)));
        let _ = tasks.toggle(RecordId::new(9), None);

        let metrics = tasks.metrics();
        assert_eq!(metrics.committed, 1);
        assert_eq!(metrics.version_conflicts, 1);
        assert_eq!(metrics.not_found, 1);
    }
}
