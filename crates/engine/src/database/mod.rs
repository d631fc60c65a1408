//! Database struct and open logic
//!
//! A `Database` owns one task service and one user service. Each service has
//! its own record store, id counter and mutation coordinator; they share the
//! version policy and the optional mutation hook.
//!
//! Nothing is persisted. Opening always starts from empty stores plus any
//! `seed_users` named in the config.

mod config;

pub use config::{KeyguardConfig, CONFIG_FILE_NAME};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use keyguard_concurrency::{MutationCoordinator, MutationHook, MutationMetrics, VersionPolicy};
use keyguard_core::{Result, Timestamp};
use keyguard_storage::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::primitives::{TaskService, UserService};

/// Point-in-time counters for the whole database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    /// Stored tasks
    pub tasks: usize,
    /// Stored users
    pub users: usize,
    /// Task mutation counters
    pub task_mutations: MutationMetrics,
    /// User mutation counters
    pub user_mutations: MutationMetrics,
}

/// In-memory task and user database
#[derive(Debug)]
pub struct Database {
    config: KeyguardConfig,
    policy: VersionPolicy,
    tasks: TaskService,
    users: UserService,
    started_at: Timestamp,
}

impl Database {
    /// Open a database from a config, seeding users in order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the policy string or a seed profile is invalid.
    pub fn open(config: KeyguardConfig) -> Result<Self> {
        Self::open_inner(config, None)
    }

    /// Open with a hook that runs inside every critical section
    ///
    /// Used by tests to park a mutator while it holds a key lock.
    pub fn open_with_hook(config: KeyguardConfig, hook: Arc<dyn MutationHook>) -> Result<Self> {
        Self::open_inner(config, Some(hook))
    }

    /// Open from a TOML config file
    pub fn open_from_file(path: &Path) -> Result<Self> {
        Self::open(KeyguardConfig::from_file(path)?)
    }

    /// Open with the default config
    pub fn ephemeral() -> Self {
        let config = KeyguardConfig::default();
        let policy = VersionPolicy::default();
        Self::assemble(config, policy, None)
    }

    fn open_inner(config: KeyguardConfig, hook: Option<Arc<dyn MutationHook>>) -> Result<Self> {
        config.validate()?;
        let policy = config.version_policy()?;

        let db = Self::assemble(config, policy, hook);
        let seeded = db.users.seed(db.config.seed_users.iter().cloned())?;

        info!(
            target: "keyguard::engine",
            policy = %policy,
            seeded = seeded.len(),
            "database opened"
        );
        Ok(db)
    }

    fn assemble(
        config: KeyguardConfig,
        policy: VersionPolicy,
        hook: Option<Arc<dyn MutationHook>>,
    ) -> Self {
        let coordinator = || {
            let coordinator = MutationCoordinator::new(policy);
            let coordinator = match &hook {
                Some(hook) => coordinator.with_hook(Arc::clone(hook)),
                None => coordinator,
            };
            Arc::new(coordinator)
        };

        let tasks = TaskService::from_parts(Arc::new(RecordStore::new()), coordinator());
        let users = UserService::from_parts(Arc::new(RecordStore::new()), coordinator());

        Self {
            config,
            policy,
            tasks,
            users,
            started_at: Timestamp::now(),
        }
    }

    /// Task operations
    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    /// User operations
    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// Config the database was opened with
    pub fn config(&self) -> &KeyguardConfig {
        &self.config
    }

    /// Active version policy
    pub fn policy(&self) -> VersionPolicy {
        self.policy
    }

    /// When the database was opened
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Time since open
    pub fn uptime(&self) -> Duration {
        Timestamp::now()
            .duration_since(self.started_at)
            .unwrap_or_default()
    }

    /// Record counts and mutation counters
    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            tasks: self.tasks.count(),
            users: self.users.count(),
            task_mutations: self.tasks.metrics(),
            user_mutations: self.users.metrics(),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::ephemeral()
    }
}
