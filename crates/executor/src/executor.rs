//! The Executor - single entry point to the keyguard services.
//!
//! The Executor routes commands to the task and user services and converts
//! results to outputs. Its only own state is the request counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use keyguard_engine::{Database, KeyguardConfig};
use tracing::{debug, error};

use crate::handlers::{tasks, users};
use crate::types::StatusInfo;
use crate::{Command, Output, Response, Result};

/// The command executor.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```
/// use keyguard_executor::{Command, Executor, Output, StatusCode};
/// use serde_json::json;
///
/// let executor = Executor::ephemeral();
///
/// let created = executor.respond(Command::TaskCreate {
///     payload: json!({"title": "buy milk"}),
/// });
/// assert_eq!(created.status, StatusCode::Created);
///
/// let toggled = executor.execute(Command::TaskToggle {
///     id: "0".into(),
///     if_match: Some("1".into()),
/// }).unwrap();
/// assert!(matches!(toggled, Output::Task(task) if task.completed));
/// ```
#[derive(Debug)]
pub struct Executor {
    db: Arc<Database>,
    requests: AtomicU64,
}

impl Executor {
    /// Create a new executor wrapping a database.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            requests: AtomicU64::new(0),
        }
    }

    /// Open a database from `config` and wrap it.
    pub fn open(config: KeyguardConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(Database::open(config)?)))
    }

    /// Executor over an empty permissive database.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(Database::ephemeral()))
    }

    /// The wrapped database.
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Commands executed so far.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let request = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(target: "keyguard::executor", request, command = cmd.name(), "executing");

        let db = self.db.as_ref();
        match cmd {
            // Task commands
            Command::TaskCreate { payload } => tasks::task_create(db, &payload),
            Command::TaskList { completed } => tasks::task_list(db, completed.as_deref()),
            Command::TaskGet { id } => tasks::task_get(db, &id),
            Command::TaskToggle { id, if_match } => {
                tasks::task_toggle(db, &id, if_match.as_deref())
            }
            Command::TaskDeleteCompleted => tasks::task_delete_completed(db),

            // User commands
            Command::UserCreate { payload } => users::user_create(db, &payload),
            Command::UserList => users::user_list(db),
            Command::UserGet { id } => users::user_get(db, &id),
            Command::UserUpdate {
                id,
                payload,
                if_match,
            } => users::user_update(db, &id, &payload, if_match.as_deref()),
            Command::UserDelete { id } => users::user_delete(db, &id),

            // Server
            Command::Status => Ok(Output::Status(StatusInfo {
                uptime: self.db.uptime().as_secs_f64(),
                request_count: request,
                version: env!("CARGO_PKG_VERSION").to_string(),
                stats: self.db.stats(),
            })),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Every command runs; one failure does not stop the rest.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Execute a command and render a transport response.
    ///
    /// System faults are logged with full detail and answered with a
    /// generic 500 body.
    pub fn respond(&self, cmd: Command) -> Response {
        let success = cmd.success_status();
        let name = cmd.name();
        let write = cmd.is_write();

        let rendered = self
            .execute(cmd)
            .and_then(|output| Ok(output.to_body()?));

        match rendered {
            Ok(body) => Response::new(success, body),
            Err(err) => {
                let status = err.status();
                if status.as_u16() >= 500 {
                    error!(target: "keyguard::executor", command = name, write, %err, "command failed");
                } else {
                    debug!(target: "keyguard::executor", command = name, write, %status, %err, "command rejected");
                }
                Response::error(status, err.client_message())
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::ephemeral()
    }
}
