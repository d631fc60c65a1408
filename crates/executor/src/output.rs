//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant.

use keyguard_core::{Task, User};
use serde::{Deserialize, Serialize};

use crate::types::StatusInfo;

/// Successful command execution results.
///
/// ```text
/// match executor.execute(Command::TaskGet { id: "0".into() })? {
///     Output::Task(task) => println!("{}", task.title),
///     _ => unreachable!("TaskGet always returns Task"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (user delete)
    Unit,

    /// One task
    Task(Task),

    /// Tasks in insertion order
    Tasks(Vec<Task>),

    /// One user
    User(User),

    /// Users in insertion order
    Users(Vec<User>),

    /// Removal acknowledgment
    Removed {
        /// Number of records removed
        count: usize,
    },

    /// Server status
    Status(StatusInfo),
}

impl Output {
    /// Body rendered to the client, `None` for bodiless outputs.
    pub fn to_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        let body = match self {
            Output::Unit => return Ok(None),
            Output::Task(task) => serde_json::to_value(task)?,
            Output::Tasks(tasks) => serde_json::to_value(tasks)?,
            Output::User(user) => serde_json::to_value(user)?,
            Output::Users(users) => serde_json::to_value(users)?,
            Output::Removed { count } => serde_json::json!({
                "message": "Completed tasks deleted",
                "removed": count,
            }),
            Output::Status(status) => serde_json::to_value(status)?,
        };
        Ok(Some(body))
    }
}
