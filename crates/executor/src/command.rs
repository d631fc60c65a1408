//! Command enum defining every keyguard operation.
//!
//! Commands carry request data in the shape a transport hands it over: ids
//! and version tokens as raw text, bodies as JSON values. Parsing and
//! validation happen in the handlers, so malformed input surfaces as
//! `Error::InvalidInput` instead of failing at deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StatusCode;

/// A self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Task | 5 | Create, get, list, toggle, delete completed |
/// | User | 5 | Create, get, list, update, delete |
/// | Server | 1 | Status |
///
/// # Example
///
/// ```
/// use keyguard_executor::Command;
///
/// let cmd = Command::TaskToggle {
///     id: "0".into(),
///     if_match: Some("1".into()),
/// };
/// assert_eq!(cmd.name(), "TaskToggle");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Task (5) ====================
    /// Create a task from `{"title": "..."}`.
    /// Returns: `Output::Task`
    TaskCreate {
        /// Request body
        payload: Value,
    },

    /// List tasks. `"true"`/`"false"` filter on completion; anything else
    /// lists everything.
    /// Returns: `Output::Tasks`
    TaskList {
        /// Raw `completed` filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        completed: Option<String>,
    },

    /// Fetch one task.
    /// Returns: `Output::Task`
    TaskGet {
        /// Raw task id
        id: String,
    },

    /// Flip a task's completion flag.
    /// Returns: `Output::Task`
    TaskToggle {
        /// Raw task id
        id: String,
        /// `If-Match`-style expected version
        #[serde(default, skip_serializing_if = "Option::is_none")]
        if_match: Option<String>,
    },

    /// Remove every completed task.
    /// Returns: `Output::Removed`
    TaskDeleteCompleted,

    // ==================== User (5) ====================
    /// Create a user from `{"name": "...", "email": "..."}`.
    /// Returns: `Output::User`
    UserCreate {
        /// Request body
        payload: Value,
    },

    /// List all users.
    /// Returns: `Output::Users`
    UserList,

    /// Fetch one user.
    /// Returns: `Output::User`
    UserGet {
        /// Raw user id
        id: String,
    },

    /// Replace a user's name and email.
    /// Returns: `Output::User`
    UserUpdate {
        /// Raw user id
        id: String,
        /// Request body
        payload: Value,
        /// `If-Match`-style expected version
        #[serde(default, skip_serializing_if = "Option::is_none")]
        if_match: Option<String>,
    },

    /// Remove a user.
    /// Returns: `Output::Unit`
    UserDelete {
        /// Raw user id
        id: String,
    },

    // ==================== Server (1) ====================
    /// Uptime, request count and store counters.
    /// Returns: `Output::Status`
    Status,
}

impl Command {
    /// Variant name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::TaskCreate { .. } => "TaskCreate",
            Command::TaskList { .. } => "TaskList",
            Command::TaskGet { .. } => "TaskGet",
            Command::TaskToggle { .. } => "TaskToggle",
            Command::TaskDeleteCompleted => "TaskDeleteCompleted",
            Command::UserCreate { .. } => "UserCreate",
            Command::UserList => "UserList",
            Command::UserGet { .. } => "UserGet",
            Command::UserUpdate { .. } => "UserUpdate",
            Command::UserDelete { .. } => "UserDelete",
            Command::Status => "Status",
        }
    }

    /// Status reported when the command succeeds.
    pub fn success_status(&self) -> StatusCode {
        match self {
            Command::TaskCreate { .. } | Command::UserCreate { .. } => StatusCode::Created,
            Command::UserDelete { .. } => StatusCode::NoContent,
            _ => StatusCode::Ok,
        }
    }

    /// Whether the command can change stored state.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::TaskCreate { .. }
                | Command::TaskToggle { .. }
                | Command::TaskDeleteCompleted
                | Command::UserCreate { .. }
                | Command::UserUpdate { .. }
                | Command::UserDelete { .. }
        )
    }
}
