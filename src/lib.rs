//! Keyguard - in-memory versioned record store
//!
//! Tasks and users live in memory behind per-record locks and version
//! checks. A concurrent mutation of the same record is rejected with a
//! conflict instead of waiting, and a caller that echoes a stale version
//! never overwrites a newer write.
//!
//! # Quick Start
//!
//! ```
//! use keyguard::{Command, Executor, StatusCode};
//! use serde_json::json;
//!
//! let executor = Executor::ephemeral();
//! executor.execute(Command::TaskCreate { payload: json!({"title": "buy milk"}) }).unwrap();
//!
//! let response = executor.respond(Command::TaskToggle {
//!     id: "0".into(),
//!     if_match: Some("1".into()),
//! });
//! assert_eq!(response.status, StatusCode::Ok);
//! ```
//!
//! # Architecture
//!
//! All transport-facing operations go through the [`Executor`]. The
//! [`Database`] and its services are exported for embedding without the
//! command layer.

// Re-export the command API from keyguard-executor
pub use keyguard_executor::*;

// Direct service access
pub use keyguard_engine::{Database, TaskService, UserService};

// Record types
pub use keyguard_core::{RecordId, Task, User, UserProfile, Version};
