//! # Keyguard Executor
//!
//! Command layer over the keyguard task and user services.
//!
//! This is the crate a transport adapter imports. It provides:
//! - [`Executor`] - dispatches commands and renders responses
//! - [`Command`]/[`Output`] - the operation set and its results
//! - [`Error`]/[`StatusCode`] - failures and their response codes
//!
//! ## Quick Start
//!
//! ```
//! use keyguard_executor::{Command, Executor, StatusCode};
//! use serde_json::json;
//!
//! let executor = Executor::ephemeral();
//! let response = executor.respond(Command::UserCreate {
//!     payload: json!({"name": "A", "email": "a@x.com"}),
//! });
//! assert_eq!(response.status, StatusCode::Created);
//! ```
//!
//! ## Status mapping
//!
//! | Outcome | Status |
//! |---------|--------|
//! | create | 201 |
//! | user delete | 204 |
//! | other success | 200 |
//! | invalid input | 400 |
//! | not found | 404 |
//! | lock or version conflict | 409 |
//! | internal fault | 500 |

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
mod output;
mod response;
mod types;

mod handlers;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use response::{Response, StatusCode};
pub use types::*;

// Re-export configuration so adapters don't need keyguard-engine directly
pub use keyguard_engine::{DatabaseStats, KeyguardConfig};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
