//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Status-mapped**: Each variant maps to exactly one [`StatusCode`]

use serde::{Deserialize, Serialize};

use crate::StatusCode;

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Status |
/// |----------|----------|--------|
/// | Validation | `InvalidInput` | 400 |
/// | Not Found | `NotFound` | 404 |
/// | Concurrency | `KeyLocked`, `VersionConflict` | 409 |
/// | System | `Serialization`, `Internal` | 500 |
///
/// # Example
///
/// ```ignore
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::KeyLocked { id }) => {
///         println!("record {} is busy, retry", id);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Validation Errors ====================
    /// Malformed id, body or field
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    // ==================== Not Found ====================
    /// Referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// `"task"` or `"user"`
        entity: String,
        /// Requested id
        id: u64,
    },

    // ==================== Concurrency Errors ====================
    /// Another mutation holds the record
    #[error("record {id} is currently being modified, try again")]
    KeyLocked {
        /// Contended id
        id: u64,
    },

    /// Expected version did not match the stored one
    #[error("version conflict on record {id}: expected {expected}, got {actual}")]
    VersionConflict {
        /// Record whose version moved on
        id: u64,
        /// Version the caller read
        expected: u64,
        /// Version currently stored
        actual: u64,
    },

    // ==================== System Errors ====================
    /// Output could not be rendered
    #[error("serialization error: {reason}")]
    Serialization {
        /// Encoder message
        reason: String,
    },

    /// Unexpected fault (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Fault description, never sent to clients
        reason: String,
    },
}

impl Error {
    /// Status code a transport should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidInput { .. } => StatusCode::BadRequest,
            Error::NotFound { .. } => StatusCode::NotFound,
            Error::KeyLocked { .. } | Error::VersionConflict { .. } => StatusCode::Conflict,
            Error::Serialization { .. } | Error::Internal { .. } => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Message safe to show a client.
    ///
    /// System errors collapse to a generic line; their details go to the log.
    pub fn client_message(&self) -> String {
        match self {
            Error::Serialization { .. } | Error::Internal { .. } => {
                "Internal server error".to_string()
            }
            Error::VersionConflict { .. } => {
                "record was modified by another request, refresh and try again".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether the command may succeed if retried after re-reading.
    ///
    /// Both conflict kinds qualify; a version conflict needs the fresh
    /// version echoed back on the retry.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::KeyLocked { .. } | Error::VersionConflict { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            reason: err.to_string(),
        }
    }
}
