//! Error types for keyguard
//!
//! Every service operation returns one of four error kinds:
//!
//! | Kind | Variant | Retriable |
//! |------|---------|-----------|
//! | Invalid input | `InvalidInput` | no |
//! | Not found | `NotFound` | no |
//! | Conflict | `Conflict` | yes (re-read, then retry) |
//! | Internal | `Internal` | no |
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::contract::{RecordId, Version};
use thiserror::Error;

/// Result type alias for keyguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a mutation was rejected with a conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictReason {
    /// Another mutation currently holds the key lock
    #[error("record {id} is currently being modified, try again")]
    KeyLocked {
        /// The contended record
        id: RecordId,
    },

    /// The caller's expected version is stale
    #[error("record {id} was modified by another request: expected {expected}, found {actual}")]
    VersionMismatch {
        /// The record that moved on
        id: RecordId,
        /// Version the caller read
        expected: Version,
        /// Version currently stored
        actual: Version,
    },
}

/// Error kinds surfaced by the core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Payload failed a required-field or type constraint
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Human-readable description of the violated constraint
        reason: String,
    },

    /// Referenced record does not exist (never existed, or was deleted)
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name ("task", "user")
        entity: &'static str,
        /// Missing id
        id: RecordId,
    },

    /// Lock contention or stale expected version
    #[error("conflict: {reason}")]
    Conflict {
        /// Which check rejected the mutation
        reason: ConflictReason,
    },

    /// Unexpected fault inside a critical section
    #[error("internal error: {message}")]
    Internal {
        /// Fault description
        message: String,
    },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidInput`]
    InvalidInput,
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::Conflict`]
    Conflict,
    /// See [`Error::Internal`]
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Create an `InvalidInput` error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a `NotFound` error
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        Error::NotFound { entity, id }
    }

    /// Create a lock-contention `Conflict`
    pub fn key_locked(id: RecordId) -> Self {
        Error::Conflict {
            reason: ConflictReason::KeyLocked { id },
        }
    }

    /// Create a stale-version `Conflict`
    pub fn version_mismatch(id: RecordId, expected: Version, actual: Version) -> Self {
        Error::Conflict {
            reason: ConflictReason::VersionMismatch {
                id,
                expected,
                actual,
            },
        }
    }

    /// Create an `Internal` error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. } => ErrorKind::InvalidInput,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Conflict { .. } => ErrorKind::Conflict,
            Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the caller may re-read and retry
    ///
    /// Only conflicts are retriable. The core never retries on its own.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// True for `Conflict` errors
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// True for `NotFound` errors
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
