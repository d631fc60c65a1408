//! Core types for keyguard
//!
//! This crate defines the foundational types used throughout the system:
//! - RecordId: Stable integer identity of a record
//! - Version: Per-record version counter for optimistic concurrency
//! - Timestamp: Microsecond timestamps
//! - RecordMeta / Record: Metadata and trait shared by every stored entity
//! - Task, User: Domain records
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;
pub mod record;
pub mod types;

pub use contract::{parse_expected_version, RecordId, Timestamp, Version};
pub use error::{ConflictReason, Error, ErrorKind, Result};
pub use record::{Record, RecordMeta};
pub use types::{Task, User, UserProfile};
