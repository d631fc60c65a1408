//! Command handlers organized by record type.
//!
//! | Module | Commands | Service |
//! |--------|----------|---------|
//! | `tasks` | 5 | TaskService |
//! | `users` | 5 | UserService |
//!
//! Handlers parse raw command fields, call the service and wrap the result
//! in an `Output`.

pub(crate) mod tasks;
pub(crate) mod users;

use keyguard_core::RecordId;

use crate::Result;

/// Parse a raw id, rejecting anything but a plain non-negative integer.
pub(crate) fn parse_id(raw: &str) -> Result<RecordId> {
    Ok(raw.parse::<RecordId>()?)
}
