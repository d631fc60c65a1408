//! Domain records: tasks and users
//!
//! Both types are strongly typed; there are no dynamic-shape records.
//! Field validation lives here so every service applies the same rules.

use crate::error::{Error, Result};
use crate::record::{Record, RecordMeta};
use serde::{Deserialize, Serialize};

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identity, version and timestamps
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Non-empty title
    pub title: String,
    /// Completion flag
    pub completed: bool,
}

impl Task {
    /// Build a new, incomplete task
    pub fn new(meta: RecordMeta, title: String) -> Self {
        Task {
            meta,
            title,
            completed: false,
        }
    }

    /// Reject empty titles
    pub fn validate_title(title: &str) -> Result<()> {
        if title.is_empty() {
            return Err(Error::invalid_input("title is required and must be a string"));
        }
        Ok(())
    }

    /// Copy of this task with `completed` flipped
    ///
    /// Metadata is left untouched; the coordinator advances it on commit.
    pub fn toggled(&self) -> Self {
        Task {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

impl Record for Task {
    const ENTITY: &'static str = "task";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }
}

/// Mutable user fields, as supplied by create and update requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Contact email; only non-emptiness is checked
    pub email: String,
}

impl UserProfile {
    /// Create a profile
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        UserProfile {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Reject empty names or emails
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.email.is_empty() {
            return Err(Error::invalid_input("name and email are required"));
        }
        Ok(())
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity, version and timestamps
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
}

impl User {
    /// Build a user from a validated profile
    pub fn new(meta: RecordMeta, profile: UserProfile) -> Self {
        User {
            meta,
            name: profile.name,
            email: profile.email,
        }
    }

    /// Copy of this user carrying a new profile
    pub fn with_profile(&self, profile: UserProfile) -> Self {
        User {
            meta: self.meta,
            name: profile.name,
            email: profile.email,
        }
    }

    /// Current profile fields
    pub fn profile(&self) -> UserProfile {
        UserProfile::new(self.name.clone(), self.email.clone())
    }
}

impl Record for User {
    const ENTITY: &'static str = "user";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }
}
