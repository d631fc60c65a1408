//! Record services for keyguard
//!
//! This crate ties the lower layers together:
//! - Database: config, open, seeding and stats
//! - TaskService and UserService over versioned record stores
//!
//! The engine is the only component that knows about:
//! - Which operations take the key lock (toggle, update)
//! - Which do not (create, reads, deletes)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;
pub mod primitives;

pub use database::{Database, DatabaseStats, KeyguardConfig, CONFIG_FILE_NAME};
pub use primitives::{TaskService, UserService};
