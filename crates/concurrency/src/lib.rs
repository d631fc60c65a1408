//! Concurrency layer for keyguard
//!
//! This crate serializes conflicting mutations to the same record while
//! letting unrelated records proceed in parallel:
//! - KeyLock: non-blocking per-key try-lock with RAII release
//! - VersionGuard: optimistic expected-version checks
//! - MutationCoordinator: lock -> read -> check -> write -> unlock pipeline
//!
//! No operation here ever blocks waiting for another key holder; contention
//! is reported as a retriable `Conflict`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coordinator;
pub mod key_lock;
pub mod version_guard;

pub use coordinator::{MutationCoordinator, MutationHook, MutationMetrics};
pub use key_lock::{KeyGuard, KeyLock};
pub use version_guard::{VersionGuard, VersionPolicy};
