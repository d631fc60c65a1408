//! Storage layer for keyguard
//!
//! This crate implements the in-memory record backend with:
//! - RecordStore: BTreeMap-based record ownership behind a RwLock
//! - IdAllocator: AtomicU64 id counter, shareable between stores
//!
//! The store guarantees single-call atomicity only. Serializing
//! read-check-write sequences on one key is the concurrency layer's job.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allocator;
pub mod record_store;

pub use allocator::IdAllocator;
pub use record_store::RecordStore;
