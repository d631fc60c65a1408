//! Contract types shared by every layer
//!
//! - `record_id`: stable record identity
//! - `version`: per-record version counter and expected-version tokens
//! - `timestamp`: microsecond timestamps with RFC 3339 rendering

pub mod record_id;
pub mod timestamp;
pub mod version;

// Re-exports
pub use record_id::RecordId;
pub use timestamp::Timestamp;
pub use version::{parse_expected_version, Version};
