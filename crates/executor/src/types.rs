//! Supporting types for commands and outputs.

use keyguard_engine::DatabaseStats;
use serde::{Deserialize, Serialize};

/// Server status snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    /// Seconds since the database opened
    pub uptime: f64,
    /// Commands executed so far, including this one
    pub request_count: u64,
    /// Crate version
    pub version: String,
    /// Record counts and mutation counters
    #[serde(flatten)]
    pub stats: DatabaseStats,
}
