//! Optimistic version checks
//!
//! A mutation may carry the version the caller last observed. The guard
//! compares it with the stored version after the key lock is held and
//! before the new state is computed, so the read-check-write sequence is
//! atomic with respect to other mutators of the same key.
//!
//! ## Policies
//!
//! | Policy | Expected version absent | Present and equal | Present and different |
//! |--------|-------------------------|-------------------|-----------------------|
//! | `Permissive` | pass | pass | `Conflict` |
//! | `Strict` | `InvalidInput` | pass | `Conflict` |

use std::str::FromStr;

use keyguard_core::{Error, RecordId, Result, Version};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do when the caller supplies no expected version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionPolicy {
    /// Treat a missing expected version as matching the current one
    #[default]
    Permissive,
    /// Require every mutation to echo a version
    Strict,
}

impl VersionPolicy {
    /// Config-file spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionPolicy::Permissive => "permissive",
            VersionPolicy::Strict => "strict",
        }
    }
}

impl std::fmt::Display for VersionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "permissive" => Ok(VersionPolicy::Permissive),
            "strict" => Ok(VersionPolicy::Strict),
            other => Err(Error::invalid_input(format!(
                "invalid version policy '{}', expected \"permissive\" or \"strict\"",
                other
            ))),
        }
    }
}

/// Lost-update detector
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionGuard {
    policy: VersionPolicy,
}

impl VersionGuard {
    /// Create a guard with the given policy
    pub fn new(policy: VersionPolicy) -> Self {
        Self { policy }
    }

    /// Active policy
    pub fn policy(&self) -> VersionPolicy {
        self.policy
    }

    /// Compare the caller's expected version with the stored one
    ///
    /// # Errors
    ///
    /// - `Conflict` if `expected` is present and differs from `current`
    /// - `InvalidInput` if `expected` is absent under the strict policy
    pub fn check(&self, id: RecordId, current: Version, expected: Option<Version>) -> Result<()> {
        let expected = match (expected, self.policy) {
            (Some(v), _) => v,
            (None, VersionPolicy::Permissive) => current,
            (None, VersionPolicy::Strict) => {
                return Err(Error::invalid_input(format!(
                    "an expected version is required to modify record {}",
                    id
                )))
            }
        };

        if expected != current {
            debug!(
                target: "keyguard::lock",
                id = %id,
                expected = %expected,
                actual = %current,
                "stale expected version"
            );
            return Err(Error::version_mismatch(id, expected, current));
        }
        Ok(())
    }
}
