//! Per-record version counter
//!
//! Every record starts at version 1 and gains exactly 1 per committed
//! mutation. Callers echo a version they observed back as an expected
//! version; a mismatch means they read stale data.
//!
//! ## Expected-version tokens
//!
//! Adapters usually carry the expected version as a conditional-request
//! token (an `If-Match` header, for example). [`parse_expected_version`]
//! accepts the forms such tokens take in practice:
//!
//! ```text
//! 3        bare number
//! "3"      quoted entity tag
//! W/"3"    weak entity tag
//! ```
//!
//! Anything else, including `0`, is treated as "no expected version".

use serde::{Deserialize, Serialize};

/// Version of a single record
///
/// ## Invariants
///
/// - Versions are positive; the first committed version is 1
/// - A record's version strictly increases by 1 per mutation
/// - Versions are never reused for the same record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version assigned on creation
    pub const INITIAL: Version = Version(1);

    /// Wrap a raw version number
    #[inline]
    pub const fn new(n: u64) -> Self {
        Version(n)
    }

    /// Raw numeric value
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The version following this one
    ///
    /// Returns `None` on overflow rather than wrapping, so a version can never
    /// repeat.
    #[inline]
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(v) => Some(Version(v)),
            None => None,
        }
    }

    /// Parse a single expected-version token
    ///
    /// Returns `None` for empty, malformed, or zero tokens.
    pub fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let token = token.strip_prefix("W/").unwrap_or(token);
        let token = token
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(token);

        match token.parse::<u64>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(Version(n)),
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::INITIAL
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(n: u64) -> Self {
        Version(n)
    }
}

/// Interpret an optional expected-version token from an adapter
///
/// Absent and unparseable tokens both yield `None`; whether `None` means
/// "skip the check" or "reject" is the version guard's policy, not ours.
pub fn parse_expected_version(token: Option<&str>) -> Option<Version> {
    token.and_then(Version::parse_token)
}
