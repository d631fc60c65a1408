//! Store configuration via `keyguard.toml`
//!
//! Every setting has a default, so an empty file (or no file at all) gives a
//! permissive store with no seed data.

use serde::{Deserialize, Serialize};
use std::path::Path;

use keyguard_concurrency::VersionPolicy;
use keyguard_core::{Error, Result, UserProfile};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "keyguard.toml";

/// Store configuration loaded from `keyguard.toml`.
///
/// # Example
///
/// ```toml
/// # "permissive" (default) or "strict"
/// version_policy = "strict"
///
/// [[seed_users]]
/// name = "John Doe"
/// email = "john.doe@example.com"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyguardConfig {
    /// Expected-version policy: `"permissive"` or `"strict"`.
    #[serde(default = "default_version_policy_str")]
    pub version_policy: String,
    /// Users inserted when the database opens, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seed_users: Vec<UserProfile>,
}

fn default_version_policy_str() -> String {
    VersionPolicy::default().as_str().to_string()
}

impl Default for KeyguardConfig {
    fn default() -> Self {
        Self {
            version_policy: default_version_policy_str(),
            seed_users: Vec::new(),
        }
    }
}

impl KeyguardConfig {
    /// Config with the given policy and no seed users.
    pub fn with_policy(policy: VersionPolicy) -> Self {
        Self {
            version_policy: policy.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Parse the policy string into a `VersionPolicy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"permissive"` or `"strict"`.
    pub fn version_policy(&self) -> Result<VersionPolicy> {
        self.version_policy.parse()
    }

    /// Check every field eagerly.
    pub fn validate(&self) -> Result<()> {
        self.version_policy()?;
        for profile in &self.seed_users {
            profile.validate()?;
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Keyguard store configuration
#
# Expected-version policy: "permissive" (default) or "strict"
#   "permissive" = a mutation without an expected version skips the check
#   "strict"     = every mutation must echo the version it read
version_policy = "permissive"

# Users created when the store opens.
# [[seed_users]]
# name = "John Doe"
# email = "john.doe@example.com"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: KeyguardConfig = toml::from_str(content)
            .map_err(|e| Error::invalid_input(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::internal(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidInput { reason } => {
                Error::invalid_input(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::internal(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
