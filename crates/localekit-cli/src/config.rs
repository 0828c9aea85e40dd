// crates/localekit-cli/src/config.rs
// ============================================================================
// Module: CLI Configuration
// Description: Strict TOML configuration for the localekit binary.
// Purpose: Fail closed on unknown keys and non-absolute paths.
// Dependencies: localekit-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! [`CliConfig`] maps `localekit.toml` onto the paths the generator needs.
//! Every field has a stock-system default, so an absent file is valid;
//! a present file must parse exactly, with unknown keys rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use localekit_core::proto::DEFAULT_SOCKET_PATH;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default configuration file consulted when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/localekit.toml";

/// Default locale-definition file path.
const DEFAULT_DEFINITION_FILE: &str = "/etc/locale.gen";

/// Default language-support query tool.
const DEFAULT_QUERY_TOOL: &str = "/usr/bin/check-language-support";

/// Default PackageKit console frontend.
const DEFAULT_PKCON: &str = "/usr/bin/pkcon";

// ============================================================================
// SECTION: Config Errors
// ============================================================================

/// Errors raised while loading configuration.
///
/// # Invariants
/// - Messages name the offending file or key.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid TOML for this model.
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A setting value is out of bounds.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: CLI Configuration
// ============================================================================

/// Configuration for the unprivileged provisioning front end.
///
/// # Invariants
/// - All paths are absolute once validated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CliConfig {
    /// Helper socket path.
    pub socket_path: PathBuf,
    /// Locale-definition file consulted for the absence check.
    pub definition_file: PathBuf,
    /// Language-support query tool executable.
    pub query_tool: PathBuf,
    /// PackageKit console frontend executable.
    pub pkcon: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            definition_file: PathBuf::from(DEFAULT_DEFINITION_FILE),
            query_tool: PathBuf::from(DEFAULT_QUERY_TOOL),
            pkcon: PathBuf::from(DEFAULT_PKCON),
        }
    }
}

impl CliConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] on malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] when a path is not absolute.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first non-absolute path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in [
            ("socket_path", &self.socket_path),
            ("definition_file", &self.definition_file),
            ("query_tool", &self.query_tool),
            ("pkcon", &self.pkcon),
        ] {
            if !path.is_absolute() {
                return Err(ConfigError::Invalid(format!("{key} must be an absolute path")));
            }
        }
        Ok(())
    }
}
