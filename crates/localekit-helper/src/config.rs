// crates/localekit-helper/src/config.rs
// ============================================================================
// Module: Helper Configuration
// Description: Runtime settings for the provisioning helper daemon.
// Purpose: Keep every injectable path and bound in one validated struct.
// Dependencies: localekit-core, crate::error
// ============================================================================

//! ## Overview
//! [`HelperConfig`] carries the socket path, the definition-file path, tool
//! locations, and the service bounds. Defaults match a stock glibc system;
//! tests inject temporary paths. Validation is fail closed: a zero queue
//! depth or idle timeout is a configuration error, not a fallback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use localekit_core::proto::DEFAULT_SOCKET_PATH;

use crate::error::HelperError;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default locale-definition file path.
pub const DEFAULT_DEFINITION_FILE: &str = "/etc/locale.gen";

/// Default locale compiler executable.
pub const DEFAULT_COMPILER: &str = "/usr/sbin/locale-gen";

/// Default polkit check executable.
pub const DEFAULT_PKCHECK: &str = "/usr/bin/pkcheck";

/// Default idle lifetime before the daemon exits.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default depth of the pending-request queue.
pub const DEFAULT_QUEUE_DEPTH: usize = 8;

// ============================================================================
// SECTION: Helper Configuration
// ============================================================================

/// Runtime configuration of the provisioning helper.
///
/// # Invariants
/// - `queue_depth` is at least one and `idle_timeout` is non-zero once
///   validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    /// Listening socket path.
    pub socket_path: PathBuf,
    /// Locale-definition file owned by the helper.
    pub definition_file: PathBuf,
    /// Locale compiler executable.
    pub compiler: PathBuf,
    /// Polkit check executable.
    pub pkcheck: PathBuf,
    /// Idle lifetime before voluntary exit.
    pub idle_timeout: Duration,
    /// Depth of the pending-request queue.
    pub queue_depth: usize,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            definition_file: PathBuf::from(DEFAULT_DEFINITION_FILE),
            compiler: PathBuf::from(DEFAULT_COMPILER),
            pkcheck: PathBuf::from(DEFAULT_PKCHECK),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl HelperConfig {
    /// Validates the configuration bounds.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Config`] naming the offending setting.
    pub fn validate(&self) -> Result<(), HelperError> {
        if self.queue_depth == 0 {
            return Err(HelperError::Config("queue_depth must be at least 1".to_string()));
        }
        if self.idle_timeout.is_zero() {
            return Err(HelperError::Config("idle_timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
