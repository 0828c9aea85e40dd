// crates/localekit-helper/src/error.rs
// ============================================================================
// Module: Helper Errors
// Description: Error taxonomy for the privileged provisioning helper.
// Purpose: Classify failures internally while exposing only a boolean.
// Dependencies: localekit-core, thiserror
// ============================================================================

//! ## Overview
//! All helper-side failures collapse to a single boolean before crossing the
//! privilege boundary. The taxonomy here exists for internal control flow
//! and event labeling only; none of its detail is serialized to callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use localekit_core::ValidationError;
use thiserror::Error;

// ============================================================================
// SECTION: Helper Errors
// ============================================================================

/// Errors raised while processing an enable request.
///
/// # Invariants
/// - Variants are stable for event labeling.
/// - Detail never crosses the privilege boundary.
#[derive(Debug, Error)]
pub enum HelperError {
    /// A locale identifier failed grammar validation.
    #[error("batch validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Policy authorization was denied or cancelled.
    #[error("authorization was not granted")]
    Authorization,
    /// Definition file or socket I/O failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    /// A subprocess exited unsuccessfully.
    #[error("subprocess {program} failed")]
    Subprocess {
        /// Program that was invoked.
        program: String,
        /// Exit code when the process was not killed by a signal.
        code: Option<i32>,
    },
    /// The helper configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HelperError {
    /// Returns a stable label for event reporting.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Authorization => "authorization",
            Self::Io(_) => "io",
            Self::Subprocess {
                ..
            } => "subprocess",
            Self::Config(_) => "config",
        }
    }
}
