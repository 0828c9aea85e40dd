// crates/localekit-core/src/mode.rs
// ============================================================================
// Module: Platform Support Modes
// Description: Capability classification for locale provisioning strategies.
// Purpose: Replace distro preprocessor branching with one testable enum.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`SupportMode`] classifies what the running platform can do about locale
//! activation. It is computed once at startup from platform traits and then
//! drives strategy selection; all three paths are compiled into every build.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Support Mode
// ============================================================================

/// Platform capability classification for locale provisioning.
///
/// # Invariants
/// - Variants are stable for serialization and UI capability strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportMode {
    /// No known provisioning mechanism (for example musl-based systems).
    None,
    /// A glibc locale-definition file must be edited and compiled.
    GlibcOnly,
    /// Language-pack package resolution on top of glibc provisioning.
    Full,
}

impl SupportMode {
    /// Returns the descriptive capability string exposed to UI layers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::GlibcOnly => "glibc",
            Self::Full => "all",
        }
    }
}
