// crates/localekit-generator/src/platform.rs
// ============================================================================
// Module: Platform Capability Detection
// Description: Capability snapshot and pure support-mode classification.
// Purpose: Replace distro compile-time branching with one startup decision.
// Dependencies: localekit-core
// ============================================================================

//! ## Overview
//! Distro-specific behavior is driven by [`PlatformTraits`], a capability
//! snapshot taken once at startup, and [`classify_support_mode`], a pure
//! function over it. All three strategies compile into every build, so every
//! path is testable with synthetic traits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use localekit_core::SupportMode;

// ============================================================================
// SECTION: Platform Traits
// ============================================================================

/// Capability snapshot of the running platform.
///
/// # Invariants
/// - This is a pure value; classification never performs I/O on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTraits {
    /// Whether the C library compiles locales from a definition file.
    pub glibc: bool,
    /// Whether a language-support query tool is installed.
    pub langpack_tool: bool,
}

impl PlatformTraits {
    /// Probes the running system once.
    ///
    /// The libc family comes from the build target; the language-pack
    /// capability from the presence of the query tool.
    #[must_use]
    pub fn detect(query_tool: &Path) -> Self {
        Self {
            glibc: cfg!(target_env = "gnu"),
            langpack_tool: query_tool.exists(),
        }
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies platform traits into a support mode.
///
/// Pure function: identical traits always yield the identical mode.
#[must_use]
pub const fn classify_support_mode(traits: PlatformTraits) -> SupportMode {
    if !traits.glibc {
        return SupportMode::None;
    }
    if traits.langpack_tool {
        return SupportMode::Full;
    }
    SupportMode::GlibcOnly
}
