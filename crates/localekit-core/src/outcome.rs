// crates/localekit-core/src/outcome.rs
// ============================================================================
// Module: Generation Outcomes
// Description: Terminal outcome reported for one provisioning request.
// Purpose: Give UI layers a stable tri-state result to message on.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`GenerationOutcome`] is the tri-state result the generator reports to its
//! caller. Exactly one outcome is produced per generate call; mapping from
//! helper success or failure to an outcome is the generator's job because
//! only the generator knows the platform support mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Generation Outcome
// ============================================================================

/// Terminal result of a locale provisioning request.
///
/// # Invariants
/// - Variants are stable for serialization and UI messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Locales are active; no further user action is needed.
    Success,
    /// Locales are active but font coverage cannot be guaranteed.
    NeedsFont,
    /// Automatic provisioning is impossible; the user must act manually.
    AllManual,
}

impl GenerationOutcome {
    /// Returns a stable label for logging and UI lookup.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NeedsFont => "needs_font",
            Self::AllManual => "all_manual",
        }
    }
}
