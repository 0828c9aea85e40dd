// crates/localekit-core/src/lib.rs
// ============================================================================
// Module: LocaleKit Core Library
// Description: Data model and wire contract for locale provisioning.
// Purpose: Single source of truth for identifiers, modes, outcomes, frames.
// Dependencies: regex, serde, thiserror
// ============================================================================

//! ## Overview
//! `localekit-core` defines the types shared by the unprivileged generator
//! and the privileged provisioning helper: validated locale identifiers,
//! request batches, platform support modes, generation outcomes, the helper
//! wire protocol, and the observability seam. The crate performs no I/O.
//!
//! Security posture: locale identifiers originate from untrusted callers and
//! are validated at construction; raw strings that fail validation are
//! rejected outright, never partially sanitized.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod batch;
pub mod events;
pub mod id;
pub mod mode;
pub mod outcome;
pub mod proto;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use batch::RequestBatch;
pub use events::NoopEvents;
pub use events::ProvisionEvent;
pub use events::ProvisionEvents;
pub use events::ProvisionPhase;
pub use id::LocaleId;
pub use id::ValidationError;
pub use mode::SupportMode;
pub use outcome::GenerationOutcome;
pub use proto::HelperEvent;
pub use proto::HelperReply;
pub use proto::HelperRequest;
