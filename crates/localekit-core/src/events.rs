// crates/localekit-core/src/events.rs
// ============================================================================
// Module: Provisioning Events
// Description: Observability hooks for the provisioning pipeline.
// Purpose: Provide stable event labels without hard logging dependencies.
// Dependencies: none
// ============================================================================

//! ## Overview
//! This module exposes a thin event interface for provisioning state
//! transitions and degraded-path notices. It is intentionally
//! dependency-light so deployments can plug in their logging or metrics
//! stack without redesign.
//!
//! Security posture: events carry counts and stable labels only; raw
//! identifiers from untrusted callers are never included.

// ============================================================================
// SECTION: Phases
// ============================================================================

/// Helper request state-machine phase.
///
/// # Invariants
/// - Variants are stable for event labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionPhase {
    /// Batch validation against the locale grammar.
    Validating,
    /// Interactive policy authorization of the caller.
    Authorizing,
    /// Idempotent definition-file editing.
    Editing,
    /// Locale compiler invocation.
    Compiling,
    /// Terminal result signaling.
    Reporting,
}

impl ProvisionPhase {
    /// Returns a stable label for the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Authorizing => "authorizing",
            Self::Editing => "editing",
            Self::Compiling => "compiling",
            Self::Reporting => "reporting",
        }
    }
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// Provisioning event payload.
///
/// # Invariants
/// - Payload fields are counts and stable labels, never raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionEvent {
    /// A request entered a state-machine phase.
    PhaseEntered {
        /// Phase that was entered.
        phase: ProvisionPhase,
    },
    /// A batch was rejected before any mutation.
    BatchRejected {
        /// Stable rejection reason label.
        reason: &'static str,
    },
    /// Compilation was skipped because every locale was already active.
    CompileSkipped,
    /// A request finished with the given result.
    RequestCompleted {
        /// Whether the request succeeded.
        success: bool,
    },
    /// Package resolution returned fewer packages than requested.
    ResolutionShortfall {
        /// Number of packages the query reported.
        requested: usize,
        /// Number of packages that resolved.
        resolved: usize,
    },
    /// The privileged helper could not be reached.
    HelperUnreachable,
}

impl ProvisionEvent {
    /// Renders the event as a stable `key=value` log line fragment.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::PhaseEntered {
                phase,
            } => format!("phase={}", phase.as_str()),
            Self::BatchRejected {
                reason,
            } => format!("batch_rejected reason={reason}"),
            Self::CompileSkipped => "compile_skipped".to_string(),
            Self::RequestCompleted {
                success,
            } => format!("request_completed success={success}"),
            Self::ResolutionShortfall {
                requested,
                resolved,
            } => format!("resolution_shortfall requested={requested} resolved={resolved}"),
            Self::HelperUnreachable => "helper_unreachable".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Event sink for provisioning observability.
pub trait ProvisionEvents: Send + Sync {
    /// Records one provisioning event.
    fn record(&self, event: ProvisionEvent);
}

/// No-op event sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopEvents;

impl ProvisionEvents for NoopEvents {
    fn record(&self, _event: ProvisionEvent) {}
}
