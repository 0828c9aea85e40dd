// crates/localekit-helper/src/authority.rs
// ============================================================================
// Module: Policy Authorization
// Description: Interactive policy gate for privileged locale mutation.
// Purpose: Provide a pluggable, fail-closed authorization seam.
// Dependencies: async-trait, tokio
// ============================================================================

//! ## Overview
//! Every enable request must pass interactive policy authorization before
//! any privileged work happens. The production implementation shells out to
//! the polkit `pkcheck` tool with the caller's process identity taken from
//! socket peer credentials; tests substitute a static decider.
//!
//! ## Invariants
//! - Missing caller identity denies (fail closed).
//! - `Denied` and `Cancelled` are reported identically to callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Polkit action identifier guarding locale enablement.
pub const ENABLE_ACTION_ID: &str = "org.localekit.enable-locales";

/// Exit code `pkcheck` uses when the authentication dialog was dismissed.
const PKCHECK_DISMISSED: i32 = 3;

// ============================================================================
// SECTION: Caller Identity
// ============================================================================

/// Identity of the requesting process, taken from the transport.
///
/// # Invariants
/// - `pid` is `None` when the transport could not report one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerIdentity {
    /// Process identifier of the caller.
    pub pid: Option<i32>,
    /// User identifier of the caller.
    pub uid: u32,
}

// ============================================================================
// SECTION: Authorization Outcomes
// ============================================================================

/// Outcome of a policy authorization check.
///
/// # Invariants
/// - Only `Allowed` may proceed to mutation.
/// - `Denied` and `Cancelled` must be indistinguishable to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationResult {
    /// The caller may perform the privileged operation.
    Allowed,
    /// Policy denied the operation.
    Denied,
    /// The user dismissed the interactive check.
    Cancelled,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Interactive policy authorization interface.
#[async_trait]
pub trait PolicyAuthority: Send + Sync {
    /// Checks whether the peer may enable locales.
    async fn check_enable(&self, peer: &PeerIdentity) -> AuthorizationResult;
}

// ============================================================================
// SECTION: Polkit Implementation
// ============================================================================

/// Authority backed by the polkit `pkcheck` tool.
///
/// # Invariants
/// - Spawn failures and unknown exit codes deny.
pub struct PkcheckAuthority {
    /// Path of the `pkcheck` executable.
    program: PathBuf,
}

impl PkcheckAuthority {
    /// Creates an authority using the given `pkcheck` executable.
    #[must_use]
    pub const fn new(program: PathBuf) -> Self {
        Self {
            program,
        }
    }
}

#[async_trait]
impl PolicyAuthority for PkcheckAuthority {
    async fn check_enable(&self, peer: &PeerIdentity) -> AuthorizationResult {
        let Some(pid) = peer.pid else {
            return AuthorizationResult::Denied;
        };
        let output = Command::new(&self.program)
            .arg("--action-id")
            .arg(ENABLE_ACTION_ID)
            .arg("--process")
            .arg(pid.to_string())
            .arg("--allow-user-interaction")
            .output()
            .await;
        match output {
            Ok(output) if output.status.success() => AuthorizationResult::Allowed,
            Ok(output) if output.status.code() == Some(PKCHECK_DISMISSED) => {
                AuthorizationResult::Cancelled
            }
            Ok(_) | Err(_) => AuthorizationResult::Denied,
        }
    }
}

// ============================================================================
// SECTION: Static Implementation
// ============================================================================

/// Authority that always returns a fixed decision.
///
/// # Invariants
/// - The decision never varies across calls.
pub struct StaticAuthority {
    /// Decision returned for every check.
    decision: AuthorizationResult,
}

impl StaticAuthority {
    /// Creates an authority with a fixed decision.
    #[must_use]
    pub const fn new(decision: AuthorizationResult) -> Self {
        Self {
            decision,
        }
    }
}

#[async_trait]
impl PolicyAuthority for StaticAuthority {
    async fn check_enable(&self, _peer: &PeerIdentity) -> AuthorizationResult {
        self.decision
    }
}
