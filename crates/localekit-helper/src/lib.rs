// crates/localekit-helper/src/lib.rs
// ============================================================================
// Module: LocaleKit Helper Library
// Description: Privileged locale provisioning service internals.
// Purpose: Own definition-file mutation, authorization, and compilation.
// Dependencies: localekit-core, async-trait, serde_json, tempfile, tokio
// ============================================================================

//! ## Overview
//! `localekit-helper` implements the privileged side of locale provisioning:
//! the only component permitted to mutate system locale state. It validates
//! untrusted batches, gates every mutation behind interactive policy
//! authorization, edits the locale-definition file idempotently with atomic
//! replacement, invokes the system locale compiler, and self-terminates
//! after a bounded idle period.
//!
//! Security posture: every request arrives from an unprivileged caller and
//! is treated as hostile until validated and authorized; internal failure
//! detail never crosses the privilege boundary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod authority;
pub mod compiler;
pub mod config;
pub mod deffile;
pub mod error;
pub mod server;
pub mod service;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authority::AuthorizationResult;
pub use authority::PeerIdentity;
pub use authority::PkcheckAuthority;
pub use authority::PolicyAuthority;
pub use authority::StaticAuthority;
pub use compiler::CommandCompiler;
pub use compiler::LocaleCompiler;
pub use config::HelperConfig;
pub use deffile::DefinitionFile;
pub use deffile::EnableAction;
pub use error::HelperError;
pub use server::HelperServer;
pub use service::EnableService;
