// crates/localekit-generator/src/lib.rs
// ============================================================================
// Module: LocaleKit Generator Library
// Description: Unprivileged orchestration of locale provisioning.
// Purpose: Classify platform support and route batches to a strategy.
// Dependencies: localekit-core, async-trait, serde_json, tokio
// ============================================================================

//! ## Overview
//! `localekit-generator` is the unprivileged side of locale provisioning. It
//! classifies the platform into a support mode once at startup, then routes
//! each request batch to the matching strategy: the privileged helper on
//! definition-file platforms, the language-pack package path on platforms
//! that bundle locale activation with package installation, or an immediate
//! manual outcome where no mechanism exists. Exactly one terminal outcome is
//! produced per request.
//!
//! Security posture: provisioning is best effort; helper unavailability
//! degrades the outcome and never blocks or crashes the caller.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod generator;
pub mod langpack;
pub mod platform;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ClientError;
pub use client::HelperClient;
pub use generator::Generator;
pub use generator::GeneratorConfig;
pub use langpack::LangpackError;
pub use langpack::LangpackInstaller;
pub use langpack::PackageBackend;
pub use langpack::PkconBackend;
pub use platform::PlatformTraits;
pub use platform::classify_support_mode;
