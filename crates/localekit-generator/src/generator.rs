// crates/localekit-generator/src/generator.rs
// ============================================================================
// Module: Provisioning Generator
// Description: Support-mode routing for locale provisioning requests.
// Purpose: Produce exactly one terminal outcome per request batch.
// Dependencies: localekit-core, crate::{client, langpack, platform}
// ============================================================================

//! ## Overview
//! [`Generator`] owns the support mode decided at construction and routes
//! each batch to the matching strategy. The outcome mapping is fixed:
//!
//! | Mode | Helper success | Helper failure | File absent |
//! |---|---|---|---|
//! | `GlibcOnly` | `NeedsFont` | `AllManual` | `Success` |
//! | `Full` | `Success` (package path) | `AllManual` | attempted anyway |
//! | `None` | — | — | `AllManual`, no I/O |
//!
//! The helper only answers whether it enabled and compiled the locales;
//! mapping that boolean onto an outcome happens here because only this side
//! knows the platform's support mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use localekit_core::GenerationOutcome;
use localekit_core::ProvisionEvent;
use localekit_core::ProvisionEvents;
use localekit_core::RequestBatch;
use localekit_core::SupportMode;

use crate::client::HelperClient;
use crate::langpack::LangpackInstaller;

// ============================================================================
// SECTION: Generator Configuration
// ============================================================================

/// Paths the generator needs to route requests.
///
/// # Invariants
/// - Paths are consulted, never mutated, on this side of the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Helper socket path.
    pub socket_path: PathBuf,
    /// Locale-definition file consulted for the absence check.
    pub definition_file: PathBuf,
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Unprivileged orchestrator for locale provisioning.
///
/// # Invariants
/// - The support mode is fixed at construction.
/// - Exactly one outcome is produced per generate call.
pub struct Generator {
    /// Support mode decided at construction.
    mode: SupportMode,
    /// Definition file consulted for the absence check.
    definition_file: PathBuf,
    /// Client for the privileged helper.
    client: HelperClient,
    /// Package path used in full support mode.
    langpack: Option<LangpackInstaller>,
    /// Observability sink.
    events: Arc<dyn ProvisionEvents>,
}

impl Generator {
    /// Creates a generator for the given mode and collaborators.
    ///
    /// `langpack` is consulted only in [`SupportMode::Full`]; passing `None`
    /// there degrades every request to a manual outcome.
    #[must_use]
    pub fn new(
        mode: SupportMode,
        config: GeneratorConfig,
        langpack: Option<LangpackInstaller>,
        events: Arc<dyn ProvisionEvents>,
    ) -> Self {
        Self {
            mode,
            definition_file: config.definition_file,
            client: HelperClient::new(config.socket_path),
            langpack,
            events,
        }
    }

    /// Returns the support mode decided at construction.
    #[must_use]
    pub const fn support_mode(&self) -> SupportMode {
        self.mode
    }

    /// Provisions one batch and returns the terminal outcome.
    pub async fn generate(&self, batch: &RequestBatch) -> GenerationOutcome {
        match self.mode {
            // No known mechanism: answer immediately, no I/O of any kind.
            SupportMode::None => GenerationOutcome::AllManual,
            SupportMode::Full => match &self.langpack {
                Some(installer) => {
                    if batch.is_empty() {
                        return GenerationOutcome::Success;
                    }
                    installer.provision(batch).await
                }
                None => GenerationOutcome::AllManual,
            },
            SupportMode::GlibcOnly => {
                if batch.is_empty() {
                    return GenerationOutcome::Success;
                }
                if !self.definition_file.exists() {
                    // Platforms without the file ship locales precompiled.
                    return GenerationOutcome::Success;
                }
                match self.client.enable_locales(batch).await {
                    Ok(true) => GenerationOutcome::NeedsFont,
                    Ok(false) => GenerationOutcome::AllManual,
                    Err(_) => {
                        self.events.record(ProvisionEvent::HelperUnreachable);
                        GenerationOutcome::AllManual
                    }
                }
            }
        }
    }
}
