// crates/localekit-helper/src/service.rs
// ============================================================================
// Module: Enable Service
// Description: Per-request state machine for locale enablement.
// Purpose: Validate, authorize, edit, and compile in strict order.
// Dependencies: localekit-core, tempfile, crate::{authority, compiler, deffile}
// ============================================================================

//! ## Overview
//! [`EnableService`] drives one enable request through
//! `Validating → Authorizing → Editing → Compiling → Reporting`. Validation
//! rejects a batch wholesale before any file I/O; authorization gates every
//! mutation; editing is idempotent with atomic replacement; compilation is
//! skipped when nothing changed. The service keeps a per-process set of
//! confirmed-active identifiers to short-circuit redundant regeneration.
//!
//! Security posture: incoming identifiers are untrusted strings and are
//! re-validated here regardless of what the caller claims to have checked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use localekit_core::LocaleId;
use localekit_core::ProvisionEvent;
use localekit_core::ProvisionEvents;
use localekit_core::ProvisionPhase;
use localekit_core::RequestBatch;
use tempfile::NamedTempFile;

use crate::authority::AuthorizationResult;
use crate::authority::PeerIdentity;
use crate::authority::PolicyAuthority;
use crate::compiler::LocaleCompiler;
use crate::deffile::DefinitionFile;
use crate::deffile::EnableAction;
use crate::error::HelperError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File mode applied to the rewritten definition file.
const DEFINITION_FILE_MODE: u32 = 0o644;

// ============================================================================
// SECTION: Enable Service
// ============================================================================

/// Sequential processor for enable requests.
///
/// # Invariants
/// - One request is processed at a time; the caller serializes access.
/// - `already_enabled` only contains identifiers confirmed active.
pub struct EnableService {
    /// Locale-definition file owned by the helper.
    definition_file: PathBuf,
    /// Interactive policy gate.
    authority: Arc<dyn PolicyAuthority>,
    /// Locale compiler seam.
    compiler: Arc<dyn LocaleCompiler>,
    /// Observability sink.
    events: Arc<dyn ProvisionEvents>,
    /// Identifiers confirmed active during this process lifetime.
    already_enabled: BTreeSet<LocaleId>,
}

impl EnableService {
    /// Creates a service around the given definition file and seams.
    #[must_use]
    pub fn new(
        definition_file: PathBuf,
        authority: Arc<dyn PolicyAuthority>,
        compiler: Arc<dyn LocaleCompiler>,
        events: Arc<dyn ProvisionEvents>,
    ) -> Self {
        Self {
            definition_file,
            authority,
            compiler,
            events,
            already_enabled: BTreeSet::new(),
        }
    }

    /// Processes one enable request and returns the collapsed result.
    ///
    /// Internal failure detail stays on this side of the privilege boundary;
    /// callers only ever observe the boolean.
    pub async fn enable_locales(&mut self, locales: &[String], peer: &PeerIdentity) -> bool {
        let success = match self.process(locales, peer).await {
            Ok(()) => true,
            Err(err) => {
                if matches!(err, HelperError::Validation(_) | HelperError::Authorization) {
                    self.events.record(ProvisionEvent::BatchRejected {
                        reason: err.kind_label(),
                    });
                }
                false
            }
        };
        self.enter(ProvisionPhase::Reporting);
        self.events.record(ProvisionEvent::RequestCompleted {
            success,
        });
        success
    }

    /// Runs the request state machine to completion.
    async fn process(&mut self, locales: &[String], peer: &PeerIdentity) -> Result<(), HelperError> {
        self.enter(ProvisionPhase::Validating);
        let batch = RequestBatch::parse_all(locales)?;
        if batch.is_empty() {
            return Ok(());
        }
        if batch.iter().all(|id| self.already_enabled.contains(id)) {
            self.events.record(ProvisionEvent::CompileSkipped);
            return Ok(());
        }

        self.enter(ProvisionPhase::Authorizing);
        match self.authority.check_enable(peer).await {
            AuthorizationResult::Allowed => {}
            AuthorizationResult::Denied | AuthorizationResult::Cancelled => {
                return Err(HelperError::Authorization);
            }
        }

        self.enter(ProvisionPhase::Editing);
        if !self.definition_file.exists() {
            // No definition file means every locale ships precompiled.
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.definition_file)?;
        let mut file = DefinitionFile::parse(&content);
        let mut changed = false;
        for id in &batch {
            if file.enable(id) != EnableAction::AlreadyActive {
                changed = true;
            }
        }
        if !changed {
            self.already_enabled.extend(batch);
            self.events.record(ProvisionEvent::CompileSkipped);
            return Ok(());
        }
        write_atomic(&self.definition_file, &file.render())?;

        self.enter(ProvisionPhase::Compiling);
        self.compiler.compile().await?;
        self.already_enabled.extend(batch);
        Ok(())
    }

    /// Records a phase transition.
    fn enter(&self, phase: ProvisionPhase) {
        self.events.record(ProvisionEvent::PhaseEntered {
            phase,
        });
    }
}

// ============================================================================
// SECTION: Atomic Replacement
// ============================================================================

/// Rewrites a file atomically via a sibling temporary file and rename.
///
/// A crash between write and rename leaves the original file intact, so
/// concurrent readers never observe a partially written definition file.
fn write_atomic(path: &Path, content: &str) -> Result<(), HelperError> {
    let parent = path.parent().ok_or_else(|| {
        HelperError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "definition file has no parent directory",
        ))
    })?;
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().set_permissions(std::fs::Permissions::from_mode(DEFINITION_FILE_MODE))?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| HelperError::Io(err.error))?;
    Ok(())
}
