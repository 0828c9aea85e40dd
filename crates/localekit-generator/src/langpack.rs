// crates/localekit-generator/src/langpack.rs
// ============================================================================
// Module: Language-Pack Provisioning
// Description: Package-based locale activation for langpack platforms.
// Purpose: Query missing language support and install it best effort.
// Dependencies: localekit-core, async-trait, thiserror, tokio
// ============================================================================

//! ## Overview
//! On langpack platforms locale activation rides along with language-pack
//! package installation. The installer queries the platform's
//! language-support tool with bare `language[_COUNTRY]` forms, resolves the
//! reported package names against the package manager, and installs whatever
//! resolved. Resolution shortfalls degrade, they never fail; only a broken
//! query tool yields a manual outcome.
//!
//! ## Invariants
//! - The query tool receives only validated, encoding-free identifiers.
//! - Package installation is a single best-effort attempt, never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use localekit_core::GenerationOutcome;
use localekit_core::ProvisionEvent;
use localekit_core::ProvisionEvents;
use localekit_core::RequestBatch;
use thiserror::Error;
use tokio::process::Command;

// ============================================================================
// SECTION: Langpack Errors
// ============================================================================

/// Errors raised on the package-resolution path.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum LangpackError {
    /// A subprocess could not be spawned or its stream failed.
    #[error("langpack i/o failure: {0}")]
    Io(#[from] std::io::Error),
    /// The query or package tool exited unsuccessfully.
    #[error("langpack tool {program} failed")]
    Subprocess {
        /// Program that was invoked.
        program: String,
        /// Exit code when the process was not killed by a signal.
        code: Option<i32>,
    },
}

// ============================================================================
// SECTION: Package Backend
// ============================================================================

/// Package manager seam for resolution and installation.
#[async_trait]
pub trait PackageBackend: Send + Sync {
    /// Resolves package names to installable identifiers, filtered to
    /// not-installed packages matching the system architecture.
    ///
    /// # Errors
    ///
    /// Returns [`LangpackError`] when the package manager cannot be driven.
    async fn resolve_missing(&self, names: &[String]) -> Result<Vec<String>, LangpackError>;

    /// Installs the resolved package set.
    ///
    /// # Errors
    ///
    /// Returns [`LangpackError`] when installation cannot be started.
    async fn install(&self, package_ids: &[String]) -> Result<(), LangpackError>;
}

/// Backend driving the PackageKit console frontend.
///
/// # Invariants
/// - Package names passed in are taken from query-tool output only.
pub struct PkconBackend {
    /// Path of the `pkcon` executable.
    program: PathBuf,
}

impl PkconBackend {
    /// Creates a backend using the given `pkcon` executable.
    #[must_use]
    pub const fn new(program: PathBuf) -> Self {
        Self {
            program,
        }
    }
}

#[async_trait]
impl PackageBackend for PkconBackend {
    async fn resolve_missing(&self, names: &[String]) -> Result<Vec<String>, LangpackError> {
        let output = Command::new(&self.program)
            .arg("--plain")
            .arg("--filter")
            .arg("~installed,arch")
            .arg("resolve")
            .args(names)
            .output()
            .await?;
        if !output.status.success() {
            return Err(LangpackError::Subprocess {
                program: self.program.display().to_string(),
                code: output.status.code(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut resolved = Vec::new();
        for line in stdout.lines() {
            let mut tokens = line.split_whitespace();
            if tokens.next() == Some("Available")
                && let Some(package) = tokens.next()
            {
                resolved.push(package.to_string());
            }
        }
        Ok(resolved)
    }

    async fn install(&self, package_ids: &[String]) -> Result<(), LangpackError> {
        if package_ids.is_empty() {
            return Ok(());
        }
        let output = Command::new(&self.program)
            .arg("--plain")
            .arg("--noninteractive")
            .arg("install")
            .args(package_ids)
            .output()
            .await?;
        if !output.status.success() {
            return Err(LangpackError::Subprocess {
                program: self.program.display().to_string(),
                code: output.status.code(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Langpack Installer
// ============================================================================

/// Package-based provisioning strategy for langpack platforms.
///
/// # Invariants
/// - Exactly one outcome is produced per provision call.
pub struct LangpackInstaller {
    /// Language-support query tool executable.
    query_tool: PathBuf,
    /// Package manager seam.
    backend: Arc<dyn PackageBackend>,
    /// Observability sink.
    events: Arc<dyn ProvisionEvents>,
}

impl LangpackInstaller {
    /// Creates an installer around the query tool and backend.
    #[must_use]
    pub fn new(
        query_tool: PathBuf,
        backend: Arc<dyn PackageBackend>,
        events: Arc<dyn ProvisionEvents>,
    ) -> Self {
        Self {
            query_tool,
            backend,
            events,
        }
    }

    /// Provisions a batch through language-pack installation.
    ///
    /// A failing query tool yields [`GenerationOutcome::AllManual`]; every
    /// later step degrades to success because installation is best effort
    /// and the packages themselves trigger locale compilation.
    pub async fn provision(&self, batch: &RequestBatch) -> GenerationOutcome {
        let packages = match self.query_missing_packages(batch).await {
            Ok(packages) => packages,
            Err(_) => return GenerationOutcome::AllManual,
        };
        if packages.is_empty() {
            return GenerationOutcome::Success;
        }

        let resolved = match self.backend.resolve_missing(&packages).await {
            Ok(resolved) => resolved,
            Err(_) => Vec::new(),
        };
        if resolved.len() != packages.len() {
            self.events.record(ProvisionEvent::ResolutionShortfall {
                requested: packages.len(),
                resolved: resolved.len(),
            });
        }
        let _ = self.backend.install(&resolved).await;
        GenerationOutcome::Success
    }

    /// Queries the language-support tool for missing package names.
    async fn query_missing_packages(
        &self,
        batch: &RequestBatch,
    ) -> Result<Vec<String>, LangpackError> {
        let mut command = Command::new(&self.query_tool);
        for id in batch {
            command.arg("-l").arg(id.language_tag());
        }
        let output = command.output().await?;
        if !output.status.success() {
            return Err(LangpackError::Subprocess {
                program: self.query_tool.display().to_string(),
                code: output.status.code(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.split_whitespace().map(ToString::to_string).collect())
    }
}
