// crates/localekit-generator/tests/langpack_path.rs
// ============================================================================
// Module: Langpack Path Tests
// Description: Validates the package-based provisioning strategy.
// Purpose: Ensure best-effort installation and broken-tool degradation.
// Dependencies: localekit-core, localekit-generator, async-trait, tempfile
// ============================================================================

//! ## Overview
//! Drives [`localekit_generator::LangpackInstaller`] against scripted query
//! tools and a recording package backend: query failure degrades to a manual
//! outcome, empty output is a valid nothing-to-install result, resolution
//! shortfalls are logged but proceed, and only encoding-free identifiers
//! reach the query command line.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use localekit_core::GenerationOutcome;
use localekit_core::NoopEvents;
use localekit_core::ProvisionEvent;
use localekit_core::ProvisionEvents;
use localekit_core::RequestBatch;
use localekit_generator::LangpackError;
use localekit_generator::LangpackInstaller;
use localekit_generator::PackageBackend;

// ============================================================================
// SECTION: Test Doubles
// ============================================================================

/// Backend recording calls and answering from a canned resolution.
#[derive(Default)]
struct RecordingBackend {
    /// Package identifiers to answer resolution with.
    resolves_to: Vec<String>,
    /// Names passed to resolution.
    resolved_names: Mutex<Vec<Vec<String>>>,
    /// Identifier sets passed to installation.
    installed: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl PackageBackend for RecordingBackend {
    async fn resolve_missing(&self, names: &[String]) -> Result<Vec<String>, LangpackError> {
        self.resolved_names.lock().expect("backend mutex").push(names.to_vec());
        Ok(self.resolves_to.clone())
    }

    async fn install(&self, package_ids: &[String]) -> Result<(), LangpackError> {
        self.installed.lock().expect("backend mutex").push(package_ids.to_vec());
        Ok(())
    }
}

/// Event sink capturing shortfall notices.
#[derive(Default)]
struct CapturedEvents {
    /// Captured events in order.
    seen: Mutex<Vec<ProvisionEvent>>,
}

impl ProvisionEvents for CapturedEvents {
    fn record(&self, event: ProvisionEvent) {
        self.seen.lock().expect("events mutex").push(event);
    }
}

/// Writes an executable query-tool script and returns its path.
fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("check-language-support");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("mark script executable");
    path
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test]
async fn failing_query_tool_yields_all_manual_without_installation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(dir.path(), "exit 1");
    let backend = Arc::new(RecordingBackend::default());
    let installer = LangpackInstaller::new(script, Arc::clone(&backend) as Arc<dyn PackageBackend>, Arc::new(NoopEvents));

    let batch = RequestBatch::parse_all(["fr_FR.UTF-8"]).expect("batch should parse");
    assert_eq!(installer.provision(&batch).await, GenerationOutcome::AllManual);
    assert!(backend.resolved_names.lock().expect("backend mutex").is_empty());
    assert!(backend.installed.lock().expect("backend mutex").is_empty());
}

#[tokio::test]
async fn empty_query_output_is_success_with_nothing_to_install() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(dir.path(), "exit 0");
    let backend = Arc::new(RecordingBackend::default());
    let installer = LangpackInstaller::new(script, Arc::clone(&backend) as Arc<dyn PackageBackend>, Arc::new(NoopEvents));

    let batch = RequestBatch::parse_all(["fr_FR.UTF-8"]).expect("batch should parse");
    assert_eq!(installer.provision(&batch).await, GenerationOutcome::Success);
    assert!(backend.resolved_names.lock().expect("backend mutex").is_empty());
}

#[tokio::test]
async fn reported_packages_are_resolved_and_installed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(dir.path(), "echo 'language-pack-fr fonts-noto'");
    let backend = Arc::new(RecordingBackend {
        resolves_to: vec!["language-pack-fr;1;x86_64".to_string(), "fonts-noto;2;x86_64".to_string()],
        ..RecordingBackend::default()
    });
    let installer = LangpackInstaller::new(script, Arc::clone(&backend) as Arc<dyn PackageBackend>, Arc::new(NoopEvents));

    let batch = RequestBatch::parse_all(["fr_FR.UTF-8"]).expect("batch should parse");
    assert_eq!(installer.provision(&batch).await, GenerationOutcome::Success);
    assert_eq!(
        backend.resolved_names.lock().expect("backend mutex").as_slice(),
        &[vec!["language-pack-fr".to_string(), "fonts-noto".to_string()]]
    );
    assert_eq!(
        backend.installed.lock().expect("backend mutex").as_slice(),
        &[vec!["language-pack-fr;1;x86_64".to_string(), "fonts-noto;2;x86_64".to_string()]]
    );
}

#[tokio::test]
async fn resolution_shortfall_is_logged_but_still_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(dir.path(), "echo 'language-pack-fr fonts-noto'");
    let backend = Arc::new(RecordingBackend {
        resolves_to: vec!["language-pack-fr;1;x86_64".to_string()],
        ..RecordingBackend::default()
    });
    let events = Arc::new(CapturedEvents::default());
    let installer = LangpackInstaller::new(script, Arc::clone(&backend) as Arc<dyn PackageBackend>, Arc::clone(&events) as Arc<dyn ProvisionEvents>);

    let batch = RequestBatch::parse_all(["fr_FR.UTF-8"]).expect("batch should parse");
    assert_eq!(installer.provision(&batch).await, GenerationOutcome::Success);
    assert!(events.seen.lock().expect("events mutex").contains(
        &ProvisionEvent::ResolutionShortfall {
            requested: 2,
            resolved: 1,
        }
    ));
    assert_eq!(backend.installed.lock().expect("backend mutex").len(), 1);
}

#[tokio::test]
async fn query_arguments_are_bare_language_tags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let capture = dir.path().join("args.txt");
    let script = write_script(
        dir.path(),
        &format!("printf '%s\\n' \"$@\" > {}", capture.display()),
    );
    let backend = Arc::new(RecordingBackend::default());
    let installer = LangpackInstaller::new(script, backend as Arc<dyn PackageBackend>, Arc::new(NoopEvents));

    let batch = RequestBatch::parse_all(["fr_FR.UTF-8", "sr@latin", "de_DE.UTF-8"])
        .expect("batch should parse");
    assert_eq!(installer.provision(&batch).await, GenerationOutcome::Success);
    let args = std::fs::read_to_string(&capture).expect("read captured args");
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args, vec!["-l", "fr_FR", "-l", "sr", "-l", "de_DE"]);
}
