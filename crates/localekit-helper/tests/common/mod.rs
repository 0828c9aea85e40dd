// crates/localekit-helper/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared stubs for localekit-helper tests.
// Purpose: Provide recording seams and fixtures for service and server tests.
// Dependencies: localekit-core, localekit-helper, async-trait, tempfile
// ============================================================================

//! ## Overview
//! Provides a recording compiler, a recording event sink, and definition-file
//! fixtures shared by the helper test binaries.

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only helpers are shared across binaries that use subsets."
)]

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use localekit_core::ProvisionEvent;
use localekit_core::ProvisionEvents;
use localekit_helper::HelperError;
use localekit_helper::LocaleCompiler;
use localekit_helper::PeerIdentity;

// ============================================================================
// SECTION: Recording Compiler
// ============================================================================

/// Compiler stub that counts invocations and optionally fails.
pub struct RecordingCompiler {
    /// Number of compile invocations.
    pub calls: Arc<AtomicUsize>,
    /// Whether compile calls should fail.
    pub fail: bool,
    /// Artificial delay applied before returning.
    pub delay: std::time::Duration,
}

impl RecordingCompiler {
    /// Creates a succeeding compiler with a shared call counter.
    pub fn new(calls: Arc<AtomicUsize>) -> Self {
        Self {
            calls,
            fail: false,
            delay: std::time::Duration::ZERO,
        }
    }

    /// Creates a failing compiler with a shared call counter.
    pub fn failing(calls: Arc<AtomicUsize>) -> Self {
        Self {
            calls,
            fail: true,
            delay: std::time::Duration::ZERO,
        }
    }
}

#[async_trait]
impl LocaleCompiler for RecordingCompiler {
    async fn compile(&self) -> Result<(), HelperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(HelperError::Subprocess {
                program: "stub-compiler".to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Recording Events
// ============================================================================

/// Event sink capturing every recorded event.
#[derive(Default)]
pub struct RecordingEvents {
    /// Captured events in order.
    pub seen: Mutex<Vec<ProvisionEvent>>,
}

impl RecordingEvents {
    /// Returns a snapshot of the captured events.
    pub fn snapshot(&self) -> Vec<ProvisionEvent> {
        self.seen.lock().expect("events mutex").clone()
    }
}

impl ProvisionEvents for RecordingEvents {
    fn record(&self, event: ProvisionEvent) {
        self.seen.lock().expect("events mutex").push(event);
    }
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Peer identity describing the test process itself.
pub fn local_peer() -> PeerIdentity {
    PeerIdentity {
        pid: Some(i32::try_from(std::process::id()).expect("pid fits i32")),
        uid: 1000,
    }
}

/// Writes a definition file fixture and returns its path.
pub fn write_definition_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("locale.gen");
    std::fs::write(&path, content).expect("write fixture");
    path
}

/// Canonical fixture content with commented and active declarations.
pub const FIXTURE: &str = "\
# This file lists locales supported on this system.
#
#de_DE.UTF-8 UTF-8
#fr_FR.UTF-8 UTF-8
en_US.UTF-8 UTF-8
# aa_DJ ISO-8859-1
";
