// crates/localekit-helper/src/compiler.rs
// ============================================================================
// Module: Locale Compiler Invocation
// Description: Subprocess seam for the system locale compiler.
// Purpose: Run the compiler with zero untrusted arguments.
// Dependencies: async-trait, tokio, crate::error
// ============================================================================

//! ## Overview
//! The locale compiler reads the just-edited definition file directly; it is
//! never passed the requested identifiers on its command line. The written
//! file is the sole input channel, so the validation done before editing
//! also covers compilation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::HelperError;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Locale compiler invocation interface.
#[async_trait]
pub trait LocaleCompiler: Send + Sync {
    /// Compiles every active declaration in the definition file.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Io`] when the process cannot be spawned and
    /// [`HelperError::Subprocess`] on a non-zero exit.
    async fn compile(&self) -> Result<(), HelperError>;
}

// ============================================================================
// SECTION: Command Implementation
// ============================================================================

/// Compiler backed by the platform locale-generation tool.
///
/// # Invariants
/// - The tool is invoked with no arguments.
pub struct CommandCompiler {
    /// Path of the compiler executable.
    program: PathBuf,
}

impl CommandCompiler {
    /// Creates a compiler using the given executable.
    #[must_use]
    pub const fn new(program: PathBuf) -> Self {
        Self {
            program,
        }
    }
}

#[async_trait]
impl LocaleCompiler for CommandCompiler {
    async fn compile(&self) -> Result<(), HelperError> {
        let output = Command::new(&self.program).output().await?;
        if output.status.success() {
            return Ok(());
        }
        Err(HelperError::Subprocess {
            program: self.program.display().to_string(),
            code: output.status.code(),
        })
    }
}
