// crates/localekit-helper/src/main.rs
// ============================================================================
// Module: Helper Daemon Entry Point
// Description: Command-line front end for the provisioning helper service.
// Purpose: Wire production seams into the bounded-lifetime socket server.
// Dependencies: clap, localekit-core, localekit-helper, tokio
// ============================================================================

//! ## Overview
//! `localekit-helperd` binds the helper socket, wires the polkit authority
//! and the system locale compiler into the request service, and exits on its
//! own once the idle watchdog elapses. It is expected to run with elevated
//! privilege under a service manager; all paths and bounds are overridable
//! for packaging and testing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use localekit_core::ProvisionEvent;
use localekit_core::ProvisionEvents;
use localekit_helper::CommandCompiler;
use localekit_helper::HelperConfig;
use localekit_helper::HelperError;
use localekit_helper::HelperServer;
use localekit_helper::PkcheckAuthority;
use localekit_helper::config::DEFAULT_COMPILER;
use localekit_helper::config::DEFAULT_DEFINITION_FILE;
use localekit_helper::config::DEFAULT_PKCHECK;
use localekit_helper::config::DEFAULT_QUEUE_DEPTH;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Privileged locale provisioning helper daemon.
#[derive(Parser, Debug)]
#[command(name = "localekit-helperd")]
struct HelperdArgs {
    /// Listening socket path.
    #[arg(long, value_name = "PATH", default_value = localekit_core::proto::DEFAULT_SOCKET_PATH)]
    socket: PathBuf,
    /// Locale-definition file to own.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DEFINITION_FILE)]
    definition_file: PathBuf,
    /// Locale compiler executable.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_COMPILER)]
    compiler: PathBuf,
    /// Polkit check executable.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PKCHECK)]
    pkcheck: PathBuf,
    /// Idle seconds before the daemon exits.
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    idle_timeout_secs: u64,
    /// Depth of the pending-request queue.
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_QUEUE_DEPTH)]
    queue_depth: usize,
}

// ============================================================================
// SECTION: Event Sink
// ============================================================================

/// Event sink writing stable labels to standard error.
///
/// # Invariants
/// - Output contains counts and labels only, never raw request content.
struct StderrEvents;

impl ProvisionEvents for StderrEvents {
    fn record(&self, event: ProvisionEvent) {
        let mut stderr = std::io::stderr();
        let _ = writeln!(&mut stderr, "localekit-helperd: {}", event.describe());
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs the daemon and maps errors to an exit code.
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = std::io::stderr();
            let _ = writeln!(&mut stderr, "localekit-helperd: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the configuration and runs the server to voluntary exit.
async fn run() -> Result<(), HelperError> {
    let args = HelperdArgs::parse();
    let config = HelperConfig {
        socket_path: args.socket,
        definition_file: args.definition_file,
        compiler: args.compiler.clone(),
        pkcheck: args.pkcheck.clone(),
        idle_timeout: Duration::from_secs(args.idle_timeout_secs),
        queue_depth: args.queue_depth,
    };
    let server = HelperServer::new(config)?;
    server
        .run(
            Arc::new(PkcheckAuthority::new(args.pkcheck)),
            Arc::new(CommandCompiler::new(args.compiler)),
            Arc::new(StderrEvents),
        )
        .await
}
