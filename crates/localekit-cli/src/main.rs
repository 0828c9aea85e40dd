// crates/localekit-cli/src/main.rs
// ============================================================================
// Module: LocaleKit CLI Entry Point
// Description: Command-line front end for the provisioning generator.
// Purpose: Drive enable requests and capability queries from a shell.
// Dependencies: clap, localekit-core, localekit-generator, tokio
// ============================================================================

//! ## Overview
//! `localekit` classifies the platform (or honors an explicit override),
//! builds the generator with the configured paths, and maps the terminal
//! outcome onto an exit code: only a manual outcome is a failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use localekit_cli::CliConfig;
use localekit_cli::ConfigError;
use localekit_cli::config::DEFAULT_CONFIG_PATH;
use localekit_core::GenerationOutcome;
use localekit_core::NoopEvents;
use localekit_core::ProvisionEvent;
use localekit_core::ProvisionEvents;
use localekit_core::RequestBatch;
use localekit_core::SupportMode;
use localekit_core::ValidationError;
use localekit_generator::Generator;
use localekit_generator::GeneratorConfig;
use localekit_generator::LangpackInstaller;
use localekit_generator::PkconBackend;
use localekit_generator::PlatformTraits;
use localekit_generator::classify_support_mode;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Locale provisioning front end.
#[derive(Parser, Debug)]
#[command(name = "localekit")]
struct Cli {
    /// Configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override platform support-mode detection.
    #[arg(long, value_enum, value_name = "MODE")]
    mode: Option<ModeArg>,
    /// Suppress provisioning event output.
    #[arg(long)]
    quiet: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Enable the given locales on this system.
    Enable {
        /// Locale identifiers such as `de_DE.UTF-8`.
        #[arg(required = true, value_name = "LOCALE")]
        locales: Vec<String>,
    },
    /// Print the platform's provisioning capability.
    SupportMode,
}

/// Support-mode override values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ModeArg {
    /// No known provisioning mechanism.
    None,
    /// Definition-file provisioning only.
    Glibc,
    /// Language-pack provisioning on top of glibc.
    All,
}

impl From<ModeArg> for SupportMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::None => Self::None,
            ModeArg::Glibc => Self::GlibcOnly,
            ModeArg::All => Self::Full,
        }
    }
}

// ============================================================================
// SECTION: CLI Errors
// ============================================================================

/// Errors surfaced to the terminal.
///
/// # Invariants
/// - Messages are complete sentences without internal detail dumps.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A requested locale identifier is malformed.
    #[error("rejected locale identifier: {0}")]
    Validation(#[from] ValidationError),
    /// Terminal output failed.
    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),
}

// ============================================================================
// SECTION: Event Sink
// ============================================================================

/// Event sink writing stable labels to standard error.
struct StderrEvents;

impl ProvisionEvents for StderrEvents {
    fn record(&self, event: ProvisionEvent) {
        let mut stderr = std::io::stderr();
        let _ = writeln!(&mut stderr, "localekit: {}", event.describe());
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "localekit: {message}");
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs the CLI and maps errors to an exit code.
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let mode = cli.mode.map_or_else(
        || classify_support_mode(PlatformTraits::detect(&config.query_tool)),
        SupportMode::from,
    );

    match cli.command {
        Commands::SupportMode => {
            write_stdout_line(mode.label())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Enable {
            locales,
        } => {
            let batch = RequestBatch::parse_all(&locales)?;
            let generator = build_generator(mode, &config, cli.quiet);
            let outcome = generator.generate(&batch).await;
            write_stdout_line(outcome.label())?;
            match outcome {
                GenerationOutcome::Success | GenerationOutcome::NeedsFont => Ok(ExitCode::SUCCESS),
                GenerationOutcome::AllManual => Ok(ExitCode::FAILURE),
            }
        }
    }
}

/// Loads configuration from the explicit path or system defaults.
///
/// An explicit path must exist; the default path may be absent, in which
/// case stock-system defaults apply.
fn load_config(path: Option<&std::path::Path>) -> Result<CliConfig, ConfigError> {
    match path {
        Some(path) => CliConfig::load(path),
        None => {
            let default = std::path::Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                CliConfig::load(default)
            } else {
                Ok(CliConfig::default())
            }
        }
    }
}

/// Wires the generator for the decided mode.
fn build_generator(mode: SupportMode, config: &CliConfig, quiet: bool) -> Generator {
    let events: Arc<dyn ProvisionEvents> = if quiet {
        Arc::new(NoopEvents)
    } else {
        Arc::new(StderrEvents)
    };
    let langpack = (mode == SupportMode::Full).then(|| {
        LangpackInstaller::new(
            config.query_tool.clone(),
            Arc::new(PkconBackend::new(config.pkcon.clone())),
            Arc::clone(&events),
        )
    });
    Generator::new(
        mode,
        GeneratorConfig {
            socket_path: config.socket_path.clone(),
            definition_file: config.definition_file.clone(),
        },
        langpack,
        events,
    )
}
