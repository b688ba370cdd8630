//! Misogi CLI library
//!
//! This library contains all the CLI logic for misogi, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// Misogi - a pre-commit hook orchestrator
#[derive(Parser)]
#[command(name = "misogi")]
#[command(about = "Run declared hooks against your changes (misogi 禊)")]
#[command(version)]
#[command(long_about = "Run declared hooks against your changes (misogi 禊)

A fast pre-commit hook orchestrator written in Rust.
Hooks are declared once in .misogi.toml, pinned to a revision, and run
as external tools against the staged file set.

Features:
  • Declaration order is execution order
  • Per-hook file scoping by regex and file type
  • Optional parallel execution with order-stable reporting
  • Injected tool registry, so nothing hides behind global state")]
pub struct Cli {
    /// Path to the configuration file (default: discovered .misogi.toml)
    #[arg(long, env = "MISOGI_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "MISOGI_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for misogi CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Run hooks against the target file set
    Run(cmd::run::RunCommand),

    /// List configured sources and hooks
    List(cmd::list::ListCommand),

    /// Validate the configuration (and optionally tool resolvability)
    Validate(cmd::validate::ValidateCommand),
}

/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - Configuration discovery or loading fails
/// - Command execution fails (including a failing aggregate run status)
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging based on verbosity
    misogi_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    // Discover and load the configuration; a ConfigError aborts here,
    // before any hook runs
    let context = RuntimeContext::resolve(cli.config.as_deref())?;

    // Execute the command
    match cli.command {
        Commands::Run(run_cmd) => run_cmd.execute(&context)?,
        Commands::List(list_cmd) => list_cmd.execute(&context)?,
        Commands::Validate(validate_cmd) => validate_cmd.execute(&context)?,
    }

    Ok(())
}
