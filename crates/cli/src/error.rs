//! Error types for CLI commands
//!
//! This module defines structured error types using thiserror, providing better
//! type safety and error handling compared to using `anyhow::Error` everywhere.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// No configuration file was found
    #[error(
        "Configuration file not found. Create .misogi.toml at the repository root or pass --config."
    )]
    ConfigNotFound,

    /// The run finished with a failing aggregate status
    ///
    /// This is the carrier of the nonzero-exit contract: hook failures are
    /// collected into the report, and only the final aggregate surfaces
    /// as an error.
    #[error("Hooks failed: {failed} out of {total}")]
    ChecksFailed {
        /// Number of hooks with a Fail or Error status
        failed: usize,
        /// Total number of hooks in the run
        total: usize,
    },

    /// Tool resolvability check failed (`validate --tools`)
    #[error("{count} hook tool(s) could not be resolved")]
    UnresolvableTools {
        /// Number of hooks whose executable did not resolve
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error (for migration from anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Errors from the core crates carry their own user-facing messages;
// wrap them through the Other variant.
impl From<misogi_core::Error> for CommandError {
    fn from(err: misogi_core::Error) -> Self {
        Self::Other(err.into())
    }
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
