//! Base error types for misogi
//!
//! This module provides the foundation error types that all crates can use.

use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (malformed or inconsistent configuration)
    ///
    /// Fatal: surfaces before any hook runs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool registry error (hook identifier cannot be resolved to an executable)
    #[error("Tool registry error: {0}")]
    Registry(String),

    /// Hook execution error
    #[error("Hook execution error: {0}")]
    Execution(String),

    /// Git error
    #[error("Git error: {0}")]
    Git(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
