//! Configuration management for misogi
//!
//! This crate handles:
//! - Configuration loading and validation
//! - Config file discovery
//! - Per-hook file filters (regex and file-type tags)
//! - Logging initialization

pub mod config;
pub mod filetype;
pub mod filter;
pub mod logging;

// Re-export error types from core
pub use misogi_core::{Error, Result};

// Re-export main types
pub use config::{CONFIG_FILE, Config, HookSource, HookSpec, RunConfig};
pub use filter::FileFilter;
