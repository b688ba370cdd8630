//! Common utilities and types shared across CLI commands

use crate::error::{CommandError, Result};
use misogi_config::{Config, config};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runtime context for CLI commands
///
/// This struct consolidates the state every command needs: the loaded
/// configuration, the canonicalized directory it was found in (hooks run
/// from there), and the config file path for display.
#[derive(Clone)]
pub struct RuntimeContext {
    /// Shared configuration (uses Arc to avoid cloning)
    pub config: Arc<Config>,
    /// Directory containing the config file; working directory for hooks
    pub root: PathBuf,
    /// Path of the loaded configuration file
    pub config_path: PathBuf,
}

impl RuntimeContext {
    /// Discover, load, and validate the configuration
    ///
    /// With an explicit path the file is loaded as-is; otherwise the
    /// config is discovered by walking up from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::ConfigNotFound` when discovery finds
    /// nothing, or a wrapped `ConfigError` when loading/validation fails.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => {
                let cwd = std::env::current_dir()?;
                config::discover(&cwd).ok_or(CommandError::ConfigNotFound)?
            }
        };

        let config = Config::load(&config_path)?;

        let root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let root = fs::canonicalize(root)?;

        Ok(Self {
            config: Arc::new(config),
            root,
            config_path,
        })
    }
}
