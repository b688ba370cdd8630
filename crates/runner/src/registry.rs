//! Tool registry: hook identifier to executable resolution
//!
//! The registry is the one place that maps a declared hook id to a
//! runnable executable. It is passed into the runner explicitly rather
//! than consulted as ambient state, so tests can substitute a table of
//! fake executables.

use misogi_core::{Error, Result, ToolResolver};
use std::collections::HashMap;
use std::path::PathBuf;

/// Executable lookup table with a `PATH` fallback
///
/// Explicit entries win; anything else is resolved by searching `PATH`
/// for an executable named after the hook id.
///
/// # Examples
///
/// ```ignore
/// // Production: resolve everything from PATH
/// let registry = ToolRegistry::system();
///
/// // Tests: pin an id to a fake executable
/// let registry = ToolRegistry::system().with_tool("check-yaml", fake_path);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, PathBuf>,
}

impl ToolRegistry {
    /// Create a registry that resolves every id from `PATH`
    #[must_use]
    pub fn system() -> Self {
        Self::default()
    }

    /// Pin a hook id to a specific executable
    #[must_use]
    pub fn with_tool(mut self, hook_id: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        self.tools.insert(hook_id.into(), executable.into());
        self
    }

    /// Check whether an id has an explicit entry (ignoring `PATH`)
    #[must_use]
    pub fn is_pinned(&self, hook_id: &str) -> bool {
        self.tools.contains_key(hook_id)
    }
}

impl ToolResolver for ToolRegistry {
    fn resolve(&self, hook_id: &str) -> Result<PathBuf> {
        if let Some(path) = self.tools.get(hook_id) {
            if !path.exists() {
                return Err(Error::Registry(format!(
                    "Tool '{}' is registered at {} but the file does not exist",
                    hook_id,
                    path.display()
                )));
            }
            return Ok(path.clone());
        }

        which::which(hook_id).map_err(|e| {
            Error::Registry(format!("Tool '{hook_id}' not found on PATH: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_pinned_tool_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("fake-check");
        fs::write(&exe, "#!/bin/sh\nexit 0\n").unwrap();

        let registry = ToolRegistry::system().with_tool("check-yaml", &exe);
        assert!(registry.is_pinned("check-yaml"));
        assert_eq!(registry.resolve("check-yaml").unwrap(), exe);
    }

    #[test]
    fn test_pinned_tool_missing_file_is_registry_error() {
        let registry =
            ToolRegistry::system().with_tool("check-yaml", Path::new("/nonexistent/tool"));

        let result = registry.resolve("check-yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Registry(_)));
    }

    #[test]
    fn test_unknown_tool_is_registry_error() {
        let registry = ToolRegistry::system();
        let result = registry.resolve("definitely-not-a-real-tool-mi2026");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Registry(_)));
    }

    #[test]
    #[cfg(unix)]
    fn test_path_fallback_finds_common_tools() {
        // `sh` exists on every unix system the tests run on
        let registry = ToolRegistry::system();
        assert!(registry.is_resolvable("sh"));
    }
}
