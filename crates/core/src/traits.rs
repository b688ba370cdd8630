//! Core behavioral traits for misogi components
//!
//! This module defines abstract interfaces that decouple high-level modules
//! from concrete implementations, following the Dependency Inversion Principle.
//!
//! By depending on these traits instead of concrete types, we achieve:
//! - **Reduced coupling**: Changes to implementations don't trigger recompilation of dependents
//! - **Better testability**: Easy to mock implementations for testing
//! - **Flexibility**: Can swap implementations at runtime if needed

use crate::Result;
use std::path::PathBuf;

/// Tool resolution interface
///
/// Abstracts the mapping from a hook identifier to a runnable executable,
/// so the runner never consults ambient global state directly. Production
/// code resolves against `PATH`; tests substitute a table of fake
/// executables.
///
/// # Examples
///
/// ```ignore
/// fn spawn_hook(resolver: &dyn ToolResolver, id: &str) -> Result<()> {
///     let exe = resolver.resolve(id)?;
///     // ... spawn exe
///     Ok(())
/// }
/// ```
pub trait ToolResolver {
    /// Resolve a hook identifier to the executable that implements it
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Registry`] when no executable is known for
    /// the identifier.
    fn resolve(&self, hook_id: &str) -> Result<PathBuf>;

    /// Check whether an identifier resolves without reporting the path
    fn is_resolvable(&self, hook_id: &str) -> bool {
        self.resolve(hook_id).is_ok()
    }
}
