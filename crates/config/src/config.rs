//! Configuration document structures
//!
//! Defines the core types for the hook configuration document: hook
//! sources, hook specifications, and run-level settings. The document is
//! TOML with two levels of ordered tables:
//!
//! ```toml
//! [run]
//! fail_fast = false
//!
//! [[sources]]
//! location = "https://github.com/pre-commit/pre-commit-hooks"
//! revision = "v4.5.0"
//!
//! [[sources.hooks]]
//! id = "check-yaml"
//! args = ["--allow-multiple-documents"]
//! ```
//!
//! Declaration order is execution order, at both levels.

use misogi_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file discovered at the repository root
pub const CONFIG_FILE: &str = ".misogi.toml";

/// Root configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hook sources in declaration order
    #[serde(default)]
    pub sources: Vec<HookSource>,

    /// Run-level settings
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Parse a configuration document from a TOML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is malformed, a required
    /// field is missing, or validation fails (see [`Config::validate`]).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration document from a file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on parse or validation failure, or an IO
    /// error if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate the whole document
    ///
    /// Checks every source and hook, and compiles the run-level exclude
    /// pattern to surface regex errors before any hook runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        for source in &self.sources {
            source.validate()?;
        }

        if let Some(pattern) = &self.run.exclude {
            compile_pattern(pattern, "run.exclude")?;
        }

        Ok(())
    }

    /// Iterate hooks in declaration order, paired with their owning source
    pub fn hooks(&self) -> impl Iterator<Item = (&HookSource, &HookSpec)> {
        self.sources
            .iter()
            .flat_map(|source| source.hooks.iter().map(move |hook| (source, hook)))
    }

    /// Get total number of hooks across all sources
    #[must_use]
    pub fn total(&self) -> usize {
        self.sources.iter().map(|s| s.hooks.len()).sum()
    }

    /// Check if no hooks are defined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Walk upward from `start` to find the configuration file
///
/// Stops at the first directory containing `.misogi.toml`. A `.git`
/// directory also terminates the walk (the repository root is the
/// natural boundary even when no config exists yet).
#[must_use]
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        let candidate = cur.join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// One external tool provider, pinned to a revision
///
/// A source exclusively owns its hooks; hook identifiers must be unique
/// within the source (the same identifier in a different source is a
/// different hook).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSource {
    /// Repository or location reference of the provider
    pub location: String,

    /// Pinned revision (tag or commit)
    pub revision: String,

    /// Hooks provided by this source, in declaration order
    #[serde(default)]
    pub hooks: Vec<HookSpec>,
}

/// Revision names that move over time and defeat reproducible pins
const MUTABLE_REVISIONS: &[&str] = &["HEAD", "head", "master", "main", "latest"];

impl HookSource {
    /// Validate this source and all of its hooks
    ///
    /// Checks for:
    /// - Non-empty location and revision
    /// - Hook identifiers unique within this source
    /// - Each hook's own validity
    ///
    /// A mutable revision name (`HEAD`, `master`, ...) is accepted with a
    /// warning: the run still works, but re-runs are no longer pinned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.location.trim().is_empty() {
            return Err(Error::Config(
                "Source 'location' cannot be empty".to_string(),
            ));
        }

        if self.revision.trim().is_empty() {
            return Err(Error::Config(format!(
                "Source '{}' has empty 'revision'",
                self.location
            )));
        }

        if MUTABLE_REVISIONS.contains(&self.revision.as_str()) {
            tracing::warn!(
                location = %self.location,
                revision = %self.revision,
                "Source revision is a mutable ref; runs are not reproducible"
            );
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for hook in &self.hooks {
            hook.validate()?;
            if !seen.insert(hook.id.as_str()) {
                return Err(Error::Config(format!(
                    "Duplicate hook id '{}' in source '{}'",
                    hook.id, self.location
                )));
            }
        }

        Ok(())
    }
}

/// A single hook definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSpec {
    /// Hook identifier, unique within its source
    pub id: String,

    /// Display name (defaults to the identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Extra arguments passed before the file list
    #[serde(default)]
    pub args: Vec<String>,

    /// Additional runtime dependencies declared for this hook
    ///
    /// Carried and surfaced in `list`/`validate` output; the orchestrator
    /// does not install them.
    #[serde(default)]
    pub additional_dependencies: Vec<String>,

    /// Regex a candidate path must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Regex that removes candidate paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// File-type tags a candidate must carry (empty = no constraint)
    #[serde(default)]
    pub types: Vec<String>,

    /// Whether the applicable file list is appended to the command line
    #[serde(default = "default_pass_filenames")]
    pub pass_filenames: bool,

    /// Run even when the applicable file set is empty
    #[serde(default)]
    pub always_run: bool,

    /// Timeout in seconds (default: 0 = inherit the run-level timeout)
    #[serde(default)]
    pub timeout: u64,
}

impl HookSpec {
    /// Name shown in reports and status lines
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Effective timeout for this hook given the run-level default
    #[must_use]
    pub fn effective_timeout(&self, run: &RunConfig) -> u64 {
        if self.timeout > 0 {
            self.timeout
        } else {
            run.timeout
        }
    }

    /// Validate this hook definition
    ///
    /// Checks for:
    /// - Non-empty identifier
    /// - Compilable `files` and `exclude` patterns
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Config("Hook id cannot be empty".to_string()));
        }

        if let Some(pattern) = &self.files {
            compile_pattern(pattern, &format!("hook '{}' files", self.id))?;
        }

        if let Some(pattern) = &self.exclude {
            compile_pattern(pattern, &format!("hook '{}' exclude", self.id))?;
        }

        Ok(())
    }
}

/// Run-level settings under `[run]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Global exclude regex applied to every hook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Stop scheduling hooks after the first Fail/Error
    #[serde(default)]
    pub fail_fast: bool,

    /// Default per-hook timeout in seconds (0 = none)
    #[serde(default)]
    pub timeout: u64,

    /// Worker count for parallel mode (0 = one per core)
    #[serde(default)]
    pub jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            exclude: None,
            fail_fast: false,
            timeout: 0,
            jobs: 0,
        }
    }
}

/// Default `pass_filenames` value (true = append the file list)
pub(crate) fn default_pass_filenames() -> bool {
    true
}

/// Compile a user-supplied regex, mapping failure to a config error
pub(crate) fn compile_pattern(pattern: &str, context: &str) -> Result<regex::Regex> {
    regex::Regex::new(pattern)
        .map_err(|e| Error::Config(format!("Invalid regex for {context}: {e}")))
}
