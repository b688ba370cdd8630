//! Per-hook file filtering
//!
//! Compiles a hook's `files`/`exclude`/`types` declarations (plus the
//! run-level exclude) into a matcher that narrows the target file set
//! down to the paths the hook applies to. Patterns are regexes matched
//! against the path as given (normally repository-relative).

use crate::config::{HookSpec, RunConfig, compile_pattern};
use crate::filetype;
use misogi_core::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Compiled file filter for one hook
///
/// A path is applicable when it matches `files` (if set), carries every
/// required type tag, and matches neither exclude pattern. A hook that
/// declares no filter of its own falls back to the type tags implied by
/// its identifier; with no implied tags either, every file applies.
#[derive(Debug)]
pub struct FileFilter {
    files: Option<Regex>,
    exclude: Option<Regex>,
    run_exclude: Option<Regex>,
    types: Vec<String>,
}

impl FileFilter {
    /// Compile the filter for a hook
    ///
    /// # Errors
    ///
    /// Returns [`misogi_core::Error::Config`] if a pattern fails to
    /// compile. [`crate::Config::validate`] reports the same failure
    /// earlier, so a compiled config never fails here.
    pub fn for_hook(hook: &HookSpec, run: &RunConfig) -> Result<Self> {
        let files = hook
            .files
            .as_deref()
            .map(|p| compile_pattern(p, &format!("hook '{}' files", hook.id)))
            .transpose()?;

        let exclude = hook
            .exclude
            .as_deref()
            .map(|p| compile_pattern(p, &format!("hook '{}' exclude", hook.id)))
            .transpose()?;

        let run_exclude = run
            .exclude
            .as_deref()
            .map(|p| compile_pattern(p, "run.exclude"))
            .transpose()?;

        // Fall back to the types implied by the hook's identity when the
        // hook declares no filter at all.
        let types = if hook.types.is_empty() && files.is_none() && exclude.is_none() {
            filetype::default_types_for(&hook.id)
                .iter()
                .map(|t| (*t).to_string())
                .collect()
        } else {
            hook.types.clone()
        };

        Ok(Self {
            files,
            exclude,
            run_exclude,
            types,
        })
    }

    /// Check if a single path is applicable
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if let Some(files) = &self.files
            && !files.is_match(&path_str)
        {
            return false;
        }

        if let Some(exclude) = &self.exclude
            && exclude.is_match(&path_str)
        {
            return false;
        }

        if let Some(run_exclude) = &self.run_exclude
            && run_exclude.is_match(&path_str)
        {
            return false;
        }

        if !self.types.is_empty() {
            let tags = filetype::tags_for(path);
            if !self.types.iter().all(|t| tags.contains(&t.as_str())) {
                return false;
            }
        }

        true
    }

    /// Narrow a target file set down to the applicable paths, preserving order
    #[must_use]
    pub fn apply<'a>(&self, files: &'a [PathBuf]) -> Vec<&'a Path> {
        files
            .iter()
            .map(PathBuf::as_path)
            .filter(|p| self.matches(p))
            .collect()
    }
}
