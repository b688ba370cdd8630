//! Target file discovery from git
//!
//! The default target file set for a run is whatever is staged in the
//! index of the repository containing the config file; `--all-files`
//! widens that to every tracked path. Both come from `git2` so the
//! orchestrator never shells out for discovery.

use git2::{ErrorCode, Repository};
use misogi_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Helper function to convert git2 errors to core errors
#[inline]
#[allow(clippy::needless_pass_by_value)]
fn git_err(e: git2::Error) -> Error {
    Error::Git(e.message().to_string())
}

/// Files staged in the index relative to `HEAD`
///
/// Paths are repository-relative, in index order. On an unborn branch
/// (no commit yet) every index entry counts as staged.
///
/// # Errors
///
/// Returns [`Error::Git`] if `repo_root` is not a git repository or the
/// index cannot be read.
pub fn staged_files(repo_root: &Path) -> Result<Vec<PathBuf>> {
    let repo = Repository::open(repo_root).map_err(git_err)?;
    let index = repo.index().map_err(git_err)?;

    let head_tree = match repo.head() {
        Ok(head) => Some(head.peel_to_tree().map_err(git_err)?),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
        Err(e) => return Err(git_err(e)),
    };

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
        .map_err(git_err)?;

    let mut files = Vec::new();
    for delta in diff.deltas() {
        // Deletions have no new-side path worth running hooks against
        if delta.status() == git2::Delta::Deleted {
            continue;
        }
        if let Some(path) = delta.new_file().path() {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Every path tracked by the index
///
/// # Errors
///
/// Returns [`Error::Git`] if `repo_root` is not a git repository or the
/// index cannot be read.
pub fn tracked_files(repo_root: &Path) -> Result<Vec<PathBuf>> {
    let repo = Repository::open(repo_root).map_err(git_err)?;
    let index = repo.index().map_err(git_err)?;

    Ok(index
        .iter()
        .map(|entry| PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned()))
        .collect())
}

/// Find the repository containing `start`, if any
#[must_use]
pub fn find_repository_root(start: &Path) -> Option<PathBuf> {
    let repo = Repository::discover(start).ok()?;
    repo.workdir().map(Path::to_path_buf)
}
