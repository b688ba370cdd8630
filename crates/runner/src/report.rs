//! Run results and aggregation
//!
//! One [`RunResult`] is produced per hook invocation. Results are
//! immutable once created and live only until the report is printed;
//! nothing here is persisted.

use std::time::Duration;

/// Outcome of one hook invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// The tool ran and exited 0
    Pass,
    /// The tool ran and exited nonzero
    Fail,
    /// The tool could not be executed (unresolvable, spawn failure, timeout)
    Error,
    /// No applicable files; the tool was never invoked
    Skipped,
}

impl HookStatus {
    /// Whether this status counts against the aggregate verdict
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, HookStatus::Fail | HookStatus::Error)
    }

    /// Human-readable label for status lines
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            HookStatus::Pass => "Passed",
            HookStatus::Fail => "Failed",
            HookStatus::Error => "Error",
            HookStatus::Skipped => "Skipped",
        }
    }
}

/// Outcome of invoking one hook
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Hook identifier
    pub hook_id: String,
    /// Display name used in status lines
    pub name: String,
    /// Exit status classification
    pub status: HookStatus,
    /// Captured combined stdout/stderr (or the failure reason for Error)
    pub output: String,
    /// Wall-clock duration of the invocation
    pub duration: Duration,
}

impl RunResult {
    /// Record a skipped hook (no process was spawned)
    #[must_use]
    pub fn skipped(hook_id: &str, name: &str) -> Self {
        Self {
            hook_id: hook_id.to_string(),
            name: name.to_string(),
            status: HookStatus::Skipped,
            output: String::new(),
            duration: Duration::ZERO,
        }
    }
}

/// Ordered collection of run results plus the aggregate verdict
///
/// Results are kept in hook declaration order regardless of the order
/// invocations completed in.
#[derive(Debug, Default)]
pub struct RunReport {
    results: Vec<RunResult>,
}

impl RunReport {
    /// Build a report from results already in declaration order
    #[must_use]
    pub fn new(results: Vec<RunResult>) -> Self {
        Self { results }
    }

    /// All results in declaration order
    #[must_use]
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// Aggregate verdict: pass iff no result is Fail or Error
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.results.iter().any(|r| r.status.is_failure())
    }

    /// Number of results counting against the aggregate
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Total number of results
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }
}
