//! Hook execution
//!
//! Spawns one external process per hook against the hook's applicable
//! file subset, captures combined output and exit status, and collects
//! the results into a declaration-ordered [`RunReport`].
//!
//! Scheduling is sequential by default. Parallel mode runs hooks on a
//! bounded rayon pool; `fail_fast` forces sequential scheduling so the
//! early stop stays deterministic. Hook invocations share no mutable
//! state, only the read-only config and target file set.

use crate::report::{HookStatus, RunReport, RunResult};
use misogi_config::{Config, FileFilter, HookSpec};
use misogi_core::{Error, Result, ToolResolver};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One scheduled hook with its compiled file filter
struct Job<'a> {
    hook: &'a HookSpec,
    filter: FileFilter,
}

/// Hook execution runner
///
/// Executes the configured hooks in declaration order against a target
/// file set. Tool lookup goes through the injected [`ToolResolver`];
/// the runner never searches `PATH` itself.
pub struct HookRunner<'a, R>
where
    R: ToolResolver,
{
    config: &'a Config,
    /// Working directory for every hook invocation (the config file's root)
    root: &'a Path,
    resolver: &'a R,
}

impl<'a, R> HookRunner<'a, R>
where
    R: ToolResolver + Sync,
{
    /// Create a runner over a loaded configuration
    pub fn new(config: &'a Config, root: &'a Path, resolver: &'a R) -> Self {
        Self {
            config,
            root,
            resolver,
        }
    }

    /// Execute all hooks against the target file set
    ///
    /// Results come back in declaration order regardless of scheduling.
    /// A hook-level Fail or Error never aborts the run; only a broken
    /// filter (a config-level defect) does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a file filter fails to compile, or
    /// [`Error::Execution`] if the parallel worker pool cannot be built.
    #[tracing::instrument(skip(self, files), fields(file_count = files.len()))]
    pub fn run(&self, files: &[PathBuf], parallel: bool) -> Result<RunReport> {
        let jobs = self.plan()?;

        if jobs.is_empty() {
            tracing::debug!("No hooks configured");
            return Ok(RunReport::default());
        }

        tracing::debug!(
            hook_count = jobs.len(),
            file_count = files.len(),
            "Running hooks"
        );

        let results = if parallel && !self.config.run.fail_fast {
            self.run_parallel(&jobs, files)?
        } else {
            self.run_sequential(&jobs, files)
        };

        Ok(RunReport::new(results))
    }

    /// Compile the per-hook file filters up front
    ///
    /// Filter compilation errors are configuration defects and abort
    /// before any hook is spawned.
    fn plan(&self) -> Result<Vec<Job<'a>>> {
        self.config
            .hooks()
            .map(|(_, hook)| {
                FileFilter::for_hook(hook, &self.config.run).map(|filter| Job { hook, filter })
            })
            .collect()
    }

    /// Run jobs one at a time in declaration order
    fn run_sequential(&self, jobs: &[Job<'a>], files: &[PathBuf]) -> Vec<RunResult> {
        let mut results = Vec::with_capacity(jobs.len());
        let mut stop = false;

        for job in jobs {
            if stop {
                tracing::debug!(hook_id = %job.hook.id, "Skipping remaining hook (fail_fast)");
                results.push(RunResult::skipped(&job.hook.id, job.hook.display_name()));
                continue;
            }

            let result = self.execute_hook(job, files);
            if self.config.run.fail_fast && result.status.is_failure() {
                stop = true;
            }
            results.push(result);
        }

        results
    }

    /// Run jobs concurrently on a bounded pool
    ///
    /// Pool size comes from `run.jobs` (0 = one worker per core). The
    /// ordered collect keeps the report in declaration order no matter
    /// which invocation finishes first.
    fn run_parallel(&self, jobs: &[Job<'a>], files: &[PathBuf]) -> Result<Vec<RunResult>> {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.run.jobs)
            .build()
            .map_err(|e| Error::Execution(format!("Failed to build worker pool: {e}")))?;

        Ok(pool.install(|| {
            jobs.par_iter()
                .map(|job| self.execute_hook(job, files))
                .collect()
        }))
    }

    /// Execute a single hook and classify the outcome
    fn execute_hook(&self, job: &Job<'a>, files: &[PathBuf]) -> RunResult {
        let hook = job.hook;
        let name = hook.display_name();

        let applicable = job.filter.apply(files);
        if applicable.is_empty() && !hook.always_run {
            tracing::debug!(hook_id = %hook.id, "No applicable files, skipping");
            return RunResult::skipped(&hook.id, name);
        }

        let executable = match self.resolver.resolve(&hook.id) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(hook_id = %hook.id, error = %e, "Tool resolution failed");
                return RunResult {
                    hook_id: hook.id.clone(),
                    name: name.to_string(),
                    status: HookStatus::Error,
                    output: e.to_string(),
                    duration: Duration::ZERO,
                };
            }
        };

        let timeout = hook.effective_timeout(&self.config.run);

        let span = tracing::info_span!(
            "hook_execution",
            hook_id = %hook.id,
            executable = %executable.display(),
            file_count = applicable.len(),
            timeout,
        );
        let _guard = span.enter();

        let mut args: Vec<OsString> = hook.args.iter().map(OsString::from).collect();
        if hook.pass_filenames {
            args.extend(applicable.iter().map(|p| p.as_os_str().to_os_string()));
        }

        tracing::debug!("Starting hook execution");
        let start = Instant::now();
        let (status, output) = self.invoke(&executable, &args, timeout);
        let duration = start.elapsed();

        match status {
            HookStatus::Pass => {
                tracing::debug!(elapsed_ms = duration.as_millis(), "Hook passed");
            }
            _ => {
                tracing::warn!(
                    elapsed_ms = duration.as_millis(),
                    status = status.label(),
                    "Hook did not pass"
                );
            }
        }

        RunResult {
            hook_id: hook.id.clone(),
            name: name.to_string(),
            status,
            output,
            duration,
        }
    }

    /// Spawn the external tool and map its outcome to a status
    ///
    /// Exit 0 maps to Pass, nonzero to Fail. A spawn failure or an
    /// exceeded deadline maps to Error; on timeout the process is
    /// killed before returning.
    fn invoke(&self, executable: &Path, args: &[OsString], timeout: u64) -> (HookStatus, String) {
        let expression = duct::cmd(executable, args)
            .dir(self.root)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked();

        if timeout > 0 {
            let handle = match expression.start() {
                Ok(handle) => handle,
                Err(e) => {
                    return (
                        HookStatus::Error,
                        format!("Failed to start '{}': {}", executable.display(), e),
                    );
                }
            };

            match handle.wait_timeout(Duration::from_secs(timeout)) {
                Ok(Some(output)) => classify(output),
                Ok(None) => {
                    let _ = handle.kill();
                    (
                        HookStatus::Error,
                        format!("Timed out after {timeout} seconds"),
                    )
                }
                Err(e) => (
                    HookStatus::Error,
                    format!("Failed waiting for '{}': {}", executable.display(), e),
                ),
            }
        } else {
            match expression.run() {
                Ok(output) => classify(&output),
                Err(e) => (
                    HookStatus::Error,
                    format!("Failed to run '{}': {}", executable.display(), e),
                ),
            }
        }
    }
}

/// Map a finished process to Pass/Fail plus its captured output
fn classify(output: &std::process::Output) -> (HookStatus, String) {
    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        (HookStatus::Pass, text)
    } else {
        (HookStatus::Fail, text)
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::registry::ToolRegistry;
    use misogi_config::Config;
    use std::fs;
    use std::path::PathBuf;

    /// Write an executable shell script into `dir` and return its path
    fn fake_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn yaml_pair_config() -> Config {
        Config::from_toml_str(
            r#"
[[sources]]
location = "https://github.com/pre-commit/pre-commit-hooks"
revision = "v4.5.0"

  [[sources.hooks]]
  id = "check-yaml"

  [[sources.hooks]]
  id = "end-of-file-fixer"
"#,
        )
        .unwrap()
    }

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_both_hooks_pass() {
        let dir = tempfile::tempdir().unwrap();
        let config = yaml_pair_config();
        let registry = ToolRegistry::system()
            .with_tool(
                "check-yaml",
                fake_tool(dir.path(), "check-yaml", "#!/bin/sh\nexit 0\n"),
            )
            .with_tool(
                "end-of-file-fixer",
                fake_tool(dir.path(), "end-of-file-fixer", "#!/bin/sh\nexit 0\n"),
            );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.yaml"]), false).unwrap();

        assert!(report.passed());
        assert_eq!(report.total(), 2);
        assert_eq!(report.results()[0].status, HookStatus::Pass);
        assert_eq!(report.results()[1].status, HookStatus::Pass);
    }

    #[test]
    fn test_failing_hook_does_not_abort_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("second-ran");
        let config = yaml_pair_config();
        let registry = ToolRegistry::system()
            .with_tool(
                "check-yaml",
                fake_tool(dir.path(), "check-yaml", "#!/bin/sh\necho broken\nexit 1\n"),
            )
            .with_tool(
                "end-of-file-fixer",
                fake_tool(
                    dir.path(),
                    "end-of-file-fixer",
                    &format!("#!/bin/sh\ntouch {}\nexit 0\n", marker.display()),
                ),
            );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.yaml"]), false).unwrap();

        assert!(!report.passed());
        assert_eq!(report.results()[0].status, HookStatus::Fail);
        assert!(report.results()[0].output.contains("broken"));
        // The second hook still ran and reported its own status
        assert_eq!(report.results()[1].status, HookStatus::Pass);
        assert!(marker.exists());
    }

    #[test]
    fn test_empty_target_set_skips_everything() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("invoked");
        let config = yaml_pair_config();
        let registry = ToolRegistry::system()
            .with_tool(
                "check-yaml",
                fake_tool(
                    dir.path(),
                    "check-yaml",
                    &format!("#!/bin/sh\ntouch {}\nexit 0\n", marker.display()),
                ),
            )
            .with_tool(
                "end-of-file-fixer",
                fake_tool(dir.path(), "end-of-file-fixer", "#!/bin/sh\nexit 0\n"),
            );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&[], false).unwrap();

        assert!(report.passed());
        assert_eq!(report.results()[0].status, HookStatus::Skipped);
        assert_eq!(report.results()[1].status, HookStatus::Skipped);
        // The tool was never invoked
        assert!(!marker.exists());
    }

    #[test]
    fn test_non_applicable_files_skip_hook() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            r#"
[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "check-yaml"
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system().with_tool(
            "check-yaml",
            fake_tool(dir.path(), "check-yaml", "#!/bin/sh\nexit 0\n"),
        );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        // Only python files on offer; check-yaml implies yaml
        let report = runner.run(&paths(&["a.py", "b.py"]), false).unwrap();

        assert_eq!(report.results()[0].status, HookStatus::Skipped);
    }

    #[test]
    fn test_unresolvable_tool_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            r#"
[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "no-such-tool-mi2026"

  [[sources.hooks]]
  id = "after"
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system().with_tool(
            "after",
            fake_tool(dir.path(), "after", "#!/bin/sh\nexit 0\n"),
        );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.txt"]), false).unwrap();

        assert_eq!(report.results()[0].status, HookStatus::Error);
        assert!(report.results()[0].output.contains("not found"));
        // Best-effort continuation past the broken hook
        assert_eq!(report.results()[1].status, HookStatus::Pass);
        assert!(!report.passed());
    }

    #[test]
    fn test_captured_output_combines_stdout_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            r#"
[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "noisy"
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system().with_tool(
            "noisy",
            fake_tool(
                dir.path(),
                "noisy",
                "#!/bin/sh\necho to-stdout\necho to-stderr >&2\nexit 1\n",
            ),
        );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.txt"]), false).unwrap();

        let result = &report.results()[0];
        assert_eq!(result.status, HookStatus::Fail);
        assert!(result.output.contains("to-stdout"));
        assert!(result.output.contains("to-stderr"));
    }

    #[test]
    fn test_filenames_are_passed_after_args() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("argv");
        let config = Config::from_toml_str(
            r#"
[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "record-args"
  args = ["--strict"]
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system().with_tool(
            "record-args",
            fake_tool(
                dir.path(),
                "record-args",
                &format!("#!/bin/sh\necho \"$@\" > {}\nexit 0\n", marker.display()),
            ),
        );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.txt", "b.txt"]), false).unwrap();

        assert!(report.passed());
        let argv = fs::read_to_string(&marker).unwrap();
        assert_eq!(argv.trim(), "--strict a.txt b.txt");
    }

    #[test]
    fn test_pass_filenames_false_omits_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            r#"
[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "no-files"
  pass_filenames = false
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system().with_tool(
            "no-files",
            // Fails if any argument is present
            fake_tool(
                dir.path(),
                "no-files",
                "#!/bin/sh\n[ $# -eq 0 ] || exit 1\nexit 0\n",
            ),
        );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.txt"]), false).unwrap();

        assert!(report.passed());
    }

    #[test]
    fn test_always_run_bypasses_empty_set_skip() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            r#"
[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "always"
  always_run = true
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system().with_tool(
            "always",
            fake_tool(dir.path(), "always", "#!/bin/sh\nexit 0\n"),
        );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&[], false).unwrap();

        assert_eq!(report.results()[0].status, HookStatus::Pass);
    }

    #[test]
    fn test_timeout_kills_and_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            r#"
[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "sleeper"
  timeout = 1
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system().with_tool(
            "sleeper",
            fake_tool(dir.path(), "sleeper", "#!/bin/sh\nsleep 5\nexit 0\n"),
        );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let start = Instant::now();
        let report = runner.run(&paths(&["a.txt"]), false).unwrap();

        assert_eq!(report.results()[0].status, HookStatus::Error);
        assert!(report.results()[0].output.contains("Timed out"));
        // The process was killed, not waited out
        assert!(start.elapsed() < Duration::from_secs(4));
        assert!(!report.passed());
    }

    #[test]
    fn test_parallel_results_keep_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            r#"
[run]
jobs = 2

[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "slow"

  [[sources.hooks]]
  id = "fast"
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system()
            .with_tool(
                "slow",
                // Finishes last despite being declared first
                fake_tool(dir.path(), "slow", "#!/bin/sh\nsleep 1\nexit 1\n"),
            )
            .with_tool("fast", fake_tool(dir.path(), "fast", "#!/bin/sh\nexit 0\n"));

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.txt"]), true).unwrap();

        assert_eq!(report.results()[0].hook_id, "slow");
        assert_eq!(report.results()[0].status, HookStatus::Fail);
        assert_eq!(report.results()[1].hook_id, "fast");
        assert_eq!(report.results()[1].status, HookStatus::Pass);
        assert!(!report.passed());
    }

    #[test]
    fn test_fail_fast_skips_the_remainder() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("second-ran");
        let config = Config::from_toml_str(
            r#"
[run]
fail_fast = true

[[sources]]
location = "https://example.com/hooks"
revision = "v1"

  [[sources.hooks]]
  id = "first"

  [[sources.hooks]]
  id = "second"
"#,
        )
        .unwrap();
        let registry = ToolRegistry::system()
            .with_tool(
                "first",
                fake_tool(dir.path(), "first", "#!/bin/sh\nexit 1\n"),
            )
            .with_tool(
                "second",
                fake_tool(
                    dir.path(),
                    "second",
                    &format!("#!/bin/sh\ntouch {}\nexit 0\n", marker.display()),
                ),
            );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let report = runner.run(&paths(&["a.txt"]), false).unwrap();

        assert_eq!(report.results()[0].status, HookStatus::Fail);
        assert_eq!(report.results()[1].status, HookStatus::Skipped);
        assert!(!marker.exists());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = yaml_pair_config();
        let registry = ToolRegistry::system()
            .with_tool(
                "check-yaml",
                fake_tool(dir.path(), "check-yaml", "#!/bin/sh\nexit 1\n"),
            )
            .with_tool(
                "end-of-file-fixer",
                fake_tool(dir.path(), "end-of-file-fixer", "#!/bin/sh\nexit 0\n"),
            );

        let runner = HookRunner::new(&config, dir.path(), &registry);
        let files = paths(&["a.yaml"]);

        let first = runner.run(&files, false).unwrap();
        let second = runner.run(&files, false).unwrap();

        let statuses = |report: &RunReport| -> Vec<HookStatus> {
            report.results().iter().map(|r| r.status).collect()
        };
        assert_eq!(statuses(&first), statuses(&second));
    }
}
