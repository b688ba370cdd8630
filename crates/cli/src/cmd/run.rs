//! Run command implementation
//!
//! Executes the configured hooks against the target file set and prints
//! a per-hook status line plus a final summary. The process exit code is
//! nonzero whenever the aggregate status is Fail.

use anyhow::Context;
use clap::Args;
use misogi_runner::{HookRunner, HookStatus, RunReport, ToolRegistry, git};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Duration;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};

/// Run hooks against the target file set
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Files to run hooks against (default: files staged in git)
    pub files: Vec<PathBuf>,

    /// Run against every tracked file instead of the staged set
    #[arg(long)]
    pub all_files: bool,

    /// Run hooks concurrently on a bounded worker pool
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker count for parallel mode (overrides the configured value)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Show captured output for passing hooks too
    #[arg(long)]
    pub show_output: bool,
}

impl Command for RunCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let files = self.target_files(context)?;
        tracing::debug!(file_count = files.len(), "Resolved target file set");

        // CLI flags take precedence over the config file
        let mut config = (*context.config).clone();
        if let Some(jobs) = self.jobs {
            config.run.jobs = jobs;
        }

        let registry = ToolRegistry::system();
        let runner = HookRunner::new(&config, &context.root, &registry);
        let report = runner.run(&files, self.parallel)?;

        print_report(&report, self.show_output);

        if report.passed() {
            Ok(())
        } else {
            Err(CommandError::ChecksFailed {
                failed: report.failed(),
                total: report.total(),
            })
        }
    }
}

impl RunCommand {
    /// Resolve the target file set
    ///
    /// Explicit paths win; otherwise the set comes from the git index of
    /// the repository the config lives in.
    fn target_files(&self, context: &RuntimeContext) -> Result<Vec<PathBuf>> {
        if !self.files.is_empty() {
            return Ok(self.files.clone());
        }

        let files = if self.all_files {
            git::tracked_files(&context.root)
                .context("Could not list tracked files; pass paths explicitly")?
        } else {
            git::staged_files(&context.root)
                .context("Could not determine staged files; pass paths explicitly or use --all-files")?
        };

        Ok(files)
    }
}

/// Print per-hook status lines and the summary
fn print_report(report: &RunReport, show_output: bool) {
    for result in report.results() {
        let label = result.status.label();
        let styled = match result.status {
            HookStatus::Pass => label.green().to_string(),
            HookStatus::Fail | HookStatus::Error => label.red().bold().to_string(),
            HookStatus::Skipped => label.dimmed().to_string(),
        };

        if result.status == HookStatus::Skipped {
            println!("{:<50}{styled}", result.name);
        } else {
            println!(
                "{:<50}{styled} {}",
                result.name,
                format_duration(result.duration).dimmed()
            );
        }

        // Echo captured output for failing hooks (all hooks with --show-output)
        if (result.status.is_failure() || show_output) && !result.output.is_empty() {
            for output_line in result.output.lines() {
                println!("  {output_line}");
            }
        }
    }

    println!();
    if report.passed() {
        println!("{}", "All hooks passed!".green().bold());
    } else {
        println!(
            "{}",
            format!("{} of {} hooks failed.", report.failed(), report.total())
                .red()
                .bold()
        );
    }
}

/// Render a duration as a compact suffix for status lines
fn format_duration(duration: Duration) -> String {
    format!("({:.2}s)", duration.as_secs_f64())
}
