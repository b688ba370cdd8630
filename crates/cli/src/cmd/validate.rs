//! Validate command implementation
//!
//! Loading the configuration already validates it (a broken document
//! aborts before the command dispatch), so this command confirms the
//! document and optionally checks that every hook id resolves to an
//! executable on this system.

use clap::Args;
use misogi_core::ToolResolver;
use misogi_runner::ToolRegistry;
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};

/// Validate the configuration
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Also check that each hook id resolves to an executable
    #[arg(long)]
    pub tools: bool,
}

impl Command for ValidateCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        println!(
            "{} {} ({} sources, {} hooks)",
            "Configuration OK:".green().bold(),
            context.config_path.display(),
            context.config.sources.len(),
            context.config.total(),
        );

        if !self.tools {
            return Ok(());
        }

        let registry = ToolRegistry::system();
        let mut unresolved = 0usize;

        for (_, hook) in context.config.hooks() {
            match registry.resolve(&hook.id) {
                Ok(path) => {
                    println!("  {} {} -> {}", "✓".green(), hook.id, path.display());
                }
                Err(e) => {
                    unresolved += 1;
                    println!("  {} {} ({})", "✗".red(), hook.id, e);
                }
            }
        }

        if unresolved > 0 {
            return Err(CommandError::UnresolvableTools { count: unresolved });
        }

        Ok(())
    }
}
