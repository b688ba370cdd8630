//! List command implementation
//!
//! Shows the configured sources and hooks with multiple output formats.

use clap::Args;
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// List configured sources and hooks
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format (simple, json)
    #[arg(short, long, default_value = "simple")]
    pub format: String,
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        match self.format.as_str() {
            "json" => {
                let json = serde_json::json!({
                    "config": context.config_path,
                    "sources": context.config.sources,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).map_err(anyhow::Error::from)?
                );
            }
            _ => {
                println!(
                    "Configuration: {}",
                    context.config_path.display().to_string().cyan()
                );
                println!("Total hooks: {}", context.config.total());

                for source in &context.config.sources {
                    println!(
                        "\n{} {}",
                        source.location.bold(),
                        format!("@ {}", source.revision).cyan()
                    );

                    for hook in &source.hooks {
                        if hook.args.is_empty() {
                            println!("  • {}", hook.id.green());
                        } else {
                            println!(
                                "  • {} {}",
                                hook.id.green(),
                                hook.args.join(" ").dimmed()
                            );
                        }

                        if !hook.additional_dependencies.is_empty() {
                            println!(
                                "      {} {}",
                                "deps:".dimmed(),
                                hook.additional_dependencies.join(", ").dimmed()
                            );
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
