//! Command trait for misogi CLI
//!
//! This module defines the `Command` trait that all misogi commands implement.
//! It provides a uniform interface for command execution, making it easier to
//! test, extend, and maintain commands.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all misogi commands
///
/// All commands that require a loaded configuration should implement this
/// trait. The `execute` method receives a `RuntimeContext` containing the
/// shared configuration and the resolved repository root.
///
/// Commands can specify their return type via the `Output` associated type.
/// Most commands return `()`.
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
/// use clap::Args;
///
/// #[derive(Debug, Args)]
/// pub struct MyCommand {
///     #[arg(short, long)]
///     pub some_flag: bool,
/// }
///
/// impl Command for MyCommand {
///     type Output = ();
///
///     fn execute(&self, context: &RuntimeContext) -> Result<()> {
///         // Access config: context.config
///         // Access root: context.root
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute. Error
    /// messages should be descriptive enough for the user to understand
    /// what went wrong.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
