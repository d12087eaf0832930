use crate::env::Environment;
use anyhow::Result;
use std::io::{Read, Write};
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Exit codes are reported but never decide whether the interactive loop
/// keeps running; that is the job of [`Environment::should_exit`].
pub type ExitCode = i32;

/// A readable input stream that can also be handed to a child process.
///
/// Builtins read from it in-process; the external launcher converts it into
/// a [`Stdio`] handle for `std::process::Command`.
pub trait Stdin: Read {
    /// Convert this input into a [`Stdio`] handle suitable for spawning.
    fn stdio(self: Box<Self>) -> Stdio;
}

/// A writable output stream that can also be handed to a child process.
pub trait Stdout: Write {
    /// Convert this output into a [`Stdio`] handle suitable for spawning.
    fn stdio(self: Box<Self>) -> Stdio;
}

/// Object-safe trait for any command the shell can execute.
///
/// Implemented by builtins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    /// Executes the command, consuming it.
    fn execute(
        self: Box<Self>,
        stdin: Box<dyn Stdin>,
        stdout: Box<dyn Stdout>,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. The
/// interpreter consults its factories in registration order and the first
/// `Some` wins, so placing builtin factories ahead of the external launcher
/// makes builtins shadow external programs of the same name.
pub trait CommandFactory {
    /// Name under which this factory's builtin is dispatched, or `None` for
    /// factories that resolve external programs. The `help` builtin lists
    /// these names.
    fn builtin_name(&self) -> Option<&'static str> {
        None
    }

    /// Attempt to create a command instance for the provided name and
    /// arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
