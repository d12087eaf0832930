//! A minimal interactive shell.
//!
//! The whole program is one loop: read a line, split it into whitespace
//! tokens, run the first token as a command, wait for it to finish, prompt
//! again. Builtins (`cd`, `help`, `exit`) execute in-process; any other name
//! is resolved against `PATH` and launched as a child process that inherits
//! the shell's streams, environment, and working directory.
//!
//! The main entry point is [`Interpreter`], which owns the ordered command
//! registry and the session state. The public modules [`command`] and [`env`]
//! expose the traits and types needed to register additional commands.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod lexer;
#[cfg(test)]
mod testkit;

/// Re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::Interpreter;
