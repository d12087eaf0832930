use std::env as stdenv;
use std::path::PathBuf;

/// Mutable session state owned by the interpreter.
///
/// Fields are public; the interpreter and the builtins work on them
/// directly.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The working directory for command execution. Only the `cd` builtin
    /// mutates it, and it keeps the process-global working directory in
    /// sync so that child processes and relative paths agree with it.
    pub current_dir: PathBuf,
    /// Names of the registered builtins, in dispatch order. Filled in by
    /// the interpreter at construction; read by `help`.
    pub builtins: Vec<&'static str>,
    /// When set to true, the interactive loop terminates before its next
    /// read. Only the `exit` builtin sets it.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process state into a new `Environment`.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            builtins: Vec::new(),
            should_exit: false,
        }
    }
}
