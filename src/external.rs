use crate::command::{CommandFactory, ExecutableCommand, ExitCode, Stdin, Stdout};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A command that is not a builtin: a program on disk, launched as a child
/// process. The path is resolved before the command is created, so a name
/// that exists nowhere never spawns anything.
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = std::env::var_os("PATH")?;
        let program = resolve_program(&search_paths, Path::new(name))?;
        Some(Box::new(ExternalCommand {
            program,
            args: args.iter().map(|a| a.into()).collect(),
        }))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        stdin: Box<dyn Stdin>,
        stdout: Box<dyn Stdout>,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        debug!("launching {:?} with {} args", self.program, self.args.len());
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(stdin.stdio())
            .stdout(stdout.stdio())
            .current_dir(&env.current_dir)
            .spawn()
            .with_context(|| format!("failed to launch {}", self.program.display()))?;

        // Blocks until the child exits or dies to a signal; a child that is
        // merely stopped keeps the wait alive.
        let status = child
            .wait()
            .with_context(|| format!("failed to wait for {}", self.program.display()))?;
        let code = status.code().unwrap_or_else(|| signal_exit_code(status));
        debug!("{:?} finished with status {code}", self.program);
        Ok(code)
    }
}

/// Exit code for a child that was killed by a signal, following the shell
/// convention of 128 plus the signal number.
#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map_or(-1, |signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a command name to the program file a shell would run.
///
/// A name containing a directory component (absolute, `bin/tool`, `./tool`)
/// refers to the filesystem directly, with relative paths taken against the
/// current working directory. A bare name is searched across the `PATH`
/// entries in order; the first directory containing a matching regular file
/// wins. Returns `None` when nothing matches.
pub(crate) fn resolve_program(search_paths: &OsStr, program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
