use crate::builtin::{Cd, Exit, Help};
use crate::command::{CommandFactory, ExitCode, Stdin, Stdout};
use crate::env::Environment;
use crate::external::ExternalCommand;
use crate::lexer;
use anyhow::{Result, bail};
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Read, Write};
use std::process::Stdio;

/// Shell name used to prefix every diagnostic printed to stderr.
const SHELL_NAME: &str = "nanosh";

/// Prompt marker printed before each read.
const PROMPT: &str = "$ ";

/// Zero-sized marker that carries a [`CommandFactory`] implementation for a
/// concrete command type.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive shell: an ordered command registry plus session state.
///
/// Factories are consulted in registration order and the first match wins,
/// so the registry order is the dispatch precedence. See [`Default`] for the
/// stock registry.
///
/// Example
/// ```
/// use nanosh::Interpreter;
/// let mut sh = Interpreter::default();
/// let status = sh.eval_line("help").unwrap();
/// assert_eq!(status, 0);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom ordered set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        let mut env = Environment::new();
        env.builtins = commands.iter().filter_map(|f| f.builtin_name()).collect();
        Self { env, commands }
    }

    /// Tokenize one raw input line and execute it.
    ///
    /// An empty or all-whitespace line is a no-op that reports success.
    /// Command output goes to the shell's stdout; errors are returned to the
    /// caller rather than printed.
    pub fn eval_line(&mut self, line: &str) -> Result<ExitCode> {
        self.eval_line_to(line, Box::new(InheritedStdout))
    }

    pub(crate) fn eval_line_to(
        &mut self,
        line: &str,
        stdout: Box<dyn Stdout>,
    ) -> Result<ExitCode> {
        let tokens = lexer::split_tokens(line);
        debug!("tokens: {tokens:?}");
        let Some((name, args)) = tokens.split_first() else {
            return Ok(0);
        };
        self.dispatch(name, args, stdout)
    }

    fn dispatch(&mut self, name: &str, args: &[&str], stdout: Box<dyn Stdout>) -> Result<ExitCode> {
        let stdin = Box::new(InheritedStdin);
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(stdin, stdout, &mut self.env);
            }
        }
        bail!("{name}: command not found")
    }

    /// The interactive Read-Eval-Print Loop.
    ///
    /// Prompts, reads one line, evaluates it, and repeats until the `exit`
    /// builtin raises [`Environment::should_exit`] or the input stream ends.
    /// Every recoverable error is reported on stderr here, prefixed with the
    /// shell name, and the loop carries on.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.env.should_exit {
            match rl.readline(PROMPT) {
                Ok(line) => match self.eval_line(&line) {
                    Ok(code) => debug!("dispatch finished with status {code}"),
                    Err(err) => eprintln!("{SHELL_NAME}: {err:#}"),
                },
                // Ctrl-C discards the pending line; only `exit` and
                // end-of-input terminate the session.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// The stock registry: `cd`, `help`, `exit`, then the external program
    /// launcher. Builtins come first so they shadow external programs of the
    /// same name.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}

/// Stdin passed to commands during interactive use: reads from the process
/// stdin and lets children inherit it.
struct InheritedStdin;

impl Read for InheritedStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::stdin().read(buf)
    }
}

impl Stdin for InheritedStdin {
    fn stdio(self: Box<Self>) -> Stdio {
        Stdio::inherit()
    }
}

/// Stdout counterpart of [`InheritedStdin`].
struct InheritedStdout;

impl Write for InheritedStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl Stdout for InheritedStdout {
    fn stdio(self: Box<Self>) -> Stdio {
        Stdio::inherit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ExecutableCommand;
    use crate::testkit::{MemWriter, lock_current_dir, unique_temp_dir};
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;

    /// Factory that records whether dispatch ever consulted it.
    struct Probe(Rc<Cell<bool>>);

    impl CommandFactory for Probe {
        fn try_create(
            &self,
            _env: &Environment,
            _name: &str,
            _args: &[&str],
        ) -> Option<Box<dyn ExecutableCommand>> {
            self.0.set(true);
            None
        }
    }

    #[test]
    fn registry_order_is_recorded_for_help() {
        let sh = Interpreter::default();
        assert_eq!(sh.env.builtins, vec!["cd", "help", "exit"]);
    }

    #[test]
    fn empty_line_consults_no_factory() {
        let consulted = Rc::new(Cell::new(false));
        let mut sh = Interpreter::new(vec![Box::new(Probe(consulted.clone()))]);

        assert_eq!(sh.eval_line("").unwrap(), 0);
        assert_eq!(sh.eval_line(" \t \x07 ").unwrap(), 0);
        assert!(!consulted.get());
    }

    #[test]
    fn builtins_shadow_later_factories() {
        let consulted = Rc::new(Cell::new(false));
        let mut sh = Interpreter::new(vec![
            Box::new(Factory::<Help>::default()),
            Box::new(Probe(consulted.clone())),
        ]);

        let (writer, out) = MemWriter::with_handle();
        let code = sh.eval_line_to("help", Box::new(writer)).unwrap();

        assert_eq!(code, 0);
        assert!(!consulted.get(), "dispatch went past the matching builtin");
        let text = String::from_utf8(out.borrow().clone()).unwrap();
        assert!(text.contains("built in"));
    }

    #[test]
    fn unknown_command_is_reported_without_ending_the_session() {
        let mut sh = Interpreter::default();

        let err = sh
            .eval_line("no_such_program_nanosh_test")
            .unwrap_err()
            .to_string();

        assert!(err.contains("command not found"));
        assert!(!sh.env.should_exit);
    }

    #[test]
    fn usage_error_from_a_builtin_does_not_end_the_session() {
        let mut sh = Interpreter::default();

        let err = sh.eval_line("cd one two three").unwrap_err().to_string();

        assert!(err.contains("Unrecognized argument") || err.contains("Usage"));
        assert!(!sh.env.should_exit);
    }

    #[test]
    fn session_runs_help_cd_exit_end_to_end() {
        let _guard = lock_current_dir();
        let temp = unique_temp_dir("session");
        let canonical = fs::canonicalize(&temp).unwrap();
        let orig = std::env::current_dir().unwrap();

        let mut sh = Interpreter::default();

        let (writer, out) = MemWriter::with_handle();
        assert_eq!(sh.eval_line_to("help", Box::new(writer)).unwrap(), 0);
        let banner = String::from_utf8(out.borrow().clone()).unwrap();
        for name in ["cd", "help", "exit"] {
            assert!(banner.contains(name), "banner is missing {name}");
        }

        let line = format!("cd {}", canonical.display());
        assert_eq!(sh.eval_line(&line).unwrap(), 0);
        assert_eq!(sh.env.current_dir, canonical);

        assert!(!sh.env.should_exit);
        assert_eq!(sh.eval_line("exit with arguments").unwrap(), 0);
        assert!(sh.env.should_exit);

        std::env::set_current_dir(orig).unwrap();
        let _ = fs::remove_dir_all(temp);
    }
}
