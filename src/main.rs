//! Binary entry point for the nanosh shell.

use nanosh::Interpreter;

fn main() {
    env_logger::init();

    // Editor failures are reported but never change the exit code; the
    // shell always terminates successfully.
    if let Err(err) = Interpreter::default().repl() {
        eprintln!("nanosh: {err}");
    }
}
