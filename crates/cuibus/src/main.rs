//! Entry point for `cuibus-replay`.
//!
//! Delegates to [`cuibus::replay::run`] with the process streams.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin: StdinLock<'static> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    cuibus::replay::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
