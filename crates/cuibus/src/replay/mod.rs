//! Replays captured CUI streams.
//!
//! Every non-blank input line is handed to a [`Dispatcher`] backed by an
//! in-memory [`Selection`]. A monitor listener registered for every kind
//! traces each event, failed lines are written to the error stream, and a
//! one-line summary is written to the output stream. The exit status is
//! non-zero when any line failed.

mod cli;

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind;
use cuibus_config::{Config, ConfigError};
use cuibus_events::{ListenerError, ListenerHandle, Order, RegistryError};
use cuibus_protocol::{Selection, SelectionStore};
use thiserror::Error;
use tracing::info;

use crate::dispatch::{CommandEvent, Dispatcher};
use crate::telemetry::{self, TelemetryError};

pub use self::cli::{Cli, LogFormatArg};

/// Tracing target for replay progress.
const REPLAY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::replay");

/// Exit status for invalid command-line usage.
const USAGE_EXIT: u8 = 2;

/// Errors that stop a replay before every line was handled.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Telemetry could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// The monitor listener could not be registered.
    #[error("failed to register replay monitor: {0}")]
    Registry(#[from] RegistryError),

    /// The input file could not be opened.
    #[error("failed to open input {path}: {source}")]
    Input {
        /// Input file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading the input failed part way through.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// Writing a report failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Counts gathered over one replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Non-blank lines handled.
    pub lines: usize,
    /// Lines that decoded and applied.
    pub applied: usize,
    /// Lines that failed to decode or apply.
    pub failed: usize,
    /// Listener errors and panics across all lines.
    pub listener_failures: usize,
}

impl ReplaySummary {
    /// Returns `true` when every line decoded and applied.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "replayed {} line(s): {} applied, {} failed, {} listener failure(s)",
            self.lines, self.applied, self.failed, self.listener_failures
        )
    }
}

/// Runs the replay tool with `args` and the given streams.
///
/// `stdin` is read only when no input file is named.
pub fn run<I, T, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    R: BufRead,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_usage(&error, stdout, stderr),
    };

    match replay(&cli, stdin, stdout, stderr) {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            let _ = writeln!(stderr, "cuibus-replay: {error}");
            ExitCode::FAILURE
        }
    }
}

fn report_usage<W, E>(error: &clap::Error, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    W: Write,
    E: Write,
{
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        _ => {
            let _ = write!(stderr, "{error}");
            ExitCode::from(USAGE_EXIT)
        }
    }
}

fn replay<R, W, E>(
    cli: &Cli,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<ReplaySummary, ReplayError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let config = cli.resolve_config()?;
    telemetry::initialise(&config)?;

    let mut dispatcher = monitored_dispatcher(&config)?;
    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| ReplayError::Input {
                path: path.clone(),
                source,
            })?;
            replay_lines(BufReader::new(file), &mut dispatcher, stderr)?
        }
        None => replay_lines(stdin, &mut dispatcher, stderr)?,
    };

    writeln!(stdout, "{summary}").map_err(ReplayError::Output)?;
    Ok(summary)
}

/// Builds a dispatcher over a fresh [`Selection`] with a tracing monitor on
/// every kind.
///
/// # Errors
///
/// Returns [`ReplayError::Registry`] if the monitor cannot be registered.
pub fn monitored_dispatcher(config: &Config) -> Result<Dispatcher<Selection>, ReplayError> {
    let dispatcher = Dispatcher::new(Selection::with_max_polygon_vertices(
        config.max_polygon_vertices(),
    ));
    let monitor: ListenerHandle<CommandEvent> =
        Arc::new(|event: &CommandEvent| -> Result<(), ListenerError> {
            info!(
                target: REPLAY_TARGET,
                kind = %event.kind(),
                raw = event.raw(),
                outcome = %event.outcome(),
                "observed command"
            );
            Ok(())
        });
    dispatcher.register_all_kinds(Order::Monitor, &monitor)?;
    dispatcher.bake_all();
    Ok(dispatcher)
}

/// Feeds every non-blank line of `reader` to `dispatcher`.
///
/// Lines that fail to decode or apply are written to `errors` with their
/// one-based line number; replay continues with the next line.
///
/// # Errors
///
/// Returns [`ReplayError::Read`] or [`ReplayError::Output`] on I/O failure.
pub fn replay_lines<R, S, E>(
    reader: R,
    dispatcher: &mut Dispatcher<S>,
    errors: &mut E,
) -> Result<ReplaySummary, ReplayError>
where
    R: BufRead,
    S: SelectionStore,
    E: Write,
{
    let mut summary = ReplaySummary::default();
    for (index, read) in reader.lines().enumerate() {
        let line = read.map_err(ReplayError::Read)?;
        if line.trim().is_empty() {
            continue;
        }
        summary.lines += 1;

        let report = dispatcher.handle(&line);
        summary.listener_failures += report.listener_failures().len();
        match report.error() {
            None => summary.applied += 1,
            Some(error) => {
                summary.failed += 1;
                writeln!(errors, "line {}: {error}", index + 1).map_err(ReplayError::Output)?;
            }
        }
    }
    Ok(summary)
}
