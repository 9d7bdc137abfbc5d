//! Tracing setup for the cuibus tools.
//!
//! Events are written to standard error, one per line, as either JSON objects
//! or compact text according to [`Config::log_format`]. The active filter is
//! [`Config::effective_log_filter`]: when `debug` is set in any configuration
//! layer (for example `CUIBUS_DEBUG=true`) the configured `log_filter` is
//! ignored and `debug` is used instead, even when the configured expression
//! would not parse.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use cuibus_config::{Config, LogFormat};

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Set once the process-wide subscriber is in place.
static INSTALLED: OnceCell<()> = OnceCell::new();

/// Proof that the process-wide subscriber is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Reasons the subscriber could not be installed.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The effective filter expression does not parse.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Expression that was rejected.
        filter: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Some other subscriber already owns the global default.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the stderr subscriber described by `config`.
///
/// Only the first successful call has an effect. Later calls, including
/// calls with a different `config`, return a handle and leave the installed
/// subscriber untouched.
///
/// # Examples
///
/// ```rust
/// use cuibus_config::Config;
/// use cuibus::telemetry;
///
/// # fn main() -> Result<(), cuibus::telemetry::TelemetryError> {
/// let config = Config::default();
/// let _handle = telemetry::initialise(&config)?;
/// // A second call is a no-op.
/// let _again = telemetry::initialise(&config)?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the effective filter is invalid
/// and [`TelemetryError::Subscriber`] when a foreign subscriber is already
/// installed.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED.get_or_try_init(|| {
        let subscriber = build_subscriber(config)?;
        tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
    })?;
    Ok(TelemetryHandle)
}

/// Parses the filter `config` asks for, honouring debug mode.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] naming the rejected expression.
pub fn event_filter(config: &Config) -> Result<EnvFilter, TelemetryError> {
    let expression = config.effective_log_filter();
    EnvFilter::try_new(expression).map_err(|error| TelemetryError::Filter {
        filter: expression.to_owned(),
        message: error.to_string(),
    })
}

fn build_subscriber(config: &Config) -> Result<BoxedSubscriber, TelemetryError> {
    let filter = event_filter(config)?;
    let base = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber: BoxedSubscriber = match config.log_format() {
        LogFormat::Json => Box::new(base.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(base.compact().finish()),
    };
    Ok(subscriber)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn config_from(document: &str) -> Config {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("cuibus.toml");
        fs::write(&path, document).expect("write config");
        Config::resolve([
            OsString::from("cuibus-replay"),
            OsString::from("--config-path"),
            path.into_os_string(),
        ])
        .expect("config resolves")
    }

    #[test]
    fn invalid_filter_is_named_in_the_error() {
        let config = config_from("log_filter = \"cuibus=loud\"\n");
        let error = event_filter(&config).expect_err("filter must be rejected");
        match error {
            TelemetryError::Filter { filter, .. } => assert_eq!(filter, "cuibus=loud"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn debug_mode_replaces_an_invalid_filter() {
        let config = config_from("log_filter = \"cuibus=loud\"\ndebug = true\n");
        assert!(event_filter(&config).is_ok());
    }

    #[rstest]
    #[case("log_format = \"json\"\n")]
    #[case("log_format = \"compact\"\n")]
    fn subscriber_builds_for_each_format(#[case] document: &str) {
        let config = config_from(document);
        assert!(build_subscriber(&config).is_ok());
    }
}
