//! Command-line interface for `cuibus-replay`.
//!
//! Flags that name configuration keys are parsed by clap for usage checking
//! and help output, then forwarded to the layered loader so they take
//! precedence over the file and the environment.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cuibus_config::Config;

use super::ReplayError;

/// Program name handed to the configuration loader.
const PROGRAM: &str = "cuibus-replay";

/// Log format accepted on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogFormatArg {
    /// Structured JSON lines.
    Json,
    /// Human-readable single lines.
    Compact,
}

impl LogFormatArg {
    const fn as_config_value(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

/// Replays a captured CUI stream through a dispatcher.
#[derive(Parser, Debug)]
#[command(name = "cuibus-replay", version)]
pub struct Cli {
    /// TOML configuration file; `CUIBUS_CONFIG_PATH` is used when omitted.
    #[arg(long, value_name = "PATH")]
    pub config_path: Option<PathBuf>,
    /// Tracing filter expression, overriding the file and environment.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
    /// Log output format, overriding the file and environment.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub log_format: Option<LogFormatArg>,
    /// Exclusive upper bound for polygon vertex ids.
    #[arg(long, value_name = "COUNT")]
    pub max_polygon_vertices: Option<usize>,
    /// File of CUI lines; standard input when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Rebuilds the configuration flags that were given, behind the program
    /// name, in the form the layered loader expects.
    #[must_use]
    pub fn config_arguments(&self) -> Vec<OsString> {
        let mut arguments = vec![OsString::from(PROGRAM)];
        if let Some(path) = &self.config_path {
            arguments.push("--config-path".into());
            arguments.push(path.clone().into_os_string());
        }
        if let Some(filter) = &self.log_filter {
            arguments.push("--log-filter".into());
            arguments.push(filter.into());
        }
        if let Some(format) = self.log_format {
            arguments.push("--log-format".into());
            arguments.push(format.as_config_value().into());
        }
        if let Some(limit) = self.max_polygon_vertices {
            arguments.push("--max-polygon-vertices".into());
            arguments.push(limit.to_string().into());
        }
        arguments
    }

    /// Merges defaults, the configuration file, `CUIBUS_*` variables and the
    /// flags on this command line.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Config`] when a layer is malformed or the merged
    /// configuration is invalid.
    pub fn resolve_config(&self) -> Result<Config, ReplayError> {
        Ok(Config::resolve(self.config_arguments())?)
    }
}
