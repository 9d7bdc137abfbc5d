//! Shared configuration for the cuibus dispatcher and its tools.
//!
//! [`Config`] is assembled by `ortho_config` from four layers, each
//! overriding the one before it:
//!
//! 1. built-in defaults,
//! 2. a TOML file named by `--config-path` or `CUIBUS_CONFIG_PATH`
//!    (otherwise `.cuibus.toml` when one is discovered),
//! 3. `CUIBUS_*` environment variables,
//! 4. command-line flags such as `--log-filter`.
//!
//! Every key has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! log_filter = "info"
//! log_format = "compact"
//! debug = false
//! max_polygon_vertices = 1024
//! ```

mod defaults;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEBUG_LOG_FILTER, DEFAULT_LOG_FILTER, DEFAULT_MAX_POLYGON_VERTICES, default_log_filter,
    default_log_filter_string, default_log_format, default_max_polygon_vertices,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Command-line flags understood by the configuration loader.
pub const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--max-polygon-vertices",
];

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more configuration layers could not be read or merged.
    #[error("failed to load configuration: {0}")]
    Load(#[source] Arc<OrthoError>),

    /// The polygon vertex limit must admit at least one vertex.
    #[error("max_polygon_vertices must be greater than zero")]
    ZeroPolygonLimit,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CUIBUS")]
pub struct Config {
    #[serde(default = "default_log_filter_string")]
    log_filter: String,
    #[serde(default = "default_log_format")]
    log_format: LogFormat,
    #[serde(default)]
    debug: bool,
    #[serde(default = "default_max_polygon_vertices")]
    max_polygon_vertices: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            debug: false,
            max_polygon_vertices: default_max_polygon_vertices(),
        }
    }
}

impl Config {
    /// Loads every layer using `args` as the command line and validates the
    /// merged result.
    ///
    /// The first item of `args` is the program name. Only the flags listed in
    /// [`CONFIG_CLI_FLAGS`] may follow it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a layer is malformed and
    /// [`ConfigError::ZeroPolygonLimit`] when validation fails.
    pub fn resolve<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
            .map_err(ConfigError::Load)?
            .validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_polygon_vertices == 0 {
            return Err(ConfigError::ZeroPolygonLimit);
        }
        Ok(self)
    }

    /// Configured tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Filter to install: the configured one, or `debug` in debug mode.
    #[must_use]
    pub fn effective_log_filter(&self) -> &str {
        if self.debug {
            DEBUG_LOG_FILTER
        } else {
            &self.log_filter
        }
    }

    /// Configured log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Whether debug mode is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Exclusive upper bound for polygon vertex ids.
    #[must_use]
    pub const fn max_polygon_vertices(&self) -> usize {
        self.max_polygon_vertices
    }
}
