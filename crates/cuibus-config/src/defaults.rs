use crate::logging::LogFormat;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter applied when debug mode is enabled.
pub const DEBUG_LOG_FILTER: &str = "debug";

/// Default exclusive upper bound for polygon vertex ids.
pub const DEFAULT_MAX_POLYGON_VERTICES: usize = 1024;

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used as the serde default.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default polygon vertex limit used by serde.
#[must_use]
pub const fn default_max_polygon_vertices() -> usize {
    DEFAULT_MAX_POLYGON_VERTICES
}
