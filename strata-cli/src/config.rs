//! CLI 配置
//!
//! 由全局日志参数构造的日志配置

use crate::logging::LogFormat;
use std::path::PathBuf;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "STRATA_LOG";

/// CLI 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for the strata-log logger
    pub level: strata_log::Level,
    /// Log to stderr even when a log file is given
    pub to_stderr: bool,
    /// Export the effective filter to child processes
    pub flow: bool,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: strata_log::Level::Warn,
            to_stderr: false,
            flow: false,
            format: LogFormat::Compact,
            file: None,
        }
    }
}

impl LogConfig {
    /// `-v N`: 0 → warn, 1 → info, 2-3 → debug, more → trace
    pub fn from_verbosity(verbose: u8) -> Self {
        Self {
            level: strata_log::Level::from_verbosity(verbose),
            ..Self::default()
        }
    }

    /// Same level for the tracing subscriber
    pub fn tracing_level(&self) -> tracing::Level {
        match self.level {
            strata_log::Level::Trace => tracing::Level::TRACE,
            strata_log::Level::Debug => tracing::Level::DEBUG,
            strata_log::Level::Info => tracing::Level::INFO,
            strata_log::Level::Warn => tracing::Level::WARN,
            strata_log::Level::Error => tracing::Level::ERROR,
        }
    }

    /// Filter directive used when `STRATA_LOG` is not set
    pub fn default_directive(&self) -> String {
        self.tracing_level().to_string().to_lowercase()
    }

    /// Most verbose strata-log level the filter directive can enable
    ///
    /// `STRATA_LOG=debug` or `STRATA_LOG=strata=trace,warn` must reach the
    /// subscriber, so the logger may not drop those records first. Directives
    /// naming no level (`off`, bare targets) keep the `-v` level.
    pub fn logger_level(&self, directive: &str) -> strata_log::Level {
        directive
            .split(',')
            .filter_map(|part| {
                let level = part.rsplit('=').next().unwrap_or(part).trim();
                level.parse::<strata_log::Level>().ok()
            })
            .min()
            .unwrap_or(self.level)
    }

    /// Whether the stderr layer is installed
    pub fn logs_to_stderr(&self) -> bool {
        self.to_stderr || self.file.is_none()
    }
}
