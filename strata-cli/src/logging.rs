//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 输出日志；库代码使用的 `strata-log` 日志器
//! 通过 `TracingSink` 桥接到 tracing 事件。

use crate::config::{LogConfig, LOG_ENV};
use std::io;
use std::sync::Arc;
use strata_log::{FileSink, FlushGuard, LogSink, Logger, Record};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 把 strata-log 记录转发为 tracing 事件
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &Record) {
        let scope = record.span.map(|(_, name)| name).unwrap_or("");
        match record.level {
            strata_log::Level::Trace => {
                tracing::trace!(target: "strata", module = record.target, scope, "{}", record.message)
            }
            strata_log::Level::Debug => {
                tracing::debug!(target: "strata", module = record.target, scope, "{}", record.message)
            }
            strata_log::Level::Info => {
                tracing::info!(target: "strata", module = record.target, scope, "{}", record.message)
            }
            strata_log::Level::Warn => {
                tracing::warn!(target: "strata", module = record.target, scope, "{}", record.message)
            }
            strata_log::Level::Error => {
                tracing::error!(target: "strata", module = record.target, scope, "{}", record.message)
            }
        }
    }
}

/// 日志作用域守卫：离开作用域时刷新所有输出
pub struct LogGuard {
    logger: Arc<Logger>,
    _flush: FlushGuard,
}

impl LogGuard {
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

/// 按配置初始化日志系统，返回持有日志器的守卫
pub fn init(log_config: &LogConfig) -> io::Result<LogGuard> {
    let directive = std::env::var(LOG_ENV).unwrap_or_else(|_| log_config.default_directive());
    if log_config.flow {
        std::env::set_var(LOG_ENV, &directive);
    }

    if log_config.logs_to_stderr() {
        let filter = EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(log_config.default_directive()));
        let layer = create_format_layer(log_config.format, io::stderr).with_filter(filter);
        // 测试中可能重复初始化，忽略已安装的订阅者
        let _ = tracing_subscriber::registry().with(layer).try_init();
    }

    let logger = create_logger(log_config, &directive)?;
    let flush = logger.flush_on_drop();
    Ok(LogGuard {
        logger,
        _flush: flush,
    })
}

/// 库日志器：级别取自生效的过滤指令，交给 EnvFilter 做最终筛选
fn create_logger(log_config: &LogConfig, directive: &str) -> io::Result<Arc<Logger>> {
    let logger = Logger::new(log_config.logger_level(directive));
    logger.add_sink(TracingSink);
    if let Some(path) = &log_config.file {
        logger.add_sink(FileSink::new(path)?);
    }
    Ok(logger)
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_log::{info, Level};

    #[test]
    fn test_file_logging_is_flushed_by_guard() {
        let path = std::env::temp_dir().join(format!("strata_cli_log_{}", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let config = LogConfig {
            level: Level::Info,
            file: Some(path.clone()),
            ..LogConfig::default()
        };
        let guard = init(&config).unwrap();
        info!(guard.logger(), "hello from the cli");
        drop(guard);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("hello from the cli"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_env_directive_raises_logger_level() {
        let config = LogConfig::from_verbosity(0);
        let logger = create_logger(&config, "debug").unwrap();
        assert!(logger.is_enabled(Level::Debug));
        assert!(!logger.is_enabled(Level::Trace));

        let quiet = create_logger(&config, &config.default_directive()).unwrap();
        assert!(!quiet.is_enabled(Level::Info));
    }

    #[test]
    fn test_tracing_sink_accepts_all_levels() {
        let logger = Logger::new(Level::Trace).with_sink(TracingSink);
        for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error] {
            logger.log(level, module_path!(), "bridged");
        }
    }
}
