//! 日志器实现

use crate::record::{Level, Record};
use crate::span::{Span, SpanId};
use std::io::Write;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// 日志输出目标 trait
pub trait LogSink: Send + Sync {
    /// 写入日志记录
    fn write(&self, record: &Record);

    /// 刷新缓冲内容（默认无操作）
    fn flush(&self) {}
}

/// 日志器配置和状态
pub struct Logger {
    /// 当前日志级别（原子存储）
    level: AtomicU8,
    /// 输出目标列表
    sinks: Mutex<Vec<Box<dyn LogSink>>>,
    /// Span 栈（用于跟踪嵌套调用）
    span_stack: Mutex<Vec<Span>>,
    next_span_id: AtomicU64,
}

// 锁中毒时继续使用内部数据，日志不应让调用方 panic
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Logger {
    pub fn new(level: Level) -> Arc<Self> {
        Arc::new(Logger {
            level: AtomicU8::new(level as u8),
            sinks: Mutex::new(Vec::new()),
            span_stack: Mutex::new(Vec::new()),
            next_span_id: AtomicU64::new(1),
        })
    }

    /// 添加输出目标（链式）
    pub fn with_sink<S: LogSink + 'static>(self: Arc<Self>, sink: S) -> Arc<Self> {
        self.add_sink(sink);
        self
    }

    /// 添加输出目标
    pub fn add_sink<S: LogSink + 'static>(&self, sink: S) {
        lock(&self.sinks).push(Box::new(sink));
    }

    /// 动态设置日志级别
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Info)
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// 记录日志（宏的落点）
    #[inline(never)]
    pub fn log(&self, level: Level, target: &'static str, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }

        let mut record = Record::new(level, target, message);

        if let Some(span) = lock(&self.span_stack).last() {
            record = record.with_span(span.id.0, span.name);
        }

        for sink in lock(&self.sinks).iter() {
            sink.write(&record);
        }
    }

    /// 进入一个新的 span，返回守卫对象
    pub fn enter_span(self: &Arc<Self>, name: &'static str) -> SpanGuard {
        let id = SpanId(self.next_span_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.span_stack).push(Span::new(id, name));

        SpanGuard {
            logger: Arc::clone(self),
        }
    }

    pub fn span_depth(&self) -> usize {
        lock(&self.span_stack).len()
    }

    /// 刷新所有输出目标
    pub fn flush(&self) {
        for sink in lock(&self.sinks).iter() {
            sink.flush();
        }
    }

    /// 获取作用域守卫，离开作用域时刷新
    pub fn flush_on_drop(self: &Arc<Self>) -> FlushGuard {
        FlushGuard {
            logger: Arc::clone(self),
        }
    }

    /// 创建禁用日志的 no-op 日志器（用于测试或禁用场景）
    pub fn noop() -> Arc<Self> {
        Self::new(Level::Error)
    }
}

/// Span 守卫，退出时自动弹出 span 栈
pub struct SpanGuard {
    logger: Arc<Logger>,
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        lock(&self.logger.span_stack).pop();
    }
}

/// 刷新守卫，在所有退出路径上刷新日志器
pub struct FlushGuard {
    logger: Arc<Logger>,
}

impl Drop for FlushGuard {
    fn drop(&mut self) {
        self.logger.flush();
    }
}

// 为 Arc<Logger> 实现 LogSink，支持链式日志器
impl LogSink for Arc<Logger> {
    fn write(&self, record: &Record) {
        self.log(record.level, record.target, record.message.clone());
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

/// 文件 sink（追加模式，带缓冲）
pub struct FileSink {
    file: Mutex<std::io::BufWriter<std::fs::File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(FileSink {
            file: Mutex::new(std::io::BufWriter::new(file)),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, record: &Record) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", record.format());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        LogSink::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogRingBuffer;

    fn temp_log(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("strata_log_{}_{}.log", name, std::process::id()))
    }

    #[test]
    fn test_logger_creation() {
        let logger = Logger::new(Level::Debug);
        assert_eq!(logger.level(), Level::Debug);
        assert!(logger.is_enabled(Level::Debug));
        assert!(!logger.is_enabled(Level::Trace));
    }

    #[test]
    fn test_level_change() {
        let logger = Logger::new(Level::Info);
        assert!(!logger.is_enabled(Level::Debug));

        logger.set_level(Level::Debug);
        assert!(logger.is_enabled(Level::Debug));
    }

    #[test]
    fn test_span_guard() {
        let logger = Logger::new(Level::Debug);
        assert_eq!(logger.span_depth(), 0);

        {
            let guard = logger.enter_span("orchestrate");
            assert_eq!(logger.span_depth(), 1);

            {
                let nested = logger.enter_span("compile");
                assert_eq!(logger.span_depth(), 2);
                drop(nested);
            }

            assert_eq!(logger.span_depth(), 1);
            drop(guard);
        }

        assert_eq!(logger.span_depth(), 0);
    }

    #[test]
    fn test_log_disabled_level() {
        let ring = LogRingBuffer::new(100);
        let logger = Logger::new(Level::Warn).with_sink(ring.clone());

        logger.log(Level::Debug, "test", "should not appear");
        assert_eq!(ring.len(), 0);

        logger.log(Level::Warn, "test", "should appear");
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn test_log_with_span_attached() {
        let ring = LogRingBuffer::new(100);
        let logger = Logger::new(Level::Debug).with_sink(ring.clone());

        logger.log(Level::Info, "test", "outside");
        {
            let guard = logger.enter_span("orchestrate");
            logger.log(Level::Info, "test", "inside");
            drop(guard);
        }

        let records = ring.dump_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].span, None);
        assert_eq!(records[1].span.map(|(_, name)| name), Some("orchestrate"));
    }

    #[test]
    fn test_log_sink_for_arc_logger() {
        let ring = LogRingBuffer::new(100);
        let inner = Logger::new(Level::Debug).with_sink(ring.clone());

        let outer = Logger::new(Level::Debug);
        outer.add_sink(inner.clone());

        outer.log(Level::Info, "chain", "chained log");
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn test_noop_logger() {
        let logger = Logger::noop();
        logger.log(Level::Error, "test", "goes nowhere");
        logger.flush();
    }

    #[test]
    fn test_file_sink_flushes_on_guard_drop() {
        let path = temp_log("guard");
        let _ = std::fs::remove_file(&path);

        let logger = Logger::new(Level::Info).with_sink(FileSink::new(&path).unwrap());
        {
            let guard = logger.flush_on_drop();
            logger.log(Level::Info, "test", "flushed line");
            drop(guard);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("flushed line"));
        assert!(content.contains("INFO"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_sink_append() {
        let path = temp_log("append");
        let _ = std::fs::remove_file(&path);

        for line in ["first line", "second line"] {
            let sink = FileSink::new(&path).unwrap();
            sink.write(&Record::new(Level::Info, "test", line));
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("first line"));
        assert!(content.contains("second line"));

        std::fs::remove_file(&path).ok();
    }
}
