//! strata-log - 结构化日志系统
//!
//! 为 Strata 编排器和编译器设计的结构化日志系统，特点：
//! - **显式传递**：无全局 logger，`Arc<Logger>` 通过代码传入
//! - **非阻塞**：环形缓冲区满了覆盖旧数据
//! - **作用域释放**：`FlushGuard` 在离开作用域时刷新所有输出目标
//!
//! # 快速开始
//!
//! ```
//! use strata_log::{Level, Logger, LogRingBuffer, debug};
//!
//! let ring = LogRingBuffer::new(100);
//! let logger = Logger::new(Level::Debug).with_sink(ring.clone());
//! debug!(logger, "loaded package {}", "app");
//! assert_eq!(ring.len(), 1);
//! ```

mod logger;
mod macros;
mod record;
mod ring_buffer;
mod span;

pub use logger::{FileSink, FlushGuard, LogSink, Logger, SpanGuard};
pub use record::{Level, Record};
pub use ring_buffer::LogRingBuffer;
pub use span::{Span, SpanId};

// 宏通过 #[macro_export] 自动导出到 crate 根：
// trace!, debug!, info!, warn!, error!, log!

use thiserror::Error;

/// 日志系统错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// 无法识别的日志级别名称
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}
