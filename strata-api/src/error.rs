//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。

use serde::Serialize;
use strata_config::ConfigError;
use strata_core::{CompilerError, ErrorCode, PackageError};
use thiserror::Error;

/// Strata 错误类型
#[derive(Error, Debug)]
pub enum StrataError {
    /// 包参数无法读取或解析
    #[error("{0}")]
    Package(#[from] PackageError),

    /// 编译器构造失败
    #[error("{0}")]
    Compiler(#[from] CompilerError),

    /// 配置无效（--config / --config-file）
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StrataError {
    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            StrataError::Package(_) => "package",
            StrataError::Compiler(_) => "compiler",
            StrataError::Config(_) => "config",
            StrataError::Io(_) => "io",
        }
    }

    /// Diagnostic code used when the error is reported to a `DiagSink`
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            StrataError::Package(_) => Some(ErrorCode::CantLoadPackage),
            StrataError::Compiler(_) => Some(ErrorCode::CantCreateCompiler),
            StrataError::Config(_) | StrataError::Io(_) => None,
        }
    }

    /// 转换为结构化错误报告
    ///
    /// CLI 可以直接打印，`--json` 输出时序列化为 JSON。
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            phase: self.phase(),
            code: self.code().map(|code| code.to_string()),
            message: self.to_string(),
        }
    }
}

/// 结构化错误报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: package, compiler, config, io
    pub phase: &'static str,
    /// 诊断代码，例如 `STRATA1000`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}: {}", self.phase, code, self.message),
            None => write!(f, "[{}] error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
