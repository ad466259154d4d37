//! 诊断信息收集
//!
//! `DiagSink` 是编排器与编译器共享的错误出口：错误不作为值跨越编排边界，
//! 而是写入 sink，调用方通过错误计数判断是否真正成功。

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use strata_log::{Level, Logger};

/// 诊断严重程度
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Structured diagnostic codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// Compiler construction failed (missing root, unreadable directory, ...)
    CantCreateCompiler,
    /// Package argument could not be read or parsed
    CantLoadPackage,
    /// Workspace root has no package manifest
    MissingPackage,
    /// Two members share a name
    DuplicateMember,
    /// Reference to an undeclared member
    SymbolNotFound,
    /// Value does not match the declared type
    IncorrectType,
    /// Configuration key names no declared variable
    ConfigVarNotFound,
    /// Configuration value cannot be converted to the variable's type
    IncorrectConfigType,
    /// Evaluation stopped after too many errors
    TooManyErrors,
}

impl ErrorCode {
    pub const fn id(&self) -> u16 {
        match self {
            ErrorCode::CantCreateCompiler => 1000,
            ErrorCode::CantLoadPackage => 1001,
            ErrorCode::MissingPackage => 1002,
            ErrorCode::DuplicateMember => 2000,
            ErrorCode::SymbolNotFound => 2001,
            ErrorCode::IncorrectType => 2002,
            ErrorCode::ConfigVarNotFound => 3000,
            ErrorCode::IncorrectConfigType => 3001,
            ErrorCode::TooManyErrors => 9000,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STRATA{}", self.id())
    }
}

/// A single reported diagnostic
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diag {
    pub severity: Severity,
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.code, self.message)
    }
}

/// Collects diagnostics for one command run
pub struct DiagSink {
    diags: Mutex<Vec<Diag>>,
    logger: Arc<Logger>,
}

impl fmt::Debug for DiagSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagSink")
            .field("errors", &self.errors())
            .field("warnings", &self.warnings())
            .finish()
    }
}

impl DiagSink {
    /// Create a sink that mirrors every diagnostic into `logger`
    pub fn new(logger: Arc<Logger>) -> Arc<Self> {
        Arc::new(DiagSink {
            diags: Mutex::new(Vec::new()),
            logger,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diag>> {
        self.diags.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn report(&self, severity: Severity, code: ErrorCode, message: String) {
        let diag = Diag {
            severity,
            code,
            message,
        };
        // 诊断由调用方打印，日志里只留调试痕迹
        self.logger.log(Level::Debug, module_path!(), diag.to_string());
        self.lock().push(diag);
    }

    /// Report an error with its cause
    pub fn errorf(&self, code: ErrorCode, cause: impl fmt::Display) {
        self.report(Severity::Error, code, cause.to_string());
    }

    pub fn warningf(&self, code: ErrorCode, cause: impl fmt::Display) {
        self.report(Severity::Warning, code, cause.to_string());
    }

    pub fn errors(&self) -> usize {
        self.lock()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.lock()
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// True while no error has been reported
    pub fn success(&self) -> bool {
        self.errors() == 0
    }

    /// Snapshot of everything reported so far
    pub fn diags(&self) -> Vec<Diag> {
        self.lock().clone()
    }

    /// Diagnostics carrying `code`
    pub fn with_code(&self, code: ErrorCode) -> Vec<Diag> {
        self.lock().iter().filter(|d| d.code == code).cloned().collect()
    }
}
