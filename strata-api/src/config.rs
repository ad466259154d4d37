//! API 层配置
//!
//! `RunConfig` 汇集一次编排需要的全部外部资源：日志器、诊断 sink、
//! 文件系统、标准输入和工作目录。没有全局单例。

use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;
use strata_core::{DiagSink, StrataCompilerFactory};
use strata_log::Logger;
use strata_vfs::{NativeFileSystem, VirtualFileSystem};

/// Opens standard input (or a stand-in) when a package is read from `-`
pub type StdinSource = Arc<dyn Fn() -> Box<dyn Read> + Send + Sync>;

/// Orchestration configuration
#[derive(Clone)]
pub struct RunConfig {
    /// Logger
    pub logger: Arc<Logger>,
    /// Diagnostic sink shared with every compiler built from this config
    pub diag: Arc<DiagSink>,
    /// File system used for package and root lookups
    pub vfs: Arc<dyn VirtualFileSystem>,
    pub stdin: StdinSource,
    /// Overrides the process working directory
    pub working_dir: Option<PathBuf>,
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("level", &self.logger.level())
            .field("diag", &self.diag)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(Logger::noop())
    }
}

impl RunConfig {
    /// Native file system and process stdin
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            diag: DiagSink::new(logger.clone()),
            logger,
            vfs: Arc::new(NativeFileSystem::new()),
            stdin: Arc::new(|| Box::new(std::io::stdin()) as Box<dyn Read>),
            working_dir: None,
        }
    }

    pub fn with_vfs(mut self, vfs: Arc<dyn VirtualFileSystem>) -> Self {
        self.vfs = vfs;
        self
    }

    /// Serve `text` whenever standard input is read
    pub fn with_stdin_text(mut self, text: impl Into<String>) -> Self {
        let text: Arc<str> = Arc::from(text.into());
        self.stdin = Arc::new(move || Box::new(Cursor::new(text.as_bytes().to_vec())) as Box<dyn Read>);
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Compiler factory sharing this config's file system, sink and logger
    pub fn compiler_factory(&self) -> StrataCompilerFactory {
        let factory =
            StrataCompilerFactory::new(self.vfs.clone(), self.diag.clone(), self.logger.clone());
        match &self.working_dir {
            Some(dir) => factory.with_working_dir(dir.clone()),
            None => factory,
        }
    }
}
