//! 测试辅助工具
//!
//! 提供在内存文件系统上编译包的辅助函数

use std::path::Path;
use std::sync::Arc;
use strata_core::{
    Compilation, Compiler, CompilerFactory, CompilerOptions, DiagSink, Preexec,
    StrataCompilerFactory,
};
use strata_log::{Level, LogRingBuffer, Logger};
use strata_vfs::MemoryFileSystem;

/// 编译结果与收集到的诊断、日志
pub struct Compiled {
    pub output: Compilation,
    pub diag: Arc<DiagSink>,
    pub logs: Arc<LogRingBuffer>,
}

/// 把 `manifest` 放到 `/work/Strata.json` 并以 `/work` 为根编译
pub fn compile_manifest(
    manifest: &str,
    options: CompilerOptions,
    preexec: Option<&mut dyn Preexec>,
) -> Compiled {
    let fs = MemoryFileSystem::with_files([("/work/Strata.json", manifest.as_bytes().to_vec())]);
    let logs = LogRingBuffer::new(256);
    let logger = Logger::new(Level::Trace).with_sink(logs.clone());
    let diag = DiagSink::new(logger.clone());
    let factory = StrataCompilerFactory::new(Arc::new(fs), diag.clone(), logger);

    let mut compiler = match factory.new_at_root(Path::new("/work"), options) {
        Ok(compiler) => compiler,
        Err(err) => panic!("failed to create compiler: {err}"),
    };
    let output = compiler.compile_workspace(preexec);

    Compiled { output, diag, logs }
}

/// 示例包：带默认值、类型和初始化语句
pub const SAMPLE: &str = r#"{
    "name": "app",
    "description": "sample package",
    "variables": [
        {"name": "key", "type": "string", "default": "dflt"},
        {"name": "port", "type": "number", "default": 80},
        {"name": "debug", "type": "bool", "default": false},
        {"name": "url"}
    ],
    "init": [
        {"name": "url", "value": {"concat": [
            {"literal": "http://"}, {"ref": "key"}, {"literal": ":"}, {"ref": "port"}
        ]}}
    ]
}"#;
