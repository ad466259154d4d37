//! 测试辅助工具
//!
//! 记录调用情况的编译器工厂，以及基于内存文件系统的 RunConfig

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use strata_api::RunConfig;
use strata_core::{
    Compilation, Compiler, CompilerError, CompilerFactory, CompilerOptions, DiagSink, Package,
    Preexec, StrataCompilerFactory,
};
use strata_log::{Level, LogRingBuffer, Logger};
use strata_vfs::MemoryFileSystem;

/// 工厂和编译器上发生的调用
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Calls {
    pub at_root: Vec<PathBuf>,
    pub at_working_directory: usize,
    /// (入口, 是否带钩子)
    pub compiles: Vec<(&'static str, bool)>,
    pub options: Vec<CompilerOptions>,
}

/// 包装参考工厂并记录调用
pub struct RecordingFactory {
    inner: StrataCompilerFactory,
    pub calls: Arc<Mutex<Calls>>,
}

impl RecordingFactory {
    pub fn new(config: &RunConfig) -> Self {
        RecordingFactory {
            inner: config.compiler_factory(),
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }

    fn wrap(&self, compiler: Box<dyn Compiler>) -> Box<dyn Compiler> {
        Box::new(RecordingCompiler {
            inner: compiler,
            calls: self.calls.clone(),
        })
    }
}

impl CompilerFactory for RecordingFactory {
    fn new_at_root(
        &self,
        root: &Path,
        options: CompilerOptions,
    ) -> Result<Box<dyn Compiler>, CompilerError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.at_root.push(root.to_path_buf());
            calls.options.push(options.clone());
        }
        self.inner.new_at_root(root, options).map(|c| self.wrap(c))
    }

    fn new_at_working_directory(
        &self,
        options: CompilerOptions,
    ) -> Result<Box<dyn Compiler>, CompilerError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.at_working_directory += 1;
            calls.options.push(options.clone());
        }
        self.inner
            .new_at_working_directory(options)
            .map(|c| self.wrap(c))
    }
}

struct RecordingCompiler {
    inner: Box<dyn Compiler>,
    calls: Arc<Mutex<Calls>>,
}

impl Compiler for RecordingCompiler {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn options(&self) -> &CompilerOptions {
        self.inner.options()
    }

    fn diag(&self) -> &Arc<DiagSink> {
        self.inner.diag()
    }

    fn compile_workspace(&mut self, preexec: Option<&mut dyn Preexec>) -> Compilation {
        self.calls
            .lock()
            .unwrap()
            .compiles
            .push(("workspace", preexec.is_some()));
        self.inner.compile_workspace(preexec)
    }

    fn compile_package(&mut self, pkg: &Package, preexec: Option<&mut dyn Preexec>) -> Compilation {
        self.calls
            .lock()
            .unwrap()
            .compiles
            .push(("package", preexec.is_some()));
        self.inner.compile_package(pkg, preexec)
    }
}

/// 内存文件系统上的 RunConfig，工作目录为 `/cwd`，日志写入环形缓冲区
pub fn memory_config(files: &[(&str, &str)]) -> (RunConfig, Arc<LogRingBuffer>) {
    let fs = MemoryFileSystem::with_files(
        files
            .iter()
            .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec())),
    );
    fs.create_dir(Path::new("/cwd")).unwrap();
    let logs = LogRingBuffer::new(512);
    let logger = Logger::new(Level::Debug).with_sink(logs.clone());
    let config = RunConfig::new(logger)
        .with_vfs(Arc::new(fs))
        .with_working_dir("/cwd");
    (config, logs)
}

pub const APP_MANIFEST: &str = r#"{
    "name": "app",
    "variables": [
        {"name": "key", "type": "string", "default": "dflt"},
        {"name": "stackarg", "type": "number", "default": 0},
        {"name": "summary"}
    ],
    "init": [
        {"name": "stackarg", "value": {"arg": "stackarg"}},
        {"name": "summary", "value": {"concat": [{"ref": "key"}, {"literal": "/"}, {"ref": "stackarg"}]}}
    ]
}"#;
