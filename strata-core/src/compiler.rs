//! 编译器接口与参考实现
//!
//! `Compiler` 绑定到唯一的根目录；`CompilerFactory` 负责构造。
//! 编译错误写入编译器的 `DiagSink`，编译结果中的符号表和堆快照都可能缺失。

use crate::binder::bind;
use crate::diag::{DiagSink, ErrorCode};
use crate::eval::evaluate;
use crate::package::{Package, MANIFEST_FILE};
use crate::preexec::Preexec;
use crate::runtime::Heap;
use crate::symbols::PackageSymbol;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strata_config::CompilerOptions;
use strata_log::{debug, info, Logger};
use strata_vfs::VirtualFileSystem;
use thiserror::Error;

/// Compiler construction failure
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("root '{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("root '{}' is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(#[from] std::io::Error),
}

/// Output of one compilation; either part may be absent on failure
#[derive(Debug, Default, Clone)]
pub struct Compilation {
    pub package: Option<PackageSymbol>,
    pub heap: Option<Heap>,
}

/// A compiler bound to one root directory
pub trait Compiler {
    fn root(&self) -> &Path;

    fn options(&self) -> &CompilerOptions;

    fn diag(&self) -> &Arc<DiagSink>;

    /// Compile the package found at the root
    fn compile_workspace(&mut self, preexec: Option<&mut dyn Preexec>) -> Compilation;

    /// Compile an already loaded package
    fn compile_package(&mut self, pkg: &Package, preexec: Option<&mut dyn Preexec>) -> Compilation;
}

/// Builds compilers
pub trait CompilerFactory {
    fn new_at_root(
        &self,
        root: &Path,
        options: CompilerOptions,
    ) -> Result<Box<dyn Compiler>, CompilerError>;

    fn new_at_working_directory(
        &self,
        options: CompilerOptions,
    ) -> Result<Box<dyn Compiler>, CompilerError>;
}

/// Reference compiler: bind then evaluate
pub struct StrataCompiler {
    root: PathBuf,
    options: CompilerOptions,
    vfs: Arc<dyn VirtualFileSystem>,
    diag: Arc<DiagSink>,
    logger: Arc<Logger>,
}

impl StrataCompiler {
    fn run(&self, pkg: &Package, preexec: Option<&mut dyn Preexec>) -> Compilation {
        let span = self.logger.enter_span("compile");
        info!(self.logger, "compiling package '{}'", pkg.name);

        let symbols = bind(pkg, &self.diag);
        let heap = evaluate(&symbols, &self.options, &self.diag, &self.logger, preexec);

        debug!(
            self.logger,
            "package '{}': {} globals, {} objects, {} errors",
            symbols.name,
            symbols.variables.len(),
            heap.len(),
            self.diag.errors()
        );
        drop(span);
        Compilation {
            package: Some(symbols),
            heap: Some(heap),
        }
    }
}

impl Compiler for StrataCompiler {
    fn root(&self) -> &Path {
        &self.root
    }

    fn options(&self) -> &CompilerOptions {
        &self.options
    }

    fn diag(&self) -> &Arc<DiagSink> {
        &self.diag
    }

    fn compile_workspace(&mut self, preexec: Option<&mut dyn Preexec>) -> Compilation {
        let manifest = self.root.join(MANIFEST_FILE);
        if !self.vfs.is_file(&manifest) {
            self.diag.errorf(
                ErrorCode::MissingPackage,
                format!("no {MANIFEST_FILE} found in '{}'", self.root.display()),
            );
            return Compilation::default();
        }

        match Package::load(self.vfs.as_ref(), &self.root) {
            Ok((pkg, _)) => self.run(&pkg, preexec),
            Err(err) => {
                self.diag.errorf(ErrorCode::CantLoadPackage, err);
                Compilation::default()
            }
        }
    }

    fn compile_package(&mut self, pkg: &Package, preexec: Option<&mut dyn Preexec>) -> Compilation {
        self.run(pkg, preexec)
    }
}

/// Factory for [`StrataCompiler`]
pub struct StrataCompilerFactory {
    vfs: Arc<dyn VirtualFileSystem>,
    diag: Arc<DiagSink>,
    logger: Arc<Logger>,
    working_dir: Option<PathBuf>,
}

impl StrataCompilerFactory {
    pub fn new(vfs: Arc<dyn VirtualFileSystem>, diag: Arc<DiagSink>, logger: Arc<Logger>) -> Self {
        StrataCompilerFactory {
            vfs,
            diag,
            logger,
            working_dir: None,
        }
    }

    /// Use `dir` instead of the process working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl CompilerFactory for StrataCompilerFactory {
    fn new_at_root(
        &self,
        root: &Path,
        options: CompilerOptions,
    ) -> Result<Box<dyn Compiler>, CompilerError> {
        if !self.vfs.exists(root) {
            return Err(CompilerError::RootNotFound(root.to_path_buf()));
        }
        if !self.vfs.is_dir(root) {
            return Err(CompilerError::RootNotDirectory(root.to_path_buf()));
        }
        debug!(self.logger, "compiler rooted at '{}'", root.display());

        Ok(Box::new(StrataCompiler {
            root: root.to_path_buf(),
            options,
            vfs: self.vfs.clone(),
            diag: self.diag.clone(),
            logger: self.logger.clone(),
        }))
    }

    fn new_at_working_directory(
        &self,
        options: CompilerOptions,
    ) -> Result<Box<dyn Compiler>, CompilerError> {
        let dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        self.new_at_root(&dir, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_vfs::MemoryFileSystem;

    fn factory(fs: MemoryFileSystem) -> StrataCompilerFactory {
        let logger = Logger::noop();
        StrataCompilerFactory::new(Arc::new(fs), DiagSink::new(logger.clone()), logger)
    }

    #[test]
    fn test_root_must_exist() {
        let err = factory(MemoryFileSystem::new())
            .new_at_root(Path::new("/nope"), CompilerOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, CompilerError::RootNotFound(_)));
        assert_eq!(err.to_string(), "root '/nope' does not exist");
    }

    #[test]
    fn test_root_must_be_directory() {
        let fs = MemoryFileSystem::with_files([("/w/file.txt", b"x".to_vec())]);
        let err = factory(fs)
            .new_at_root(Path::new("/w/file.txt"), CompilerOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, CompilerError::RootNotDirectory(_)));
    }

    #[test]
    fn test_working_directory_override() {
        let fs = MemoryFileSystem::with_files([("/w/Strata.json", br#"{"name": "w"}"#.to_vec())]);
        let compiler = factory(fs)
            .with_working_dir("/w")
            .new_at_working_directory(CompilerOptions::default())
            .unwrap();
        assert_eq!(compiler.root(), Path::new("/w"));
    }

    #[test]
    fn test_compile_workspace() {
        let fs = MemoryFileSystem::with_files([(
            "/w/Strata.json",
            br#"{"name": "w", "variables": [{"name": "a", "default": 1}]}"#.to_vec(),
        )]);
        let mut compiler = factory(fs)
            .new_at_root(Path::new("/w"), CompilerOptions::default())
            .unwrap();
        let out = compiler.compile_workspace(None);

        assert!(compiler.diag().success());
        assert_eq!(out.package.map(|p| p.name), Some("w".to_string()));
        assert!(out.heap.unwrap().get("w:a").is_some());
    }

    #[test]
    fn test_compile_workspace_without_manifest() {
        let fs = MemoryFileSystem::new();
        fs.create_dir(Path::new("/empty")).unwrap();
        let mut compiler = factory(fs)
            .new_at_root(Path::new("/empty"), CompilerOptions::default())
            .unwrap();
        let out = compiler.compile_workspace(None);

        assert!(out.package.is_none());
        assert!(out.heap.is_none());
        assert_eq!(compiler.diag().with_code(ErrorCode::MissingPackage).len(), 1);
    }

    #[test]
    fn test_compile_workspace_bad_manifest() {
        let fs = MemoryFileSystem::with_files([("/w/Strata.json", b"{oops".to_vec())]);
        let mut compiler = factory(fs)
            .new_at_root(Path::new("/w"), CompilerOptions::default())
            .unwrap();
        let out = compiler.compile_workspace(None);

        assert!(out.package.is_none());
        assert_eq!(compiler.diag().with_code(ErrorCode::CantLoadPackage).len(), 1);
    }
}
