//! 编译编排器
//!
//! 流程：分割参数 → 定位包与根目录 → 构造编译器 → 构造配置钩子 → 编译。
//! 失败通过 `DiagSink` 报告（恰好一条），调用方返回 `None`，不重试。

use crate::args::{program_args_to_map, RawArgs};
use crate::config::RunConfig;
use crate::error::StrataError;
use crate::factory::build_compiler;
use crate::inject::make_hook;
use crate::locator::PackageLocator;
use strata_core::{
    Compiler, CompilerFactory, CompilerOptions, ConfigMap, ConfigVars, ErrorCode, Heap, Package,
    PackageSymbol, Preexec,
};
use strata_log::{debug, info, warn};

/// Everything a successful orchestration produced
pub struct CompileResult {
    /// The compiler used; owned by this result and never reused
    pub compiler: Box<dyn Compiler>,
    pub package: Option<PackageSymbol>,
    pub heap: Option<Heap>,
    /// Present iff configuration was supplied
    pub config_vars: Option<ConfigVars>,
}

impl std::fmt::Debug for CompileResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileResult")
            .field("root", &self.compiler.root())
            .field("package", &self.package.as_ref().map(|p| &p.name))
            .field("heap", &self.heap.as_ref().map(Heap::len))
            .field("config_vars", &self.config_vars)
            .finish()
    }
}

pub struct Orchestrator<'a> {
    config: &'a RunConfig,
    factory: &'a dyn CompilerFactory,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a RunConfig, factory: &'a dyn CompilerFactory) -> Self {
        Orchestrator { config, factory }
    }

    /// Run one compilation. Returns `None` after reporting a single error when
    /// the package cannot be resolved or the compiler cannot be built.
    ///
    /// A `Some` result is not proof of success: compilation errors land in
    /// the diagnostic sink.
    pub fn orchestrate(&self, raw: &RawArgs, config: Option<&ConfigMap>) -> Option<CompileResult> {
        let logger = &self.config.logger;
        let span = logger.enter_span("orchestrate");

        let (package, mut compiler) = match self.prepare(raw) {
            Ok(prepared) => prepared,
            Err(err) => {
                let code = err.code().unwrap_or(ErrorCode::CantCreateCompiler);
                self.config.diag.errorf(code, &err);
                drop(span);
                return None;
            }
        };

        let mut hook = make_hook(config);
        let preexec = hook.as_mut().map(|h| h as &mut dyn Preexec);
        let compilation = match &package {
            Some(pkg) => {
                info!(logger, "compiling package '{}'", pkg.name);
                compiler.compile_package(pkg, preexec)
            }
            None => {
                info!(logger, "compiling workspace at '{}'", compiler.root().display());
                compiler.compile_workspace(preexec)
            }
        };
        drop(span);

        Some(CompileResult {
            compiler,
            package: compilation.package,
            heap: compilation.heap,
            config_vars: hook.map(|h| h.into_vars()),
        })
    }

    fn prepare(&self, raw: &RawArgs) -> Result<(Option<Package>, Box<dyn Compiler>), StrataError> {
        let logger = &self.config.logger;
        let (own, program) = raw.partition();
        debug!(
            logger,
            "orchestrator args {:?}, program args {:?}", own, program
        );
        if own.len() > 1 {
            warn!(logger, "ignoring extra arguments {:?}", &own[1..]);
        }

        let located = PackageLocator::new(self.config).locate(own.first().map(String::as_str))?;

        let options = CompilerOptions::default().with_args(program_args_to_map(&program));
        let compiler = build_compiler(self.factory, &located.root, options)?;
        Ok((located.package, compiler))
    }
}
