//! Strata API - Compilation orchestration layer
//!
//! Provides the unified compile interface, including:
//! - Argument partitioning (`args`)
//! - Package location (`locator`)
//! - Compiler construction and config injection (`factory`, `inject`)
//! - The orchestrator itself (`orchestrator`)
//! - Configuration (`RunConfig`) and unified errors (`StrataError`)
//!
//! All resources are passed explicitly through `RunConfig`.

pub mod args;
pub mod config;
pub mod error;
pub mod factory;
pub mod inject;
pub mod locator;
pub mod orchestrator;

pub use args::{partition, program_args_to_map, RawArgs, SEPARATOR};
pub use config::{RunConfig, StdinSource};
pub use error::{ErrorReport, StrataError};
pub use factory::build_compiler;
pub use inject::make_hook;
pub use locator::{Located, PackageLocator, STDIN_SENTINEL};
pub use orchestrator::{CompileResult, Orchestrator};

// Re-export core types
pub use strata_config;
pub use strata_core::{
    Compiler, CompilerFactory, CompilerOptions, ConfigMap, ConfigVars, Diag, DiagSink, ErrorCode,
    Heap, Object, Package, PackageSymbol, Token,
};

use strata_log::info;

/// Orchestrate with the reference compiler built from `config`
///
/// This is the recommended API for library users.
pub fn compile(config: &RunConfig, raw: &RawArgs, config_map: Option<&ConfigMap>) -> Option<CompileResult> {
    info!(config.logger, "Starting compilation");
    let factory = config.compiler_factory();
    let result = Orchestrator::new(config, &factory).orchestrate(raw, config_map);
    info!(
        config.logger,
        "Compilation finished with {} errors, {} warnings",
        config.diag.errors(),
        config.diag.warnings()
    );
    result
}

/// Describe a package without compiling it
pub fn locate(config: &RunConfig, arg: Option<&str>) -> Result<Located, StrataError> {
    Ok(PackageLocator::new(config).locate(arg)?)
}
