//! Strata - compilation-invocation orchestrator
//!
//! Strata turns a command line into exactly one compilation: it splits the
//! arguments at `--`, locates the package, builds a compiler rooted at the
//! right directory, installs a configuration hook and returns the symbol
//! table, heap snapshot and applied configuration.
//!
//! # Architecture
//!
//! ```text
//! strata-config/  - Pure data (Token, ConfigMap, CompilerOptions)
//! strata-log/     - Explicit logger, sinks, ring buffer
//! strata-vfs/     - Virtual file system (native / in-memory)
//! strata-core/    - Package model, binder, evaluator, reference compiler
//! strata-api/     - Orchestrator, RunConfig, StrataError
//! strata-cli/     - `strata` binary
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use strata_workspace::{compile, RawArgs, RunConfig};
//!
//! let config = RunConfig::default();
//! let raw = RawArgs::parse(["proj/", "--", "--stage=prod"]);
//! if let Some(result) = compile(&config, &raw, None) {
//!     println!("{:?}", result.package.map(|p| p.name));
//! }
//! ```

pub use strata_api::{
    compile, locate, CompileResult, ErrorReport, Orchestrator, RawArgs, RunConfig, StrataError,
};
pub use strata_config::{CompilerOptions, ConfigMap, Token};
pub use strata_core::{ConfigVars, DiagSink, ErrorCode, Heap, Object, Package, PackageSymbol};
pub use strata_vfs::{MemoryFileSystem, NativeFileSystem, VirtualFileSystem};
