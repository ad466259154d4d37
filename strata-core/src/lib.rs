//! Strata Core - package model and reference compiler
//!
//! Contains the package descriptor, binder, evaluator, heap and the
//! `Compiler` / `CompilerFactory` seams the orchestrator drives.
//! File access goes through `strata-vfs`; configuration is passed
//! explicitly via parameters, not via global state.

pub mod binder;
pub mod compiler;
pub mod diag;
pub mod eval;
pub mod package;
pub mod preexec;
pub mod runtime;
pub mod symbols;

// Re-export common types
pub use compiler::{
    Compilation, Compiler, CompilerError, CompilerFactory, StrataCompiler, StrataCompilerFactory,
};
pub use diag::{Diag, DiagSink, ErrorCode, Severity};
pub use eval::Environment;
pub use package::{Package, PackageError, VarType, MANIFEST_FILE};
pub use preexec::{ConfigApplier, ConfigVars, Preexec};
pub use runtime::{Heap, Object, ObjectId};
pub use symbols::{PackageSymbol, VariableSymbol};

// Re-export config types from strata-config
pub use strata_config::{Args, CompilerOptions, ConfigMap, Token};
