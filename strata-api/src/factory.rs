//! Compiler construction for an orchestration

use std::path::Path;
use strata_core::{Compiler, CompilerError, CompilerFactory, CompilerOptions};

/// Build a compiler for `root`: an empty root means the working directory.
pub fn build_compiler(
    factory: &dyn CompilerFactory,
    root: &Path,
    options: CompilerOptions,
) -> Result<Box<dyn Compiler>, CompilerError> {
    if root.as_os_str().is_empty() {
        factory.new_at_working_directory(options)
    } else {
        factory.new_at_root(root, options)
    }
}
