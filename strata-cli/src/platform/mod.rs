//! 平台相关输出

mod cli;

pub use cli::{compile_summary, info_summary, print_diagnostics, print_summary};
