//! Strata Config - Pure configuration data structures
//!
//! This crate contains only data structures, no global state.
//! It serves as the shared configuration vocabulary across all Strata crates:
//! - `Token`: fully-qualified names (`package:member`)
//! - `ConfigMap`: user supplied configuration, keyed by token
//! - `CompilerOptions`: options handed to a compiler at construction time

mod config_map;
mod token;

pub use config_map::ConfigMap;
pub use token::{Token, TOKEN_DELIMITER};

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building configuration values
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Token is not of the form `package:member`
    #[error("invalid token '{0}': expected 'package:member'")]
    InvalidToken(String),

    /// A `key=value` pair without `=`
    #[error("invalid config pair '{0}': expected 'key=value'")]
    InvalidPair(String),

    /// Config document is not a JSON object
    #[error("config document must be a JSON object")]
    NotAnObject,

    /// JSON syntax error
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Program arguments passed through after `--`, keyed by argument name
pub type Args = BTreeMap<Token, String>;

/// Configuration for compiler behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Program arguments (`--name=value` after the separator)
    pub args: Args,
    /// Stop evaluating once this many errors have been reported (0: no limit)
    pub max_errors: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            args: Args::new(),
            max_errors: 100,
        }
    }
}

impl CompilerOptions {
    /// Replace the program arguments
    pub fn with_args(mut self, args: Args) -> Self {
        self.args = args;
        self
    }
}
