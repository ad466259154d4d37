//! Argument partitioning
//!
//! Everything before the first literal `--` belongs to the orchestrator,
//! everything after it is passed through to the program being compiled.

use strata_config::{Args, Token};

/// Separator between orchestrator and program arguments
pub const SEPARATOR: &str = "--";

/// Raw command line arguments with the separator position recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs {
    args: Vec<String>,
    separator: Option<usize>,
}

impl RawArgs {
    /// Arguments whose separator has already been removed (`separator`
    /// indexes into `args`)
    pub fn new(args: Vec<String>, separator: Option<usize>) -> Self {
        RawArgs { args, separator }
    }

    /// Strip the first `--` and remember where it was
    pub fn parse<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Vec::new();
        let mut separator = None;
        for arg in iter {
            let arg = arg.into();
            if separator.is_none() && arg == SEPARATOR {
                separator = Some(args.len());
                continue;
            }
            args.push(arg);
        }
        RawArgs { args, separator }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn separator(&self) -> Option<usize> {
        self.separator
    }

    /// Split into (orchestrator args, program args)
    pub fn partition(&self) -> (Vec<String>, Vec<String>) {
        partition(&self.args, self.separator)
    }
}

/// `(A[..i], A[i..])`, or `(A, [])` without a separator
pub fn partition(args: &[String], separator: Option<usize>) -> (Vec<String>, Vec<String>) {
    match separator {
        Some(i) => {
            let i = i.min(args.len());
            (args[..i].to_vec(), args[i..].to_vec())
        }
        None => (args.to_vec(), Vec::new()),
    }
}

// 负数是值而不是选项：`--offset -1`
fn is_value(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) => rest.parse::<f64>().is_ok(),
        None => true,
    }
}

/// Turn pass-through arguments into the compiler's argument map.
///
/// `--k=v` and `--k v` bind `v`; `--no-k` binds `"false"`; a bare `--k`
/// binds `"true"`. Later occurrences win.
pub fn program_args_to_map(args: &[String]) -> Args {
    let mut map = Args::new();
    let mut iter = args.iter().peekable();

    while let Some(raw) = iter.next() {
        let name = raw
            .strip_prefix("--")
            .or_else(|| raw.strip_prefix('-'))
            .unwrap_or(raw);
        if name.is_empty() {
            continue;
        }

        if let Some((key, value)) = name.split_once('=') {
            map.insert(Token::from(key), value.to_string());
        } else if let Some(value) = iter.next_if(|next| is_value(next)) {
            map.insert(Token::from(name), value.clone());
        } else if let Some(key) = name.strip_prefix("no-") {
            map.insert(Token::from(key), "false".to_string());
        } else {
            map.insert(Token::from(name), "true".to_string());
        }
    }

    map
}
