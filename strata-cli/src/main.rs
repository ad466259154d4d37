//! Strata CLI - Command line interface
//!
//! `strata compile [PACKAGE] [--config K=V]... [-- ARGS]` and friends.
//! Exit code is 0 iff no error diagnostic was reported.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

mod config;
mod logging;
mod platform;

use crate::config::LogConfig;
use crate::logging::{LogFormat, LogGuard};
use crate::platform::{compile_summary, info_summary, print_diagnostics, print_summary};
use strata_api::{ConfigMap, RawArgs, RunConfig, StrataError};
use strata_log::{debug, error};

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Strata - compile packages and apply configuration",
    version
)]
struct Cli {
    /// Log verbosity: 0 warn, 1 info, 2-3 debug, 4+ trace
    #[arg(short, long, global = true, default_value_t = 0, value_name = "N")]
    verbose: u8,

    /// Log to stderr even when --log-file is given
    #[arg(long, global = true)]
    logtostderr: bool,

    /// Pass the log filter on to child processes (STRATA_LOG)
    #[arg(long, global = true)]
    logflow: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Append logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a package (or the working directory) and print its globals
    Compile(CompileArgs),
    /// Compile without configuration and report diagnostics only
    Verify(VerifyArgs),
    /// Print a package descriptor without compiling it
    Info {
        /// Package directory, manifest file, or `-` for stdin
        #[arg(value_name = "PACKAGE")]
        package: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Print the version
    Version,
}

#[derive(Args)]
struct CompileArgs {
    /// Package directory, manifest file, or `-` for stdin
    #[arg(value_name = "PACKAGE")]
    package: Option<String>,

    /// Configuration entry `package:member=value` (repeatable)
    #[arg(long = "config", value_name = "K=V")]
    config: Vec<String>,

    /// JSON file with configuration entries
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Program arguments, after `--`
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Args)]
struct VerifyArgs {
    #[arg(value_name = "PACKAGE")]
    package: Option<String>,

    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        to_stderr: cli.logtostderr,
        flow: cli.logflow,
        format: cli.log_format,
        file: cli.log_file.clone(),
        ..LogConfig::from_verbosity(cli.verbose)
    };
    let guard = match logging::init(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: cannot open log file: {}", e);
            process::exit(1);
        }
    };

    let code = run(cli.command, &guard);
    // 退出前刷新日志
    drop(guard);
    process::exit(code);
}

fn run(command: Command, guard: &LogGuard) -> i32 {
    let config = RunConfig::new(guard.logger().clone());
    debug!(config.logger, "strata {}", env!("CARGO_PKG_VERSION"));

    match command {
        Command::Compile(args) => handle_compile(&config, args),
        Command::Verify(args) => handle_verify(&config, args),
        Command::Info { package, json } => handle_info(&config, package, json),
        Command::Version => {
            println!("strata {}", env!("CARGO_PKG_VERSION"));
            0
        }
    }
}

/// Rebuild the raw argument list the orchestrator expects
fn raw_args(package: Option<String>, program: Vec<String>) -> RawArgs {
    let mut args: Vec<String> = package.into_iter().collect();
    let separator = if program.is_empty() {
        None
    } else {
        Some(args.len())
    };
    args.extend(program);
    RawArgs::new(args, separator)
}

fn load_config(args: &CompileArgs) -> Result<Option<ConfigMap>, StrataError> {
    if args.config.is_empty() && args.config_file.is_none() {
        return Ok(None);
    }

    let mut map = ConfigMap::new();
    if let Some(path) = &args.config_file {
        let text = std::fs::read_to_string(path)?;
        map.extend(ConfigMap::from_json_str(&text)?);
    }
    for pair in &args.config {
        let (token, value) = ConfigMap::parse_pair(pair)?;
        map.insert(token, value);
    }
    Ok(Some(map))
}

fn exit_code(config: &RunConfig) -> i32 {
    print_diagnostics(&config.diag);
    if config.diag.success() {
        0
    } else {
        1
    }
}

fn handle_compile(config: &RunConfig, args: CompileArgs) -> i32 {
    let config_map = match load_config(&args) {
        Ok(map) => map,
        Err(e) => {
            error!(config.logger, "{}", e);
            eprintln!("{}", e.to_report());
            return 1;
        }
    };

    let raw = raw_args(args.package, args.args);
    if let Some(result) = strata_api::compile(config, &raw, config_map.as_ref()) {
        print_summary(&compile_summary(&result, &config.diag), args.json);
    }
    exit_code(config)
}

fn handle_verify(config: &RunConfig, args: VerifyArgs) -> i32 {
    let raw = raw_args(args.package, args.args);
    let result = strata_api::compile(config, &raw, None);
    let code = exit_code(config);
    if code == 0 {
        if let Some(name) = result.as_ref().and_then(|r| r.package.as_ref()).map(|p| &p.name) {
            println!("✅ {name} verified");
        }
    }
    code
}

fn handle_info(config: &RunConfig, package: Option<String>, json: bool) -> i32 {
    let located = match strata_api::locate(config, Some(package.as_deref().unwrap_or("."))) {
        Ok(located) => located,
        Err(e) => {
            eprintln!("{}", e.to_report());
            return 1;
        }
    };
    match &located.package {
        Some(pkg) => {
            print_summary(&info_summary(pkg, &located.root), json);
            0
        }
        None => 1,
    }
}
