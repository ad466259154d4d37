//! Evaluator: runs a bound package and produces its heap.
//!
//! Order of evaluation:
//! 1. every declared global is allocated with its default (or null)
//! 2. the preexec hook runs, if one was supplied
//! 3. `init` statements execute in declaration order

use crate::diag::{DiagSink, ErrorCode};
use crate::package::Expr;
use crate::preexec::Preexec;
use crate::runtime::{Heap, Object};
use crate::symbols::{PackageSymbol, VariableSymbol};
use strata_config::{CompilerOptions, Token};
use strata_log::{debug, trace, Logger};

/// Evaluation environment handed to the preexec hook
pub struct Environment<'a> {
    symbols: &'a PackageSymbol,
    heap: &'a mut Heap,
    diag: &'a DiagSink,
    options: &'a CompilerOptions,
}

impl<'a> Environment<'a> {
    pub fn new(
        symbols: &'a PackageSymbol,
        heap: &'a mut Heap,
        diag: &'a DiagSink,
        options: &'a CompilerOptions,
    ) -> Self {
        Environment {
            symbols,
            heap,
            diag,
            options,
        }
    }

    pub fn package(&self) -> &PackageSymbol {
        self.symbols
    }

    /// Find a declared global by simple name or token
    pub fn lookup(&self, name: &str) -> Option<&'a VariableSymbol> {
        self.symbols.resolve(name)
    }

    /// Current value of a global
    pub fn get(&self, token: &str) -> Option<&Object> {
        self.heap.get(token)
    }

    /// Bind `token` to `value` without type checks
    pub fn assign(&mut self, token: Token, value: Object) {
        self.heap.assign(token, value);
    }

    pub fn diag(&self) -> &DiagSink {
        self.diag
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.options.args.get(name).map(String::as_str)
    }

    fn eval(&self, expr: &Expr) -> Object {
        match expr {
            Expr::Literal(value) => Object::from_json(value),
            Expr::Ref(name) => self
                .lookup(name)
                .and_then(|var| self.get(var.token.as_str()))
                .cloned()
                .unwrap_or(Object::Null),
            Expr::Arg(name) => self.arg(name).map(Object::from).unwrap_or(Object::Null),
            Expr::Concat(parts) => {
                let mut out = String::new();
                for part in parts {
                    match self.eval(part) {
                        Object::Null => {}
                        obj => out.push_str(&obj.to_string()),
                    }
                }
                Object::String(out)
            }
        }
    }
}

/// Evaluate `symbols`, applying `preexec` before any initializer runs
pub fn evaluate(
    symbols: &PackageSymbol,
    options: &CompilerOptions,
    diag: &DiagSink,
    logger: &Logger,
    preexec: Option<&mut dyn Preexec>,
) -> Heap {
    let mut heap = Heap::new();
    let mut env = Environment::new(symbols, &mut heap, diag, options);

    for var in symbols.variables.values() {
        let initial = var
            .default
            .as_ref()
            .map(Object::from_json)
            .unwrap_or(Object::Null);
        match var.ty.coerce(initial) {
            Ok(value) => env.assign(var.token.clone(), value),
            Err(value) => {
                diag.errorf(
                    ErrorCode::IncorrectType,
                    format!(
                        "default for '{}' is a {}, expected {}",
                        var.token,
                        value.type_name(),
                        var.ty.as_str()
                    ),
                );
                env.assign(var.token.clone(), Object::Null);
            }
        }
    }

    if let Some(hook) = preexec {
        debug!(logger, "applying preexec hook to package '{}'", symbols.name);
        hook.apply(&mut env);
    }

    for stmt in &symbols.init {
        if options.max_errors > 0 && diag.errors() >= options.max_errors {
            diag.errorf(
                ErrorCode::TooManyErrors,
                format!("stopping after {} errors", options.max_errors),
            );
            break;
        }

        let value = env.eval(&stmt.value);
        let Some(var) = env.lookup(stmt.target.as_str()) else {
            continue;
        };
        match var.ty.coerce(value) {
            Ok(value) => {
                trace!(logger, "{} = {}", stmt.target, value);
                env.assign(stmt.target.clone(), value);
            }
            Err(value) => diag.errorf(
                ErrorCode::IncorrectType,
                format!(
                    "cannot assign {} to '{}' of type {}",
                    value.type_name(),
                    stmt.target,
                    var.ty.as_str()
                ),
            ),
        }
    }

    heap
}
