//! Pre-execution hooks
//!
//! A hook runs once per compilation, after every declared global has been
//! allocated and before the first `init` statement executes.

use crate::diag::ErrorCode;
use crate::eval::Environment;
use crate::runtime::Object;
use std::collections::BTreeMap;
use strata_config::{ConfigMap, Token};

/// Configuration values actually applied by a hook, keyed by token
pub type ConfigVars = BTreeMap<Token, Object>;

/// Code run against the evaluation environment before initialization
pub trait Preexec {
    fn apply(&mut self, env: &mut Environment<'_>);
}

/// Applies a `ConfigMap` to a package's globals and records what it applied.
#[derive(Debug, Clone)]
pub struct ConfigApplier {
    config: ConfigMap,
    vars: ConfigVars,
}

impl ConfigApplier {
    pub fn new(config: ConfigMap) -> Self {
        ConfigApplier {
            config,
            vars: ConfigVars::new(),
        }
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Values applied so far
    pub fn vars(&self) -> &ConfigVars {
        &self.vars
    }

    pub fn into_vars(self) -> ConfigVars {
        self.vars
    }
}

impl Preexec for ConfigApplier {
    fn apply(&mut self, env: &mut Environment<'_>) {
        for (token, value) in self.config.iter() {
            let Some(var) = env.lookup(token.as_str()) else {
                env.diag().errorf(
                    ErrorCode::ConfigVarNotFound,
                    format!(
                        "configuration variable '{token}' is not declared by package '{}'",
                        env.package().name
                    ),
                );
                continue;
            };

            match var.ty.coerce(Object::from_json(value)) {
                Ok(object) => {
                    env.assign(var.token.clone(), object.clone());
                    self.vars.insert(token.clone(), object);
                }
                Err(object) => env.diag().errorf(
                    ErrorCode::IncorrectConfigType,
                    format!(
                        "configuration variable '{token}' expects {}, got {}",
                        var.ty.as_str(),
                        object.type_name()
                    ),
                ),
            }
        }
    }
}
