//! Config injection: turns an optional `ConfigMap` into a preexec hook

use strata_core::{ConfigApplier, ConfigMap};

/// No config, no hook. Otherwise an applier over a copy of `config` with an
/// empty `ConfigVars` that it fills in when the compiler runs it.
pub fn make_hook(config: Option<&ConfigMap>) -> Option<ConfigApplier> {
    config.map(|config| ConfigApplier::new(config.clone()))
}
