//! Package locator: resolves the package argument into a descriptor and root

use crate::config::RunConfig;
use std::path::{Path, PathBuf};
use strata_core::{Package, PackageError};
use strata_log::debug;

/// Package argument that reads the descriptor from standard input
pub const STDIN_SENTINEL: &str = "-";

/// Result of locating a package argument
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// Present only when a package argument was supplied
    pub package: Option<Package>,
    /// Empty means "use the working directory"
    pub root: PathBuf,
}

impl Located {
    pub fn has_root(&self) -> bool {
        !self.root.as_os_str().is_empty()
    }
}

pub struct PackageLocator<'a> {
    config: &'a RunConfig,
}

impl<'a> PackageLocator<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        PackageLocator { config }
    }

    /// Resolve `arg`:
    /// - none: no package, empty root
    /// - `-`: descriptor read from stdin, empty root
    /// - a directory or manifest path: descriptor and its root
    pub fn locate(&self, arg: Option<&str>) -> Result<Located, PackageError> {
        let Some(arg) = arg else {
            return Ok(Located {
                package: None,
                root: PathBuf::new(),
            });
        };

        if arg == STDIN_SENTINEL {
            debug!(self.config.logger, "reading package from stdin");
            let pkg = Package::from_reader((self.config.stdin)())?;
            return Ok(Located {
                package: Some(pkg),
                root: PathBuf::new(),
            });
        }

        let (pkg, root) = Package::load(self.config.vfs.as_ref(), Path::new(arg))?;
        debug!(
            self.config.logger,
            "loaded package '{}' rooted at '{}'",
            pkg.name,
            root.display()
        );
        Ok(Located {
            package: Some(pkg),
            root,
        })
    }
}
