//! Package descriptors (`Strata.json` manifests)

use crate::runtime::Object;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use strata_vfs::{VfsError, VirtualFileSystem};
use thiserror::Error;

/// Manifest file name looked up inside package directories
pub const MANIFEST_FILE: &str = "Strata.json";

/// Failure to read or parse a package descriptor
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("package path '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("directory '{}' has no Strata.json manifest", dir.display())]
    ManifestNotFound { dir: PathBuf },

    #[error(transparent)]
    Vfs(#[from] VfsError),

    #[error("failed to read package: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid package manifest '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid package: {0}")]
    Invalid(String),
}

/// Declared type of a package variable
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    String,
    Number,
    Bool,
    #[default]
    Any,
}

impl VarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Number => "number",
            VarType::Bool => "bool",
            VarType::Any => "any",
        }
    }

    /// Convert `value` to this type. Strings are coerced into numbers and
    /// bools when they parse; `null` is accepted by every type.
    ///
    /// Returns the original object when it cannot be converted.
    pub fn coerce(&self, value: Object) -> Result<Object, Object> {
        match (self, value) {
            (VarType::Any, v) => Ok(v),
            (_, Object::Null) => Ok(Object::Null),
            (VarType::String, v @ Object::String(_)) => Ok(v),
            (VarType::String, Object::Number(n)) => Ok(Object::String(Object::Number(n).to_string())),
            (VarType::String, Object::Bool(b)) => Ok(Object::String(b.to_string())),
            (VarType::Number, v @ Object::Number(_)) => Ok(v),
            // "NaN" and "inf" parse as f64 but are not numbers a package can hold
            (VarType::Number, Object::String(s)) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Object::Number(n)),
                _ => Err(Object::String(s)),
            },
            (VarType::Bool, v @ Object::Bool(_)) => Ok(v),
            (VarType::Bool, Object::String(s)) => match s.as_str() {
                "true" => Ok(Object::Bool(true)),
                "false" => Ok(Object::Bool(false)),
                _ => Err(Object::String(s)),
            },
            (_, v) => Err(v),
        }
    }
}

/// A global variable declared by a package
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: VarType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Initializer expression
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expr {
    Literal(Value),
    /// Current value of another global (simple name or token)
    Ref(String),
    /// Program argument passed after `--`
    Arg(String),
    /// String concatenation of the parts
    Concat(Vec<Expr>),
}

/// Top-level statement: assign `value` to the global `name`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitStatement {
    pub name: String,
    pub value: Expr,
}

/// Package descriptor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    #[serde(default)]
    pub init: Vec<InitStatement>,
}

impl Package {
    /// Parse a manifest from a JSON string
    pub fn from_str(source: &str, origin: &str) -> Result<Self, PackageError> {
        let pkg: Package = serde_json::from_str(source).map_err(|source| PackageError::Parse {
            path: origin.to_string(),
            source,
        })?;
        pkg.validate()?;
        Ok(pkg)
    }

    /// Parse a manifest from a reader (standard input)
    pub fn from_reader(mut reader: impl Read) -> Result<Self, PackageError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Self::from_str(&source, "<stdin>")
    }

    /// Load the package at `path` and return it with its root directory.
    ///
    /// A directory loads `path/Strata.json` with `path` as root; a file loads
    /// itself with its parent directory as root (`.` when it has none).
    pub fn load(vfs: &dyn VirtualFileSystem, path: &Path) -> Result<(Self, PathBuf), PackageError> {
        let (manifest, root) = if vfs.is_dir(path) {
            let manifest = path.join(MANIFEST_FILE);
            if !vfs.is_file(&manifest) {
                return Err(PackageError::ManifestNotFound {
                    dir: path.to_path_buf(),
                });
            }
            (manifest, path.to_path_buf())
        } else if vfs.is_file(path) {
            let root = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (path.to_path_buf(), root)
        } else {
            return Err(PackageError::NotFound(path.to_path_buf()));
        };

        let source = vfs.read_to_string(&manifest)?;
        let pkg = Self::from_str(&source, &manifest.to_string_lossy())?;
        Ok((pkg, root))
    }

    fn validate(&self) -> Result<(), PackageError> {
        if self.name.trim().is_empty() {
            return Err(PackageError::Invalid("package name must not be empty".into()));
        }
        if self.name.contains(strata_config::TOKEN_DELIMITER) {
            return Err(PackageError::Invalid(format!(
                "package name '{}' must not contain '{}'",
                self.name,
                strata_config::TOKEN_DELIMITER
            )));
        }
        Ok(())
    }
}
