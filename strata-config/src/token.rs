//! Token - qualified names for configuration keys and program entities

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Separator between the package and member parts of a token
pub const TOKEN_DELIMITER: char = ':';

/// A fully-qualified name such as `app:key`.
///
/// Simple names (no package part) are also valid tokens; program arguments use them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Join a package name and a member name
    pub fn new(package: &str, member: &str) -> Self {
        Token(format!("{package}{TOKEN_DELIMITER}{member}"))
    }

    /// Parse a qualified token, rejecting empty parts
    pub fn parse_qualified(s: &str) -> Result<Self, ConfigError> {
        match s.split_once(TOKEN_DELIMITER) {
            Some((pkg, member)) if !pkg.is_empty() && !member.is_empty() => Ok(Token(s.to_string())),
            _ => Err(ConfigError::InvalidToken(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Package part, if the token is qualified
    pub fn package(&self) -> Option<&str> {
        self.0.split_once(TOKEN_DELIMITER).map(|(pkg, _)| pkg)
    }

    /// Member part (the whole token for simple names)
    pub fn member(&self) -> &str {
        match self.0.split_once(TOKEN_DELIMITER) {
            Some((_, member)) => member,
            None => &self.0,
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.package().is_some()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token(s)
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}
