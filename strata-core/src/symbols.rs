//! Symbol table produced by binding a package

use crate::package::{Expr, VarType};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use strata_config::Token;

/// A bound global variable
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableSymbol {
    pub token: Token,
    #[serde(rename = "type")]
    pub ty: VarType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A bound init statement, target resolved to its token
#[derive(Clone, Debug, PartialEq)]
pub struct BoundInit {
    pub target: Token,
    pub value: Expr,
}

/// The package symbol: everything a compilation knows about one package
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PackageSymbol {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub variables: BTreeMap<Token, VariableSymbol>,
    #[serde(skip)]
    pub init: Vec<BoundInit>,
}

impl PackageSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        PackageSymbol {
            name: name.into(),
            description: None,
            version: None,
            variables: BTreeMap::new(),
            init: Vec::new(),
        }
    }

    /// Token for a member of this package
    pub fn token(&self, member: &str) -> Token {
        Token::new(&self.name, member)
    }

    /// Resolve a simple member name or a qualified token to a declared variable
    pub fn resolve(&self, name: &str) -> Option<&VariableSymbol> {
        let token = Token::from(name);
        if token.is_qualified() {
            self.variables.get(&token)
        } else {
            self.variables.get(&self.token(token.member()))
        }
    }
}
