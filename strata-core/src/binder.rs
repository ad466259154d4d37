//! 绑定器：把包描述转换为符号表
//!
//! 检查重复声明以及指向未声明全局变量的初始化语句和引用。
//! 错误写入 `DiagSink`，绑定本身总是产出一个（可能不完整的）符号表。

use crate::diag::{DiagSink, ErrorCode};
use crate::package::{Expr, Package};
use crate::symbols::{BoundInit, PackageSymbol, VariableSymbol};

/// Bind `pkg`, reporting problems to `diag`
pub fn bind(pkg: &Package, diag: &DiagSink) -> PackageSymbol {
    let mut symbol = PackageSymbol::new(pkg.name.clone());
    symbol.description = pkg.description.clone();
    symbol.version = pkg.version.clone();

    for decl in &pkg.variables {
        let token = symbol.token(&decl.name);
        if symbol.variables.contains_key(&token) {
            diag.errorf(
                ErrorCode::DuplicateMember,
                format!("variable '{token}' is declared more than once"),
            );
            continue;
        }
        symbol.variables.insert(
            token.clone(),
            VariableSymbol {
                token,
                ty: decl.ty,
                default: decl.default.clone(),
                description: decl.description.clone(),
            },
        );
    }

    for stmt in &pkg.init {
        let target = match symbol.resolve(&stmt.name) {
            Some(var) => var.token.clone(),
            None => {
                diag.errorf(
                    ErrorCode::SymbolNotFound,
                    format!("init target '{}' is not a declared variable", stmt.name),
                );
                continue;
            }
        };
        check_refs(&symbol, &stmt.value, diag);
        symbol.init.push(BoundInit {
            target,
            value: stmt.value.clone(),
        });
    }

    symbol
}

fn check_refs(symbol: &PackageSymbol, expr: &Expr, diag: &DiagSink) {
    match expr {
        Expr::Ref(name) if symbol.resolve(name).is_none() => {
            diag.errorf(
                ErrorCode::SymbolNotFound,
                format!("reference to undeclared variable '{name}'"),
            );
        }
        Expr::Concat(parts) => {
            for part in parts {
                check_refs(symbol, part, diag);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_log::Logger;

    fn bind_str(src: &str) -> (PackageSymbol, std::sync::Arc<DiagSink>) {
        let pkg = Package::from_str(src, "test").unwrap();
        let diag = DiagSink::new(Logger::noop());
        let symbol = bind(&pkg, &diag);
        (symbol, diag)
    }

    #[test]
    fn test_bind_ok() {
        let (symbol, diag) = bind_str(
            r#"{"name": "app",
                "variables": [{"name": "a"}, {"name": "b", "type": "number"}],
                "init": [{"name": "app:b", "value": {"literal": 1}}]}"#,
        );
        assert!(diag.success());
        assert_eq!(symbol.variables.len(), 2);
        assert_eq!(symbol.init.len(), 1);
        assert_eq!(symbol.init[0].target.as_str(), "app:b");
    }

    #[test]
    fn test_duplicate_member() {
        let (symbol, diag) = bind_str(
            r#"{"name": "app", "variables": [{"name": "a"}, {"name": "a"}]}"#,
        );
        assert_eq!(symbol.variables.len(), 1);
        assert_eq!(diag.with_code(ErrorCode::DuplicateMember).len(), 1);
    }

    #[test]
    fn test_unknown_init_target() {
        let (symbol, diag) = bind_str(
            r#"{"name": "app", "init": [{"name": "ghost", "value": {"literal": 1}}]}"#,
        );
        assert!(symbol.init.is_empty());
        assert_eq!(diag.with_code(ErrorCode::SymbolNotFound).len(), 1);
    }

    #[test]
    fn test_unknown_ref_in_concat() {
        let (_, diag) = bind_str(
            r#"{"name": "app", "variables": [{"name": "a"}],
                "init": [{"name": "a", "value": {"concat": [{"ref": "nope"}, {"literal": "x"}]}}]}"#,
        );
        assert_eq!(diag.errors(), 1);
        assert_eq!(diag.with_code(ErrorCode::SymbolNotFound).len(), 1);
    }
}
