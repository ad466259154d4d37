//! CLI 格式化输出
//!
//! 诊断写到 stderr，编译摘要和包信息写到 stdout（文本或 JSON）。

use serde::Serialize;
use std::collections::BTreeMap;
use strata_api::{CompileResult, Diag, DiagSink, Object, Package};
use strata_core::VarType;

/// 打印全部诊断及统计
pub fn print_diagnostics(diag: &DiagSink) {
    for d in diag.diags() {
        eprintln!("{d}");
    }
    let (errors, warnings) = (diag.errors(), diag.warnings());
    if errors > 0 || warnings > 0 {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }
}

/// 编译摘要
#[derive(Debug, Serialize)]
pub struct CompileSummary {
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub globals: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, serde_json::Value>>,
    pub diagnostics: Vec<Diag>,
}

pub fn compile_summary(result: &CompileResult, diag: &DiagSink) -> CompileSummary {
    let to_json = |value: &Object| serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
    CompileSummary {
        root: result.compiler.root().display().to_string(),
        package: result.package.as_ref().map(|p| p.name.clone()),
        globals: result
            .heap
            .iter()
            .flat_map(|heap| heap.globals())
            .map(|(token, value)| (token.to_string(), to_json(value)))
            .collect(),
        config: result.config_vars.as_ref().map(|vars| {
            vars.iter()
                .map(|(token, value)| (token.to_string(), to_json(value)))
                .collect()
        }),
        diagnostics: diag.diags(),
    }
}

/// 包信息（不编译）
#[derive(Debug, Serialize)]
pub struct InfoSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    pub variables: Vec<(String, VarType)>,
    pub root: String,
}

pub fn info_summary(pkg: &Package, root: &std::path::Path) -> InfoSummary {
    InfoSummary {
        name: pkg.name.clone(),
        description: pkg.description.clone(),
        version: pkg.version.clone(),
        dependencies: pkg.dependencies.clone(),
        variables: pkg
            .variables
            .iter()
            .map(|v| (v.name.clone(), v.ty))
            .collect(),
        root: if root.as_os_str().is_empty() {
            ".".to_string()
        } else {
            root.display().to_string()
        },
    }
}

/// 以 JSON 或文本打印摘要
pub fn print_summary<T: Serialize + TextSummary>(summary: &T, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("failed to serialize output: {err}"),
        }
    } else {
        print!("{}", summary.to_text());
    }
}

/// 文本格式输出
pub trait TextSummary {
    fn to_text(&self) -> String;
}

impl TextSummary for CompileSummary {
    fn to_text(&self) -> String {
        let mut out = String::new();
        match &self.package {
            Some(name) => out.push_str(&format!("package {name} ({})\n", self.root)),
            None => out.push_str(&format!("no package compiled ({})\n", self.root)),
        }
        for (token, value) in &self.globals {
            out.push_str(&format!("  {token} = {value}\n"));
        }
        if let Some(config) = &self.config {
            out.push_str(&format!("config applied: {}\n", config.len()));
            for (token, value) in config {
                out.push_str(&format!("  {token} = {value}\n"));
            }
        }
        out
    }
}

impl TextSummary for InfoSummary {
    fn to_text(&self) -> String {
        let mut out = self.name.clone();
        if let Some(version) = &self.version {
            out.push_str(&format!(" {version}"));
        }
        out.push('\n');
        if let Some(description) = &self.description {
            out.push_str(&format!("  {description}\n"));
        }
        out.push_str(&format!("  root: {}\n", self.root));
        for (name, version) in &self.dependencies {
            out.push_str(&format!("  depends on {name} {version}\n"));
        }
        for (name, ty) in &self.variables {
            out.push_str(&format!("  var {}:{name}: {}\n", self.name, ty.as_str()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_info_text() {
        let pkg = Package::from_str(
            r#"{"name": "app", "version": "1.2.0", "dependencies": {"std": "1"},
                "variables": [{"name": "key", "type": "string"}]}"#,
            "test",
        )
        .unwrap();
        let text = info_summary(&pkg, Path::new("")).to_text();

        assert!(text.starts_with("app 1.2.0\n"));
        assert!(text.contains("  root: .\n"));
        assert!(text.contains("depends on std 1"));
        assert!(text.contains("var app:key: string"));
    }

    #[test]
    fn test_info_json() {
        let pkg = Package::from_str(r#"{"name": "app"}"#, "test").unwrap();
        let json = serde_json::to_value(info_summary(&pkg, Path::new("proj"))).unwrap();
        assert_eq!(json["name"], "app");
        assert_eq!(json["root"], "proj");
        assert!(json.get("version").is_none());
    }
}
